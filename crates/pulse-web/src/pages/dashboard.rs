//! Dashboard Page
//!
//! Feeds run inside a [`RequestScope`] owned by the page; leaving the page
//! drops the scope, which aborts anything still in flight.

use std::pin::pin;

use futures::StreamExt;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use pulse_core::{DashboardState, InsightState, NewsState, RequestScope, Section, Vote};

use crate::app::use_app;
use crate::components::{CoinRow, NewsRow, SectionCard};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let state = RwSignal::new(DashboardState::new(ctx.config.meme_url.clone()));

    let scope = RequestScope::new();
    let handle = scope.handle();
    on_cleanup(move || drop(scope));

    let updates = ctx.clients.feeds(&ctx.config).updates(&handle);
    leptos::task::spawn_local(async move {
        let mut updates = pin!(updates);
        while let Some(update) = updates.next().await {
            state.try_update(|s| s.apply(update));
        }
    });

    let recorder = ctx.clients.recorder();
    let toast = ctx.toast;
    let on_vote = Callback::new(move |(section, vote): (Section, Vote)| {
        let Some(pending) = state.try_update(|s| recorder.cast(&mut s.votes, section, vote)) else {
            return;
        };
        let (recorder, handle) = (recorder.clone(), handle.clone());
        leptos::task::spawn_local(async move {
            let Some(outcome) = handle.run(recorder.submit(&pending)).await else {
                return;
            };
            if let Some(note) = state.try_update(|s| recorder.settle(&mut s.votes, &pending, &outcome)) {
                toast.set(Some(note));
            }
        });
    });

    let votes = Signal::derive(move || state.with(|s| s.votes));

    let logout = {
        let ctx = ctx.clone();
        move |_| {
            let transition = ctx.clients.auth().logout();
            ctx.show(transition, &navigate);
        }
    };

    let news = move || {
        state.with(|s| match &s.news {
            NewsState::Loading => view! { <p class="muted">"Loading..."</p> }.into_any(),
            NewsState::Failed => ().into_any(),
            NewsState::Loaded(items) => items
                .iter()
                .cloned()
                .map(|item| view! { <NewsRow item=item /> })
                .collect_view()
                .into_any(),
        })
    };

    let prices = move || {
        state.with(|s| {
            if s.prices.loading {
                view! { <p class="muted">"Loading..."</p> }.into_any()
            } else if let Some(error) = s.prices.error.clone() {
                view! { <p class="error">{error}</p> }.into_any()
            } else {
                s.prices
                    .coins
                    .iter()
                    .cloned()
                    .map(|coin| view! { <CoinRow coin=coin /> })
                    .collect_view()
                    .into_any()
            }
        })
    };

    let insight = move || {
        state.with(|s| match &s.insight {
            InsightState::Pending => view! { <p class="muted">"Loading..."</p> }.into_any(),
            InsightState::Ready(text) => view! { <p class="insight">{text.clone()}</p> }.into_any(),
            InsightState::Unavailable => ().into_any(),
        })
    };

    let meme_url = state.with_untracked(|s| s.meme_url.clone());

    view! {
        <div class="dashboard">
            <nav class="topbar">
                <span class="brand">"✨ CryptoPulse"</span>
                <button class="btn btn-ghost" on:click=logout>"Logout"</button>
            </nav>

            <div class="welcome">
                <h2>"Welcome back!"</h2>
                <p class="muted">"Here's your personalized crypto digest for today"</p>
            </div>

            <div class="grid">
                <SectionCard section=Section::News votes=votes on_vote=on_vote>
                    {news}
                </SectionCard>
                <SectionCard section=Section::Prices votes=votes on_vote=on_vote>
                    {prices}
                </SectionCard>
                <SectionCard section=Section::Ai votes=votes on_vote=on_vote>
                    {insight}
                </SectionCard>
                <SectionCard section=Section::Meme votes=votes on_vote=on_vote>
                    <img src=meme_url alt="Crypto meme" class="meme" />
                </SectionCard>
            </div>
        </div>
    }
}
