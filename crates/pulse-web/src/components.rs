//! UI Components

use leptos::prelude::*;

use pulse_core::display::{Trend, format_change, format_usd, time_ago};
use pulse_core::{Coin, NewsItem, Section, Variant, Vote, VoteBoard};

use crate::app::use_app;

/// Toast for the most recent notification
#[component]
pub fn Toast() -> impl IntoView {
    let toast = use_app().toast;

    move || {
        toast.get().map(|note| {
            let class = match note.variant {
                Variant::Default => "toast",
                Variant::Destructive => "toast toast-destructive",
            };
            view! {
                <div class=class role="status">
                    <strong>{note.title}</strong>
                    <p>{note.description}</p>
                    <button class="toast-close" on:click=move |_| toast.set(None)>"×"</button>
                </div>
            }
        })
    }
}

/// Card wrapper with thumbs up/down for one dashboard section
#[component]
pub fn SectionCard(
    section: Section,
    votes: Signal<VoteBoard>,
    on_vote: Callback<(Section, Vote)>,
    children: Children,
) -> impl IntoView {
    let current = move || votes.get().get(section);
    let up_class = move || if current() == Some(Vote::Up) { "btn btn-sm btn-active" } else { "btn btn-sm btn-ghost" };
    let down_class =
        move || if current() == Some(Vote::Down) { "btn btn-sm btn-destructive" } else { "btn btn-sm btn-ghost" };

    view! {
        <section class=format!("card card-{}", section.as_str())>
            <header class="card-header">
                <div>
                    <h3>{section.title()}</h3>
                    <p class="muted">{section.description()}</p>
                </div>
                <div class="votes">
                    <button class=up_class on:click=move |_| on_vote.run((section, Vote::Up))>"👍"</button>
                    <button class=down_class on:click=move |_| on_vote.run((section, Vote::Down))>"👎"</button>
                </div>
            </header>
            <div class="card-content">{children()}</div>
        </section>
    }
}

/// One headline
#[component]
pub fn NewsRow(item: NewsItem) -> impl IntoView {
    let age = time_ago(item.published_at, chrono::Utc::now());

    view! {
        <div class="news-item">
            <h4>{item.title}</h4>
            <p class="muted">{format!("{} • {}", item.kind, age)}</p>
        </div>
    }
}

/// One asset with price and 24h change
#[component]
pub fn CoinRow(coin: Coin) -> impl IntoView {
    let trend = Trend::of(coin.change_24h);
    let class = match trend {
        Trend::Up => "change change-up",
        Trend::Down => "change change-down",
    };

    view! {
        <div class="coin">
            <h4>{coin.label().to_string()}</h4>
            <div class="coin-price">
                <p class="price">{format_usd(coin.price)}</p>
                <p class=class>{format!("{} {}", trend.arrow(), format_change(coin.change_24h))}</p>
            </div>
        </div>
    }
}

/// Shown instead of the app when configuration could not be loaded
#[component]
pub fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class="config-error">
            <h1>"CryptoPulse is not configured"</h1>
            <p>{message}</p>
            <p class="muted">
                "Serve a pulse-config.json next to index.html with openrouter_api_key and cryptopanic_token set."
            </p>
        </div>
    }
}
