//! Onboarding Page

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use pulse_core::model::{CONTENT_OPTIONS, CRYPTO_OPTIONS};
use pulse_core::{InvestorType, Notification, Onboarding, PrimaryAction, Step};

use crate::app::use_app;

fn option_class(selected: bool) -> &'static str {
    if selected { "option option-selected" } else { "option" }
}

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let wizard = RwSignal::new(Onboarding::new());
    let (saving, set_saving) = signal(false);

    let step = move || wizard.with(Onboarding::step);

    let choices = move || match step() {
        Step::Assets => CRYPTO_OPTIONS
            .into_iter()
            .map(|asset| {
                let selected = move || wizard.with(|w| w.preferences().crypto_assets.iter().any(|a| a == asset));
                view! {
                    <button class=move || option_class(selected()) on:click=move |_| wizard.update(|w| w.toggle_asset(asset))>
                        {asset}
                    </button>
                }
            })
            .collect_view()
            .into_any(),
        Step::InvestorType => InvestorType::ALL
            .into_iter()
            .map(|kind| {
                let selected = move || wizard.with(|w| w.preferences().investor_type == Some(kind));
                view! {
                    <button
                        class=move || option_class(selected())
                        on:click=move |_| wizard.update(|w| w.select_investor_type(kind))
                    >
                        <strong>{kind.label()}</strong>
                        <span class="muted">{kind.description()}</span>
                    </button>
                }
            })
            .collect_view()
            .into_any(),
        Step::ContentTypes => CONTENT_OPTIONS
            .into_iter()
            .map(|content| {
                let selected = move || wizard.with(|w| w.preferences().content_types.iter().any(|c| c == content));
                view! {
                    <button
                        class=move || option_class(selected())
                        on:click=move |_| wizard.update(|w| w.toggle_content_type(content))
                    >
                        {content}
                    </button>
                }
            })
            .collect_view()
            .into_any(),
    };

    let primary = move |_| match wizard.with_untracked(Onboarding::primary_action) {
        PrimaryAction::Next => wizard.update(Onboarding::next),
        PrimaryAction::CompleteSetup => {
            if saving.get_untracked() {
                return;
            }
            set_saving.set(true);
            let snapshot = wizard.get_untracked();
            let ctx = ctx.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match snapshot.complete(ctx.clients.backend.as_ref()).await {
                    Ok(transition) => ctx.show(transition, &navigate),
                    Err(e) => ctx.notify(Notification::error("Failed to save preferences", e.to_string())),
                }
                set_saving.try_set(false);
            });
        }
    };

    view! {
        <div class="onboarding">
            <div class="card">
                <p class="progress">{move || format!("Step {} of 3", step().number())}</p>
                <h2>{move || step().title()}</h2>
                <p class="muted">{move || step().subtitle()}</p>

                <div class="options">{choices}</div>

                <div class="wizard-actions">
                    <button
                        class="btn btn-ghost"
                        disabled=move || !wizard.with(Onboarding::can_go_back)
                        on:click=move |_| wizard.update(Onboarding::back)
                    >
                        "Back"
                    </button>
                    <button class="btn btn-primary" disabled=move || saving.get() on:click=primary>
                        {move || wizard.with(|w| w.primary_action().label())}
                    </button>
                </div>
            </div>
        </div>
    }
}
