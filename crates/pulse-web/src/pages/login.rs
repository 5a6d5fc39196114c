//! Login Page

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use pulse_core::Credentials;

use crate::app::use_app;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);

        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());
        let ctx = ctx.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let transition = ctx.clients.auth().login(&credentials).await;
            ctx.show(transition, &navigate);
            set_busy.try_set(false);
        });
    };

    view! {
        <div class="login">
            <form class="card" on:submit=submit>
                <h2>"Login"</h2>
                <div class="field">
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        required
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="field">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        required
                        placeholder="••••••••"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || if busy.get() { "..." } else { "Login" }}
                </button>
                <p class="muted">
                    "Don't have an account? " <a href="/onboarding">"Get started"</a>
                </p>
            </form>
        </div>
    }
}
