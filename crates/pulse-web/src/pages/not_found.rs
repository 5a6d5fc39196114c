//! 404 Page

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <span class="badge">"⚡ 404 Error"</span>
            <h1>"Page Not Found"</h1>
            <p class="muted">
                "Oops! The page you are looking for does not exist. It might have been removed or you typed an incorrect URL."
            </p>
            <a href="/" class="btn btn-primary btn-lg">"Go Home →"</a>
        </div>
    }
}
