//! Main App Component

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::{NavigateOptions, components::*, path};

use pulse_core::{Notification, PulseConfig, Transition};
use pulse_runtime::Clients;

use crate::components::Toast;
use crate::pages::{DashboardPage, LandingPage, LoginPage, NotFoundPage, OnboardingPage};

/// Shared by every page through context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<PulseConfig>,
    pub clients: Clients,
    pub toast: RwSignal<Option<Notification>>,
}

impl AppContext {
    pub fn notify(&self, notification: Notification) {
        self.toast.set(Some(notification));
    }

    /// Show the transition's toast, then follow its navigation
    pub fn show(&self, transition: Transition, navigate: &impl Fn(&str, NavigateOptions)) {
        if let Some(notification) = transition.notification {
            self.notify(notification);
        }
        if let Some(route) = transition.navigate {
            navigate(route.path(), NavigateOptions::default());
        }
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

/// Root application component
#[component]
pub fn App(config: PulseConfig, clients: Clients) -> impl IntoView {
    provide_context(AppContext {
        config: Arc::new(config),
        clients,
        toast: RwSignal::new(None),
    });

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=LandingPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/onboarding") view=OnboardingPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                </Routes>
            </main>
            <Toast />
        </Router>
    }
}
