//! Notifications and Navigation
//!
//! User-facing outcomes of an action: a toast and, optionally, where to go
//! next. Views render these; the core never touches a UI toolkit.

use serde::{Deserialize, Serialize};

/// Toast styling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A toast notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.description)
    }
}

/// Application pages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Onboarding,
    Dashboard,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Onboarding => "/onboarding",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Result of a user action
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub notification: Option<Notification>,
    pub navigate: Option<Route>,
}

impl Transition {
    /// Nothing visible happens
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notify(notification: Notification) -> Self {
        Self {
            notification: Some(notification),
            navigate: None,
        }
    }

    pub const fn navigate_to(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }
}
