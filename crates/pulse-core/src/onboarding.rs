//! Onboarding Wizard
//!
//! Three linear steps collecting assets, investor type and content types,
//! submitted together as one [`Preferences`] payload.

use crate::backend::Backend;
use crate::error::{PulseError, Result};
use crate::model::{InvestorType, Preferences};
use crate::notify::{Notification, Route, Transition};

/// Wizard step, numbered from 1
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    #[default]
    Assets = 1,
    InvestorType = 2,
    ContentTypes = 3,
}

impl Step {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Assets => "What crypto assets interest you?",
            Self::InvestorType => "What type of investor are you?",
            Self::ContentTypes => "What content would you like to see?",
        }
    }

    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Assets => "Select all that apply",
            Self::InvestorType => "Choose the one that fits best",
            Self::ContentTypes => "Choose your preferred content types",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Assets => Self::InvestorType,
            Self::InvestorType | Self::ContentTypes => Self::ContentTypes,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Assets | Self::InvestorType => Self::Assets,
            Self::ContentTypes => Self::InvestorType,
        }
    }
}

/// The forward button's role on the current step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    CompleteSetup,
}

impl PrimaryAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::CompleteSetup => "Complete Setup",
        }
    }
}

/// Wizard state: current step plus accumulated selections
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Onboarding {
    step: Step,
    preferences: Preferences,
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn step(&self) -> Step {
        self.step
    }

    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn toggle_asset(&mut self, asset: &str) {
        toggle(&mut self.preferences.crypto_assets, asset);
    }

    pub const fn select_investor_type(&mut self, kind: InvestorType) {
        self.preferences.investor_type = Some(kind);
    }

    pub fn toggle_content_type(&mut self, content: &str) {
        toggle(&mut self.preferences.content_types, content);
    }

    pub fn can_go_back(&self) -> bool {
        self.step > Step::Assets
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.step == Step::ContentTypes {
            PrimaryAction::CompleteSetup
        } else {
            PrimaryAction::Next
        }
    }

    /// Advance one step; stays put on the last step
    pub const fn next(&mut self) {
        self.step = self.step.next();
    }

    /// Go back one step; stays put on the first step
    pub const fn back(&mut self) {
        self.step = self.step.previous();
    }

    /// Submit the collected preferences.
    ///
    /// Only allowed on the last step. A backend failure leaves the wizard
    /// where it was with every selection intact.
    pub async fn complete(&self, backend: &dyn Backend) -> Result<Transition> {
        if self.step != Step::ContentTypes {
            return Err(PulseError::Onboarding(format!(
                "cannot complete setup from step {}",
                self.step.number()
            )));
        }

        tracing::debug!(
            assets = self.preferences.crypto_assets.len(),
            content = self.preferences.content_types.len(),
            "Saving preferences"
        );

        Ok(match backend.save_preferences(&self.preferences).await {
            Ok(()) => {
                tracing::info!("Preferences saved");
                Transition::notify(Notification::info(
                    "Preferences saved!",
                    "Your dashboard is being personalized...",
                ))
                .navigate_to(Route::Dashboard)
            }
            Err(e) => {
                tracing::warn!("Failed to save preferences: {}", e);
                Transition::notify(Notification::error("Failed to save preferences", e.user_message()))
            }
        })
    }
}
