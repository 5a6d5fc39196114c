//! Section Feedback
//!
//! Thumbs up/down per dashboard section. The local vote is committed before
//! the backend sees it, so the buttons react instantly.
//!
//! With the default [`VotePolicy::Optimistic`] feedback is fire-and-forget:
//! the vote board never reflects whether the backend acknowledged a vote,
//! only the notification does. [`VotePolicy::RevertOnFailure`] restores the
//! previous value when submission fails.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::backend::{Backend, Feedback};
use crate::error::Result;
use crate::model::{Section, Vote};
use crate::notify::Notification;

/// What happens to the local vote when the backend rejects it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VotePolicy {
    /// Keep the vote regardless of the submission outcome
    #[default]
    Optimistic,
    /// Put the previous value back if submission fails
    RevertOnFailure,
}

/// Per-section vote state for the current view. `None` means no vote cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteBoard {
    votes: [Option<Vote>; 4],
}

impl VoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn get(&self, section: Section) -> Option<Vote> {
        self.votes[section.index()]
    }

    /// Overwrite a section's vote, returning the previous value
    pub fn set(&mut self, section: Section, vote: Option<Vote>) -> Option<Vote> {
        std::mem::replace(&mut self.votes[section.index()], vote)
    }
}

/// A vote committed locally and waiting for submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFeedback {
    pub section: Section,
    pub vote: Vote,
    pub previous: Option<Vote>,
    pub timestamp: DateTime<Utc>,
}

impl PendingFeedback {
    pub fn payload(&self) -> Feedback {
        Feedback {
            section: self.section,
            vote: self.vote,
            timestamp: self.timestamp,
        }
    }
}

/// Toast for a settled submission
pub fn feedback_notification(vote: Vote, outcome: &Result<()>) -> Notification {
    match outcome {
        Ok(()) => Notification::info(
            match vote {
                Vote::Up => "Thanks for the feedback!",
                Vote::Down => "We'll improve this",
            },
            "Your preferences help us personalize your feed",
        ),
        Err(e) => Notification::error("Failed to send feedback", e.user_message()),
    }
}

/// Records votes locally and forwards them to the backend
#[derive(Clone)]
pub struct FeedbackRecorder {
    backend: Arc<dyn Backend>,
    policy: VotePolicy,
}

impl FeedbackRecorder {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            policy: VotePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: VotePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Commit the vote to the board immediately
    pub fn cast(&self, board: &mut VoteBoard, section: Section, vote: Vote) -> PendingFeedback {
        let previous = board.set(section, Some(vote));
        PendingFeedback {
            section,
            vote,
            previous,
            timestamp: Utc::now(),
        }
    }

    /// Send a committed vote to the backend
    pub async fn submit(&self, pending: &PendingFeedback) -> Result<()> {
        tracing::debug!(section = %pending.section, vote = %pending.vote, "Submitting feedback");
        self.backend.submit_feedback(&pending.payload()).await
    }

    /// Apply the vote policy to a settled submission and build its toast
    pub fn settle(&self, board: &mut VoteBoard, pending: &PendingFeedback, outcome: &Result<()>) -> Notification {
        if let Err(e) = outcome {
            tracing::warn!(section = %pending.section, "Feedback submission failed: {}", e);
            // Only revert if no newer vote replaced this one meanwhile.
            if self.policy == VotePolicy::RevertOnFailure && board.get(pending.section) == Some(pending.vote) {
                board.set(pending.section, pending.previous);
            }
        }
        feedback_notification(pending.vote, outcome)
    }

    /// Cast, submit and settle in one go
    pub async fn record(&self, board: &mut VoteBoard, section: Section, vote: Vote) -> Notification {
        let pending = self.cast(board, section, vote);
        let outcome = self.submit(&pending).await;
        self.settle(board, &pending, &outcome)
    }
}
