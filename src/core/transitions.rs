// src/core/transitions.rs
//! Status transition rules for user job links.
//!
//! This module is the single authority on which mutating actions are legal
//! for a link and how a successful action changes it. Views must call these
//! functions instead of patching status fields inline, so the job feed and
//! the per-automation job list can never disagree on what is applyable.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::types::job::{ApplicationStatus, BadgeCategory, UserJobLink};

impl ApplicationStatus {
    /// The one predicate gating every "Apply now" affordance.
    pub fn can_apply(&self) -> bool {
        matches!(self, Self::Saved | Self::Draft)
    }

    /// Human label for the status. Unknown wire values fall back to the raw
    /// string rather than erroring.
    pub fn label(&self) -> &str {
        match self {
            Self::Saved => "Saved",
            Self::Draft => "Draft",
            Self::Submitted => "Applied",
            Self::Reviewing => "Reviewing",
            Self::Interview => "Interview",
            Self::Rejected => "Rejected",
            Self::Accepted => "Accepted",
            Self::Withdrawn => "Withdrawn",
            Self::Other(raw) => raw,
        }
    }

    /// Presentation grouping, derived from the status alone.
    pub fn badge(&self) -> BadgeCategory {
        match self {
            Self::Submitted | Self::Reviewing | Self::Interview => BadgeCategory::Positive,
            Self::Saved | Self::Draft => BadgeCategory::Pending,
            _ => BadgeCategory::Neutral,
        }
    }
}

impl UserJobLink {
    /// Whether an apply action is currently legal for this link.
    pub fn can_apply(&self) -> bool {
        self.status.can_apply()
    }

    /// Submit the application. One-directional: there is no client operation
    /// that reverts `submitted` back to `saved` or `draft`.
    ///
    /// Fails with `InvalidTransition` instead of silently no-opping so a
    /// mis-gated caller is caught rather than masked.
    pub fn apply_once(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        if !self.can_apply() {
            return Err(CoreError::InvalidTransition {
                entity: "user job link",
                from: self.status.as_str().to_owned(),
                action: "apply to",
            });
        }
        self.status = ApplicationStatus::Submitted;
        self.applied_at = Some(now);
        Ok(())
    }
}
