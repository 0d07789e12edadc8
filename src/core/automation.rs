// src/core/automation.rs
//! Run-state lifecycle and daily-limit accounting for automations.

use tracing::info;

use crate::error::CoreError;
use crate::types::automation::{AutomationDraft, AutomationId, AutomationRecord, RunOutcome, RunState};

impl AutomationRecord {
    /// Build a record from the quick-create form.
    ///
    /// Hard invariant, not a default: the record starts `Paused` with a zero
    /// counter regardless of any state the payload carried, so a user must
    /// explicitly review and resume before it takes real-world action.
    pub fn create(id: AutomationId, draft: &AutomationDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            target_titles: draft.target_titles.clone(),
            locations: draft.locations.clone(),
            daily_limit: draft.daily_limit,
            platforms: draft.platforms.clone(),
            cover_letter: draft.cover_letter.clone(),
            state: RunState::Paused,
            applications_today: 0,
        }
    }

    /// Stop a running automation. Leaves `applications_today` alone.
    pub fn pause(&mut self) -> Result<(), CoreError> {
        if self.state != RunState::Running {
            return Err(CoreError::InvalidTransition {
                entity: "automation",
                from: self.state.as_str().to_owned(),
                action: "pause",
            });
        }
        self.state = RunState::Paused;
        Ok(())
    }

    /// Put a paused automation back to work.
    pub fn resume(&mut self) -> Result<(), CoreError> {
        if self.state != RunState::Paused {
            return Err(CoreError::InvalidTransition {
                entity: "automation",
                from: self.state.as_str().to_owned(),
                action: "resume",
            });
        }
        self.state = RunState::Running;
        Ok(())
    }

    /// Derived limit flag. A zero limit means "unbounded", never "always
    /// blocked".
    pub fn is_limit_exceeded(&self) -> bool {
        self.daily_limit > 0 && self.applications_today >= self.daily_limit
    }

    /// How many applications the daily limit still allows today, `None` when
    /// the limit is unbounded.
    pub fn remaining_allowance(&self) -> Option<u32> {
        if self.daily_limit == 0 {
            None
        } else {
            Some(self.daily_limit.saturating_sub(self.applications_today))
        }
    }

    /// Merge a backend run result. The backend's counter is authoritative:
    /// it overwrites the local copy, it is never added to it.
    pub fn merge_run_outcome(&mut self, outcome: &RunOutcome) {
        self.applications_today = outcome.applications_today;
        if outcome.limit_reached {
            info!(
                automation = %self.id,
                applications_today = self.applications_today,
                "automation reached its daily limit"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn record(state: RunState, daily_limit: u32, applications_today: u32) -> AutomationRecord {
        AutomationRecord {
            id: AutomationId::new("auto-1"),
            name: "Backend roles".into(),
            target_titles: "rust engineer, backend developer".into(),
            locations: "Geneva, remote".into(),
            daily_limit,
            platforms: BTreeSet::from(["linkedin".to_owned()]),
            cover_letter: None,
            state,
            applications_today,
        }
    }

    #[test]
    fn create_forces_paused_with_zero_counter() {
        let draft = AutomationDraft {
            name: "Backend roles".into(),
            daily_limit: 25,
            // A payload smuggling in a run state must be ignored.
            state: Some(RunState::Running),
            applications_today: Some(17),
            ..Default::default()
        };
        let record = AutomationRecord::create(AutomationId::new("auto-1"), &draft);

        assert_eq!(record.state, RunState::Paused);
        assert_eq!(record.applications_today, 0);
        assert_eq!(record.daily_limit, 25);
    }

    #[test]
    fn limit_exceeded_only_with_positive_limit() {
        assert!(record(RunState::Running, 25, 25).is_limit_exceeded());
        assert!(record(RunState::Running, 25, 30).is_limit_exceeded());
        assert!(!record(RunState::Running, 25, 24).is_limit_exceeded());
        assert!(!record(RunState::Running, 0, 999).is_limit_exceeded());
    }

    #[test]
    fn remaining_allowance_floors_at_zero() {
        assert_eq!(record(RunState::Running, 25, 10).remaining_allowance(), Some(15));
        assert_eq!(record(RunState::Running, 25, 30).remaining_allowance(), Some(0));
        assert_eq!(record(RunState::Running, 0, 10).remaining_allowance(), None);
    }

    #[test]
    fn pause_requires_running() {
        let mut paused = record(RunState::Paused, 25, 3);
        assert!(paused.pause().unwrap_err().is_invalid_transition());
        assert_eq!(paused.state, RunState::Paused);
    }

    #[test]
    fn resume_requires_paused() {
        let mut running = record(RunState::Running, 25, 3);
        assert!(running.resume().unwrap_err().is_invalid_transition());
        assert_eq!(running.state, RunState::Running);
    }

    #[test]
    fn pause_then_resume_keeps_counter() {
        let mut automation = record(RunState::Running, 25, 12);
        automation.pause().unwrap();
        assert_eq!(automation.state, RunState::Paused);
        assert_eq!(automation.applications_today, 12);

        automation.resume().unwrap();
        assert_eq!(automation.state, RunState::Running);
        assert_eq!(automation.applications_today, 12);
    }

    #[test]
    fn run_outcome_overwrites_counter() {
        let mut automation = record(RunState::Running, 25, 10);
        let outcome = RunOutcome {
            applied_count: 15,
            limit_reached: true,
            message: "daily limit reached".into(),
            applications_today: 25,
        };
        automation.merge_run_outcome(&outcome);

        // Overwritten to 25, not incremented to 35.
        assert_eq!(automation.applications_today, 25);
        assert!(automation.is_limit_exceeded());
    }
}
