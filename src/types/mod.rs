// src/types/mod.rs
//! Wire-facing domain types shared by every view of the product.

pub mod automation;
pub mod job;
pub mod setup;

pub use automation::{AutomationDraft, AutomationId, AutomationRecord, RunOutcome, RunState};
pub use job::{ApplicationStatus, BadgeCategory, JobId, JobRecord, LinkId, MatchQuality, UserJobLink};
pub use setup::{ResumeInfo, SetupData, SetupStatus};
