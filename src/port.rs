// src/port.rs
//! The backend collaborator interface.
//!
//! The engine depends only on this trait, never on a concrete HTTP client,
//! so a real backend, a staging one, or an in-memory double can be swapped
//! in without touching the domain logic. Real work — matching, rate
//! limiting, the daily counter reset — happens behind this boundary.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::automation::{AutomationDraft, AutomationId, AutomationRecord, RunOutcome};
use crate::types::job::{JobId, JobRecord, LinkId, UserJobLink};
use crate::types::setup::SetupStatus;

#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn fetch_setup_status(&self) -> Result<SetupStatus, CoreError>;

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, CoreError>;

    async fn fetch_automations(&self) -> Result<Vec<AutomationRecord>, CoreError>;

    /// Submit a single application. The returned link has `status=submitted`
    /// and a populated `applied_at`.
    async fn apply_once(&self, job_id: &JobId) -> Result<UserJobLink, CoreError>;

    async fn save_job(&self, job_id: &JobId) -> Result<LinkId, CoreError>;

    async fn unsave_job(&self, link_id: &LinkId) -> Result<(), CoreError>;

    async fn attach_to_automation(
        &self,
        job_id: &JobId,
        automation_id: &AutomationId,
    ) -> Result<LinkId, CoreError>;

    /// Create an automation. The backend also guarantees paused-on-creation;
    /// the client re-asserts it locally.
    async fn create_automation(&self, draft: &AutomationDraft) -> Result<AutomationRecord, CoreError>;

    async fn pause_automation(&self, id: &AutomationId) -> Result<AutomationRecord, CoreError>;

    async fn resume_automation(&self, id: &AutomationId) -> Result<AutomationRecord, CoreError>;

    /// Run the automation up to its remaining allowance. The counting and the
    /// matching happen backend-side; the client only merges the summary.
    async fn run_automation(&self, id: &AutomationId) -> Result<RunOutcome, CoreError>;
}
