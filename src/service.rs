// src/service.rs
//! Orchestration consumed by the views.
//!
//! Every mutation follows the same shape: session check (inside the backend
//! adapter) and gate consult first, then the single-flight claim, then the
//! engine precondition, and only after the backend confirms success is local
//! state patched through the engine. A failed call therefore leaves the
//! entity exactly as it was.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::core::gate::{check_gate, GateDecision};
use crate::core::inflight::{EntityKey, InFlight};
use crate::core::links::LinkStore;
use crate::error::CoreError;
use crate::port::JobBackend;
use crate::types::automation::{AutomationDraft, AutomationId, AutomationRecord, RunOutcome};
use crate::types::job::{ApplicationStatus, JobId, JobRecord, LinkId, UserJobLink};
use crate::types::setup::SetupStatus;

/// Result of a gated mutation. Gate blocking is control flow, not an error:
/// a blocked user is redirected, a still-loading gate leaves the action
/// pending, and neither issues a backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    RedirectToSetup { redirect_to: &'static str },
    SetupPending,
}

impl<T> Outcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Client-side core shared by the dashboard, job list and automation views.
/// All state is per-user and fetched fresh per view mount.
pub struct CrypgoClient {
    backend: Arc<dyn JobBackend>,
    inflight: InFlight,
    setup: Option<SetupStatus>,
    jobs: Vec<JobRecord>,
    links: LinkStore,
    automations: HashMap<AutomationId, AutomationRecord>,
}

impl CrypgoClient {
    pub fn new(backend: Arc<dyn JobBackend>) -> Self {
        Self {
            backend,
            inflight: InFlight::new(),
            setup: None,
            jobs: Vec::new(),
            links: LinkStore::new(),
            automations: HashMap::new(),
        }
    }

    /// Current gate decision; `Unknown` until the setup status was fetched.
    pub fn gate(&self) -> GateDecision {
        check_gate(self.setup.as_ref())
    }

    pub async fn refresh_setup_status(&mut self) -> Result<GateDecision, CoreError> {
        let status = self.backend.fetch_setup_status().await?;
        self.setup = Some(status);
        Ok(self.gate())
    }

    pub async fn load_jobs(&mut self) -> Result<&[JobRecord], CoreError> {
        self.jobs = self.backend.fetch_jobs().await?;
        Ok(&self.jobs)
    }

    pub async fn load_automations(&mut self) -> Result<(), CoreError> {
        let records = self.backend.fetch_automations().await?;
        self.automations = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Ok(())
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn link(&self, job_id: &JobId) -> Option<&UserJobLink> {
        self.links.get(job_id)
    }

    pub fn saved_links(&self) -> impl Iterator<Item = &UserJobLink> {
        self.links.saved()
    }

    pub fn automation(&self, id: &AutomationId) -> Option<&AutomationRecord> {
        self.automations.get(id)
    }

    pub fn automations(&self) -> impl Iterator<Item = &AutomationRecord> {
        self.automations.values()
    }

    fn gate_blocks<T>(&self) -> Option<Outcome<T>> {
        match self.gate() {
            GateDecision::Allowed => None,
            GateDecision::Blocked { redirect_to } => Some(Outcome::RedirectToSetup { redirect_to }),
            GateDecision::Unknown => Some(Outcome::SetupPending),
        }
    }

    /// Submit one application for a job. Gated: a user without a complete
    /// profile and resume is redirected before any backend call.
    pub async fn apply_once(&mut self, job_id: &JobId) -> Result<Outcome<UserJobLink>, CoreError> {
        if let Some(blocked) = self.gate_blocks() {
            return Ok(blocked);
        }
        if let Some(link) = self.links.get(job_id) {
            if !link.can_apply() {
                return Err(CoreError::InvalidTransition {
                    entity: "user job link",
                    from: link.status.as_str().to_owned(),
                    action: "apply to",
                });
            }
        }

        let _guard = self.inflight.begin(EntityKey::Job(job_id.clone()))?;
        let confirmed = self.backend.apply_once(job_id).await?;
        info!(job = %job_id, "application submitted");

        // Patch local state through the engine rather than re-fetching; for a
        // job with no local link yet, adopt the backend's copy.
        match self.links.get_mut(job_id) {
            Some(local) => {
                local.apply_once(Utc::now())?;
                Ok(Outcome::Completed(local.clone()))
            }
            None => {
                self.links.upsert(confirmed.clone());
                Ok(Outcome::Completed(confirmed))
            }
        }
    }

    /// Save a job to favorites. Idempotent on the (user, job) pair: a job
    /// with an existing link returns that link's id without a backend call.
    pub async fn save(&mut self, job_id: &JobId) -> Result<LinkId, CoreError> {
        if let Some(link) = self.links.get(job_id) {
            return Ok(link.id.clone());
        }
        let _guard = self.inflight.begin(EntityKey::Job(job_id.clone()))?;
        let link_id = self.backend.save_job(job_id).await?;
        Ok(self.links.record_saved(job_id.clone(), link_id))
    }

    /// Remove a saved job. Only legal while the link is still `Saved`.
    pub async fn unsave(&mut self, job_id: &JobId) -> Result<(), CoreError> {
        let link_id = match self.links.get(job_id) {
            Some(link) if link.status == ApplicationStatus::Saved => link.id.clone(),
            Some(link) => {
                return Err(CoreError::InvalidTransition {
                    entity: "user job link",
                    from: link.status.as_str().to_owned(),
                    action: "unsave",
                })
            }
            None => {
                return Err(CoreError::InvalidTransition {
                    entity: "user job link",
                    from: "absent".to_owned(),
                    action: "unsave",
                })
            }
        };

        let _guard = self.inflight.begin(EntityKey::Job(job_id.clone()))?;
        self.backend.unsave_job(&link_id).await?;
        self.links.remove_saved(job_id)?;
        Ok(())
    }

    /// Attach a job to an automation, creating the link if absent and
    /// re-pointing it otherwise. Gated like apply: attachment leads to a
    /// real-world submission.
    pub async fn attach(
        &mut self,
        job_id: &JobId,
        automation_id: &AutomationId,
    ) -> Result<Outcome<LinkId>, CoreError> {
        if let Some(blocked) = self.gate_blocks() {
            return Ok(blocked);
        }
        let _guard = self.inflight.begin(EntityKey::Job(job_id.clone()))?;
        let link_id = self.backend.attach_to_automation(job_id, automation_id).await?;
        Ok(Outcome::Completed(self.links.record_attached(
            job_id.clone(),
            link_id,
            automation_id.clone(),
        )))
    }

    /// Create an automation from the quick-create form. The stored record is
    /// rebuilt from the draft so paused-with-zero-counter holds locally no
    /// matter what the backend response carries.
    pub async fn create_automation(
        &mut self,
        draft: AutomationDraft,
    ) -> Result<Outcome<AutomationRecord>, CoreError> {
        if let Some(blocked) = self.gate_blocks() {
            return Ok(blocked);
        }
        let confirmed = self.backend.create_automation(&draft).await?;
        let record = AutomationRecord::create(confirmed.id, &draft);
        info!(automation = %record.id, "automation created (paused)");
        self.automations.insert(record.id.clone(), record.clone());
        Ok(Outcome::Completed(record))
    }

    pub async fn pause_automation(&mut self, id: &AutomationId) -> Result<AutomationRecord, CoreError> {
        let mut patched = self.known_automation(id, "pause")?.clone();
        patched.pause()?;

        let _guard = self.inflight.begin(EntityKey::Automation(id.clone()))?;
        self.backend.pause_automation(id).await?;
        self.automations.insert(id.clone(), patched.clone());
        Ok(patched)
    }

    pub async fn resume_automation(&mut self, id: &AutomationId) -> Result<AutomationRecord, CoreError> {
        let mut patched = self.known_automation(id, "resume")?.clone();
        patched.resume()?;

        let _guard = self.inflight.begin(EntityKey::Automation(id.clone()))?;
        self.backend.resume_automation(id).await?;
        self.automations.insert(id.clone(), patched.clone());
        Ok(patched)
    }

    /// Ask the backend runner to apply to matching jobs up to the remaining
    /// allowance, then merge its authoritative counter.
    pub async fn run_automation(&mut self, id: &AutomationId) -> Result<RunOutcome, CoreError> {
        self.known_automation(id, "run")?;

        let _guard = self.inflight.begin(EntityKey::Automation(id.clone()))?;
        let outcome = self.backend.run_automation(id).await?;
        if let Some(local) = self.automations.get_mut(id) {
            local.merge_run_outcome(&outcome);
        }
        Ok(outcome)
    }

    fn known_automation(
        &self,
        id: &AutomationId,
        action: &'static str,
    ) -> Result<&AutomationRecord, CoreError> {
        self.automations.get(id).ok_or(CoreError::InvalidTransition {
            entity: "automation",
            from: "absent".to_owned(),
            action,
        })
    }
}
