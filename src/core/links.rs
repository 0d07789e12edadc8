// src/core/links.rs
//! Get-or-create bookkeeping for the (job, user-job-link) association.
//!
//! The store is keyed by job id, which is what makes save and attach
//! idempotent on the (user, job) pair: repeating either returns the existing
//! link instead of appending a duplicate.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CoreError;
use crate::types::automation::AutomationId;
use crate::types::job::{ApplicationStatus, JobId, LinkId, UserJobLink};

#[derive(Debug, Default)]
pub struct LinkStore {
    links: HashMap<JobId, UserJobLink>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, job_id: &JobId) -> Option<&UserJobLink> {
        self.links.get(job_id)
    }

    pub fn get_mut(&mut self, job_id: &JobId) -> Option<&mut UserJobLink> {
        self.links.get_mut(job_id)
    }

    /// Record a save. Get-or-create: an existing link's id is returned
    /// unchanged and `new_link_id` is discarded.
    pub fn record_saved(&mut self, job_id: JobId, new_link_id: LinkId) -> LinkId {
        if let Some(existing) = self.links.get(&job_id) {
            return existing.id.clone();
        }
        debug!(job = %job_id, link = %new_link_id, "recorded saved job");
        let link = UserJobLink::saved(new_link_id.clone(), job_id.clone());
        self.links.insert(job_id, link);
        new_link_id
    }

    /// Record an attach. Same get-or-create semantics as save, then the
    /// automation reference is overwritten; a link points to at most one
    /// automation at a time.
    pub fn record_attached(
        &mut self,
        job_id: JobId,
        new_link_id: LinkId,
        automation_id: AutomationId,
    ) -> LinkId {
        let link_id = self.record_saved(job_id.clone(), new_link_id);
        if let Some(link) = self.links.get_mut(&job_id) {
            link.automation_id = Some(automation_id);
        }
        link_id
    }

    /// Remove a saved job. Only legal while the link is still `Saved`: a link
    /// mid-application cannot be unsaved. Removal here means dropping the
    /// entry from the store; whether the backend deletes or merely hides the
    /// link is its own concern.
    pub fn remove_saved(&mut self, job_id: &JobId) -> Result<UserJobLink, CoreError> {
        let Some(link) = self.links.remove(job_id) else {
            return Err(CoreError::InvalidTransition {
                entity: "user job link",
                from: "absent".to_owned(),
                action: "unsave",
            });
        };
        if link.status != ApplicationStatus::Saved {
            let from = link.status.as_str().to_owned();
            self.links.insert(job_id.clone(), link);
            return Err(CoreError::InvalidTransition {
                entity: "user job link",
                from,
                action: "unsave",
            });
        }
        Ok(link)
    }

    /// Replace the stored link with an authoritative copy from the backend.
    pub fn upsert(&mut self, link: UserJobLink) {
        self.links.insert(link.job_id.clone(), link);
    }

    /// Links currently visible in the "saved" view.
    pub fn saved(&self) -> impl Iterator<Item = &UserJobLink> {
        self.links
            .values()
            .filter(|link| link.status == ApplicationStatus::Saved)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn repeated_save_returns_same_link_id() {
        let mut store = LinkStore::new();
        let job = JobId::new("job-7");

        let first = store.record_saved(job.clone(), LinkId::new("link-a"));
        let second = store.record_saved(job.clone(), LinkId::new("link-b"));

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn attach_reuses_existing_link_and_overwrites_reference() {
        let mut store = LinkStore::new();
        let job = JobId::new("job-7");
        let saved_id = store.record_saved(job.clone(), LinkId::new("link-a"));

        let attached_id = store.record_attached(
            job.clone(),
            LinkId::new("link-b"),
            AutomationId::new("auto-1"),
        );
        assert_eq!(attached_id, saved_id);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&job).unwrap().automation_id,
            Some(AutomationId::new("auto-1"))
        );

        // A later attach re-points rather than duplicating.
        store.record_attached(job.clone(), LinkId::new("link-c"), AutomationId::new("auto-2"));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&job).unwrap().automation_id,
            Some(AutomationId::new("auto-2"))
        );
    }

    #[test]
    fn attach_creates_link_when_absent() {
        let mut store = LinkStore::new();
        let job = JobId::new("job-9");

        let id = store.record_attached(job.clone(), LinkId::new("link-x"), AutomationId::new("auto-1"));
        assert_eq!(id, LinkId::new("link-x"));
        assert_eq!(store.get(&job).unwrap().status, ApplicationStatus::Saved);
    }

    #[test]
    fn unsave_requires_saved_status() {
        let mut store = LinkStore::new();
        let job = JobId::new("job-7");
        store.record_saved(job.clone(), LinkId::new("link-a"));
        store
            .get_mut(&job)
            .unwrap()
            .apply_once(Utc::now())
            .unwrap();

        let err = store.remove_saved(&job).unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unsave_drops_link_from_saved_reads() {
        let mut store = LinkStore::new();
        let job = JobId::new("job-7");
        store.record_saved(job.clone(), LinkId::new("link-a"));
        assert_eq!(store.saved().count(), 1);

        store.remove_saved(&job).unwrap();
        assert_eq!(store.saved().count(), 0);
        assert!(store.get(&job).is_none());
    }

    #[test]
    fn unsave_of_unknown_job_fails() {
        let mut store = LinkStore::new();
        assert!(store
            .remove_saved(&JobId::new("missing"))
            .unwrap_err()
            .is_invalid_transition());
    }

    #[test]
    fn submitted_links_leave_the_saved_view() {
        let mut store = LinkStore::new();
        store.record_saved(JobId::new("a"), LinkId::new("l-a"));
        store.record_saved(JobId::new("b"), LinkId::new("l-b"));
        store
            .get_mut(&JobId::new("a"))
            .unwrap()
            .apply_once(Utc::now())
            .unwrap();

        let saved: Vec<_> = store.saved().map(|l| l.job_id.clone()).collect();
        assert_eq!(saved, vec![JobId::new("b")]);
    }
}
