// src/core/inflight.rs
//! At most one in-flight mutation per entity.
//!
//! There is no server-side idempotency key, so a duplicate pause/resume/run
//! or apply call would double-count. A second action on a busy entity is
//! rejected immediately, before any network call is issued. The guard is
//! RAII: dropping it (success or failure) releases the entity.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::CoreError;
use crate::types::automation::AutomationId;
use crate::types::job::JobId;

/// The entities whose mutations are serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Job(JobId),
    Automation(AutomationId),
}

impl EntityKey {
    fn describe(&self) -> String {
        match self {
            Self::Job(id) => format!("job {id}"),
            Self::Automation(id) => format!("automation {id}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    busy: Arc<Mutex<HashSet<EntityKey>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an entity for a mutation. Fails with `ConcurrentActionRejected`
    /// if another action on the same entity is still outstanding.
    pub fn begin(&self, key: EntityKey) -> Result<InFlightGuard, CoreError> {
        let mut busy = lock(&self.busy);
        if !busy.insert(key.clone()) {
            return Err(CoreError::ConcurrentActionRejected {
                entity: key.describe(),
            });
        }
        debug!(entity = %key.describe(), "action in flight");
        Ok(InFlightGuard {
            busy: Arc::clone(&self.busy),
            key,
        })
    }

    pub fn is_busy(&self, key: &EntityKey) -> bool {
        lock(&self.busy).contains(key)
    }
}

fn lock(busy: &Mutex<HashSet<EntityKey>>) -> MutexGuard<'_, HashSet<EntityKey>> {
    // A poisoned set only means a panicking holder; the data is still valid.
    busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
pub struct InFlightGuard {
    busy: Arc<Mutex<HashSet<EntityKey>>>,
    key: EntityKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.busy).remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_action_on_same_entity_is_rejected() {
        let inflight = InFlight::new();
        let key = EntityKey::Automation(AutomationId::new("auto-1"));

        let _guard = inflight.begin(key.clone()).unwrap();
        let err = inflight.begin(key.clone()).unwrap_err();
        assert!(err.is_concurrent_rejection());
        assert!(inflight.is_busy(&key));
    }

    #[test]
    fn dropping_the_guard_releases_the_entity() {
        let inflight = InFlight::new();
        let key = EntityKey::Job(JobId::new("job-1"));

        let guard = inflight.begin(key.clone()).unwrap();
        drop(guard);
        assert!(!inflight.is_busy(&key));
        assert!(inflight.begin(key).is_ok());
    }

    #[test]
    fn distinct_entities_do_not_block_each_other() {
        let inflight = InFlight::new();
        let _job = inflight.begin(EntityKey::Job(JobId::new("job-1"))).unwrap();
        let _other_job = inflight.begin(EntityKey::Job(JobId::new("job-2"))).unwrap();
        let _automation = inflight
            .begin(EntityKey::Automation(AutomationId::new("job-1")))
            .unwrap();
    }
}
