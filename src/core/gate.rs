// src/core/gate.rs
//! Setup gate: the single source of truth for "may this user take an action
//! that results in a real-world job application or automation creation".

use tracing::warn;

use crate::types::setup::SetupStatus;

/// Where a blocked user is sent to finish onboarding.
pub const SETUP_REDIRECT: &str = "/setup";

/// Three-valued gate decision.
///
/// `Unknown` means the setup-status fetch has not resolved yet; it is
/// distinct from both `Allowed` and `Blocked` so callers cannot conflate
/// "still loading" with "explicitly blocked".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Unknown,
    Allowed,
    Blocked { redirect_to: &'static str },
}

impl GateDecision {
    /// Only an explicit `Allowed` permits a real-submission mutation.
    pub fn permits_mutation(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Evaluate the gate against the last fetched setup status, `None` while the
/// fetch is still pending.
pub fn check_gate(status: Option<&SetupStatus>) -> GateDecision {
    match status {
        None => GateDecision::Unknown,
        Some(status) => {
            if !status.is_consistent() {
                // A "complete" status without a resume is a backend bug;
                // log it but honor the flag, which stays authoritative.
                warn!("setup status reports complete without resume metadata");
            }
            if status.complete {
                GateDecision::Allowed
            } else {
                GateDecision::Blocked {
                    redirect_to: SETUP_REDIRECT,
                }
            }
        }
    }
}
