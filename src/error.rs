// src/error.rs
use thiserror::Error;

/// Domain error taxonomy for the client core.
///
/// Gate blocking is deliberately absent here: a blocked action is a normal
/// control-flow outcome (`service::Outcome`), never an error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An action was attempted against an entity whose state does not permit it.
    #[error("cannot {action} {entity} in state '{from}'")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        action: &'static str,
    },

    /// A second mutating action was requested while one is already in flight
    /// for the same entity. Rejected before any network call is issued.
    #[error("an action is already in flight for {entity}")]
    ConcurrentActionRejected { entity: String },

    /// The backend collaborator call failed. Local optimistic state must not
    /// be patched when this occurs.
    #[error("backend call failed: {message}")]
    Upstream { status: Option<u16>, message: String },

    /// No bearer credential is available in the session.
    #[error("not authenticated: no session credential available")]
    NotAuthenticated,
}

impl CoreError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    pub fn is_concurrent_rejection(&self) -> bool {
        matches!(self, Self::ConcurrentActionRejected { .. })
    }
}
