// src/lib.rs
//! Client-side core of the CrypGo job-application product.
//!
//! The views (dashboard, job feed, automation list) read state through
//! [`service::CrypgoClient`] and mutate it through the same object; all
//! status and run-state rules live in [`core`], and everything that does
//! real-world work sits behind the [`port::JobBackend`] collaborator.

pub mod core;
pub mod environment;
pub mod error;
pub mod port;
pub mod service;
pub mod session;
pub mod types;

pub use crate::core::{check_gate, GateDecision, HttpBackend, LinkStore};
pub use environment::EnvironmentConfig;
pub use error::CoreError;
pub use port::JobBackend;
pub use service::{CrypgoClient, Outcome};
pub use session::Session;
pub use types::{
    ApplicationStatus, AutomationDraft, AutomationId, AutomationRecord, BadgeCategory, JobId,
    JobRecord, LinkId, RunOutcome, RunState, SetupStatus, UserJobLink,
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Initialize tracing for an embedding application. Library code only emits
/// events; the host decides where they go.
pub fn init_tracing() {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("crypgo_core=info")))
        .init();
}
