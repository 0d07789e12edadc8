// src/core/mod.rs
//! Domain engine: transition rules, the setup gate, lifecycle accounting and
//! the HTTP adapter over the backend port.

pub mod automation;
pub mod gate;
pub mod inflight;
pub mod links;
pub mod service_client;
pub mod transitions;

pub use gate::{check_gate, GateDecision, SETUP_REDIRECT};
pub use inflight::{EntityKey, InFlight, InFlightGuard};
pub use links::LinkStore;
pub use service_client::HttpBackend;
