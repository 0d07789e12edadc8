// src/types/automation.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a user-defined auto-apply rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutomationId(pub String);

impl AutomationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AutomationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run state of an automation. `Paused` is the state every automation is
/// created in; activation is a separate, explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Running,
    Paused,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// A user-configured auto-apply rule with its running daily counter.
///
/// `applications_today` is externally authoritative: the backend runner owns
/// the counting (and the day-boundary reset), the client only merges the
/// value it reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRecord {
    pub id: AutomationId,
    pub name: String,
    #[serde(default)]
    pub target_titles: String,
    #[serde(default)]
    pub locations: String,
    #[serde(default)]
    pub daily_limit: u32,
    #[serde(default)]
    pub platforms: BTreeSet<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub state: RunState,
    #[serde(default)]
    pub applications_today: u32,
}

/// Fields of the quick-create form.
///
/// Payloads occasionally carry a `state` or `applications_today` field; both
/// are ignored on creation so a new record always starts paused with a zero
/// counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationDraft {
    pub name: String,
    #[serde(default)]
    pub target_titles: String,
    #[serde(default)]
    pub locations: String,
    #[serde(default)]
    pub daily_limit: u32,
    #[serde(default)]
    pub platforms: BTreeSet<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing)]
    pub state: Option<RunState>,
    #[serde(default, skip_serializing)]
    pub applications_today: Option<u32>,
}

/// Summarized result of one backend automation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub applied_count: u32,
    pub limit_reached: bool,
    #[serde(default)]
    pub message: String,
    pub applications_today: u32,
}
