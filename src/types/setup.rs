// src/types/setup.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of the uploaded resume. Upload is mandatory for setup completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInfo {
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Personal details plus resume metadata collected by the setup flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupData {
    #[serde(default)]
    pub personal: serde_json::Value,
    #[serde(default)]
    pub resume: Option<ResumeInfo>,
}

/// Result of the setup-status fetch; the input to the gate check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupStatus {
    pub complete: bool,
    #[serde(default)]
    pub data: Option<SetupData>,
}

impl SetupStatus {
    /// `complete` requires both the details payload and a resume; personal
    /// details alone are insufficient.
    pub fn is_consistent(&self) -> bool {
        if !self.complete {
            return true;
        }
        self.data
            .as_ref()
            .is_some_and(|data| data.resume.is_some())
    }
}
