// src/types/job.rs
use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque job posting identifier. The catalog may use numeric or string ids;
/// the client never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a per-user job link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Match-quality label attached by the catalog's matching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    #[serde(rename = "Good match")]
    Good,
    Average,
    Low,
}

/// A job posting as seen by a job seeker. Read-only on the client; created by
/// catalog ingestion and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub compensation: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub match_quality: Option<MatchQuality>,
}

/// Application-track status of a `UserJobLink`.
///
/// The eight known values are closed; anything else coming off the wire is
/// preserved verbatim in `Other` so display can fall back to the raw string
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationStatus {
    Saved,
    Draft,
    Submitted,
    Reviewing,
    Interview,
    Rejected,
    Accepted,
    Withdrawn,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Saved => "saved",
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Reviewing => "reviewing",
            Self::Interview => "interview",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
            Self::Withdrawn => "withdrawn",
            Self::Other(raw) => raw,
        }
    }

    pub fn from_wire(raw: String) -> Self {
        match raw.as_str() {
            "saved" => Self::Saved,
            "draft" => Self::Draft,
            "submitted" => Self::Submitted,
            "reviewing" => Self::Reviewing,
            "interview" => Self::Interview,
            "rejected" => Self::Rejected,
            "accepted" => Self::Accepted,
            "withdrawn" => Self::Withdrawn,
            _ => Self::Other(raw),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(raw))
    }
}

/// Presentation grouping for a status badge. Always derived from the status,
/// never stored, so badge and status cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCategory {
    Positive,
    Pending,
    Neutral,
}

/// The per-user relationship to a `JobRecord`. This is the entity with real
/// state: at most one link exists per (user, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJobLink {
    pub id: LinkId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub automation_id: Option<super::automation::AutomationId>,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
}

impl UserJobLink {
    /// A fresh link created by a "save" action.
    pub fn saved(id: LinkId, job_id: JobId) -> Self {
        Self {
            id,
            job_id,
            status: ApplicationStatus::Saved,
            automation_id: None,
            applied_at: None,
        }
    }

    /// Invariant check: `applied_at` is recorded exactly when the link has
    /// left the saved/draft track.
    pub fn is_consistent(&self) -> bool {
        let on_application_track = !matches!(
            self.status,
            ApplicationStatus::Saved | ApplicationStatus::Draft
        );
        self.applied_at.is_some() == on_application_track
    }
}
