// src/core/service_client.rs
//! HTTP adapter over the backend port - JSON for every interaction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::port::JobBackend;
use crate::session::Session;
use crate::types::automation::{AutomationDraft, AutomationId, AutomationRecord, RunOutcome};
use crate::types::job::{JobId, JobRecord, LinkId, UserJobLink};
use crate::types::setup::SetupStatus;

const SETUP_STATUS_ENDPOINT: &str = "/setup-status";
const JOBS_ENDPOINT: &str = "/jobs";
const AUTOMATIONS_ENDPOINT: &str = "/automations";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkIdResponse {
    user_job_link_id: LinkId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachRequest<'a> {
    automation_id: &'a AutomationId,
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpBackend {
    /// Create a new backend client. The session is injected, not looked up
    /// from any global, and is consulted on every request.
    pub fn new(
        base_url: impl Into<String>,
        session: Session,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(
                timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(|e| CoreError::upstream(None, format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve the bearer credential, short-circuiting before any request is
    /// built when none is stored.
    fn bearer(&self) -> Result<&str, CoreError> {
        let token = self.session.bearer()?;
        if self.session.is_expired(chrono::Utc::now()) {
            warn!("session token is past its exp claim; backend will likely reject it");
        }
        Ok(token)
    }

    async fn get_json<R>(&self, endpoint: &str) -> Result<R, CoreError>
    where
        R: serde::de::DeserializeOwned,
    {
        let token = self.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        trace!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CoreError::upstream(None, format!("GET {url} failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R, CoreError>
    where
        T: Serialize,
        R: serde::de::DeserializeOwned,
    {
        let token = self.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        let request_id = Uuid::new_v4();
        info!("POST {} [{}]", url, request_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Request-Id", request_id.to_string())
            .json(payload)
            .send()
            .await
            .map_err(|e| CoreError::upstream(None, format!("POST {url} failed: {e}")))?;

        Self::read_json(response).await
    }

    /// POST whose success response body is ignored.
    async fn post_unit<T>(&self, endpoint: &str, payload: &T) -> Result<(), CoreError>
    where
        T: Serialize,
    {
        let token = self.bearer()?;
        let url = format!("{}{}", self.base_url, endpoint);
        let request_id = Uuid::new_v4();
        info!("POST {} [{}]", url, request_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Request-Id", request_id.to_string())
            .json(payload)
            .send()
            .await
            .map_err(|e| CoreError::upstream(None, format!("POST {url} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CoreError::upstream(Some(status.as_u16()), error_text))
        }
    }

    async fn read_json<R>(response: reqwest::Response) -> Result<R, CoreError>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        trace!("response status: {}", status);

        if status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(|e| CoreError::upstream(None, format!("failed to read response: {e}")))?;

            serde_json::from_str(&response_text).map_err(|e| {
                CoreError::upstream(
                    Some(status.as_u16()),
                    format!("failed to parse response: {e}. Raw response: {response_text}"),
                )
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CoreError::upstream(Some(status.as_u16()), error_text))
        }
    }
}

#[async_trait]
impl JobBackend for HttpBackend {
    async fn fetch_setup_status(&self) -> Result<SetupStatus, CoreError> {
        self.get_json(SETUP_STATUS_ENDPOINT).await
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, CoreError> {
        self.get_json(JOBS_ENDPOINT).await
    }

    async fn fetch_automations(&self) -> Result<Vec<AutomationRecord>, CoreError> {
        self.get_json(AUTOMATIONS_ENDPOINT).await
    }

    async fn apply_once(&self, job_id: &JobId) -> Result<UserJobLink, CoreError> {
        self.post_json(
            &format!("{JOBS_ENDPOINT}/{job_id}/apply"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn save_job(&self, job_id: &JobId) -> Result<LinkId, CoreError> {
        let response: LinkIdResponse = self
            .post_json(
                &format!("{JOBS_ENDPOINT}/{job_id}/save"),
                &serde_json::json!({}),
            )
            .await?;
        Ok(response.user_job_link_id)
    }

    async fn unsave_job(&self, link_id: &LinkId) -> Result<(), CoreError> {
        self.post_unit(&format!("/links/{link_id}/unsave"), &serde_json::json!({}))
            .await
    }

    async fn attach_to_automation(
        &self,
        job_id: &JobId,
        automation_id: &AutomationId,
    ) -> Result<LinkId, CoreError> {
        let response: LinkIdResponse = self
            .post_json(
                &format!("{JOBS_ENDPOINT}/{job_id}/attach"),
                &AttachRequest { automation_id },
            )
            .await?;
        Ok(response.user_job_link_id)
    }

    async fn create_automation(
        &self,
        draft: &AutomationDraft,
    ) -> Result<AutomationRecord, CoreError> {
        self.post_json(AUTOMATIONS_ENDPOINT, draft).await
    }

    async fn pause_automation(&self, id: &AutomationId) -> Result<AutomationRecord, CoreError> {
        self.post_json(
            &format!("{AUTOMATIONS_ENDPOINT}/{id}/pause"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn resume_automation(&self, id: &AutomationId) -> Result<AutomationRecord, CoreError> {
        self.post_json(
            &format!("{AUTOMATIONS_ENDPOINT}/{id}/resume"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn run_automation(&self, id: &AutomationId) -> Result<RunOutcome, CoreError> {
        self.post_json(
            &format!("{AUTOMATIONS_ENDPOINT}/{id}/run"),
            &serde_json::json!({}),
        )
        .await
    }
}
