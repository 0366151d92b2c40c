use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adaptive::types::{DifficultyProfile, GameType, SessionDifficulty};

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct CollaboratorConfig {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl CollaboratorConfig {
    pub fn from_env() -> Self {
        let base_url = env_string("TRAINING_API_BASE_URL");
        let auth_token = env_string("TRAINING_API_TOKEN");
        let timeout = Duration::from_millis(
            env_u64("TRAINING_API_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS),
        );
        Self {
            base_url,
            auth_token,
            timeout,
        }
    }
}

#[derive(Debug, Error)]
pub enum TrainingApiError {
    #[error("training API not configured: {0}")]
    NotConfigured(&'static str),
    #[error("training API unreachable: {0}")]
    Request(#[from] reqwest::Error),
    #[error("authentication rejected (HTTP {status}): {body}")]
    Auth {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrainingApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, TrainingApiError::Auth { .. })
    }
}

/// Body for `POST /training/sessions`. The collaborator mixes snake_case
/// and camelCase keys, so the casing is pinned per field.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    pub training_type: GameType,
    pub module: String,
    pub difficulty: SessionDifficulty,
    pub level: u32,
    #[serde(rename = "sessionData")]
    pub session_data: SessionData,
}

/// Opening parameters handed to the game's content generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub profile: DifficultyProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<u32>,
    pub hints_enabled: bool,
}

/// Body for `PUT /training/sessions/{id}`, the per-answer aggregate push.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSessionRequest {
    pub score: u32,
    pub accuracy: u32,
    pub attempts: u32,
    #[serde(rename = "correctAnswers")]
    pub correct_answers: u32,
    #[serde(rename = "totalAnswers")]
    pub total_answers: u32,
}

/// Body for `PUT /training/sessions/{id}/complete`.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteSessionRequest {
    pub score: u32,
    pub accuracy: u32,
    pub time_spent: u64,
    pub attempts: u32,
    #[serde(rename = "correctAnswers")]
    pub correct_answers: u32,
    #[serde(rename = "totalAnswers")]
    pub total_answers: u32,
    #[serde(rename = "levelCompleted", skip_serializing_if = "Option::is_none")]
    pub level_completed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<SessionFeedback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perceived_difficulty: Option<SessionDifficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionResponse {
    pub session: SessionInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    #[serde(default)]
    pub training_type: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionResponse {
    pub session: CompletedSession,
    #[serde(default)]
    pub user_stats: Option<StatsOverview>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSession {
    pub id: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub accuracy: u32,
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub total_score: u64,
    #[serde(default)]
    pub average_accuracy: f64,
    #[serde(default)]
    pub total_time_spent: u64,
    #[serde(default)]
    pub completed_levels: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStats {
    #[serde(default)]
    pub overview: StatsOverview,
    #[serde(default)]
    pub recent_sessions: Vec<SessionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    #[serde(default)]
    pub training_type: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub accuracy: u32,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Clone)]
pub struct TrainingApiClient {
    config: CollaboratorConfig,
    client: reqwest::Client,
}

impl TrainingApiClient {
    pub fn new(config: CollaboratorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    pub fn from_env() -> Self {
        Self::new(CollaboratorConfig::from_env())
    }

    pub fn is_available(&self) -> bool {
        self.config
            .base_url
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
            && self
                .config
                .auth_token
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty())
    }

    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<SessionInfo, TrainingApiError> {
        let url = self.endpoint("/training/sessions")?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        let body: CreateSessionResponse = decode(response).await?;
        Ok(body.session)
    }

    pub async fn update_session(
        &self,
        session_id: &str,
        request: &UpdateSessionRequest,
    ) -> Result<(), TrainingApiError> {
        let url = self.endpoint(&format!("/training/sessions/{session_id}"))?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn complete_session(
        &self,
        session_id: &str,
        request: &CompleteSessionRequest,
    ) -> Result<CompleteSessionResponse, TrainingApiError> {
        let url = self.endpoint(&format!("/training/sessions/{session_id}/complete"))?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn fetch_stats(&self) -> Result<TrainingStats, TrainingApiError> {
        let url = self.endpoint("/training/stats")?;
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token()?)
            .send()
            .await?;
        decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<String, TrainingApiError> {
        let base = self
            .config
            .base_url
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(TrainingApiError::NotConfigured("TRAINING_API_BASE_URL"))?;
        Ok(format!("{}{}", base.trim_end_matches('/'), path))
    }

    fn token(&self) -> Result<&str, TrainingApiError> {
        self.config
            .auth_token
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(TrainingApiError::NotConfigured("TRAINING_API_TOKEN"))
    }
}

/// Auth failures get their own error kind so callers can distinguish a bad
/// token from a collaborator outage.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TrainingApiError> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        return Err(TrainingApiError::Auth { status, body });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TrainingApiError::HttpStatus { status, body });
    }
    Ok(response)
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TrainingApiError> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::error!(error = %err, body = %text, "failed to parse training API response");
            Err(TrainingApiError::Json(err))
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}
