//! HTTP client for the PolyglotPal backend.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use polyglotpal_core::content::{FillBlankRow, GrammarRow, ImageRow, SentenceRow, VocabularyRow};
use polyglotpal_core::{
    ActivityType, ContentRows, ProgressRecord, ProgressUpdate, Question, UserStats,
};

use crate::error::{ClientError, Result};
use crate::runner::ExerciseBackend;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "POLYGLOTPAL_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// User identity returned by `sync-user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
struct SyncUserRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Backend client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a base URL such as `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from `POLYGLOTPAL_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch the raw question-bank rows for a level.
    pub async fn fetch_rows(
        &self,
        activity_type: ActivityType,
        level: i32,
        lang: &str,
    ) -> Result<ContentRows> {
        let url = self.url(&format!("{}/{}", activity_type.content_path(), level));
        let resp = self
            .client
            .get(&url)
            .query(&[("lang", lang)])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let rows = match activity_type {
            ActivityType::Vocabulary => {
                ContentRows::Vocabulary(read_json::<Vec<VocabularyRow>>(resp).await?)
            }
            ActivityType::Grammar => {
                ContentRows::Grammar(read_json::<Vec<GrammarRow>>(resp).await?)
            }
            ActivityType::FillInBlank => {
                ContentRows::FillInBlank(read_json::<Vec<FillBlankRow>>(resp).await?)
            }
            ActivityType::ImageBased => {
                ContentRows::ImageBased(read_json::<Vec<ImageRow>>(resp).await?)
            }
            ActivityType::Sentences => {
                ContentRows::Sentences(read_json::<Vec<SentenceRow>>(resp).await?)
            }
        };

        tracing::debug!(
            activity = %activity_type,
            level,
            lang,
            count = rows.len(),
            "fetched content"
        );
        Ok(rows)
    }

    /// Map an email to its user, creating the user on first sight.
    pub async fn sync_user(&self, email: &str) -> Result<SyncedUser> {
        let resp = self
            .client
            .post(self.url("sync-user"))
            .json(&SyncUserRequest { email })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(resp).await
    }

    pub async fn fetch_user_stats(&self, user_id: i64) -> Result<UserStats> {
        let resp = self
            .client
            .get(self.url(&format!("user-stats/{user_id}")))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(resp).await
    }
}

impl ExerciseBackend for ApiClient {
    async fn fetch_questions(
        &self,
        activity_type: ActivityType,
        level: i32,
        lang: &str,
    ) -> Result<Vec<Question>> {
        Ok(self.fetch_rows(activity_type, level, lang).await?.into_questions())
    }

    async fn fetch_progress(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        lang: &str,
    ) -> Result<Vec<ProgressRecord>> {
        let resp = self
            .client
            .get(self.url(&format!("progress/{user_id}/{activity_type}")))
            .query(&[("lang", lang)])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(resp).await
    }

    async fn submit_progress(&self, update: &ProgressUpdate) -> Result<()> {
        let resp = self
            .client
            .post(self.url("progress"))
            .json(update)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        check_status(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ClientError::Backend`.
async fn check_status(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Backend {
        status,
        message: backend_message(body),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    check_status(resp)
        .await?
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Prefer the `message` of a JSON error body over the raw text.
fn backend_message(body: String) -> String {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) => body,
    }
}
