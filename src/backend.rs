//! HTTP client for the PocketBase collection API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::config::{BackendConfig, SecretToken};
use crate::record::Submission;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("backend request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("PocketBase APIエラー: {status}")]
    Status { status: StatusCode },

    #[error("backend returned undecodable body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Raw outcome of a record-creation call
#[derive(Debug, Clone)]
pub struct CreateResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CreateResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    collection: String,
    token: Option<SecretToken>,
    auth_on_create: bool,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(BackendError::Transport)?;

        Ok(Self {
            http,
            base_url,
            collection: config.collection.clone(),
            token: config.token.clone(),
            auth_on_create: config.auth_on_create,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// GET /api/collections/:collection
    ///
    /// Returns the collection description as a JSON object, otherwise untouched;
    /// a body that is not an object is a decode error.
    pub async fn fetch_schema(&self, collection: &str) -> Result<Map<String, Value>, BackendError> {
        let url = self.collection_url(collection, &[])?;

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token.expose());
        }

        let response = request.send().await.map_err(BackendError::Transport)?;
        if response.status() != StatusCode::OK {
            return Err(BackendError::Status { status: response.status() });
        }

        response
            .json::<Map<String, Value>>()
            .await
            .map_err(BackendError::Decode)
    }

    /// POST /api/collections/:collection/records
    ///
    /// Any status the backend answers with is returned; only transport failures are errors.
    pub async fn create_record(&self, record: &Submission) -> Result<CreateResponse, BackendError> {
        let url = self.collection_url(&self.collection, &["records"])?;
        let payload = record.to_json_bytes()?;

        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if self.auth_on_create {
            if let Some(token) = &self.token {
                request = request.header(AUTHORIZATION, token.expose());
            }
        }

        let response = request.send().await.map_err(BackendError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(BackendError::Transport)?;

        Ok(CreateResponse { status, body })
    }

    fn collection_url(&self, collection: &str, tail: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "collections", collection])
            .extend(tail);
        Ok(url)
    }
}
