//! REST backend.
//!
//! Endpoints, relative to the configured base URL:
//! `GET teams`, `GET users`, `GET tags`, `GET list-statuses`, `GET tasks`,
//! `GET tasks/{id}/subtasks` and `PUT tasks/{id}` with the snapshot as JSON.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{Backend, BackendError};
use crate::entities::{ListStatus, Tag, Task, TaskSnapshot, Team, User};

/// HTTP client for a task server speaking JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpBackend {
    /// Create a client for `base_url`. `timeout` of `None` waits indefinitely.
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| BackendError::Other(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Other(format!("Invalid base URL '{}'", base_url)));
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::Other(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, BackendError> {
        let url = self.url(segments)?;
        log::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url.clone()))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, url.as_str(), &body));
        }

        serde_json::from_str(&body).map_err(|e| BackendError::InvalidData(format!("{}: {}", url, e)))
    }

    fn status_error(status: StatusCode, url: &str, body: &str) -> BackendError {
        let detail = if body.trim().is_empty() {
            format!("{} returned {}", url, status)
        } else {
            format!("{} returned {}: {}", url, status, body.trim())
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(detail),
            StatusCode::NOT_FOUND => BackendError::NotFound(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => BackendError::InvalidData(detail),
            _ => BackendError::Other(detail),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn backend_type(&self) -> &str {
        "http"
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>, BackendError> {
        self.get_json(&["teams"]).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, BackendError> {
        self.get_json(&["users"]).await
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>, BackendError> {
        self.get_json(&["tags"]).await
    }

    async fn fetch_list_statuses(&self) -> Result<Vec<ListStatus>, BackendError> {
        self.get_json(&["list-statuses"]).await
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.get_json(&["tasks"]).await
    }

    async fn list_subtasks(&self, parent_id: &str) -> Result<Vec<Task>, BackendError> {
        self.get_json(&["tasks", parent_id, "subtasks"]).await
    }

    async fn update_task(&self, snapshot: &TaskSnapshot) -> Result<(), BackendError> {
        let url = self.url(&["tasks", &snapshot.task.id])?;
        log::debug!("PUT {}", url);

        let response = self
            .authorize(self.client.put(url.clone()))
            .json(snapshot)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, url.as_str(), &body))
    }
}
