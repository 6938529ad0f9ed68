//! Typed HTTP client for the idea board API.

use async_trait::async_trait;
use idea_shared::{
    ApiResponse, CreateIdeaRequest, ErrorCode, HealthInfo, Idea, ListIdeas, UpdateIdeaRequest,
};
use reqwest::{RequestBuilder, StatusCode, Url, header};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("HTTP error {status}: {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid base URL {0:?}")]
    BaseUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) | ClientError::BaseUrl(_) => None,
        }
    }

    /// Machine error code from the response envelope, when there was one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => *code,
            _ => None,
        }
    }
}

/// The idea board operations, one async call each.
#[async_trait]
pub trait IdeaApi: Send + Sync {
    async fn list_ideas(&self, query: &ListIdeas) -> Result<Vec<Idea>, ClientError>;

    async fn get_idea(&self, id: &str) -> Result<Idea, ClientError>;

    async fn create_idea(&self, title: &str, description: &str) -> Result<Idea, ClientError>;

    async fn upvote_idea(&self, id: &str) -> Result<Idea, ClientError>;

    /// Change the given fields, leaving `None` fields untouched.
    async fn update_idea(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Idea, ClientError>;

    async fn delete_idea(&self, id: &str) -> Result<(), ClientError>;

    async fn health(&self) -> Result<HealthInfo, ClientError>;
}

/// [`IdeaApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        let raw = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(raw)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::BaseUrl(config.base_url.clone()))?;

        Ok(Self { http, base_url })
    }

    /// Endpoint URL under the base. Each segment is percent-encoded on its own.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        decode(status, &body)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.send(request)
            .await?
            .data
            .ok_or_else(|| ClientError::Decode("response has no data".to_string()))
    }
}

#[async_trait]
impl IdeaApi for ApiClient {
    async fn list_ideas(&self, query: &ListIdeas) -> Result<Vec<Idea>, ClientError> {
        self.fetch(self.http.get(self.url(&["ideas"])).query(query))
            .await
    }

    async fn get_idea(&self, id: &str) -> Result<Idea, ClientError> {
        self.fetch(self.http.get(self.url(&["ideas", id])))
            .await
    }

    async fn create_idea(&self, title: &str, description: &str) -> Result<Idea, ClientError> {
        let body = CreateIdeaRequest {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        };
        self.fetch(self.http.post(self.url(&["ideas"])).json(&body))
            .await
    }

    async fn upvote_idea(&self, id: &str) -> Result<Idea, ClientError> {
        self.fetch(self.http.patch(self.url(&["ideas", id, "upvote"])))
            .await
    }

    async fn update_idea(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Idea, ClientError> {
        let body = UpdateIdeaRequest {
            title: title.map(String::from),
            description: description.map(String::from),
        };
        self.fetch(self.http.put(self.url(&["ideas", id])).json(&body))
            .await
    }

    async fn delete_idea(&self, id: &str) -> Result<(), ClientError> {
        self.send::<serde_json::Value>(self.http.delete(self.url(&["ideas", id])))
            .await
            .map(|_| ())
    }

    async fn health(&self) -> Result<HealthInfo, ClientError> {
        self.fetch(self.http.get(self.url(&["health"]))).await
    }
}

/// Turn a raw response into an envelope or an error carrying the status.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<ApiResponse<T>, ClientError> {
    if !status.is_success() {
        let envelope = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body).ok();
        let code = envelope.as_ref().and_then(|e| e.error);
        let message = envelope
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        return Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        });
    }

    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}
