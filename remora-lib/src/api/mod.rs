//! HTTP client for the backend's REST API.
//!
//! [`ApiClient`] is the single access point for every endpoint the console
//! touches. It injects the bearer token on every request, decodes JSON
//! bodies, and maps failures onto [`Error`]. There are no retries and no
//! client-side timeouts on ordinary calls: a call either settles or fails,
//! and recovery is the caller's job.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::config::ClientConfig;

mod access_control;
mod assignments;
mod contacts;
mod history;
mod plugins;
mod presets;
mod settings;
mod variables;

pub use presets::PresetKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The stored token was rejected (HTTP 401/403). Callers clear their
    /// credentials and return to the connect screen.
    #[error("the backend rejected the stored token")]
    Unauthorized,
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Bearer-authenticated JSON client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(server_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: server_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.server_url, &config.token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the token is accepted by the backend.
    pub async fn auth_status(&self) -> Result<()> {
        self.send(self.request(Method::GET, "/api/auth/status"))
            .await?;
        Ok(())
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
    }

    /// Issue the request and map non-2xx statuses onto [`Error`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }

        // Error bodies are optionally `{error, details}`; fall back to the
        // raw body, then to the status line.
        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        self.send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub(crate) async fn delete_with_body<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        self.send(self.request(Method::DELETE, path).json(body))
            .await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let raw = response.text().await?;
    Ok(serde_json::from_str(&raw)?)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    details: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        match (self.error, self.details) {
            (Some(error), Some(details)) => Some(format!("{error}: {details}")),
            (Some(error), None) => Some(error),
            (None, Some(details)) => Some(details),
            (None, None) => None,
        }
    }
}
