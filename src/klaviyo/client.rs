//! Klaviyo events API client.
//!
//! This module issues the paginated GET requests against the Klaviyo
//! events endpoint and decodes the JSON pages. Every request carries the
//! same fixed header set: the API key, the accept type, and the API
//! revision date.

use crate::config::ApiConfig;
use crate::models::EventPage;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from a page fetch. All of them abort the export.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("Klaviyo API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// No connection could be established to the API host.
    #[error("Cannot connect to {0}")]
    Connect(String),

    /// The response body was not the expected JSON page shape.
    #[error("Failed to decode events page")]
    Decode(#[source] reqwest::Error),

    /// Any other transport-level failure.
    #[error("Request failed")]
    Transport(#[source] reqwest::Error),
}

/// A source of event pages.
///
/// `cursor` is the `links.next` URL of the previous page, or `None` for
/// the first page. The pagination driver is generic over this trait so
/// tests can drive it with scripted in-memory pages.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    /// Fetch one page of events.
    async fn fetch_page(&mut self, cursor: Option<&str>) -> Result<EventPage, ApiError>;
}

/// HTTP client for the Klaviyo events API.
pub struct KlaviyoClient {
    http: reqwest::Client,
    base_url: String,
    metric: String,
    page_size: u64,
    timeout_seconds: u64,
}

impl KlaviyoClient {
    /// Create a client from the API configuration.
    ///
    /// The API key and revision are installed as default headers so every
    /// page request, including ones that follow `links.next` verbatim,
    /// carries them.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Klaviyo-API-Key {}", api.key))
            .context("API key contains characters not valid in a header")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "revision",
            HeaderValue::from_str(&api.revision).context("Invalid API revision string")?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            metric: api.metric.clone(),
            page_size: api.page_size,
            timeout_seconds: api.timeout_seconds,
        })
    }

    /// URL of the first page: the events endpoint with the metric filter
    /// and page size embedded.
    fn first_page_url(&self) -> String {
        format!(
            "{}/api/events/?filter=equals(metric.name,\"{}\")&page[size]={}",
            self.base_url, self.metric, self.page_size
        )
    }

    async fn get_page(&self, url: &str) -> Result<EventPage, ApiError> {
        debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout_seconds)
            } else if e.is_connect() {
                ApiError::Connect(self.base_url.clone())
            } else {
                ApiError::Transport(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        response.json().await.map_err(ApiError::Decode)
    }
}

impl EventSource for KlaviyoClient {
    async fn fetch_page(&mut self, cursor: Option<&str>) -> Result<EventPage, ApiError> {
        match cursor {
            // Follow the next link exactly as the API handed it out.
            Some(url) => self.get_page(url).await,
            None => self.get_page(&self.first_page_url()).await,
        }
    }
}
