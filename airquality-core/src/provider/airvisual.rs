use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::model::CityRequest;

use super::{AirQualityProvider, FetchError};

pub const DEFAULT_BASE_URL: &str = "http://api.airvisual.com";

#[derive(Debug, Clone)]
pub struct AirVisualClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AirVisualClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(http, base_url, api_key))
    }

    /// Use an existing HTTP client, e.g. one pointed at a stub server.
    pub fn with_client(http: Client, base_url: &str, api_key: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v2/city", self.base_url)
    }
}

#[async_trait]
impl AirQualityProvider for AirVisualClient {
    async fn city_report(&self, request: &CityRequest) -> Result<Value, FetchError> {
        let endpoint = self.endpoint();
        tracing::debug!(endpoint = %endpoint, location = %request, "requesting city report");

        // reqwest errors carry the full URL, key included
        let transport = |e: reqwest::Error| FetchError::Transport {
            endpoint: endpoint.clone(),
            source: e.without_url(),
        };

        let res = self
            .http
            .get(&endpoint)
            .query(&[
                ("city", request.city.as_str()),
                ("state", request.state.as_str()),
                ("country", request.country.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        tracing::debug!(status = %status, bytes = body.len(), "received city report");

        // 1xx/3xx fall through to decoding; reqwest already followed redirects
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                status,
                endpoint,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(FetchError::Decode)
    }
}

/// One line, at most `MAX` chars, so it fits the single-line error report.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}
