use crate::{CityRequest, Config};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;

pub mod airvisual;

pub use airvisual::AirVisualClient;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status} returned by {endpoint}{}", body_suffix(.body))]
    Status {
        status: StatusCode,
        endpoint: String,
        body: String,
    },

    #[error("failed to decode response body as JSON")]
    Decode(#[source] serde_json::Error),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl FetchError {
    /// Network failures and error statuses are reported to the user and the
    /// run ends normally. A body that is not JSON is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Status { .. })
    }
}

#[async_trait]
pub trait AirQualityProvider: Send + Sync + Debug {
    /// Fetch the raw current-conditions payload for one city.
    async fn city_report(&self, request: &CityRequest) -> Result<Value, FetchError>;
}

/// Construct the AirVisual client from resolved configuration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn AirQualityProvider>> {
    let api_key = config.api_key()?;
    let client = AirVisualClient::new(api_key.to_owned(), config.base_url(), config.timeout())?;

    Ok(Box::new(client))
}
