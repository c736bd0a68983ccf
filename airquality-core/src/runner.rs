use anyhow::{Context, Result};
use std::error::Error;
use std::io::Write;

use crate::{CityReport, CityRequest, provider::AirQualityProvider, report};

pub const REQUEST_ERROR_PREFIX: &str = "An error occurred during the request:";

/// Fetch one city report and print it to `out`.
///
/// Network failures and error statuses are printed as a single line and
/// treated as a completed run. A body that is not JSON, or a payload missing
/// one of the summary fields, is returned as an error and nothing is printed.
pub async fn run<P, W>(provider: &P, request: &CityRequest, out: &mut W) -> Result<()>
where
    P: AirQualityProvider + ?Sized,
    W: Write,
{
    let payload = match provider.city_report(request).await {
        Ok(payload) => payload,
        Err(e) if e.is_recoverable() => {
            tracing::warn!(location = %request, error = %e, "city report request failed");
            writeln!(out, "{REQUEST_ERROR_PREFIX} {}", error_chain(&e))
                .context("Failed to write to output")?;
            return Ok(());
        }
        Err(e) => return Err(e).context("Unusable response from AirVisual"),
    };

    let summary = CityReport::from_payload(&payload)?;

    report::render(&summary, &payload, out).context("Failed to write report")?;
    Ok(())
}

/// `outer: inner: innermost`, so the underlying cause reaches the user.
fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExtractError;
    use crate::provider::FetchError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    #[derive(Debug)]
    enum Canned {
        Payload(Value),
        Status(StatusCode),
        NotJson,
    }

    #[derive(Debug)]
    struct CannedProvider(Canned);

    #[async_trait]
    impl AirQualityProvider for CannedProvider {
        async fn city_report(&self, _request: &CityRequest) -> Result<Value, FetchError> {
            match &self.0 {
                Canned::Payload(v) => Ok(v.clone()),
                Canned::Status(status) => Err(FetchError::Status {
                    status: *status,
                    endpoint: "http://stub/v2/city".into(),
                    body: "{\"status\":\"fail\"}".into(),
                }),
                Canned::NotJson => Err(FetchError::Decode(
                    serde_json::from_str::<Value>("not json").unwrap_err(),
                )),
            }
        }
    }

    async fn run_canned(canned: Canned) -> (Result<()>, String) {
        let provider = CannedProvider(canned);
        let mut out = Vec::new();
        let res = run(&provider, &CityRequest::default(), &mut out).await;
        (res, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn error_status_prints_one_line() {
        for status in [StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            let (res, out) = run_canned(Canned::Status(status)).await;

            assert!(res.is_ok());
            assert_eq!(out.lines().count(), 1);
            assert!(out.starts_with(REQUEST_ERROR_PREFIX));
            assert!(out.contains(status.as_str()));
        }
    }

    #[tokio::test]
    async fn invalid_json_is_fatal_and_silent() {
        let (res, out) = run_canned(Canned::NotJson).await;

        assert!(res.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn missing_aqi_is_fatal_and_silent() {
        let payload = json!({
            "data": {
                "city": "Bengaluru",
                "current": {"weather": {"tp": 27}, "pollution": {"ts": "2024-01-01T00:00:00.000Z"}}
            }
        });

        let (res, out) = run_canned(Canned::Payload(payload)).await;

        let err = res.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ExtractError>(),
            Some(&ExtractError::MissingField { path: "data.current.pollution.aqius".into() })
        );
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn success_prints_summary_and_payload() {
        let payload = json!({
            "data": {
                "city": "Bengaluru",
                "current": {
                    "weather": {"tp": 27},
                    "pollution": {"aqius": 42, "ts": "2024-01-01T00:00:00.000Z"}
                }
            }
        });

        let (res, out) = run_canned(Canned::Payload(payload.clone())).await;
        assert!(res.is_ok());

        let (summary, dump) = out.split_once(&format!("{}\n", report::SEPARATOR)).unwrap();
        assert_eq!(
            summary,
            "City: Bengaluru\nTemperature: 27°C\nAir Quality Index (US): 42\nTime: 2024-01-01T00:00:00.000Z\n"
        );
        assert_eq!(serde_json::from_str::<Value>(dump).unwrap(), payload);
    }

    #[test]
    fn error_chain_joins_sources() {
        let err = anyhow::anyhow!("root cause").context("outer");
        assert_eq!(error_chain(&*err), "outer: root cause");
    }
}
