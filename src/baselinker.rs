//! Minimal BaseLinker connector client. One authenticated `getOrders` call
//! per run; no retries, no pagination.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate, TimeZone};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.baselinker.com/connector.php";

/// Non-200 response from the connector endpoint. Carries the original status
/// code and body so callers can inspect what the API returned.
#[derive(Debug, Error)]
#[error("getOrders request failed: {status} - {body}")]
pub struct FetchError {
    pub status: u16,
    pub body: String,
}

/// Lower bound for the order query: a calendar date (interpreted as local
/// midnight) or an explicit Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFrom {
    Date(NaiveDate),
    Timestamp(i64),
}

impl DateFrom {
    pub fn parse_date(raw: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}': expected YYYY-MM-DD", raw.trim()))?;
        Ok(Self::Date(date))
    }

    /// Unix timestamp sent as the `date_from` filter.
    pub fn timestamp(&self) -> Result<i64> {
        match self {
            Self::Timestamp(ts) => Ok(*ts),
            Self::Date(date) => {
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| anyhow!("cannot build midnight for {date}"))?;
                Local
                    .from_local_datetime(&midnight)
                    .earliest()
                    .map(|dt| dt.timestamp())
                    .ok_or_else(|| {
                        anyhow!("{date} 00:00:00 does not exist in the local timezone")
                    })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BaselinkerClient {
    api_url: String,
    http: Client,
    token: String,
}

impl BaselinkerClient {
    pub fn new(
        token: impl Into<String>,
        api_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let api_url = api_url.unwrap_or(DEFAULT_API_URL).to_string();
        let http = Client::builder()
            .user_agent("order-report/0.1")
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(30)))
            .build()?;

        Ok(Self {
            api_url,
            http,
            token: token.into(),
        })
    }

    /// Fetch orders placed on/after the given lower bound.
    ///
    /// Returns the parsed response body as-is; no schema validation happens
    /// here. A non-200 status becomes a [`FetchError`].
    pub async fn fetch_orders(&self, date_from: DateFrom) -> Result<Value> {
        let ts = date_from.timestamp()?;
        let params = [
            ("method", "getOrders".to_string()),
            ("parameters", format!(r#"{{"date_from": {ts}}}"#)),
        ];

        debug!(date_from = ts, url = %self.api_url, "baselinker: sending getOrders");
        let resp = self
            .http
            .post(&self.api_url)
            .header("X-BLToken", &self.token)
            .form(&params)
            .send()
            .await
            .context("baselinker: getOrders transport failure")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let payload = resp
            .json::<Value>()
            .await
            .context("baselinker: getOrders response was not valid JSON")?;
        info!(date_from = ts, "baselinker: getOrders succeeded");
        Ok(payload)
    }
}
