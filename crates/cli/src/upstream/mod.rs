//! Clients for the services behind the dashboard
//!
//! - `shopify`: Shopify Admin REST API (shop, orders, customers, products)
//! - `analytics`: the analytics/fraud-scoring service
//!
//! Responses are passed through as opaque JSON. Calls are made once; any
//! failure becomes `UpstreamError::Unavailable` and is logged, never retried.

pub mod analytics;
pub mod shopify;

pub use analytics::{AnalyticsClient, Delivery};
pub use shopify::{OrderAnalytics, ShopifyClient};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} is unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },
    #[error("{service} is not configured: {hint}")]
    NotConfigured {
        service: &'static str,
        hint: &'static str,
    },
}

impl UpstreamError {
    pub(crate) fn unavailable(service: &'static str, reason: impl ToString) -> Self {
        UpstreamError::Unavailable {
            service,
            reason: reason.to_string(),
        }
    }
}

/// Response envelope shown to callers: `{success, data, count}` on success,
/// `{success: false, error}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            error: None,
        }
    }

    /// Success envelope for a list, with `count` set to its length.
    pub fn list(items: Vec<Value>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(Value::Array(items)),
            error: None,
        }
    }

    /// Failure envelope carrying a generic message; details go to the log.
    pub fn failure(what: &str) -> Self {
        Self::error(format!("Failed to fetch {}", what))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            error: Some(message.into()),
        }
    }

    /// Wraps an upstream result, logging the error if there is one.
    pub fn from_result(what: &str, result: Result<Value, UpstreamError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                tracing::warn!(error = %e, "error fetching {}", what);
                Self::failure(what)
            }
        }
    }

    pub fn from_list_result(what: &str, result: Result<Vec<Value>, UpstreamError>) -> Self {
        match result {
            Ok(items) => Self::list(items),
            Err(e) => {
                tracing::warn!(error = %e, "error fetching {}", what);
                Self::failure(what)
            }
        }
    }
}

pub(crate) fn build_http(
    service: &'static str,
    timeout_secs: u64,
) -> Result<reqwest::blocking::Client, UpstreamError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| UpstreamError::unavailable(service, e))
}

/// Sends a prepared request and decodes the JSON body.
pub(crate) fn send_json(
    service: &'static str,
    request: reqwest::blocking::RequestBuilder,
) -> Result<Value, UpstreamError> {
    let resp = request
        .send()
        .map_err(|e| UpstreamError::unavailable(service, e))?;

    let status = resp.status();
    if !status.is_success() {
        let url = resp.url().path().to_string();
        return Err(UpstreamError::unavailable(
            service,
            format!("HTTP {} from {}", status, url),
        ));
    }

    resp.json::<Value>()
        .map_err(|e| UpstreamError::unavailable(service, e))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
