//! Client for the analytics/fraud-scoring service

use super::{build_http, join_url, send_json, UpstreamError};
use serde::Serialize;
use serde_json::Value;
use shepherd_core::config::UpstreamConfig;

const SERVICE: &str = "Analytics service";

pub const DEFAULT_PERIOD: &str = "30d";
pub const DEFAULT_INSIGHTS_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
pub struct OrderWebhook<'a> {
    pub order_id: &'a Value,
    pub order_data: &'a Value,
}

#[derive(Debug, Serialize)]
pub struct CustomerWebhook<'a> {
    pub customer_id: &'a Value,
    pub customer_data: &'a Value,
}

/// Result of forwarding a webhook payload. Forwarding is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delivery {
    Delivered { response: Value },
    Failed { reason: String },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered { .. })
    }
}

pub struct AnalyticsClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AnalyticsClient {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        if config.analytics_url.trim().is_empty() {
            return Err(UpstreamError::NotConfigured {
                service: SERVICE,
                hint: "set PYTHON_SERVICE_URL or upstream.analytics_url",
            });
        }
        Ok(Self {
            http: build_http(SERVICE, config.timeout_secs)?,
            base_url: config.analytics_url.clone(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "analytics request");
        send_json(SERVICE, self.http.get(&url).query(query))
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Value, UpstreamError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "analytics post");
        send_json(SERVICE, self.http.post(&url).json(body))
    }

    pub fn overview(&self, period: &str) -> Result<Value, UpstreamError> {
        self.get("analytics/overview", &[("period", period.to_string())])
    }

    pub fn fraud_trends(&self, period: &str) -> Result<Value, UpstreamError> {
        self.get("analytics/fraud-trends", &[("period", period.to_string())])
    }

    pub fn customer_insights(&self, limit: u32) -> Result<Value, UpstreamError> {
        self.get("analytics/customer-insights", &[("limit", limit.to_string())])
    }

    pub fn order_patterns(&self, period: &str) -> Result<Value, UpstreamError> {
        self.get("analytics/order-patterns", &[("period", period.to_string())])
    }

    pub fn alerts(&self) -> Result<Value, UpstreamError> {
        self.get("security/alerts", &[])
    }

    pub fn fraud_for_order(&self, order_id: &str) -> Result<Value, UpstreamError> {
        self.get(&format!("fraud/order/{}", order_id), &[])
    }

    pub fn risk_for_customer(&self, customer_id: &str) -> Result<Value, UpstreamError> {
        self.get(&format!("risk/customer/{}", customer_id), &[])
    }

    pub fn dashboard(&self) -> Result<Value, UpstreamError> {
        self.get("security/dashboard", &[])
    }

    pub fn health(&self) -> Result<Value, UpstreamError> {
        self.get("health", &[])
    }

    /// Forwards an order-created payload for fraud analysis. Failures are
    /// logged and reported, never propagated.
    pub fn forward_order(&self, order: &Value) -> Delivery {
        let id = order.get("id").unwrap_or(&Value::Null);
        tracing::info!(order_id = %id, "forwarding new order");
        let body = OrderWebhook {
            order_id: id,
            order_data: order,
        };
        deliver(self.post("analyze-order", &body))
    }

    /// Forwards a customer-created payload for risk analysis.
    pub fn forward_customer(&self, customer: &Value) -> Delivery {
        let id = customer.get("id").unwrap_or(&Value::Null);
        tracing::info!(customer_id = %id, "forwarding new customer");
        let body = CustomerWebhook {
            customer_id: id,
            customer_data: customer,
        };
        deliver(self.post("analyze-customer", &body))
    }
}

fn deliver(result: Result<Value, UpstreamError>) -> Delivery {
    match result {
        Ok(response) => Delivery::Delivered { response },
        Err(e) => {
            tracing::warn!(error = %e, "error sending to analytics service");
            Delivery::Failed {
                reason: e.to_string(),
            }
        }
    }
}
