//! Shopify Admin REST API client

use super::{build_http, join_url, send_json, UpstreamError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shepherd_core::config::UpstreamConfig;
use shepherd_core::Money;
use std::str::FromStr;

const SERVICE: &str = "Shopify";
const TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: u32 = 50;
/// Orders pulled when computing order analytics
pub const ANALYTICS_ORDER_LIMIT: u32 = 250;

pub struct ShopifyClient {
    http: reqwest::blocking::Client,
    api_base: String,
    access_token: String,
}

impl ShopifyClient {
    /// Builds a client from `[upstream]` settings. Needs a shop (or base URL)
    /// and an access token.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base = match (&config.shopify_base_url, &config.shopify_shop) {
            (Some(url), _) => url.clone(),
            (None, Some(shop)) => format!("https://{}.myshopify.com", shop),
            (None, None) => {
                return Err(UpstreamError::NotConfigured {
                    service: SERVICE,
                    hint: "set SHOPIFY_SHOP_NAME or upstream.shopify_shop",
                })
            }
        };
        let access_token =
            config
                .shopify_access_token
                .clone()
                .ok_or(UpstreamError::NotConfigured {
                    service: SERVICE,
                    hint: "set SHOPIFY_ACCESS_TOKEN or upstream.shopify_access_token",
                })?;

        Ok(Self {
            http: build_http(SERVICE, config.timeout_secs)?,
            api_base: join_url(
                &base,
                &format!("admin/api/{}", config.shopify_api_version),
            ),
            access_token,
        })
    }

    /// Full URL for a resource path such as `orders` or `orders/42`.
    pub fn endpoint(&self, resource: &str) -> String {
        join_url(&self.api_base, &format!("{}.json", resource))
    }

    fn get(
        &self,
        resource: &str,
        query: &[(&str, String)],
        key: &str,
    ) -> Result<Value, UpstreamError> {
        let url = self.endpoint(resource);
        tracing::debug!(%url, "shopify request");
        let request = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.access_token)
            .query(query);
        let mut body = send_json(SERVICE, request)?;
        match body.get_mut(key) {
            Some(value) => Ok(value.take()),
            None => Err(UpstreamError::unavailable(
                SERVICE,
                format!("response for {} has no '{}' field", resource, key),
            )),
        }
    }

    fn get_list(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, UpstreamError> {
        match self.get(resource, query, resource)? {
            Value::Array(items) => Ok(items),
            other => Err(UpstreamError::unavailable(
                SERVICE,
                format!("expected a list of {}, got {}", resource, type_name(&other)),
            )),
        }
    }

    pub fn shop(&self) -> Result<Value, UpstreamError> {
        self.get("shop", &[], "shop")
    }

    pub fn orders(&self, limit: u32, status: &str) -> Result<Vec<Value>, UpstreamError> {
        self.get_list(
            "orders",
            &[("limit", limit.to_string()), ("status", status.to_string())],
        )
    }

    pub fn customers(&self, limit: u32) -> Result<Vec<Value>, UpstreamError> {
        self.get_list("customers", &[("limit", limit.to_string())])
    }

    pub fn products(&self, limit: u32) -> Result<Vec<Value>, UpstreamError> {
        self.get_list("products", &[("limit", limit.to_string())])
    }

    pub fn order(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get(&format!("orders/{}", id), &[], "order")
    }

    pub fn customer(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get(&format!("customers/{}", id), &[], "customer")
    }

    /// Revenue summary over the most recent orders.
    pub fn order_analytics(&self, period: &str) -> Result<OrderAnalytics, UpstreamError> {
        let orders = self.orders(ANALYTICS_ORDER_LIMIT, "any")?;
        Ok(OrderAnalytics::from_orders(&orders, period))
    }
}

/// Basic store metrics derived from a batch of orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAnalytics {
    pub total_orders: usize,
    pub total_revenue: Money,
    pub average_order_value: Money,
    pub period: String,
}

impl OrderAnalytics {
    /// Sums `total_price` across orders. Missing or unparseable prices count as 0.
    pub fn from_orders(orders: &[Value], period: &str) -> Self {
        let total_revenue: Decimal = orders.iter().map(order_total).sum();
        let average = if orders.is_empty() {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(orders.len())
        };

        Self {
            total_orders: orders.len(),
            total_revenue: Money::from_decimal(total_revenue),
            average_order_value: Money::from_decimal(average),
            period: period.to_string(),
        }
    }
}

fn order_total(order: &Value) -> Decimal {
    match order.get("total_price") {
        Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
