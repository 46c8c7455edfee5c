//! `shepherd shop`: read-only views of the Shopify store

use anyhow::Result;
use shepherd_core::config::UpstreamConfig;

use super::{fetch_and_print, report_client_error};
use crate::upstream::analytics::DEFAULT_PERIOD;
use crate::upstream::shopify::DEFAULT_LIMIT;
use crate::upstream::{Envelope, ShopifyClient, UpstreamError};
use crate::OutputFormat;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum ShopAction {
    /// Store details
    Info,
    /// Recent orders
    Orders {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        /// Order status filter (open, closed, cancelled, any)
        #[arg(long, default_value = "any")]
        status: String,
    },
    /// Customers
    Customers {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Products
    Products {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// A single order
    Order { id: String },
    /// A single customer
    Customer { id: String },
    /// Order count, revenue and average order value
    Analytics {
        #[arg(long, default_value = DEFAULT_PERIOD)]
        period: String,
    },
}

pub fn run(action: &ShopAction, config: &UpstreamConfig, format: OutputFormat) -> Result<bool> {
    let client = match ShopifyClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return report_client_error(format, &e),
    };

    match action {
        ShopAction::Info => fetch_and_print(format, "shop information", || {
            Envelope::from_result("shop information", client.shop())
        }),
        ShopAction::Orders { limit, status } => fetch_and_print(format, "orders", || {
            Envelope::from_list_result("orders", client.orders(*limit, status))
        }),
        ShopAction::Customers { limit } => fetch_and_print(format, "customers", || {
            Envelope::from_list_result("customers", client.customers(*limit))
        }),
        ShopAction::Products { limit } => fetch_and_print(format, "products", || {
            Envelope::from_list_result("products", client.products(*limit))
        }),
        ShopAction::Order { id } => fetch_and_print(format, "order", || {
            Envelope::from_result("order", client.order(id))
        }),
        ShopAction::Customer { id } => fetch_and_print(format, "customer", || {
            Envelope::from_result("customer", client.customer(id))
        }),
        ShopAction::Analytics { period } => fetch_and_print(format, "analytics", || {
            let summary = client.order_analytics(period).and_then(|a| {
                serde_json::to_value(a).map_err(|e| UpstreamError::unavailable("Shopify", e))
            });
            Envelope::from_result("analytics", summary)
        }),
    }
}
