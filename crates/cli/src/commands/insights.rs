//! `shepherd insights`: queries against the analytics/fraud service

use anyhow::Result;
use shepherd_core::config::UpstreamConfig;

use super::{fetch_and_print, report_client_error};
use crate::upstream::analytics::{DEFAULT_INSIGHTS_LIMIT, DEFAULT_PERIOD};
use crate::upstream::{AnalyticsClient, Envelope};
use crate::OutputFormat;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum InsightsAction {
    /// Store-wide analytics overview
    Overview {
        #[arg(long, default_value = DEFAULT_PERIOD)]
        period: String,
    },
    /// Fraud trends over a period
    FraudTrends {
        #[arg(long, default_value = DEFAULT_PERIOD)]
        period: String,
    },
    /// Customer behaviour insights
    CustomerInsights {
        #[arg(long, default_value_t = DEFAULT_INSIGHTS_LIMIT)]
        limit: u32,
    },
    /// Order pattern analysis
    OrderPatterns {
        #[arg(long, default_value = DEFAULT_PERIOD)]
        period: String,
    },
    /// Active security alerts
    Alerts,
    /// Fraud analysis for one order
    FraudOrder { id: String },
    /// Risk profile for one customer
    RiskCustomer { id: String },
    /// Security dashboard summary
    Dashboard,
    /// Analytics service health
    Health,
}

pub fn run(action: &InsightsAction, config: &UpstreamConfig, format: OutputFormat) -> Result<bool> {
    let client = match AnalyticsClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return report_client_error(format, &e),
    };

    match action {
        InsightsAction::Overview { period } => fetch_and_print(format, "analytics overview", || {
            Envelope::from_result("analytics overview", client.overview(period))
        }),
        InsightsAction::FraudTrends { period } => fetch_and_print(format, "fraud trends", || {
            Envelope::from_result("fraud trends", client.fraud_trends(period))
        }),
        InsightsAction::CustomerInsights { limit } => {
            fetch_and_print(format, "customer insights", || {
                Envelope::from_result("customer insights", client.customer_insights(*limit))
            })
        }
        InsightsAction::OrderPatterns { period } => fetch_and_print(format, "order patterns", || {
            Envelope::from_result("order patterns", client.order_patterns(period))
        }),
        InsightsAction::Alerts => fetch_and_print(format, "security alerts", || {
            Envelope::from_result("security alerts", client.alerts())
        }),
        InsightsAction::FraudOrder { id } => fetch_and_print(format, "fraud analysis", || {
            Envelope::from_result("fraud analysis", client.fraud_for_order(id))
        }),
        InsightsAction::RiskCustomer { id } => fetch_and_print(format, "customer risk", || {
            Envelope::from_result("customer risk", client.risk_for_customer(id))
        }),
        InsightsAction::Dashboard => fetch_and_print(format, "security dashboard", || {
            Envelope::from_result("security dashboard", client.dashboard())
        }),
        InsightsAction::Health => fetch_and_print(format, "service health", || {
            Envelope::from_result("service health", client.health())
        }),
    }
}
