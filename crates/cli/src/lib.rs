//! Shepherd CLI library, exposed for integration tests

pub mod commands;
pub mod observability;
pub mod output;
pub mod progress;
pub mod session;
pub mod upstream;

use clap::{Parser, Subcommand};
use shepherd_core::TierKind;
use std::path::PathBuf;

use commands::forward::WebhookKind;
use commands::insights::InsightsAction;
use commands::shop::ShopAction;

#[derive(Parser)]
#[command(name = "shepherd")]
#[command(about = "DarkShepherd protection plans, pricing and store security", long_about = None)]
#[command(version = shepherd_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (default: `output.format` from .shepherd.toml)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file to use instead of searching for .shepherd.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .shepherd.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,

        /// Plan that new sessions start on
        #[arg(long)]
        tier: Option<TierKind>,
    },

    /// List protection plans and their add-on/swap rules
    Tiers,

    /// Show which protections each plan includes
    Matrix,

    /// Price a plan without opening a session
    Quote {
        /// Plan name, e.g. "Pup SR." or pup-sr
        #[arg(long)]
        tier: TierKind,

        /// Number of selected protections (default: the plan's default selection)
        #[arg(long)]
        protections: Option<usize>,

        /// Swaps already used this billing period
        #[arg(long, default_value_t = 0)]
        swaps: u32,
    },

    /// Interactive protection dashboard reading commands from stdin
    Session {
        /// Starting plan (default: `session.default_tier`)
        #[arg(long)]
        tier: Option<TierKind>,
    },

    /// Query the Shopify store
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },

    /// Query the analytics and fraud service
    Insights {
        #[command(subcommand)]
        action: InsightsAction,
    },

    /// Forward a Shopify webhook payload to the analytics service
    Forward {
        /// Payload type
        #[arg(value_enum)]
        kind: WebhookKind,

        /// JSON file holding the webhook body
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Reads `output.format`; anything but "json" is terminal.
    pub fn from_config(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Terminal
        }
    }
}
