//! Configuration file parsing for .shepherd.toml

use crate::catalog::TierKind;
use crate::error::EntitlementError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILENAME: &str = ".shepherd.toml";

/// Main configuration structure for .shepherd.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShepherdConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Shopify shop name (the `<name>` in `<name>.myshopify.com`).
    /// Overridden by SHOPIFY_SHOP_NAME.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopify_shop: Option<String>,

    /// Admin API access token. Overridden by SHOPIFY_ACCESS_TOKEN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopify_access_token: Option<String>,

    #[serde(default = "default_api_version")]
    pub shopify_api_version: String,

    /// Override for the Shopify base URL (e.g. a local proxy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopify_base_url: Option<String>,

    /// Analytics/fraud service base URL. Overridden by PYTHON_SERVICE_URL.
    #[serde(default = "default_analytics_url")]
    pub analytics_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Tier a new dashboard session starts on
    #[serde(default = "default_tier")]
    pub default_tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_api_version() -> String {
    "2024-01".to_string()
}

fn default_analytics_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_tier() -> String {
    TierKind::default().name().to_string()
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ShepherdConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty TOML should parse to defaults")
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            shopify_shop: None,
            shopify_access_token: None,
            shopify_api_version: default_api_version(),
            shopify_base_url: None,
            analytics_url: default_analytics_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_tier: default_tier(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

impl SessionConfig {
    /// Resolves `default_tier` against the catalog.
    pub fn tier(&self) -> Result<TierKind, EntitlementError> {
        self.default_tier.parse()
    }
}

impl ShepherdConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ShepherdConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .shepherd.toml from the current directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Applies SHOPIFY_SHOP_NAME, SHOPIFY_ACCESS_TOKEN and PYTHON_SERVICE_URL
    /// from `lookup`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(shop) = get("SHOPIFY_SHOP_NAME") {
            self.upstream.shopify_shop = Some(shop);
        }
        if let Some(token) = get("SHOPIFY_ACCESS_TOKEN") {
            self.upstream.shopify_access_token = Some(token);
        }
        if let Some(url) = get("PYTHON_SERVICE_URL") {
            self.upstream.analytics_url = url;
        }
    }

    /// [`Self::apply_env`] against the process environment.
    pub fn with_process_env(mut self) -> Self {
        self.apply_env(|key| std::env::var(key).ok());
        self
    }
}
