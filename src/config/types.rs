use serde::{Deserialize, Serialize};

pub const DEFAULT_PRICING_API_ENDPOINT: &str = "https://pricing.api.costmerge.dev";
pub const DEFAULT_DASHBOARD_API_ENDPOINT: &str = "https://dashboard.api.costmerge.dev";

/// Settings read from the YAML config file and environment.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CostmergeConfig {
    pub no_color: bool,
    pub enable_dashboard: bool,
    pub api_key: Option<String>,
    pub pricing_api_endpoint: String,
    pub dashboard_api_endpoint: String,
    pub log_level: Option<String>,
}

impl Default for CostmergeConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            enable_dashboard: false,
            api_key: None,
            pricing_api_endpoint: DEFAULT_PRICING_API_ENDPOINT.to_string(),
            dashboard_api_endpoint: DEFAULT_DASHBOARD_API_ENDPOINT.to_string(),
            log_level: None,
        }
    }
}

impl CostmergeConfig {
    /// True when pointed at a pricing service other than the hosted one.
    pub fn is_self_hosted(&self) -> bool {
        self.pricing_api_endpoint.trim_end_matches('/') != DEFAULT_PRICING_API_ENDPOINT
    }
}
