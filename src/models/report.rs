use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cost report document as written by the estimator, one per input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub version: String,
    /// ISO currency code. Empty means unspecified.
    #[serde(default)]
    pub currency: String,
    /// Identifier of the remote run that produced this document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub total_hourly_cost: Option<Decimal>,
    #[serde(default)]
    pub total_monthly_cost: Option<Decimal>,
    #[serde(default)]
    pub past_total_hourly_cost: Option<Decimal>,
    #[serde(default)]
    pub past_total_monthly_cost: Option<Decimal>,
    #[serde(default)]
    pub diff_total_hourly_cost: Option<Decimal>,
    #[serde(default)]
    pub diff_total_monthly_cost: Option<Decimal>,
    #[serde(default)]
    pub time_generated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

impl ReportDocument {
    /// Parse a document from raw JSON bytes.
    pub fn load(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub past_breakdown: Option<Breakdown>,
    #[serde(default)]
    pub breakdown: Option<Breakdown>,
    #[serde(default)]
    pub diff: Option<Breakdown>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

impl Project {
    /// Monthly cost of the current breakdown, if the project has one.
    pub fn monthly_cost(&self) -> Option<Decimal> {
        self.breakdown.as_ref().and_then(|b| b.total_monthly_cost)
    }

    pub fn past_monthly_cost(&self) -> Option<Decimal> {
        self.past_breakdown.as_ref().and_then(|b| b.total_monthly_cost)
    }

    pub fn diff_monthly_cost(&self) -> Option<Decimal> {
        self.diff.as_ref().and_then(|b| b.total_monthly_cost)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub total_hourly_cost: Option<Decimal>,
    #[serde(default)]
    pub total_monthly_cost: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub hourly_cost: Option<Decimal>,
    #[serde(default)]
    pub monthly_cost: Option<Decimal>,
    #[serde(default)]
    pub cost_components: Vec<CostComponent>,
    #[serde(default)]
    pub subresources: Vec<Resource>,
}

impl Resource {
    /// A resource with no monthly cost anywhere in its tree.
    pub fn is_free(&self) -> bool {
        self.monthly_cost.map_or(true, |c| c.is_zero())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub hourly_quantity: Option<Decimal>,
    #[serde(default)]
    pub monthly_quantity: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub hourly_cost: Option<Decimal>,
    #[serde(default)]
    pub monthly_cost: Option<Decimal>,
}

/// Resource counters reported alongside a breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub total_detected_resources: Option<u64>,
    #[serde(default)]
    pub total_supported_resources: Option<u64>,
    #[serde(default)]
    pub total_unsupported_resources: Option<u64>,
    #[serde(default)]
    pub total_usage_based_resources: Option<u64>,
    #[serde(default)]
    pub total_no_price_resources: Option<u64>,
    #[serde(default)]
    pub unsupported_resource_counts: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub no_price_resource_counts: Option<BTreeMap<String, u64>>,
}
