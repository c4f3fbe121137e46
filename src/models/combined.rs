use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::report::{Project, ReportDocument, Summary};

/// A project from one input, tagged with that input's metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedProject {
    pub metadata: BTreeMap<String, String>,
    pub project: Project,
}

/// All projects whose inputs share the same value for the grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportGroup {
    pub key: String,
    pub projects: Vec<CombinedProject>,
}

/// The merged result of every input document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub version: String,
    pub currency: String,
    /// Display label for the grouping key, e.g. "File".
    pub group_label: String,
    pub groups: Vec<ReportGroup>,
    pub total_hourly_cost: Option<Decimal>,
    pub total_monthly_cost: Option<Decimal>,
    pub past_total_hourly_cost: Option<Decimal>,
    pub past_total_monthly_cost: Option<Decimal>,
    pub diff_total_hourly_cost: Option<Decimal>,
    pub diff_total_monthly_cost: Option<Decimal>,
    pub time_generated: Option<DateTime<Utc>>,
    pub summary: Summary,
    pub run_id: Option<String>,
    pub share_url: Option<String>,
}

impl CombinedReport {
    /// Every project in group order.
    pub fn projects(&self) -> impl Iterator<Item = &CombinedProject> {
        self.groups.iter().flat_map(|g| g.projects.iter())
    }

    pub fn project_count(&self) -> usize {
        self.groups.iter().map(|g| g.projects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.project_count() == 0
    }

    /// Flatten back into a single document with the same shape as the inputs.
    pub fn to_document(&self) -> ReportDocument {
        ReportDocument {
            version: self.version.clone(),
            currency: self.currency.clone(),
            run_id: self.run_id.clone(),
            share_url: self.share_url.clone(),
            projects: self.projects().map(|p| p.project.clone()).collect(),
            total_hourly_cost: self.total_hourly_cost,
            total_monthly_cost: self.total_monthly_cost,
            past_total_hourly_cost: self.past_total_hourly_cost,
            past_total_monthly_cost: self.past_total_monthly_cost,
            diff_total_hourly_cost: self.diff_total_hourly_cost,
            diff_total_monthly_cost: self.diff_total_monthly_cost,
            time_generated: self.time_generated,
            summary: Some(self.summary.clone()),
        }
    }
}
