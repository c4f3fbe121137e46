use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::RunContext;
use crate::errors::CostmergeError;
use crate::models::CombinedReport;
use super::types::AddRunResponse;

#[async_trait]
pub trait TelemetryClient: Send + Sync {
    /// Upload a combined run to the dashboard
    async fn add_run(
        &self,
        ctx: &RunContext,
        report: &CombinedReport,
    ) -> Result<AddRunResponse, CostmergeError>;

    /// Record a named usage event
    async fn add_event(
        &self,
        name: &str,
        env: Map<String, Value>,
    ) -> Result<(), CostmergeError>;
}
