//! Non-fatal wrappers around the telemetry client. Failures end up in the
//! log and never in the command's result.

use crate::apiclient::{AddRunResponse, TelemetryClient};
use crate::config::RunContext;
use crate::models::CombinedReport;
use tracing::{debug, error};

/// Upload the run to the dashboard. Returns `None` if the upload failed.
pub async fn report_run(
    client: &dyn TelemetryClient,
    ctx: &RunContext,
    report: &CombinedReport,
) -> Option<AddRunResponse> {
    match client.add_run(ctx, report).await {
        Ok(run) => {
            debug!(run_id = %run.run_id, "Run uploaded to dashboard");
            Some(run)
        }
        Err(e) => {
            error!(error = %e, "Failed to upload run to dashboard");
            None
        }
    }
}

/// Send a usage event carrying the context's environment.
pub async fn report_event(client: &dyn TelemetryClient, name: &str, ctx: &RunContext) {
    if let Err(e) = client.add_event(name, ctx.event_env()).await {
        error!(error = %e, event = name, "Failed to report usage event");
    }
}
