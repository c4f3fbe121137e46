use std::sync::Arc;

use crate::apiclient::HttpTelemetryClient;
use crate::config::{CostmergeConfig, RunContext};
use crate::errors::CostmergeError;
use crate::pipeline::OutputPipeline;
use crate::utils::paths::expand_input_patterns;
use super::commands::ValidateArgs;

pub async fn handle_validate(args: ValidateArgs, config: CostmergeConfig) -> Result<(), CostmergeError> {
    let paths = expand_input_patterns(&args.paths)?;
    let telemetry = Arc::new(HttpTelemetryClient::new(&config));
    let pipeline = OutputPipeline::new(RunContext::new(config), telemetry);

    let inputs = pipeline.load_inputs(&paths).await?;
    let currency = pipeline.reconcile_currency(&inputs)?;
    println!("{} report(s) valid, currency {}", inputs.len(), currency);
    Ok(())
}
