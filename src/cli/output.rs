use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use console::style;

use crate::apiclient::HttpTelemetryClient;
use crate::config::{CostmergeConfig, RunContext};
use crate::errors::CostmergeError;
use crate::output::OutputFormat;
use crate::pipeline::{OutputPipeline, OutputRequest};
use crate::utils::paths::expand_input_patterns;
use super::commands::OutputArgs;
use tracing::info;

pub async fn handle_output(
    args: OutputArgs,
    config: CostmergeConfig,
    quiet: bool,
) -> Result<(), CostmergeError> {
    let paths = expand_input_patterns(&args.paths)?;
    let telemetry = Arc::new(HttpTelemetryClient::new(&config));
    let mut pipeline = OutputPipeline::new(RunContext::new(config), telemetry)
        .with_warning_handler(Box::new(print_warning));

    let request = OutputRequest {
        paths,
        format: OutputFormat::parse(&args.format),
        fields: args.fields.map(normalize_fields),
        show_skipped: args.show_skipped,
    };

    let outcome = pipeline.run(&request).await?;
    write_output(&outcome.rendered, args.out_file.as_deref(), quiet).await
}

/// `--fields ""` arrives as a single empty name; treat it as an empty list.
fn normalize_fields(fields: Vec<String>) -> Vec<String> {
    fields
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

pub fn print_warning(warning: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), warning);
}

/// Write rendered output to `out_file`, or to stdout followed by a newline.
pub async fn write_output(
    rendered: &[u8],
    out_file: Option<&Path>,
    quiet: bool,
) -> Result<(), CostmergeError> {
    match out_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    CostmergeError::Internal(format!("Unable to save output: {}", e))
                })?;
            }
            tokio::fs::write(path, rendered).await.map_err(|e| {
                CostmergeError::Internal(format!("Unable to save output: {}", e))
            })?;
            info!(path = %path.display(), bytes = rendered.len(), "Output saved");
            if !quiet {
                eprintln!("Output saved to {}", path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered)?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
