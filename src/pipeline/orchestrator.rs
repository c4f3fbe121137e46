use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::apiclient::TelemetryClient;
use crate::combine::{self, CombineOptions, VersionGate, BASELINE_CURRENCY};
use crate::config::RunContext;
use crate::errors::CostmergeError;
use crate::models::{CombinedReport, ReportDocument, ReportInput};
use crate::output::{self, field_format_warning, OutputFormat};
use super::telemetry::{report_event, report_run};
use tracing::{debug, info, warn};

/// Usage event sent after every successful render.
pub const OUTPUT_EVENT: &str = "costmerge-output";

/// What the user asked the `output` command to do.
#[derive(Debug, Clone)]
pub struct OutputRequest {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    /// `None` when `--fields` was not given.
    pub fields: Option<Vec<String>>,
    pub show_skipped: bool,
}

/// A rendered report plus the warnings raised while producing it.
#[derive(Debug)]
pub struct OutputOutcome {
    pub rendered: Vec<u8>,
    pub warnings: Vec<String>,
    pub report: CombinedReport,
}

/// Called with each user-facing warning as soon as it is raised.
pub type WarningHandler = Box<dyn Fn(&str) + Send + Sync>;

pub struct OutputPipeline {
    ctx: RunContext,
    gate: VersionGate,
    telemetry: Arc<dyn TelemetryClient>,
    on_warning: Option<WarningHandler>,
}

impl OutputPipeline {
    pub fn new(ctx: RunContext, telemetry: Arc<dyn TelemetryClient>) -> Self {
        Self {
            ctx,
            gate: VersionGate::default(),
            telemetry,
            on_warning: None,
        }
    }

    pub fn with_warning_handler(mut self, handler: WarningHandler) -> Self {
        self.on_warning = Some(handler);
        self
    }

    /// Read, parse and version-check every file, in order. The first file
    /// that fails any of these stops the load.
    pub async fn load_inputs(&self, paths: &[PathBuf]) -> Result<Vec<ReportInput>, CostmergeError> {
        let mut inputs = Vec::with_capacity(paths.len());
        for path in paths {
            let root = load_document(path).await?;
            self.gate.check(&root.version).inspect_err(|_| {
                warn!(
                    file = %path.display(),
                    version = %root.version,
                    "Unsupported report version"
                );
            })?;
            inputs.push(ReportInput::with_filename(root, path.to_string_lossy()));
        }
        Ok(inputs)
    }

    /// The currency every input agrees on.
    pub fn reconcile_currency(&self, inputs: &[ReportInput]) -> Result<String, CostmergeError> {
        let currency = combine::reconcile_all(inputs.iter().map(|i| &i.root))?;
        Ok(if currency.is_empty() {
            BASELINE_CURRENCY.to_string()
        } else {
            currency
        })
    }

    fn raise_warning(&self, warnings: &mut Vec<String>, warning: String) {
        debug!(warning = %warning, "Output warning");
        if let Some(handler) = &self.on_warning {
            handler(&warning);
        }
        warnings.push(warning);
    }

    /// Load, validate, combine and render. Nothing is rendered unless every
    /// input passes validation.
    pub async fn run(&mut self, request: &OutputRequest) -> Result<OutputOutcome, CostmergeError> {
        let inputs = self.load_inputs(&request.paths).await?;
        let currency = self.reconcile_currency(&inputs)?;
        info!(inputs = inputs.len(), currency = %currency, "Combining reports");
        self.ctx.set_context_value("outputFormat", request.format.as_str());

        let selection = combine::resolve_fields(request.fields.as_deref());
        let mut warnings = Vec::new();
        for warning in selection.warnings {
            self.raise_warning(&mut warnings, warning);
        }
        if let Some(w) = field_format_warning(request.fields.is_some(), &request.format) {
            self.raise_warning(&mut warnings, w);
        }

        let options = CombineOptions {
            fields: selection.fields,
            show_skipped: request.show_skipped,
            no_color: self.ctx.config.no_color,
            dashboard_enabled: self.ctx.config.enable_dashboard,
            ..CombineOptions::default()
        };

        let mut report = combine::combine(&currency, &inputs, &options);

        if options.dashboard_enabled {
            if self.ctx.config.is_self_hosted() {
                self.raise_warning(
                    &mut warnings,
                    "The dashboard is part of the hosted service and may not accept runs priced by a self-hosted endpoint."
                        .to_string(),
                );
            }
            self.upload_run(&inputs, &mut report).await;
        }

        let rendered = output::render(&request.format, &report, &options)?;
        debug!(format = %request.format, bytes = rendered.len(), "Rendered report");

        report_event(self.telemetry.as_ref(), OUTPUT_EVENT, &self.ctx).await;

        Ok(OutputOutcome {
            rendered,
            warnings,
            report,
        })
    }

    async fn upload_run(&mut self, inputs: &[ReportInput], report: &mut CombinedReport) {
        let run_ids: Vec<String> = inputs
            .iter()
            .filter_map(|i| i.root.run_id.clone())
            .filter(|id| !id.is_empty())
            .collect();
        self.ctx.set_context_value("runIds", run_ids);

        if let Some(run) = report_run(self.telemetry.as_ref(), &self.ctx, report).await {
            report.run_id = Some(run.run_id);
            report.share_url = run.share_url;
        }
    }
}

async fn load_document(path: &Path) -> Result<ReportDocument, CostmergeError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| CostmergeError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;

    ReportDocument::load(&data).map_err(|source| CostmergeError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}
