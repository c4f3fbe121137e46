//! Renderers for the combined report, selected by format name.

pub mod diff;
pub mod html;
pub mod json;
pub mod markdown;
pub mod slack;
pub mod style;
pub mod table;

use crate::combine::CombineOptions;
use crate::errors::CostmergeError;
use crate::models::CombinedReport;

/// Output formats the `output` command can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Html,
    Diff,
    GitHubComment,
    GitLabComment,
    SlackMessage,
    /// A name we don't know. Rendered as a table.
    Unrecognized(String),
}

impl OutputFormat {
    /// Resolve a format name, case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "table" => Self::Table,
            "json" => Self::Json,
            "html" => Self::Html,
            "diff" => Self::Diff,
            "github-comment" => Self::GitHubComment,
            "gitlab-comment" => Self::GitLabComment,
            "slack-message" => Self::SlackMessage,
            _ => Self::Unrecognized(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Html => "html",
            Self::Diff => "diff",
            Self::GitHubComment => "github-comment",
            Self::GitLabComment => "gitlab-comment",
            Self::SlackMessage => "slack-message",
            Self::Unrecognized(name) => name,
        }
    }

    /// Only these formats render the `--fields` columns.
    pub fn honors_fields(&self) -> bool {
        matches!(self, Self::Table | Self::Html)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning for `--fields` given alongside a format that ignores it.
pub fn field_format_warning(fields_explicit: bool, format: &OutputFormat) -> Option<String> {
    if fields_explicit && !format.honors_fields() {
        Some("fields is only supported for table and html output formats".to_string())
    } else {
        None
    }
}

/// Render the report in the given format.
///
/// Comment formats always embed HTML regardless of `options.include_html`.
pub fn render(
    format: &OutputFormat,
    report: &CombinedReport,
    options: &CombineOptions,
) -> Result<Vec<u8>, CostmergeError> {
    match format {
        OutputFormat::Json => json::render(report, options),
        OutputFormat::Html => html::render(report, options),
        OutputFormat::Diff => diff::render(report, options),
        OutputFormat::GitHubComment | OutputFormat::GitLabComment => {
            let options = CombineOptions {
                include_html: true,
                ..options.clone()
            };
            markdown::render(report, &options)
        }
        OutputFormat::SlackMessage => slack::render(report, options),
        OutputFormat::Table | OutputFormat::Unrecognized(_) => table::render(report, options),
    }
}
