use super::fields::Field;

/// Metadata key inputs are grouped by unless configured otherwise.
pub const DEFAULT_GROUP_KEY: &str = "filename";
pub const DEFAULT_GROUP_LABEL: &str = "File";

/// Settings for one combine-and-render run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOptions {
    pub group_key: String,
    pub group_label: String,
    pub fields: Vec<Field>,
    /// Include unsupported and free resources in the output.
    pub show_skipped: bool,
    /// Markdown renderers embed an HTML fragment (collapsible details).
    pub include_html: bool,
    pub no_color: bool,
    pub dashboard_enabled: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            group_key: DEFAULT_GROUP_KEY.to_string(),
            group_label: DEFAULT_GROUP_LABEL.to_string(),
            fields: Field::DEFAULT.to_vec(),
            show_skipped: false,
            include_html: false,
            no_color: false,
            dashboard_enabled: false,
        }
    }
}
