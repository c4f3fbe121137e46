use std::collections::BTreeMap;

use super::report::ReportDocument;

/// Metadata key holding the path an input document was read from.
pub const FILENAME_KEY: &str = "filename";

/// A loaded document together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub metadata: BTreeMap<String, String>,
    pub root: ReportDocument,
}

impl ReportInput {
    pub fn new(root: ReportDocument) -> Self {
        Self {
            metadata: BTreeMap::new(),
            root,
        }
    }

    pub fn with_filename(root: ReportDocument, filename: impl Into<String>) -> Self {
        let mut input = Self::new(root);
        input.metadata.insert(FILENAME_KEY.to_string(), filename.into());
        input
    }

    pub fn metadata_value(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or("")
    }
}
