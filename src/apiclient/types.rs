use serde::{Deserialize, Serialize};

/// Identifiers assigned by the dashboard to an uploaded run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRunResponse {
    #[serde(rename = "id")]
    pub run_id: String,
    #[serde(default)]
    pub share_url: Option<String>,
}
