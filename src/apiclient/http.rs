use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::credentials::redact_api_key;
use crate::config::{CostmergeConfig, RunContext};
use crate::errors::CostmergeError;
use crate::models::CombinedReport;
use super::client::TelemetryClient;
use super::types::AddRunResponse;

const ADD_RUN_MUTATION: &str =
    "mutation AddRun($run: RunInput!) { addRun(run: $run) { id shareUrl } }";

pub struct HttpTelemetryClient {
    client: Client,
    api_key: Option<String>,
    pricing_endpoint: String,
    dashboard_endpoint: String,
}

impl HttpTelemetryClient {
    pub fn new(config: &CostmergeConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            pricing_endpoint: config.pricing_api_endpoint.trim_end_matches('/').to_string(),
            dashboard_endpoint: config.dashboard_api_endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn api_key(&self) -> Result<&str, CostmergeError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CostmergeError::Config("No API key configured".into()))
    }
}

#[async_trait]
impl TelemetryClient for HttpTelemetryClient {
    async fn add_run(
        &self,
        ctx: &RunContext,
        report: &CombinedReport,
    ) -> Result<AddRunResponse, CostmergeError> {
        let api_key = self.api_key()?;
        let run_ids = ctx.context_value("runIds").cloned().unwrap_or_else(|| json!([]));
        debug!(
            endpoint = %self.dashboard_endpoint,
            api_key = %redact_api_key(api_key),
            projects = report.project_count(),
            "Uploading run to dashboard"
        );

        let body = json!({
            "query": ADD_RUN_MUTATION,
            "variables": {
                "run": {
                    "runIds": run_ids,
                    "report": report.to_document(),
                }
            }
        });

        let resp = self.client
            .post(format!("{}/graphql", self.dashboard_endpoint))
            .header("x-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CostmergeError::Network(format!("Dashboard request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CostmergeError::Api(format!("Dashboard returned HTTP {}", status)));
        }

        let data: Value = resp.json().await
            .map_err(|e| CostmergeError::Api(format!("Failed to parse dashboard response: {}", e)))?;
        parse_add_run(&data)
    }

    async fn add_event(
        &self,
        name: &str,
        env: Map<String, Value>,
    ) -> Result<(), CostmergeError> {
        let mut request = self.client
            .post(format!("{}/event", self.pricing_endpoint))
            .header("content-type", "application/json")
            .json(&json!({ "event": name, "env": env }));
        if let Ok(key) = self.api_key() {
            request = request.header("x-api-key", key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| CostmergeError::Network(format!("Event request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CostmergeError::Api(format!("Event endpoint returned HTTP {}", status)));
        }

        debug!(event = name, "Usage event sent");
        Ok(())
    }
}

fn parse_add_run(data: &Value) -> Result<AddRunResponse, CostmergeError> {
    if let Some(error) = data.get("errors").and_then(|e| e.get(0)) {
        let msg = error["message"].as_str().unwrap_or("Unknown error");
        return Err(CostmergeError::Api(msg.to_string()));
    }

    let run = data
        .pointer("/data/addRun")
        .cloned()
        .ok_or_else(|| CostmergeError::Api("No run in dashboard response".into()))?;
    Ok(serde_json::from_value(run)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_run() {
        let data = json!({"data": {"addRun": {"id": "run-1", "shareUrl": "https://share/1"}}});
        let run = parse_add_run(&data).unwrap();
        assert_eq!(run.run_id, "run-1");
        assert_eq!(run.share_url.as_deref(), Some("https://share/1"));
    }

    #[test]
    fn test_parse_add_run_graphql_error() {
        let data = json!({"errors": [{"message": "invalid key"}]});
        let err = parse_add_run(&data).unwrap_err();
        assert!(matches!(err, CostmergeError::Api(ref m) if m == "invalid key"));
    }

    #[test]
    fn test_parse_add_run_missing_data() {
        assert!(parse_add_run(&json!({"data": null})).is_err());
    }

    #[tokio::test]
    async fn test_add_run_without_api_key_fails() {
        let client = HttpTelemetryClient::new(&CostmergeConfig::default());
        let report = crate::combine::combine("USD", &[], &Default::default());
        let err = client.add_run(&RunContext::default(), &report).await.unwrap_err();
        assert!(matches!(err, CostmergeError::Config(_)));
    }
}
