use std::path::{Path, PathBuf};
use crate::errors::CostmergeError;
use super::credentials::resolve_credential;
use super::types::CostmergeConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<CostmergeConfig, CostmergeError> {
    if !path.exists() {
        return Err(CostmergeError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(CostmergeError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse YAML config text. An empty document yields the defaults.
pub fn parse_config_str(content: &str) -> Result<CostmergeConfig, CostmergeError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        return Ok(CostmergeConfig::default());
    }

    validate_schema(&yaml)?;

    let mut config: CostmergeConfig = serde_yaml::from_value(yaml)?;
    config.api_key = config.api_key.as_deref().map(resolve_credential);
    Ok(config)
}

/// `$XDG_CONFIG_HOME/costmerge/config.yml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("costmerge").join("config.yml"))
}

/// Load configuration from an explicit path, or the default path if it
/// exists, then apply environment overrides.
pub async fn load_config(explicit: Option<&Path>) -> Result<CostmergeConfig, CostmergeError> {
    let mut config = match explicit {
        Some(path) => parse_config(path).await?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading default config file");
                parse_config(&path).await?
            }
            _ => CostmergeConfig::default(),
        },
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Overlay `COSTMERGE_*` variables onto the file config.
pub fn apply_env_overrides<F>(config: &mut CostmergeConfig, lookup: F) -> Result<(), CostmergeError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("COSTMERGE_API_KEY").filter(|v| !v.is_empty()) {
        config.api_key = Some(key);
    }
    if let Some(value) = lookup("COSTMERGE_ENABLE_DASHBOARD") {
        config.enable_dashboard = parse_bool("COSTMERGE_ENABLE_DASHBOARD", &value)?;
    }
    if let Some(value) = lookup("COSTMERGE_NO_COLOR") {
        config.no_color = parse_bool("COSTMERGE_NO_COLOR", &value)?;
    }
    if let Some(endpoint) = lookup("COSTMERGE_PRICING_API_ENDPOINT").filter(|v| !v.is_empty()) {
        config.pricing_api_endpoint = endpoint;
    }
    if let Some(endpoint) = lookup("COSTMERGE_DASHBOARD_API_ENDPOINT").filter(|v| !v.is_empty()) {
        config.dashboard_api_endpoint = endpoint;
    }
    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, CostmergeError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CostmergeError::Config(format!(
            "Invalid boolean value '{}' for {}",
            other, name
        ))),
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), CostmergeError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| CostmergeError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| CostmergeError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only: typed parsing below is the real gate
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_config_str("").unwrap(), CostmergeConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(
            "no_color: true\nenable_dashboard: true\napi_key: ico-abc\n\
             pricing_api_endpoint: http://localhost:4000\nlog_level: debug\n",
        )
        .unwrap();
        assert!(config.no_color);
        assert!(config.enable_dashboard);
        assert_eq!(config.api_key.as_deref(), Some("ico-abc"));
        assert!(config.is_self_hosted());
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_wrong_type_fails() {
        assert!(parse_config_str("enable_dashboard: [1, 2]\n").is_err());
    }

    #[test]
    fn test_unknown_keys_only_warn() {
        let config = parse_config_str("colour: blue\n").unwrap();
        assert_eq!(config, CostmergeConfig::default());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = CostmergeConfig::default();
        apply_env_overrides(
            &mut config,
            lookup(&[
                ("COSTMERGE_API_KEY", "ico-env"),
                ("COSTMERGE_ENABLE_DASHBOARD", "true"),
                ("COSTMERGE_NO_COLOR", "1"),
                ("COSTMERGE_DASHBOARD_API_ENDPOINT", "http://dash.local"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("ico-env"));
        assert!(config.enable_dashboard);
        assert!(config.no_color);
        assert_eq!(config.dashboard_api_endpoint, "http://dash.local");
    }

    #[test]
    fn test_env_invalid_bool_rejected() {
        let mut config = CostmergeConfig::default();
        let err = apply_env_overrides(&mut config, lookup(&[("COSTMERGE_NO_COLOR", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("COSTMERGE_NO_COLOR"));
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = parse_config(&dir.path().join("nope.yml")).await.unwrap_err();
        assert!(matches!(err, CostmergeError::Config(_)));
    }

    #[tokio::test]
    async fn test_parse_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "enable_dashboard: true\n").unwrap();
        let config = parse_config(&path).await.unwrap();
        assert!(config.enable_dashboard);
    }
}
