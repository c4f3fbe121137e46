use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostmergeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error reading JSON file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing JSON file {}: {source}", path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid cost report version. Supported versions are {min} ≤ x ≤ {max}")]
    UnsupportedVersion { min: String, max: String },

    #[error("Invalid cost report currency mismatch. Can't combine {expected} and {found}")]
    CurrencyMismatch { expected: String, found: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_mismatch_names_both_currencies() {
        let err = CostmergeError::CurrencyMismatch {
            expected: "USD".into(),
            found: "EUR".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("USD"));
        assert!(msg.contains("EUR"));
    }

    #[test]
    fn test_unsupported_version_names_range() {
        let err = CostmergeError::UnsupportedVersion {
            min: "0.2".into(),
            max: "0.3".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid cost report version. Supported versions are 0.2 ≤ x ≤ 0.3"
        );
    }

    #[test]
    fn test_read_input_includes_path() {
        let err = CostmergeError::ReadInput {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("missing.json"));
    }
}
