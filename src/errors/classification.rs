use super::types::CostmergeError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl CostmergeError {
    /// Classify this error to determine its type and the process exit code.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            CostmergeError::Config(_) | CostmergeError::Yaml(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },

            // Input errors: one unreadable file halts the whole run
            CostmergeError::ReadInput { .. } => ErrorClassification {
                error_type: "ReadInputError",
                exit_code: 3,
            },
            CostmergeError::ParseInput { .. } => ErrorClassification {
                error_type: "ParseInputError",
                exit_code: 3,
            },

            // Compatibility errors
            CostmergeError::UnsupportedVersion { .. } => ErrorClassification {
                error_type: "UnsupportedVersionError",
                exit_code: 4,
            },
            CostmergeError::CurrencyMismatch { .. } => ErrorClassification {
                error_type: "CurrencyMismatchError",
                exit_code: 4,
            },

            CostmergeError::Render(_) => ErrorClassification {
                error_type: "RenderError",
                exit_code: 5,
            },

            CostmergeError::Network(_) | CostmergeError::Http(_) => ErrorClassification {
                error_type: "NetworkError",
                exit_code: 1,
            },
            CostmergeError::Api(_) => ErrorClassification {
                error_type: "ApiError",
                exit_code: 1,
            },
            CostmergeError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            CostmergeError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
            CostmergeError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                exit_code: 1,
            },
        }
    }
}
