use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Mask an API key for logs, keeping only the last four characters.
pub fn redact_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "[REDACTED]".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_literal() {
        assert_eq!(resolve_credential("ico-abc"), "ico-abc");
    }

    #[test]
    fn test_resolve_unset_env_keeps_literal() {
        assert_eq!(
            resolve_credential("$COSTMERGE_TEST_SURELY_UNSET_VAR"),
            "$COSTMERGE_TEST_SURELY_UNSET_VAR"
        );
    }

    #[test]
    fn test_resolve_from_env() {
        std::env::set_var("COSTMERGE_TEST_CREDENTIAL", "secret-value");
        assert_eq!(resolve_credential("$COSTMERGE_TEST_CREDENTIAL"), "secret-value");
        std::env::remove_var("COSTMERGE_TEST_CREDENTIAL");
    }

    #[test]
    fn test_redact_api_key() {
        assert_eq!(redact_api_key("ico-1234567890abcd"), "****abcd");
        assert_eq!(redact_api_key("short"), "[REDACTED]");
    }
}
