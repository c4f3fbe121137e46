use std::path::PathBuf;

use crate::errors::CostmergeError;
use tracing::debug;

/// Expand a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf, CostmergeError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    if !rest.is_empty() && !rest.starts_with('/') && !rest.starts_with('\\') {
        return Err(CostmergeError::Config(format!(
            "Failed to expand path {}: cannot expand user-specific home dir",
            path
        )));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        CostmergeError::Config(format!("Failed to expand path {}: home directory not found", path))
    })?;

    let rest = rest.trim_start_matches(['/', '\\']);
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

/// Resolve `--path` values into input files, in the order given.
///
/// Each value is home-expanded and then globbed. A value matching nothing is
/// kept as-is so the read step reports the missing file.
pub fn expand_input_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, CostmergeError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let expanded = expand_home(pattern)?;
        let expanded_str = expanded.to_string_lossy();

        let matches: Vec<PathBuf> = match glob::glob(&expanded_str) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(e) => {
                debug!(pattern = %pattern, error = %e, "Invalid glob pattern, using literal path");
                Vec::new()
            }
        };

        if matches.is_empty() {
            files.push(PathBuf::from(pattern));
        } else {
            debug!(pattern = %pattern, count = matches.len(), "Expanded input pattern");
            files.extend(matches);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_expand_home_passthrough() {
        assert_eq!(expand_home("out.json").unwrap(), PathBuf::from("out.json"));
        assert_eq!(expand_home("/tmp/a~b.json").unwrap(), PathBuf::from("/tmp/a~b.json"));
    }

    #[test]
    fn test_expand_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/reports/a.json").unwrap(), home.join("reports/a.json"));
            assert_eq!(expand_home("~").unwrap(), home);
        }
    }

    #[test]
    fn test_expand_home_other_user_rejected() {
        assert!(expand_home("~bob/a.json").is_err());
    }

    #[test]
    fn test_glob_expansion_is_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["out2.json", "out1.json", "other.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        let pattern = dir.path().join("out*.json").to_string_lossy().to_string();

        let files = expand_input_patterns(&[pattern]).unwrap();
        assert_eq!(files, vec![dir.path().join("out1.json"), dir.path().join("out2.json")]);
    }

    #[test]
    fn test_unmatched_pattern_kept_literally() {
        let files = expand_input_patterns(&["does-not-exist-*.json".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("does-not-exist-*.json")]);
    }

    #[test]
    fn test_unmatched_home_pattern_kept_unexpanded() {
        let pattern = "~/costmerge-no-such-dir/*.json".to_string();
        let files = expand_input_patterns(&[pattern.clone()]).unwrap();
        assert_eq!(files, vec![PathBuf::from(pattern)]);
    }

    #[test]
    fn test_pattern_order_preserved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        let b = dir.path().join("b.json").to_string_lossy().to_string();
        let a = dir.path().join("a.json").to_string_lossy().to_string();

        let files = expand_input_patterns(&[b, a]).unwrap();
        assert_eq!(files, vec![dir.path().join("b.json"), dir.path().join("a.json")]);
    }
}
