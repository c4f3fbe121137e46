use crate::errors::CostmergeError;

/// Oldest document schema this build can combine.
pub const MIN_OUTPUT_VERSION: &str = "0.2";
/// Newest document schema this build can combine.
pub const MAX_OUTPUT_VERSION: &str = "0.2";

/// Inclusive schema version range check applied to every input document.
#[derive(Debug, Clone)]
pub struct VersionGate {
    min: String,
    max: String,
}

impl Default for VersionGate {
    fn default() -> Self {
        Self::new(MIN_OUTPUT_VERSION, MAX_OUTPUT_VERSION)
    }
}

impl VersionGate {
    pub fn new(min: &str, max: &str) -> Self {
        Self {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Returns true if `declared` falls within `[min, max]`.
    ///
    /// Only major and minor take part in the comparison. Unparsable versions
    /// (on either side) are rejected.
    pub fn accepts(&self, declared: &str) -> bool {
        let (Some(v), Some(min), Some(max)) = (
            parse_version(declared),
            parse_version(&self.min),
            parse_version(&self.max),
        ) else {
            return false;
        };
        min <= v && v <= max
    }

    /// Like [`accepts`](Self::accepts), but as the error the run fails with.
    pub fn check(&self, declared: &str) -> Result<(), CostmergeError> {
        if self.accepts(declared) {
            Ok(())
        } else {
            Err(CostmergeError::UnsupportedVersion {
                min: self.min.clone(),
                max: self.max.clone(),
            })
        }
    }
}

/// Parse `[v]MAJOR[.MINOR[.PATCH]]` into `(major, minor)`.
///
/// Pre-release and build suffixes on the last component are ignored.
fn parse_version(raw: &str) -> Option<(u64, u64)> {
    let raw = raw.trim();
    let normalized = raw.strip_prefix('v').unwrap_or(raw);
    let core = normalized
        .split(['-', '+'])
        .next()
        .unwrap_or_default();

    let mut parts = core.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = match parts.next() {
        Some(p) => p.parse::<u64>().ok()?,
        None => 0,
    };
    if let Some(patch) = parts.next() {
        patch.parse::<u64>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor))
}
