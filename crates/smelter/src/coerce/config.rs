//! Engine-level coercion configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by every coercer in a run.
///
/// All recognized-token sets and format patterns live here rather than in
/// individual coercion calls, so one run applies one consistent policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionConfig {
    /// Tokens recognized as boolean true (matched case-insensitively).
    pub true_tokens: Vec<String>,
    /// Tokens recognized as boolean false (matched case-insensitively).
    pub false_tokens: Vec<String>,
    /// Tokens classified as absent/null (matched case-insensitively against
    /// the whole trimmed value).
    pub null_markers: Vec<String>,
    /// chrono format patterns tried in order for date fields.
    pub date_formats: Vec<String>,
    /// chrono format patterns tried in order for time fields.
    pub time_formats: Vec<String>,
    /// chrono format patterns tried in order for datetime fields.
    pub datetime_formats: Vec<String>,
    /// Whether enum values are matched case-sensitively.
    pub case_sensitive_enums: bool,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            true_tokens: to_strings(&["true", "t", "yes", "y", "1"]),
            false_tokens: to_strings(&["false", "f", "no", "n", "0"]),
            null_markers: to_strings(&["na", "n/a", "null", "none", "nil", ".", "-"]),
            date_formats: to_strings(&["%Y-%m-%d", "%d/%m/%Y"]),
            time_formats: to_strings(&["%H:%M:%S", "%H:%M"]),
            datetime_formats: to_strings(&["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]),
            case_sensitive_enums: true,
        }
    }
}

impl CoercionConfig {
    /// Whether a trimmed, non-empty value is one of the configured null markers.
    pub fn is_null_marker(&self, value: &str) -> bool {
        self.null_markers
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(value))
    }
}

fn to_strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_null_markers() {
        let config = CoercionConfig::default();
        assert!(config.is_null_marker("NA"));
        assert!(config.is_null_marker("n/a"));
        assert!(config.is_null_marker("NULL"));
        assert!(config.is_null_marker("."));
        assert!(!config.is_null_marker("value"));
        assert!(!config.is_null_marker("0"));
        assert!(!config.is_null_marker("-5"));
    }
}
