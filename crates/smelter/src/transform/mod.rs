//! Pre-coercion transforms applied to raw string values.
//!
//! Transforms run in declaration order after null classification and before
//! type coercion. They are pure: the same raw value and transform always
//! produce the same output. A failing transform is reported through the
//! field-diagnostic channel, never as a panic or crate-level error.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How [`Transform::Default`] treats an existing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultMode {
    /// Only substitute the default when the value is absent.
    Fill,
    /// Always substitute the default, ignoring the current value.
    Replace,
}

/// A declared raw-string transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// Truncate the value to at most `length` characters.
    Truncate { length: usize },
    /// Replace every match of `pattern` with `replacement`.
    RegexReplace {
        pattern: String,
        replacement: String,
    },
    /// Substitute a default value (fill absent values, or replace outright).
    Default { value: String, mode: DefaultMode },
    /// Map the value through a lookup table.
    Lookup {
        table: IndexMap<String, String>,
        /// Whether a value missing from the table is a failure. When false,
        /// unmatched values pass through unchanged.
        #[serde(default)]
        fail_if_missing: bool,
    },
}

impl Transform {
    /// A short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Transform::Truncate { .. } => "truncate",
            Transform::RegexReplace { .. } => "regex_replace",
            Transform::Default { .. } => "default",
            Transform::Lookup { .. } => "lookup",
        }
    }

    /// Apply the transform to an optional raw value.
    ///
    /// Absent values pass through untouched except for [`Transform::Default`],
    /// which is the only transform that can introduce a value.
    ///
    /// `compiled` must be the pre-compiled regex for a
    /// [`Transform::RegexReplace`] and `None` for every other variant; the
    /// field validator compiles patterns once per run.
    pub fn apply(
        &self,
        value: Option<String>,
        compiled: Option<&Regex>,
    ) -> std::result::Result<Option<String>, TransformError> {
        match self {
            Transform::Truncate { length } => {
                Ok(value.map(|v| v.chars().take(*length).collect()))
            }
            Transform::RegexReplace { replacement, .. } => match (value, compiled) {
                (None, _) => Ok(None),
                (Some(v), Some(re)) => Ok(Some(re.replace_all(&v, replacement.as_str()).into_owned())),
                (Some(_), None) => Err(TransformError::MissingCompiledPattern),
            },
            Transform::Default { value: default, mode } => match (value, mode) {
                (None, _) | (_, DefaultMode::Replace) => Ok(Some(default.clone())),
                (some, DefaultMode::Fill) => Ok(some),
            },
            Transform::Lookup {
                table,
                fail_if_missing,
            } => match value {
                None => Ok(None),
                Some(v) => match table.get(&v) {
                    Some(mapped) => Ok(Some(mapped.clone())),
                    None if *fail_if_missing => Err(TransformError::NotInLookup { value: v }),
                    None => Ok(Some(v)),
                },
            },
        }
    }
}

/// Failure raised by a transform step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The value was not found in the lookup table.
    #[error("'{value}' is not in the lookup table for this field")]
    NotInLookup { value: String },

    /// A regex replace ran without its compiled pattern. Schema validation
    /// compiles every declared pattern, so reaching this indicates a caller
    /// bypassed the field validator.
    #[error("regex replace invoked without a compiled pattern")]
    MissingCompiledPattern,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        let t = Transform::Truncate { length: 3 };
        assert_eq!(
            t.apply(Some("abcdef".to_string()), None).unwrap(),
            Some("abc".to_string())
        );
        assert_eq!(t.apply(None, None).unwrap(), None);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let t = Transform::Truncate { length: 2 };
        assert_eq!(
            t.apply(Some("日本語".to_string()), None).unwrap(),
            Some("日本".to_string())
        );
    }

    #[test]
    fn test_regex_replace() {
        let t = Transform::RegexReplace {
            pattern: r"\s+".to_string(),
            replacement: " ".to_string(),
        };
        let re = Regex::new(r"\s+").unwrap();
        assert_eq!(
            t.apply(Some("a   b\tc".to_string()), Some(&re)).unwrap(),
            Some("a b c".to_string())
        );
    }

    #[test]
    fn test_default_fill_only_replaces_absent() {
        let t = Transform::Default {
            value: "unknown".to_string(),
            mode: DefaultMode::Fill,
        };
        assert_eq!(t.apply(None, None).unwrap(), Some("unknown".to_string()));
        assert_eq!(
            t.apply(Some("present".to_string()), None).unwrap(),
            Some("present".to_string())
        );
    }

    #[test]
    fn test_default_replace_overrides() {
        let t = Transform::Default {
            value: "fixed".to_string(),
            mode: DefaultMode::Replace,
        };
        assert_eq!(
            t.apply(Some("anything".to_string()), None).unwrap(),
            Some("fixed".to_string())
        );
    }

    #[test]
    fn test_lookup_pass_through_and_fail() {
        let table: IndexMap<String, String> =
            [("m".to_string(), "male".to_string())].into_iter().collect();

        let lenient = Transform::Lookup {
            table: table.clone(),
            fail_if_missing: false,
        };
        assert_eq!(
            lenient.apply(Some("m".to_string()), None).unwrap(),
            Some("male".to_string())
        );
        assert_eq!(
            lenient.apply(Some("x".to_string()), None).unwrap(),
            Some("x".to_string())
        );

        let strict = Transform::Lookup {
            table,
            fail_if_missing: true,
        };
        assert!(matches!(
            strict.apply(Some("x".to_string()), None),
            Err(TransformError::NotInLookup { .. })
        ));
    }
}
