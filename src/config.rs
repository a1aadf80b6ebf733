//! # Configuration
//!
//! Settings for bar injection, read from YAML with kebab-case keys. Every key
//! is optional; missing keys keep their defaults.
//!
//! ```yaml
//! auto-bar: true
//! separator: "|"
//! tolerance: 0.001
//! time-signature: 4/4
//! default-duration: 4
//! ```
//!
//! Parsing goes through [`RawConfig`] and is then validated into a
//! [`BarConfig`], so a bad value is reported with the key it came from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BarError;
use crate::lexer::{is_note_or_rest, DEFAULT_SEPARATOR, STRUCTURAL_CHARS, TUPLET_KEYWORD};
use crate::rhythm::{RhythmState, TimeSignature, DEFAULT_TOLERANCE, TIME_SIGNATURE_KEYWORD};

/// Validated bar injection settings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BarConfig {
    /// Whether the preview shows injected bars. The injector ignores it.
    pub auto_bar: bool,
    pub separator: String,
    pub tolerance: f64,
    /// Measure capacity before the first `\ts` directive
    #[serde(serialize_with = "serialize_time_signature")]
    pub time_signature: TimeSignature,
    /// Denominator of the note duration before the first marker
    pub default_duration: u32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            auto_bar: true,
            separator: DEFAULT_SEPARATOR.to_string(),
            tolerance: DEFAULT_TOLERANCE,
            time_signature: TimeSignature::default(),
            default_duration: 4,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub auto_bar: Option<bool>,
    pub separator: Option<String>,
    pub tolerance: Option<f64>,
    pub time_signature: Option<String>,
    pub default_duration: Option<u32>,
}

fn serialize_time_signature<S>(ts: &TimeSignature, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(ts)
}

impl BarConfig {
    /// Parse and validate a YAML document. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, BarError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BarError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read and validate a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BarError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, BarError> {
        let defaults = Self::default();

        let separator = match raw.separator {
            Some(s) => validate_separator(s)?,
            None => defaults.separator,
        };

        let tolerance = match raw.tolerance {
            Some(t) if t.is_finite() && (0.0..1.0).contains(&t) => t,
            Some(t) => {
                return Err(BarError::ConfigError(format!(
                    "tolerance must be in [0, 1), got {}",
                    t
                )))
            }
            None => defaults.tolerance,
        };

        let time_signature = match raw.time_signature {
            Some(s) => {
                let ts: TimeSignature = s.parse().map_err(BarError::ConfigError)?;
                if ts.capacity().is_none() {
                    return Err(BarError::ConfigError(format!(
                        "time-signature parts must be positive, got {}",
                        ts
                    )));
                }
                ts
            }
            None => defaults.time_signature,
        };

        let default_duration = match raw.default_duration {
            Some(0) => {
                return Err(BarError::ConfigError(
                    "default-duration must be greater than 0".to_string(),
                ))
            }
            Some(d) => d,
            None => defaults.default_duration,
        };

        Ok(Self {
            auto_bar: raw.auto_bar.unwrap_or(defaults.auto_bar),
            separator,
            tolerance,
            time_signature,
            default_duration,
        })
    }

    /// A fresh rhythm state starting from these settings.
    pub fn rhythm_state(&self) -> RhythmState {
        RhythmState::with_settings(
            self.time_signature,
            1.0 / self.default_duration.max(1) as f64,
            self.tolerance,
        )
    }
}

/// A separator must survive a second pass as a plain separator, so it may not
/// look like any other kind of token.
fn validate_separator(separator: String) -> Result<String, BarError> {
    let problem = if separator.is_empty() {
        Some("must not be empty")
    } else if separator.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if separator.contains(&STRUCTURAL_CHARS[..]) {
        Some("must not contain braces or parentheses")
    } else if separator.starts_with(':') {
        Some("must not start with ':'")
    } else if is_note_or_rest(&separator) {
        Some("must not start with a digit or 'r'")
    } else if separator == TUPLET_KEYWORD {
        Some("must not be the tuplet keyword")
    } else if separator.contains(TIME_SIGNATURE_KEYWORD) {
        Some("must not contain the time signature keyword")
    } else {
        None
    };

    match problem {
        Some(message) => Err(BarError::ConfigError(format!(
            "separator '{}' {}",
            separator, message
        ))),
        None => Ok(separator),
    }
}
