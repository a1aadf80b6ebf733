//! # Public API
//!
//! Entry points for automatic bar injection.
//!
//! - [`inject_bars()`] - Default settings (4/4, quarter notes, `|`)
//! - [`inject_bars_with_config()`] - Custom separator, tolerance, starting signature
//! - [`analyze()`] - Injected text plus an [`InjectionReport`]
//! - [`preview()`] - What an editor preview shows, honoring the auto-bar preference
//!
//! None of these fail. Malformed notation comes back unchanged apart from
//! whitespace normalization on body lines.
//!
//! ## Typical Usage
//!
//! ```rust
//! use alphabar::inject_bars;
//!
//! let source = "\\title \"Draft\"\n\\ts 4 4\n.\n:4 1.1 2.1 3.1 4.1 5.1";
//! let output = inject_bars(source);
//! assert_eq!(output, "\\title \"Draft\"\n\\ts 4 4\n.\n:4 1.1 2.1 3.1 4.1 | 5.1");
//! ```

use crate::config::BarConfig;
use crate::injector::{inject, Injection, InjectionReport};

/// Insert bar separators with the default configuration.
///
/// Empty input gives an empty string.
pub fn inject_bars(source: &str) -> String {
    inject_bars_with_config(source, &BarConfig::default())
}

/// Insert bar separators with custom settings.
///
/// `config.auto_bar` is not consulted; use [`preview()`] for that.
///
/// # Example
/// ```rust
/// use alphabar::{inject_bars_with_config, BarConfig};
///
/// let config = BarConfig::from_yaml("separator: \"||\"\ntime-signature: 3/4").unwrap();
/// assert_eq!(inject_bars_with_config(".\n1 1 1 1", &config), ".\n1 1 1 || 1");
/// ```
pub fn inject_bars_with_config(source: &str, config: &BarConfig) -> String {
    inject(source, config).output
}

/// Insert bar separators and report what happened.
///
/// # Example
/// ```rust
/// use alphabar::{analyze, BarConfig};
///
/// let injection = analyze(".\n:4 1 1 1 1 1 ( 0.1 2.2", &BarConfig::default());
/// assert_eq!(injection.report.bars_inserted, 1);
/// assert_eq!(injection.report.trailing_fill, 0.25);
/// assert_eq!(injection.report.diagnostics.len(), 1); // unclosed chord
/// ```
pub fn analyze(source: &str, config: &BarConfig) -> Injection {
    inject(source, config)
}

/// Text for an editor preview.
///
/// No source gives an empty preview. With `auto-bar` off the source is shown
/// as written; otherwise bars are injected.
pub fn preview(source: Option<&str>, config: &BarConfig) -> String {
    match source {
        None => String::new(),
        Some(text) if !config.auto_bar => text.to_string(),
        Some(text) => inject_bars_with_config(text, config),
    }
}

/// Report only, for callers that keep their own copy of the text.
pub fn report(source: &str, config: &BarConfig) -> InjectionReport {
    inject(source, config).report
}
