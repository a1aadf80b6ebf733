//! # Error Types
//!
//! The bar injector itself never fails: malformed notation is passed through
//! and at worst a separator lands in the wrong place. Errors only come from
//! the edges of the crate, loading configuration and moving text in and out
//! of files.
//!
//! ## Error Types
//! - `Io` - Reading or writing a file failed
//! - `ConfigError` - Invalid YAML or an out-of-range configuration value
//! - `ReportError` - The injection report could not be serialized
//!
//! ## Usage
//! ```rust
//! use alphabar::{BarConfig, BarError};
//!
//! match BarConfig::from_yaml("tolerance: 2.0") {
//!     Ok(config) => println!("separator is {}", config.separator),
//!     Err(BarError::ConfigError(message)) => eprintln!("Bad config: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    /// File I/O failure, with the path that was being read or written.
    #[error("Error accessing '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    ///
    /// # Example
    /// ```
    /// # use alphabar::BarError;
    /// let err = BarError::ConfigError("tolerance must be in [0, 1)".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: tolerance must be in [0, 1)");
    /// ```
    #[error("Invalid config: {0}")]
    ConfigError(String),

    #[error("Failed to serialize report: {0}")]
    ReportError(String),
}
