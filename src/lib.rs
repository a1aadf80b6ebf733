pub mod api;
pub mod config;
pub mod error;
pub mod injector;
pub mod lexer;
pub mod rhythm;

pub use api::{analyze, inject_bars, inject_bars_with_config, preview, report};
pub use config::BarConfig;
pub use error::BarError;
pub use injector::{Diagnostic, DiagnosticKind, Injection, InjectionReport, Injector};
