//! Configuration file parsing and validation.
//!
//! The config is a TOML file with a `[logging]` table and one
//! `[warmup.<entry_id>]` table per thermostat.

// Private module - the public surface is re-exported below
#[allow(clippy::module_inception)]
mod config;
mod diagnostics;
mod partial;

pub use config::*;
pub use diagnostics::format_diagnostics;
pub use diagnostics::Diagnostic;
pub use diagnostics::Diagnostics;
pub use diagnostics::Error as DiagnosticError;
pub use diagnostics::LoadError;
pub use diagnostics::SourceInfo;
pub use diagnostics::ValidationError;
pub use diagnostics::Warning;
pub use partial::PartialConfig;
