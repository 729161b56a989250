use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Targets;

use super::diagnostics::Diagnostic;
use super::diagnostics::Diagnostics;
use super::diagnostics::LoadError;
use super::diagnostics::SourceInfo;
use super::diagnostics::ValidationError;
use super::diagnostics::Warning;
use super::partial::PartialConfig;
use super::partial::PartialLoggingConfig;
use super::partial::PartialWarmupConfig;

pub const DEFAULT_NAME: &str = "warmup4ie";
pub const DEFAULT_TARGET_TEMP: f64 = 20.0;

#[derive(Debug, Default)]
pub struct Config {
    pub logging: LoggingConfig,

    /// Warmup devices keyed by entry id
    pub warmup: HashMap<String, WarmupConfig>,
}

// LogLevel needs Deserialize because it's used in PartialLoggingConfig with toml::Spanned
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: LogLevel,

    /// Per-target levels, e.g. "warmup_climate::integrations" = "debug"
    pub overrides: HashMap<String, LogLevel>,
}

impl LoggingConfig {
    /// Build the subscriber filter for this logging config
    pub fn targets(&self) -> Targets {
        Targets::new()
            .with_default(LevelFilter::from(self.level))
            .with_targets(
                self.overrides
                    .iter()
                    .map(|(target, level)| (target.clone(), LevelFilter::from(*level))),
            )
    }
}

/// Validated configuration of one Warmup device
#[derive(Clone, PartialEq)]
pub struct WarmupConfig {
    /// Display name of the climate entity
    pub name: String,

    /// Warmup account credentials
    pub username: String,
    pub password: String,

    /// Location name as shown in the Warmup app
    pub location: String,

    /// Room name within the location
    pub room: String,

    /// Setpoint handed to the device client at connect time
    pub target_temp: f64,
}

impl std::fmt::Debug for WarmupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarmupConfig")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("location", &self.location)
            .field("room", &self.room)
            .field("target_temp", &self.target_temp)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{0}")]
    Invalid(Diagnostics),
}

impl Config {
    /// Load and validate a TOML config file.
    ///
    /// Returns the config together with any warnings. All validation errors
    /// across all devices are collected before failing.
    pub fn from_file(path: impl AsRef<Path>) -> Result<(Self, Diagnostics), ConfigError> {
        let partial = PartialConfig::from_file(path.as_ref())?;
        Self::from_partial(partial)
    }

    /// Validate config text as if it had been read from `path`
    pub fn parse(content: &str, path: impl AsRef<Path>) -> Result<(Self, Diagnostics), ConfigError> {
        let partial = PartialConfig::parse(content.to_string(), path.as_ref())?;
        Self::from_partial(partial)
    }

    /// Convert a PartialConfig to a Config, validating all fields
    pub fn from_partial(partial: PartialConfig) -> Result<(Self, Diagnostics), ConfigError> {
        let mut diagnostics = Vec::new();

        if partial.is_empty() {
            if let Some(source) = &partial.source {
                diagnostics.push(Diagnostic::Warning(Warning::EmptyConfig {
                    file_path: source.file_path.clone(),
                }));
            }
        }

        let logging = partial
            .logging
            .map(Self::convert_logging)
            .unwrap_or_default();

        let mut warmup = HashMap::new();
        for (entry_id, partial_device) in partial.warmup {
            match Self::validate_warmup(&entry_id, partial_device, &partial.source) {
                Ok(device) => {
                    warmup.insert(entry_id, device);
                }
                Err(errors) => {
                    diagnostics.extend(errors.into_iter().map(Diagnostic::from));
                }
            }
        }

        // Check if there are any errors (not just warnings)
        if diagnostics.iter().any(|d| d.is_error()) {
            return Err(ConfigError::Invalid(Diagnostics(diagnostics)));
        }

        Ok((Config { logging, warmup }, Diagnostics(diagnostics)))
    }

    fn convert_logging(partial: PartialLoggingConfig) -> LoggingConfig {
        LoggingConfig {
            level: partial.level.map(|s| *s.get_ref()).unwrap_or_default(),
            overrides: partial
                .overrides
                .map(|hm| hm.into_iter().map(|(k, v)| (k, *v.get_ref())).collect())
                .unwrap_or_default(),
        }
    }

    /// Validate a partial device config and convert it to a WarmupConfig
    fn validate_warmup(
        entry_id: &str,
        partial: PartialWarmupConfig,
        source: &Option<SourceInfo>,
    ) -> Result<WarmupConfig, Vec<ValidationError>> {
        let mut fields = FieldValidator {
            prefix: format!("warmup.{}", entry_id),
            source,
            errors: Vec::new(),
        };

        let name = fields
            .string("name", partial.name)
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let username = fields.required_string("username", partial.username);
        let password = fields.required_string("password", partial.password);
        let location = fields.required_string("location", partial.location);
        let room = fields.required_string("room", partial.room);
        let target_temp = fields
            .float("target_temp", partial.target_temp)
            .unwrap_or(DEFAULT_TARGET_TEMP);

        if fields.errors.is_empty() {
            Ok(WarmupConfig {
                name,
                username,
                password,
                location,
                room,
                target_temp,
            })
        } else {
            Err(fields.errors)
        }
    }
}

/// Collects validation errors for the fields of one table
struct FieldValidator<'a> {
    prefix: String,
    source: &'a Option<SourceInfo>,
    errors: Vec<ValidationError>,
}

impl FieldValidator<'_> {
    fn error(&mut self, field: &str, message: String, span: Option<std::ops::Range<usize>>) {
        self.errors.push(ValidationError {
            field_path: format!("{}.{}", self.prefix, field),
            message,
            span,
            source: self.source.clone(),
        });
    }

    /// Coerce an optional value to a string; None if absent or invalid
    fn string(&mut self, field: &str, value: Option<toml::Spanned<toml::Value>>) -> Option<String> {
        let value = value?;
        match coerce_string(value.get_ref()) {
            Ok(s) => Some(s),
            Err(message) => {
                self.error(field, message, Some(value.span()));
                None
            }
        }
    }

    fn required_string(
        &mut self,
        field: &str,
        value: Option<toml::Spanned<toml::Value>>,
    ) -> String {
        if value.is_none() {
            self.error(field, format!("{} is required", field), None);
        }
        // Default for error recovery
        self.string(field, value).unwrap_or_default()
    }

    /// Coerce an optional value to a number; None if absent or invalid
    fn float(&mut self, field: &str, value: Option<toml::Spanned<toml::Value>>) -> Option<f64> {
        let value = value?;
        match coerce_float(value.get_ref()) {
            Ok(f) => Some(f),
            Err(message) => {
                self.error(field, message, Some(value.span()));
                None
            }
        }
    }
}

/// Accept strings and numbers, rendering numbers as text
fn coerce_string(value: &toml::Value) -> Result<String, String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        other => Err(format!("expected a string, found {}", other.type_str())),
    }
}

/// Accept integers, floats and numeric strings
fn coerce_float(value: &toml::Value) -> Result<f64, String> {
    match value {
        toml::Value::Integer(i) => Ok(*i as f64),
        toml::Value::Float(f) => Ok(*f),
        toml::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("expected a number, found string '{}'", s)),
        other => Err(format!("expected a number, found {}", other.type_str())),
    }
}
