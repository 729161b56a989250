use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::diagnostics::LoadError;
use super::diagnostics::SourceInfo;
use super::LogLevel;

/// Config file as written, before defaults and validation.
///
/// Device fields are kept as raw TOML values so that type coercion happens
/// during validation, where every problem can be reported with its span.
#[derive(Debug, Default, Deserialize)]
pub struct PartialConfig {
    pub logging: Option<PartialLoggingConfig>,

    /// Key = entry id, Value = device config
    #[serde(default)]
    pub warmup: HashMap<String, PartialWarmupConfig>,

    /// Source information for error reporting (not serialized)
    #[serde(skip)]
    pub source: Option<SourceInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartialLoggingConfig {
    pub level: Option<toml::Spanned<LogLevel>>,
    pub overrides: Option<HashMap<String, toml::Spanned<LogLevel>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialWarmupConfig {
    pub name: Option<toml::Spanned<toml::Value>>,
    pub username: Option<toml::Spanned<toml::Value>>,
    pub password: Option<toml::Spanned<toml::Value>>,
    pub location: Option<toml::Spanned<toml::Value>>,
    pub room: Option<toml::Spanned<toml::Value>>,
    pub target_temp: Option<toml::Spanned<toml::Value>>,
}

impl PartialConfig {
    /// Load a single config file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        Self::parse(content, path)
    }

    /// Parse config text, recording `path` as its source for diagnostics
    pub fn parse(content: String, path: &Path) -> Result<Self, LoadError> {
        let mut config: PartialConfig =
            toml::from_str(&content).map_err(|error| LoadError::Parse {
                path: path.to_path_buf(),
                error,
            })?;

        config.source = Some(SourceInfo {
            file_path: path.to_path_buf(),
            content,
        });

        Ok(config)
    }

    /// True when the file sets nothing at all
    pub fn is_empty(&self) -> bool {
        self.logging.is_none() && self.warmup.is_empty()
    }
}
