use std::ops::Range;
use std::path::PathBuf;

/// Source information for where a diagnostic came from
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub file_path: PathBuf,
    pub content: String,
}

/// A diagnostic message that can be either a warning or an error
#[derive(Debug, Clone)]
pub enum Diagnostic {
    Warning(Warning),
    Error(Error),
}

/// Warning messages that don't prevent config loading
#[derive(Debug, Clone)]
pub enum Warning {
    EmptyConfig { file_path: PathBuf },
}

/// Error messages that indicate problems with the config
#[derive(Debug, Clone)]
pub enum Error {
    Validation(ValidationError),
}

/// Error type for validation failures
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field_path: String,
    pub message: String,
    pub span: Option<Range<usize>>,
    pub source: Option<SourceInfo>,
}

/// Error type for config loading failures (parse errors, IO errors)
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read '{}': {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse '{}': {error}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: toml::de::Error,
    },
}

/// A collection of diagnostics (warnings and/or errors)
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_diagnostics(&self.0))
    }
}

impl std::error::Error for Diagnostics {}

impl Diagnostic {
    /// Returns true if this diagnostic is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::Error(_))
    }

    /// Returns true if this diagnostic is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::Warning(_))
    }
}

impl From<ValidationError> for Diagnostic {
    fn from(error: ValidationError) -> Self {
        Diagnostic::Error(Error::Validation(error))
    }
}

/// Format all diagnostics for display using Ariadne
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    use ariadne::Color;
    use ariadne::Label;
    use ariadne::Report;
    use ariadne::ReportKind;
    use ariadne::Source;

    let mut output = Vec::new();

    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::Warning(Warning::EmptyConfig { file_path }) => {
                let warning_msg = format!(
                    "Warning: Config file '{}' is empty and has no effect\n",
                    file_path.display()
                );
                output.extend_from_slice(warning_msg.as_bytes());
            }
            Diagnostic::Error(Error::Validation(validation_error)) => {
                match (&validation_error.span, &validation_error.source) {
                    (Some(span), Some(source)) => {
                        let file_id = source.file_path.to_string_lossy().to_string();
                        Report::build(ReportKind::Error, (file_id.clone(), span.clone()))
                            .with_message(format!(
                                "Validation error in '{}': {}",
                                validation_error.field_path, validation_error.message
                            ))
                            .with_label(
                                Label::new((file_id.clone(), span.clone()))
                                    .with_message("invalid value here")
                                    .with_color(Color::Red),
                            )
                            .finish()
                            .write((file_id, Source::from(&source.content)), &mut output)
                            .ok();
                    }
                    _ => {
                        // No location to point at, format simply
                        let error_msg = format!(
                            "Validation error in '{}': {}\n",
                            validation_error.field_path, validation_error.message
                        );
                        output.extend_from_slice(error_msg.as_bytes());
                    }
                }
            }
        }
    }

    String::from_utf8_lossy(&output).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_without_span() {
        let diagnostics = vec![Diagnostic::from(ValidationError {
            field_path: "warmup.bathroom.username".to_string(),
            message: "username is required".to_string(),
            span: None,
            source: None,
        })];

        let output = format_diagnostics(&diagnostics);
        insta::assert_snapshot!(output.trim_end(), @"Validation error in 'warmup.bathroom.username': username is required");
    }

    #[test]
    fn test_validation_error_with_span_names_file() {
        let content = "[warmup.bathroom]\nroom = true\n".to_string();
        let diagnostics = vec![Diagnostic::from(ValidationError {
            field_path: "warmup.bathroom.room".to_string(),
            message: "expected a string, found boolean".to_string(),
            span: Some(25..29),
            source: Some(SourceInfo {
                file_path: PathBuf::from("warmup.toml"),
                content,
            }),
        })];

        let output = format_diagnostics(&diagnostics);
        assert!(output.contains("warmup.bathroom.room"));
        assert!(output.contains("expected a string, found boolean"));
        assert!(output.contains("warmup.toml"));
    }

    #[test]
    fn test_empty_config_is_warning() {
        let diagnostic = Diagnostic::Warning(Warning::EmptyConfig {
            file_path: PathBuf::from("empty.toml"),
        });
        assert!(diagnostic.is_warning());
        assert!(!diagnostic.is_error());
        assert!(format_diagnostics(&[diagnostic]).contains("empty.toml"));
    }
}
