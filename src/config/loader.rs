//! Plan document loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::PlanDocument;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for plan document loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate a plan document from a TOML file.
pub fn load_config(path: &Path) -> Result<PlanDocument, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Read plan document");
    load_config_str(&content)
}

/// Parse and validate a plan document held in memory.
pub fn load_config_str(content: &str) -> Result<PlanDocument, ConfigError> {
    let doc: PlanDocument = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&doc).map_err(ConfigError::Validation)?;

    Ok(doc)
}
