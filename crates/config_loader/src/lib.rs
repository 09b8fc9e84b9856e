//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce an `AcquisitionConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("acquisition.toml")).unwrap();
//! println!("Filter: {}", config.acquisition.filter);
//! ```

mod parser;
mod validator;

pub use contracts::AcquisitionConfig;
pub use parser::ConfigFormat;

use contracts::AcquisitionError;
use std::path::Path;
use tracing::debug;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<AcquisitionConfig, AcquisitionError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        debug!(path = %path.display(), ?format, bytes = content.len(), "loading config");
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AcquisitionConfig, AcquisitionError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate an already constructed configuration, e.g. after CLI overrides
    pub fn validate(config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
        validator::validate(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(config: &AcquisitionConfig) -> Result<String, AcquisitionError> {
        toml::to_string_pretty(config)
            .map_err(|e| AcquisitionError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize to JSON string
    pub fn to_json(config: &AcquisitionConfig) -> Result<String, AcquisitionError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| AcquisitionError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, AcquisitionError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            AcquisitionError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            AcquisitionError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn read_file(path: &Path) -> Result<String, AcquisitionError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AcquisitionConfig, AcquisitionError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}
