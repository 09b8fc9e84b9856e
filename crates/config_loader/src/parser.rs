//! Configuration parsing
//!
//! TOML is the primary format, JSON is accepted as an alternative.

use contracts::{AcquisitionConfig, AcquisitionError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn parse_toml(content: &str) -> Result<AcquisitionConfig, AcquisitionError> {
    toml::from_str(content).map_err(|e| AcquisitionError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_json(content: &str) -> Result<AcquisitionConfig, AcquisitionError> {
    serde_json::from_str(content).map_err(|e| AcquisitionError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse `content` in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<AcquisitionConfig, AcquisitionError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
