//! Layered error definitions
//!
//! Categorized by source: config / identifiers / numerics / cache / stream

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum AcquisitionError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Identifier Errors =====
    /// Unknown sensor kind identifier
    #[error("invalid sensor type: '{identifier}'")]
    InvalidSensorType { identifier: String },

    /// Unknown filter kind identifier
    #[error("invalid filter type: '{identifier}'")]
    InvalidFilterType { identifier: String },

    // ===== Numeric Errors =====
    /// Out-of-domain model or generator parameter
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Filter coefficients could not be designed
    #[error("filter design error: {message}")]
    FilterDesign { message: String },

    // ===== Cache Errors =====
    /// Row width does not match the expected channel count
    #[error("shape mismatch: expected {expected} channels, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    // ===== Stream Errors =====
    /// Malformed record on the line protocol
    #[error("record parse error: {message}")]
    Parse { message: String },

    /// Byte-stream could not be opened or read
    #[error("port '{port}' error: {message}")]
    Port { port: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcquisitionError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_sensor_type(identifier: impl Into<String>) -> Self {
        Self::InvalidSensorType {
            identifier: identifier.into(),
        }
    }

    pub fn invalid_filter_type(identifier: impl Into<String>) -> Self {
        Self::InvalidFilterType {
            identifier: identifier.into(),
        }
    }

    /// Create invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn filter_design(message: impl Into<String>) -> Self {
        Self::FilterDesign {
            message: message.into(),
        }
    }

    /// Create record parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create port error
    pub fn port(port: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Port {
            port: port.into(),
            message: message.into(),
        }
    }

    /// Short label of the error category, used as a metrics label
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigParse { .. } | Self::ConfigValidation { .. } => "config",
            Self::InvalidSensorType { .. } | Self::InvalidFilterType { .. } => "identifier",
            Self::InvalidParameter { .. } | Self::FilterDesign { .. } => "parameter",
            Self::ShapeMismatch { .. } => "shape",
            Self::Parse { .. } => "parse",
            Self::Port { .. } => "port",
            Self::Io(_) => "io",
        }
    }
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, AcquisitionError>;
