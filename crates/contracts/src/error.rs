//! Layered error definitions
//!
//! Categorized by recovery policy: setup / transient capture / state misuse
//! / config / export.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Setup Errors =====
    /// Fatal setup failure (no device found, camera failed to open,
    /// subscription rejected). Aborts the affected component's start.
    #[error("setup failure in '{component}': {message}")]
    Setup { component: String, message: String },

    // ===== Capture Errors =====
    /// Transient per-sample or per-frame failure. The sample/frame is
    /// dropped and the producing loop continues.
    #[error("transient capture error in '{component}': {message}")]
    TransientCapture { component: String, message: String },

    /// Lifecycle misuse (start while recording, stop while idle).
    /// Recorders log and no-op instead of returning this; it exists for
    /// callers that want to surface misuse programmatically.
    #[error("state misuse in '{component}': {message}")]
    StateMisuse { component: String, message: String },

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

    // ===== Export Errors =====
    /// CSV export write error
    #[error("export write error for '{file}': {message}")]
    ExportWrite { file: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create a fatal setup error
    pub fn setup(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Setup {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a transient capture error
    pub fn transient_capture(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransientCapture {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a state misuse error
    pub fn state_misuse(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StateMisuse {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an export write error
    pub fn export_write(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExportWrite {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Whether the producing loop may drop the affected item and continue
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientCapture { .. })
    }
}
