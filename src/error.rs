//! Error types for the enclosure designer.
//!
//! The simulation and advisory engines never fail: physically impossible
//! designs come back as a degenerate [`SimulationResult`](crate::acoustics::SimulationResult)
//! carrying a warning. [`EnclosureError`] covers the outer surfaces of the
//! crate instead: loading design files, catalog lookups, configuration and
//! writing reports.

use thiserror::Error;

/// Result type alias using [`EnclosureError`].
pub type Result<T> = std::result::Result<T, EnclosureError>;

/// Unified error type for all enclosure designer operations.
#[derive(Error, Debug)]
pub enum EnclosureError {
    // ============ Design Input Errors ============
    /// Error reading a design file
    #[error("Failed to read design file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Design or patch document could not be decoded
    #[error("Invalid design: {message}")]
    InvalidDesign { message: String },

    /// Driver name not present in the catalog
    #[error("Unknown driver '{name}' (use --list-drivers to see the catalog)")]
    UnknownDriver { name: String },

    // ============ Simulation Errors ============
    /// Invalid simulation configuration
    #[error("Invalid simulation config: {message}")]
    InvalidConfig { message: String },

    // ============ Output Errors ============
    /// Error writing a report
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl EnclosureError {
    /// Create an invalid design error
    pub fn invalid_design(message: impl Into<String>) -> Self {
        Self::InvalidDesign {
            message: message.into(),
        }
    }

    /// Create an unknown driver error
    pub fn unknown_driver(name: impl Into<String>) -> Self {
        Self::UnknownDriver { name: name.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::OutputError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for EnclosureError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_design(e.to_string())
    }
}
