//! # Configuration Errors
//!
//! Errors raised while turning user options into a rule set. Conversion
//! itself never fails.

use thiserror::Error;

/// Errors that can occur while building a converter.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The divisor for a unit is zero, negative or not finite.
    #[error("root value for '{unit}' must be a positive number, got {value}")]
    InvalidRootValue {
        /// Unit the divisor belongs to.
        unit: String,
        /// Rejected divisor.
        value: f64,
    },

    /// A `/pattern/flags` string did not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as written.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Options text was not valid JSON.
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// TESTS
// =============================================================================
