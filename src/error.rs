//! Error types for the FD rate engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RateEngineError>;

#[derive(Error, Debug)]
pub enum RateEngineError {

    // =============================
    // Source & Extraction Errors
    // =============================

    #[error("Source unavailable ({source_name}): {reason}")]
    SourceUnavailable {
        source_name: String,
        reason: String,
    },

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
