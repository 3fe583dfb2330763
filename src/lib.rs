//! Itinerary Processor Library
//!
//! A Rust library for converting semi-structured airline itinerary documents
//! (zipped plaintext, compressed payloads, raw text, or pre-extracted table
//! rows) into a normalized list of flight records.
//!
//! This library provides tools for:
//! - Classifying line tokens (airports, clock times, dates, equipment codes)
//! - Locating the boundary between route segments and the day-code region
//! - Assembling up to four airport/time segments per flight
//! - Assigning equipment codes to weekday slots, with optional column
//!   calibration against the document's day-letter header
//! - Parsing table-structured rows from table-aware extractors
//! - Extracting document-level issue codes and validity windows
//! - Sniffing and decompressing gzip/zlib/deflate/ZIP payloads

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod document_processor;
        pub mod format_dispatcher;
        pub mod itinerary_parser;
        pub mod metadata_extractor;
        pub mod table_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DocumentMetadata, FlightRecord, ParseResponse};
pub use config::ParserPolicy;

/// Result type alias for the itinerary processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for document-level processing failures
///
/// Per-line and per-row parse failures are silent skips and never surface
/// here; this enum covers only failures that abort an entire document.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Payload decompression failed
    #[error("Decompression error ({format}): {message}")]
    Decompression {
        format: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// ZIP container could not be read
    #[error("ZIP archive error: {message}")]
    ZipArchive {
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// JSON payload could not be decoded
    #[error("JSON payload error: {message}")]
    JsonPayload {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload format is recognized but not processable
    #[error("Unsupported input format '{detected}': {message}")]
    UnsupportedFormat { detected: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a decompression error for the named format
    pub fn decompression(
        format: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Decompression {
            format: format.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a ZIP archive error
    pub fn zip_archive(message: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::ZipArchive {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON payload error
    pub fn json_payload(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonPayload {
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(detected: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            detected: detected.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(error: zip::result::ZipError) -> Self {
        Self::ZipArchive {
            message: "ZIP archive could not be read".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonPayload {
            message: "JSON payload could not be decoded".to_string(),
            source: error,
        }
    }
}
