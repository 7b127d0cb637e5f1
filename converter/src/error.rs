//! Error types for the conversion pipeline.
//!
//! One enum per layer:
//!
//! - [`CsvError`] - reading and parsing the source CSV
//! - [`RowError`] - a single record failed validation (fatal only in strict mode)
//! - [`MetadataError`] - loading a custom category table
//! - [`OutputError`] - serializing or writing the document
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Conversion is automatic via `From`, so `?` works across layers.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the source CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the source.
    #[error("Failed to read CSV: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content.
    #[error("Line {line}: {message}")]
    Parse { line: u64, message: String },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CsvError::Io(io),
            csv::ErrorKind::Utf8 { err, .. } => CsvError::Parse {
                line,
                message: err.to_string(),
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => CsvError::Parse {
                line,
                message: format!("expected {} fields, found {}", expected_len, len),
            },
            other => CsvError::Parse {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

// =============================================================================
// Row Errors
// =============================================================================

/// A record that cannot become an item.
///
/// In lenient mode these become skipped rows; in strict mode they abort the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    /// A required column is absent or blank.
    #[error("Line {line}: missing required field '{field}'")]
    MissingField { line: usize, field: String },

    /// A numeric column holds something that is not an integer.
    #[error("Line {line}: invalid number for '{field}' in record '{id}' (value '{value}')")]
    InvalidNumber {
        line: usize,
        id: String,
        field: String,
        value: String,
    },
}

// =============================================================================
// Metadata Errors
// =============================================================================

/// Errors while loading a category table.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Cannot read category table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid category table: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while rendering or writing the document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by the `convert_*` entry points.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Wrong invocation.
    #[error("Usage: {0}")]
    Usage(String),

    /// Source file does not exist.
    #[error("File {} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Strict mode rejected a record.
    #[error("Invalid record: {0}")]
    Row(#[from] RowError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// A document file that is not JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generated or loaded document does not match its schema.
    #[error("Document failed validation: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type CsvResult<T> = Result<T, CsvError>;

pub type RowResult<T> = Result<T, RowError>;

pub type OutputResult<T> = Result<T, OutputError>;

pub type PipelineResult<T> = Result<T, PipelineError>;
