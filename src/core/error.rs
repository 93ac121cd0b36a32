//! Error types for definition loading.

use thiserror::Error;

/// Errors that can occur when loading enemy or boss definition files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Definition directory could not be found.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Definition parsed but violates authoring rules.
    #[error("Invalid definition '{name}': {violations} violation(s)")]
    Invalid { name: String, violations: usize },
}
