//! Error types for schema validation, submission, and export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating schema text.
#[derive(Debug, Error)]
pub enum SchemaError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    // Schema errors (exit code 2)
    #[error("schema is empty: provide a formTitle and fields")]
    EmptySchema,

    #[error("{path}: expected {expected}, got {actual}")]
    Shape {
        /// JSON Pointer (RFC 6901) to the offending key.
        path: String,
        expected: &'static str,
        actual: String,
    },

    #[error("field at index {index} is missing a non-empty 'id'")]
    MissingId { index: usize },

    #[error("field at index {index} is missing a non-empty 'type'")]
    MissingKind { index: usize },

    #[error("field \"{id}\" is missing a non-empty 'label'")]
    MissingLabel { id: String },

    #[error("invalid type \"{kind}\" for field \"{id}\"")]
    UnknownKind { id: String, kind: String },

    #[error("invalid regex pattern for field \"{id}\": {message}")]
    Pattern { id: String, message: String },

    #[error("field \"{id}\" requires a non-empty 'options' list")]
    MissingOptions { id: String },

    #[error("duplicate field id \"{id}\": each field id must be unique")]
    DuplicateId { id: String },
}

impl SchemaError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SchemaError::FileNotFound { .. } | SchemaError::Read { .. } => 3,
            _ => 2,
        }
    }
}

/// Which submission rule a field value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Violation {
    Required,
    Pattern,
    Range,
}

/// Single per-field submission violation with its inline message.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldError {
    pub field_id: String,
    pub violation: Violation,
    /// Message shown beneath the field's control.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_id, self.message)
    }
}

/// Errors that block a submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form already submitted: replace the schema to submit again")]
    AlreadySubmitted,

    #[error("submission blocked by {} field error(s)", errors.len())]
    Invalid { errors: Vec<FieldError> },
}

impl SubmitError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Errors during export of a submission snapshot.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy to clipboard: {message}")]
    Clipboard { message: String },
}

impl ExportError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        3
    }
}
