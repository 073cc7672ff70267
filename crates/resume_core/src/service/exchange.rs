//! JSON export/import of whole documents.
//!
//! # Responsibility
//! - Produce the pretty-printed, deterministic export artifact.
//! - Parse imported or persisted text into a `Document`, requiring a
//!   `sections` field.
//!
//! # Invariants
//! - `import_document(&export_document(doc).contents) == Ok(doc)`.
//! - Validation failures never yield a partially built document.

use crate::model::document::Document;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "resume-data.json";
/// MIME type of the export artifact.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Import/replace rejection. The current document is left untouched.
#[derive(Debug)]
pub enum ValidationError {
    /// Input is not JSON at all.
    InvalidJson(serde_json::Error),
    /// Top-level value has no usable `sections` field.
    MissingSections,
    /// `sections` exists but does not hold a list of sections.
    MalformedSections(serde_json::Error),
}

impl ValidationError {
    /// Stable category for log lines. Never carries input text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "invalid_json",
            Self::MissingSections => "missing_sections",
            Self::MalformedSections(_) => "malformed_sections",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "file is not valid JSON: {err}"),
            Self::MissingSections => {
                write!(f, "invalid file format: missing `sections` field")
            }
            Self::MalformedSections(err) => {
                write!(f, "invalid file format: malformed sections: {err}")
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) | Self::MalformedSections(err) => Some(err),
            Self::MissingSections => None,
        }
    }
}

/// Downloadable export payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Serializes a document as pretty-printed JSON.
pub fn export_document(document: &Document) -> ExportArtifact {
    ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        contents: to_pretty_json(document),
    }
}

/// Parses raw text into a document.
///
/// # Errors
/// - `InvalidJson` when `raw` does not parse.
/// - `MissingSections` when `sections` is absent or null.
/// - `MalformedSections` when the value cannot be read as a document.
pub fn import_document(raw: &str) -> Result<Document, ValidationError> {
    let value: Value = serde_json::from_str(raw).map_err(ValidationError::InvalidJson)?;
    document_from_value(value)
}

/// Validates an already-parsed JSON value as a document.
pub fn document_from_value(value: Value) -> Result<Document, ValidationError> {
    let has_sections = value
        .get("sections")
        .is_some_and(|sections| !sections.is_null());
    if !has_sections {
        return Err(ValidationError::MissingSections);
    }
    serde_json::from_value(value).map_err(ValidationError::MalformedSections)
}

fn to_pretty_json(document: &Document) -> String {
    // Document holds only strings and lists; serialization cannot fail.
    serde_json::to_string_pretty(document).unwrap_or_default()
}

/// Compact JSON used for durable snapshots.
pub(crate) fn to_snapshot_json(document: &Document) -> String {
    serde_json::to_string(document).unwrap_or_default()
}
