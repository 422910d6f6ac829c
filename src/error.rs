//! Error taxonomy
//!
//! Codec-level malformed input is a hard failure surfaced to the caller.
//! Per-annotation defects during XML ingest are not errors at all: the
//! record is dropped and the batch continues. Only a document-level XML
//! parse failure aborts ingest.

use thiserror::Error;

/// Malformed AR text or an unparsable duration
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("unknown short key '{0}'")]
    UnknownKey(String),

    #[error("malformed pair '{0}': expected key=value")]
    MalformedPair(String),

    #[error("invalid number for '{field}': '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("invalid percent-encoding for '{field}'")]
    Encoding { field: String },

    #[error("invalid duration '{0}'")]
    InvalidDuration(String),
}

/// An AR record missing a field the serialization profile requires
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("annotation is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Any failure while decoding AR text
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Document-level ingest failure. Individual bad annotations never raise;
/// they are skipped.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}
