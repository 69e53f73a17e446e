//! Gradebook sources and structured load errors.
//!
//! The `GradebookSource` trait abstracts over where the gradebook JSON comes
//! from (GitHub contents API, local file) so the startup sequence and the
//! tests can swap implementations. Sources only fetch and decode; they do not
//! retry. A failed load is fatal to the caller.

pub mod file;
pub mod github;

use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::assessment::{build_assessments, Assessment, BucketPolicy};
use crate::config::SourceConfig;
use crate::error::GradeError;
use crate::record::{decode_records, RawRecord};

pub use file::FileSource;
pub use github::GithubContentsSource;

/// Structured error types for loading a gradebook.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP {status} fetching {url}: {reason}")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response envelope: {0}")]
    Envelope(String),

    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("content is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] GradeError),
}

pub trait GradebookSource {
    /// Human-readable description for logs and status lines.
    fn describe(&self) -> String;

    /// Fetch and decode every record, in document order.
    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}

/// Decode gradebook JSON text into records.
pub fn parse_document(json: &str) -> Result<Vec<RawRecord>, SourceError> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    Ok(decode_records(&doc)?)
}

/// Pick the source described by the config: a local file wins over the URL.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn GradebookSource>, SourceError> {
    match &config.file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(GithubContentsSource::from_config(config)?)),
    }
}

/// Fetch records and build one assessment per record.
pub fn load_assessments(
    source: &dyn GradebookSource,
    policy: BucketPolicy,
) -> Result<Vec<Assessment>, SourceError> {
    info!("loading gradebook from {}", source.describe());
    let records = source.fetch()?;
    let assessments = build_assessments(&records, policy)?;
    info!("built {} assessment(s)", assessments.len());
    Ok(assessments)
}
