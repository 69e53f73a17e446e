//! Structured error types for the grade statistics core.
//!
//! These are designed to be displayable in both CLI and TUI contexts. All of
//! them are fatal at the point they are raised: a single bad record aborts the
//! whole load rather than silently skipping it.

use thiserror::Error;

/// What was empty when an `EmptyDataset` error was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyKind {
    /// The navigator was given zero assessments.
    Assessments,
    /// An assessment has no scores, so its standard deviation is undefined.
    Scores { label: String },
    /// The decoded dataset has no `Evaluations` entries.
    Evaluations,
}

impl std::fmt::Display for EmptyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyKind::Assessments => write!(f, "no assessments to navigate"),
            EmptyKind::Scores { label } => write!(f, "assessment '{label}' has no scores"),
            EmptyKind::Evaluations => write!(f, "dataset contains no evaluations"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    /// A record is missing a field, has the wrong type, or a non-positive maximum.
    /// `record` is the position in the document, when the record came from one.
    #[error("malformed record{}: {reason}", position_suffix(.record))]
    MalformedInput {
        record: Option<usize>,
        reason: String,
    },

    /// The document itself does not have the expected shape.
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("empty dataset: {0}")]
    EmptyDataset(EmptyKind),

    /// A raw score lies outside 0..=max (so its normalized value is outside
    /// 0..=20) and the bucket policy is `Reject`.
    #[error("score {score} in '{label}' is outside 0..=20 after scaling (bucket {bucket})")]
    OutOfRangeBucket {
        label: String,
        score: f64,
        bucket: i64,
    },
}

impl GradeError {
    pub fn malformed(record: impl Into<Option<usize>>, reason: impl Into<String>) -> Self {
        GradeError::MalformedInput {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

fn position_suffix(record: &Option<usize>) -> String {
    record.map(|i| format!(" #{i}")).unwrap_or_default()
}
