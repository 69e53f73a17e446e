//! Raw grade records and decoding of the gradebook JSON document.
//!
//! The document shape is:
//!
//! ```json
//! { "Evaluations": [ { "Désignation": "DS1", "Barème": 20, "Notes": [12, 15.5] } ] }
//! ```
//!
//! Decoding goes through `serde_json::Value` rather than a derived struct so
//! that a bad record is reported with its position and the field at fault.

use serde_json::Value;

use crate::error::{EmptyKind, GradeError};

pub const EVALUATIONS_KEY: &str = "Evaluations";
pub const LABEL_KEY: &str = "Désignation";
pub const MAX_SCORE_KEY: &str = "Barème";
pub const SCORES_KEY: &str = "Notes";

/// One assignment as stored in the gradebook.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub label: String,
    pub max_score: f64,
    pub scores: Vec<f64>,
}

impl RawRecord {
    pub fn new(label: impl Into<String>, max_score: f64, scores: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            max_score,
            scores,
        }
    }

    /// Decode a single record at position `index` of the `Evaluations` list.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, GradeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| GradeError::malformed(index, "record is not a JSON object"))?;

        let label = obj
            .get(LABEL_KEY)
            .ok_or_else(|| GradeError::malformed(index, format!("missing field '{LABEL_KEY}'")))?
            .as_str()
            .ok_or_else(|| GradeError::malformed(index, format!("'{LABEL_KEY}' is not a string")))?
            .to_string();

        let max_score = obj
            .get(MAX_SCORE_KEY)
            .ok_or_else(|| {
                GradeError::malformed(index, format!("missing field '{MAX_SCORE_KEY}'"))
            })?
            .as_f64()
            .ok_or_else(|| {
                GradeError::malformed(index, format!("'{MAX_SCORE_KEY}' is not a number"))
            })?;

        let scores = obj
            .get(SCORES_KEY)
            .ok_or_else(|| GradeError::malformed(index, format!("missing field '{SCORES_KEY}'")))?
            .as_array()
            .ok_or_else(|| GradeError::malformed(index, format!("'{SCORES_KEY}' is not a list")))?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64().ok_or_else(|| {
                    GradeError::malformed(index, format!("'{SCORES_KEY}'[{i}] is not a number"))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let record = Self {
            label,
            max_score,
            scores,
        };
        record.validate(Some(index))?;
        Ok(record)
    }

    /// Check the scaling preconditions. `index` is only used for the error message.
    pub fn validate(&self, index: Option<usize>) -> Result<(), GradeError> {
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(GradeError::malformed(
                index,
                format!(
                    "'{MAX_SCORE_KEY}' must be a positive number, got {}",
                    self.max_score
                ),
            ));
        }
        if let Some(pos) = self.scores.iter().position(|s| !s.is_finite()) {
            return Err(GradeError::malformed(
                index,
                format!("'{SCORES_KEY}'[{pos}] is not a finite number"),
            ));
        }
        Ok(())
    }
}

/// Decode the whole gradebook document into records, in document order.
///
/// Fails on the first malformed record; an empty `Evaluations` list is an
/// `EmptyDataset` error.
pub fn decode_records(doc: &Value) -> Result<Vec<RawRecord>, GradeError> {
    let list = doc
        .get(EVALUATIONS_KEY)
        .ok_or_else(|| GradeError::MalformedDataset(format!("missing key '{EVALUATIONS_KEY}'")))?
        .as_array()
        .ok_or_else(|| GradeError::MalformedDataset(format!("'{EVALUATIONS_KEY}' is not a list")))?;

    if list.is_empty() {
        return Err(GradeError::EmptyDataset(EmptyKind::Evaluations));
    }

    list.iter()
        .enumerate()
        .map(|(i, v)| RawRecord::from_value(i, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_records_in_order() {
        let doc = json!({
            "Evaluations": [
                { "Désignation": "DS1", "Barème": 20, "Notes": [12, 15.5, 8] },
                { "Désignation": "TP2", "Barème": 10, "Notes": [5] }
            ]
        });
        let records = decode_records(&doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RawRecord::new("DS1", 20.0, vec![12.0, 15.5, 8.0]));
        assert_eq!(records[1].label, "TP2");
        assert_eq!(records[1].max_score, 10.0);
    }

    #[test]
    fn missing_field_is_malformed() {
        let doc = json!({
            "Evaluations": [
                { "Désignation": "DS1", "Barème": 20, "Notes": [12] },
                { "Désignation": "DS2", "Notes": [12] }
            ]
        });
        match decode_records(&doc) {
            Err(GradeError::MalformedInput { record, reason }) => {
                assert_eq!(record, Some(1));
                assert!(reason.contains("Barème"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_max_score_is_malformed() {
        let doc = json!({
            "Evaluations": [ { "Désignation": "DS1", "Barème": -5, "Notes": [1] } ]
        });
        assert!(matches!(
            decode_records(&doc),
            Err(GradeError::MalformedInput { record: Some(0), .. })
        ));
    }

    #[test]
    fn non_numeric_score_is_malformed() {
        let doc = json!({
            "Evaluations": [ { "Désignation": "DS1", "Barème": 20, "Notes": [1, "abs"] } ]
        });
        match decode_records(&doc) {
            Err(GradeError::MalformedInput { reason, .. }) => assert!(reason.contains("[1]")),
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn missing_or_empty_evaluations() {
        assert!(matches!(
            decode_records(&json!({ "Other": [] })),
            Err(GradeError::MalformedDataset(_))
        ));
        assert_eq!(
            decode_records(&json!({ "Evaluations": [] })),
            Err(GradeError::EmptyDataset(EmptyKind::Evaluations))
        );
    }
}
