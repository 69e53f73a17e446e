//! Assessment: one assignment's scores rescaled to /20 and bucketed.
//!
//! Built once per raw record at load time and never mutated afterwards. The
//! histogram has 21 buckets, one per integer grade 0..=20; a score lands in
//! the bucket of its normalized value truncated toward zero, so 19.99 counts
//! as 19 and exactly 20.0 counts as 20. A raw score outside 0..=max is out
//! of range even when it would truncate into a valid bucket (10.4/10 is 20.8).

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EmptyKind, GradeError};
use crate::record::RawRecord;

/// Number of histogram buckets (grades 0 through 20 inclusive).
pub const BUCKET_COUNT: usize = 21;

/// Reference scale every score is brought back to.
pub const SCALE: f64 = 20.0;

/// What to do with a raw score above the maximum or below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketPolicy {
    /// Count it in bucket 0 or 20, whichever is nearer.
    #[default]
    Clamp,
    /// Fail construction with `OutOfRangeBucket`.
    Reject,
}

/// Rescale a raw score to /20. Not clamped.
pub fn normalize(score: f64, max_score: f64) -> f64 {
    score * SCALE / max_score
}

/// Bucket index of a normalized score, truncated toward zero.
/// Not range-checked; see `in_range`.
pub fn bucket_index(normalized: f64) -> i64 {
    normalized.trunc() as i64
}

/// Whether a raw score lies in 0..=max. Decided on the raw score so that
/// `max / max * 20` rounding just above 20.0 still counts as in range.
pub fn in_range(score: f64, max_score: f64) -> bool {
    (0.0..=max_score).contains(&score)
}

/// Descriptive numbers for one assessment, on the /20 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub count: usize,
    pub mean: f64,
    pub truncated_mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub peak_count: u32,
    pub clamped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    label: String,
    normalized_scores: Vec<f64>,
    histogram: [u32; BUCKET_COUNT],
    peak_count: u32,
    std_dev: f64,
    clamped: usize,
}

impl Assessment {
    /// Build with the default `Clamp` bucket policy.
    pub fn new(record: &RawRecord) -> Result<Self, GradeError> {
        Self::with_policy(record, BucketPolicy::Clamp)
    }

    /// Build a standalone record; a `MalformedInput` error carries no position.
    pub fn with_policy(record: &RawRecord, policy: BucketPolicy) -> Result<Self, GradeError> {
        Self::from_record(None, record, policy)
    }

    fn from_record(
        position: Option<usize>,
        record: &RawRecord,
        policy: BucketPolicy,
    ) -> Result<Self, GradeError> {
        record.validate(position)?;
        if record.scores.is_empty() {
            return Err(GradeError::EmptyDataset(EmptyKind::Scores {
                label: record.label.clone(),
            }));
        }

        let mut normalized_scores = Vec::with_capacity(record.scores.len());
        let mut histogram = [0u32; BUCKET_COUNT];
        let mut clamped = 0;
        for &raw in &record.scores {
            let score = normalize(raw, record.max_score);
            let bucket = bucket_index(score);
            let slot = if in_range(raw, record.max_score) {
                // in range, so 0 <= bucket; min() absorbs rounding above 20.0
                usize::try_from(bucket).unwrap_or(0).min(BUCKET_COUNT - 1)
            } else {
                match policy {
                    BucketPolicy::Reject => {
                        return Err(GradeError::OutOfRangeBucket {
                            label: record.label.clone(),
                            score,
                            bucket,
                        });
                    }
                    BucketPolicy::Clamp => {
                        clamped += 1;
                        if raw < 0.0 {
                            0
                        } else {
                            BUCKET_COUNT - 1
                        }
                    }
                }
            };
            histogram[slot] += 1;
            normalized_scores.push(score);
        }

        if clamped > 0 {
            warn!(
                "'{}': {clamped} score(s) outside 0..={} were clamped into bucket 0 or 20",
                record.label, record.max_score
            );
        }

        let peak_count = histogram.iter().copied().max().unwrap_or(0);
        let std_dev = population_std_dev(&normalized_scores);

        debug!(
            "built assessment '{}': n={} peak={} sd={:.3}",
            record.label,
            normalized_scores.len(),
            peak_count,
            std_dev
        );

        Ok(Self {
            label: record.label.clone(),
            normalized_scores,
            histogram,
            peak_count,
            std_dev,
            clamped,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn normalized_scores(&self) -> &[f64] {
        &self.normalized_scores
    }

    pub fn histogram(&self) -> &[u32; BUCKET_COUNT] {
        &self.histogram
    }

    /// Height of the tallest bar.
    pub fn peak_count(&self) -> u32 {
        self.peak_count
    }

    /// Population standard deviation of the normalized scores.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Scores that were clamped into bucket 0 or 20.
    pub fn clamped(&self) -> usize {
        self.clamped
    }

    pub fn len(&self) -> usize {
        self.normalized_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_scores.is_empty()
    }

    /// True arithmetic mean of the normalized scores.
    pub fn mean(&self) -> f64 {
        self.normalized_scores.iter().sum::<f64>() / self.len() as f64
    }

    /// Floor of the mean, as drawn by the chart's mean line.
    pub fn truncated_mean(&self) -> f64 {
        self.mean().floor()
    }

    pub fn summary(&self) -> AssessmentSummary {
        let min = self
            .normalized_scores
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let max = self
            .normalized_scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        AssessmentSummary {
            count: self.len(),
            mean: self.mean(),
            truncated_mean: self.truncated_mean(),
            std_dev: self.std_dev,
            min,
            max,
            peak_count: self.peak_count,
            clamped: self.clamped,
        }
    }
}

/// Build one assessment per record, in order. The first failure aborts the
/// whole list and reports the record's position.
pub fn build_assessments(
    records: &[RawRecord],
    policy: BucketPolicy,
) -> Result<Vec<Assessment>, GradeError> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| Assessment::from_record(Some(i), r, policy))
        .collect()
}

/// sqrt(mean((x - mean)^2)). Exactly 0.0 when all values are equal.
fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
