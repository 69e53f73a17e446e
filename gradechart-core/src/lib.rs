//! GradeChart Core: grade normalization, histograms, and chart navigation.
//!
//! This crate contains everything that is not drawing or input handling:
//! - Raw gradebook records and their JSON decoding
//! - Assessments: scores rescaled to /20, 21-bucket histogram, spread
//! - ChartNavigator: wrap-around next/previous state and the chart model
//! - RenderSpec: the pure data a front end paints from
//! - Gradebook sources (GitHub contents API, local file)
//! - TOML configuration and log4rs bootstrap

pub mod assessment;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigator;
pub mod record;
pub mod render;
pub mod source;

pub use assessment::{build_assessments, Assessment, AssessmentSummary, BucketPolicy, BUCKET_COUNT};
pub use config::{ConfigError, ViewerConfig};
pub use error::{EmptyKind, GradeError};
pub use navigator::{ChartNavigator, Command};
pub use record::RawRecord;
pub use render::{Band, Bar, ChartStyle, MeanMarker, MeanMode, RenderSpec, Rgb};
pub use source::{load_assessments, GradebookSource, SourceError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Assessment>();
        require_sync::<Assessment>();
        require_send::<ChartNavigator>();
        require_sync::<ChartNavigator>();
        require_send::<RenderSpec>();
        require_sync::<RenderSpec>();
        require_send::<GradeError>();
        require_sync::<GradeError>();
    }
}
