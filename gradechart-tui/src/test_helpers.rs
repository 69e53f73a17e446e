//! Test helpers for building apps over small in-memory gradebooks

use gradechart_core::{Assessment, ChartNavigator, RawRecord};

use crate::app::AppState;

pub fn app_with(records: &[(&str, f64, Vec<f64>)]) -> AppState {
    let assessments = records
        .iter()
        .map(|(label, max, scores)| {
            Assessment::new(&RawRecord::new(*label, *max, scores.clone())).unwrap()
        })
        .collect();
    AppState::new(ChartNavigator::new(assessments).unwrap(), "test")
}

/// Three assessments: "DS1" (/20), "TP2" (/10), "QCM" (/40).
pub fn sample_app() -> AppState {
    app_with(&[
        ("DS1", 20.0, vec![12.0, 14.0, 14.0, 9.5, 17.0, 11.0]),
        ("TP2", 10.0, vec![5.0, 10.0, 0.0, 7.5]),
        ("QCM", 40.0, vec![30.0, 22.0, 38.0, 40.0, 15.0]),
    ])
}
