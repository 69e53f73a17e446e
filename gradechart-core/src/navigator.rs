//! ChartNavigator: which assessment is on screen, and its chart model.
//!
//! Holds a non-empty, fixed list of assessments and a current index. The
//! index only moves through `advance`/`retreat` (or `apply`, which calls
//! them) and always wraps, so it stays in `0..len` in both directions.

use log::debug;

use crate::assessment::Assessment;
use crate::error::{EmptyKind, GradeError};
use crate::render::{Band, Bar, ChartStyle, MeanMarker, MeanMode, RenderSpec};

/// Navigation command sent by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
}

#[derive(Debug, Clone)]
pub struct ChartNavigator {
    assessments: Vec<Assessment>,
    index: usize,
    style: ChartStyle,
}

impl ChartNavigator {
    pub fn new(assessments: Vec<Assessment>) -> Result<Self, GradeError> {
        if assessments.is_empty() {
            return Err(GradeError::EmptyDataset(EmptyKind::Assessments));
        }
        Ok(Self {
            assessments,
            index: 0,
            style: ChartStyle::default(),
        })
    }

    /// Replace the chart style. An empty palette keeps the default one.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        let palette = if style.palette.is_empty() {
            ChartStyle::default().palette
        } else {
            style.palette
        };
        self.style = ChartStyle { palette, ..style };
        self
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    /// Always false: construction rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    pub fn current(&self) -> &Assessment {
        &self.assessments[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.len();
    }

    pub fn retreat(&mut self) {
        self.index = (self.index + self.len() - 1) % self.len();
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
        }
        debug!(
            "{command:?} -> {}/{} '{}'",
            self.index + 1,
            self.len(),
            self.current().label()
        );
    }

    /// Chart model for the current assessment.
    pub fn render_model(&self) -> RenderSpec {
        let current = self.current();
        let total = self.len();

        let mean = match self.style.mean_mode {
            MeanMode::Truncated => current.truncated_mean(),
            MeanMode::Exact => current.mean(),
        };
        let std_dev = current.std_dev();
        let peak = current.peak_count();

        let bars = current
            .histogram()
            .iter()
            .enumerate()
            .map(|(bucket, &height)| Bar {
                bucket: bucket as u8,
                height,
            })
            .collect();

        RenderSpec {
            title: format!("{}/{}", current.label(), total),
            label: current.label().to_string(),
            position: self.index,
            total,
            mean,
            std_dev,
            peak_count: peak,
            band: Band {
                x_min: mean - std_dev,
                x_max: mean + std_dev,
                y_min: 0.0,
                y_max: f64::from(peak),
            },
            bars,
            bar_color: self.style.bar_color(self.index),
            band_color: self.style.band_color,
            mean_marker: MeanMarker {
                x: mean,
                y_from: 0.0,
                y_to: 1.0,
            },
            marker_color: self.style.marker_color,
        }
    }
}
