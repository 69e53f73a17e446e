//! Histogram chart widget
//!
//! Renders one `RenderSpec` as:
//! - 21 vertical bars (grades 0..=20), scaled so the tallest reaches the top
//! - A shaded ±1 standard deviation band behind the bars
//! - A vertical mean marker across the full plot height
//! - Count axis on the left, grade axis along the bottom

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use gradechart_core::{RenderSpec, BUCKET_COUNT};

use crate::theme;

const FULL_BLOCK: &str = "\u{2588}"; // █
const PARTIAL_BLOCKS: [&str; 8] = [
    " ", "\u{2581}", "\u{2582}", "\u{2583}", "\u{2584}", "\u{2585}", "\u{2586}", "\u{2587}",
];
const MARKER: &str = "\u{2503}"; // ┃

/// Half-width of a bar in grade units.
const BAR_HALF_WIDTH: f64 = 0.4;

/// Margin left and right of the outermost bar centers, in grade units.
const X_MARGIN: f64 = 0.5;

pub struct HistogramChart<'a> {
    spec: &'a RenderSpec,
}

impl<'a> HistogramChart<'a> {
    pub fn new(spec: &'a RenderSpec) -> Self {
        Self { spec }
    }
}

/// Maps grade values to plot columns.
struct Plot {
    area: Rect,
    x_min: f64,
    x_max: f64,
}

impl Plot {
    fn new(area: Rect, (lo, hi): (f64, f64)) -> Self {
        Self {
            area,
            x_min: lo - X_MARGIN,
            x_max: hi + X_MARGIN,
        }
    }

    /// Column of a grade value, clamped to the plot.
    fn col(&self, value: f64) -> u16 {
        let offset = ((value - self.x_min) * self.area.width as f64 / (self.x_max - self.x_min)).floor();
        // float-to-int casts saturate, so values left of the axis land on 0
        self.area.x + (offset as u16).min(self.area.width - 1)
    }

    fn visible(&self, value: f64) -> bool {
        (self.x_min..=self.x_max).contains(&value)
    }
}

impl<'a> Widget for HistogramChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spec = self.spec;
        let block = Block::default()
            .title(format!(" {} ", spec.title))
            .title_style(theme::panel_title(true))
            .borders(Borders::ALL)
            .border_style(theme::panel_border(true))
            .style(Style::default().bg(theme::BACKGROUND));

        let inner = block.inner(area);
        block.render(area, buf);

        let peak = spec.peak_count.max(1);
        let peak_label = peak.to_string();
        let axis_width = peak_label.len() as u16 + 1;

        if inner.width < axis_width + BUCKET_COUNT as u16 || inner.height < 4 {
            if inner.width > 0 && inner.height > 0 {
                buf.set_stringn(inner.x, inner.y, "Terminal too small", inner.width as usize, theme::muted());
            }
            return;
        }

        let plot = Plot::new(
            Rect {
                x: inner.x + axis_width,
                y: inner.y,
                width: inner.width - axis_width,
                height: inner.height - 2,
            },
            spec.x_range(),
        );
        let p = plot.area;

        // Band first so bars and marker draw over it.
        let band = spec.band;
        if band.x_max >= plot.x_min && band.x_min <= plot.x_max {
            let band_bg = theme::color(spec.band_color);
            for x in plot.col(band.x_min)..=plot.col(band.x_max) {
                for y in p.top()..p.bottom() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_bg(band_bg);
                    }
                }
            }
        }

        // Bars, with eighth-block resolution on the top cell.
        let bar_style = Style::default().fg(theme::color(spec.bar_color));
        for bar in &spec.bars {
            let eighths = (f64::from(bar.height) / f64::from(peak) * p.height as f64 * 8.0).round() as u32;
            let full = (eighths / 8) as u16;
            let rem = (eighths % 8) as usize;
            let center = f64::from(bar.bucket);
            let left = plot.col(center - BAR_HALF_WIDTH);
            let right = plot.col(center + BAR_HALF_WIDTH).max(left);

            for x in left..=right {
                for h in 0..full.min(p.height) {
                    buf.set_string(x, p.bottom() - 1 - h, FULL_BLOCK, bar_style);
                }
                if rem > 0 && full < p.height {
                    buf.set_string(x, p.bottom() - 1 - full, PARTIAL_BLOCKS[rem], bar_style);
                }
            }
        }

        // Mean marker across the full plot height.
        let marker = spec.mean_marker;
        if plot.visible(marker.x) {
            let x = plot.col(marker.x);
            let marker_style = Style::default().fg(theme::color(spec.marker_color));
            let span = p.height as f64;
            let top = p.bottom() - (marker.y_to * span).round() as u16;
            let bottom = p.bottom() - (marker.y_from * span).round() as u16;
            for y in top..bottom {
                buf.set_string(x, y, MARKER, marker_style);
            }
        }

        // Count axis.
        let axis_x = inner.x + axis_width - 1;
        for y in p.top()..p.bottom() {
            buf.set_string(axis_x, y, "\u{2502}", theme::muted()); // │
        }
        buf.set_string(axis_x, p.top(), "\u{2524}", theme::muted()); // ┤
        buf.set_string(
            inner.x,
            p.top(),
            format!("{:>w$}", peak_label, w = peak_label.len()),
            theme::muted(),
        );
        buf.set_string(
            inner.x,
            p.bottom() - 1,
            format!("{:>w$}", 0, w = peak_label.len()),
            theme::muted(),
        );

        // Grade axis.
        let axis_y = p.bottom();
        buf.set_string(axis_x, axis_y, "\u{2514}", theme::muted()); // └
        for x in p.left()..p.right() {
            buf.set_string(x, axis_y, "\u{2500}", theme::muted()); // ─
        }
        for grade in (0..BUCKET_COUNT).step_by(5) {
            let label = grade.to_string();
            let x = plot
                .col(grade as f64)
                .min(inner.right().saturating_sub(label.len() as u16));
            buf.set_string(x, axis_y + 1, &label, theme::muted());
        }
    }
}
