//! Top-level UI layout: chart, control row with the two buttons, status bar.

pub mod controls;
pub mod histogram;
pub mod overlays;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{AppState, Overlay};
use histogram::HistogramChart;

const BUTTON_WIDTH: u16 = 7;

/// Screen regions. Pure function of the terminal size, so mouse hit-testing
/// can recompute it without touching the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub chart: Rect,
    pub stats: Rect,
    pub prev_button: Rect,
    pub next_button: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(1),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(1),
            ])
            .split(rows[1]);

        Self {
            chart: rows[0],
            stats: controls[0],
            prev_button: controls[1],
            next_button: controls[3],
            status: rows[2],
        }
    }
}

/// Draw the entire UI from a fresh chart model.
pub fn draw(f: &mut Frame, app: &AppState) {
    let layout = ScreenLayout::new(f.area());
    let spec = app.render_model();

    f.render_widget(HistogramChart::new(&spec), layout.chart);
    controls::render(f, &layout, app, &spec);
    status_bar::render(f, layout.status, app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, layout.chart),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
