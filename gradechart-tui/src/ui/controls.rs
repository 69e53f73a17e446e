//! Control row: summary numbers for the current assessment and the ‹ / ›
//! navigation buttons.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use gradechart_core::{Command, RenderSpec};

use crate::app::AppState;
use crate::theme;
use crate::ui::ScreenLayout;

pub fn render(f: &mut Frame, layout: &ScreenLayout, app: &AppState, spec: &RenderSpec) {
    render_stats(f, layout.stats, app, spec);
    render_button(f, layout.prev_button, "‹", app.last_command == Some(Command::Retreat));
    render_button(f, layout.next_button, "›", app.last_command == Some(Command::Advance));
}

fn render_stats(f: &mut Frame, area: Rect, app: &AppState, spec: &RenderSpec) {
    let summary = app.navigator.current().summary();

    let mut spans = vec![
        Span::styled(format!(" {}/{} ", spec.position + 1, spec.total), theme::accent_bold()),
        Span::styled("n ", theme::muted()),
        Span::styled(summary.count.to_string(), theme::text()),
        Span::styled("  mean ", theme::muted()),
        Span::styled(format!("{:.2}", summary.mean), theme::text()),
        Span::styled(format!(" (line {:.0})", spec.mean), theme::neutral()),
        Span::styled("  σ ", theme::muted()),
        Span::styled(format!("{:.2}", summary.std_dev), theme::text()),
        Span::styled("  range ", theme::muted()),
        Span::styled(format!("{:.1}–{:.1}", summary.min, summary.max), theme::text()),
    ];
    if summary.clamped > 0 {
        spans.push(Span::styled(
            format!("  {} clamped", summary.clamped),
            theme::warning(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted());
    let para = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(para, area);
}

fn render_button(f: &mut Frame, area: Rect, label: &str, pressed: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true));
    let para = Paragraph::new(Span::styled(label.to_string(), theme::button(pressed)))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(para, area);
}
