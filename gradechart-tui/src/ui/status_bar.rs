//! Bottom status bar: key hints, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Key hints
    spans.push(Span::styled(" ←/h prev  →/l next  ? help  q quit", theme::muted()));

    // Separator
    spans.push(Span::raw(" | "));

    // Status message, or where the data came from
    match &app.status_message {
        Some((msg, level)) => {
            let style = match level {
                StatusLevel::Info => theme::accent(),
                StatusLevel::Warning => theme::warning(),
            };
            spans.push(Span::styled(msg.as_str(), style));
        }
        None => spans.push(Span::styled(app.source.as_str(), theme::muted())),
    }

    let para = Paragraph::new(Line::from(spans));
    f.render_widget(para, area);
}
