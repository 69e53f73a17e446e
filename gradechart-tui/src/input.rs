//! Input dispatch: overlay keys first, then global keys; mouse clicks on the
//! two navigation buttons.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use gradechart_core::Command;

use crate::app::{Action, AppState, Overlay};
use crate::ui;

/// Map a key press to an action, given which overlay is open.
pub fn key_action(overlay: Overlay, key: KeyEvent) -> Option<Action> {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    // The help overlay consumes input first.
    if overlay == Overlay::Help {
        return match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ => Some(Action::CloseOverlay),
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Char(' ') => {
            Some(Action::Navigate(Command::Advance))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            Some(Action::Navigate(Command::Retreat))
        }
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}

/// Map a mouse event to an action. `area` is the whole terminal.
pub fn mouse_action(mouse: MouseEvent, area: Rect) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = ui::ScreenLayout::new(area);
            let at = Position::new(mouse.column, mouse.row);
            if layout.prev_button.contains(at) {
                Some(Action::Navigate(Command::Retreat))
            } else if layout.next_button.contains(at) {
                Some(Action::Navigate(Command::Advance))
            } else {
                None
            }
        }
        MouseEventKind::ScrollDown => Some(Action::Navigate(Command::Advance)),
        MouseEventKind::ScrollUp => Some(Action::Navigate(Command::Retreat)),
        _ => None,
    }
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    if let Some(action) = key_action(app.overlay, key) {
        app.dispatch(action);
    }
}

pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent, area: Rect) {
    if app.overlay != Overlay::None {
        return;
    }
    if let Some(action) = mouse_action(mouse, area) {
        app.dispatch(action);
    }
}

/// Key bindings help text
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("→ / l / n / Space", "Next assessment"),
        ("← / h / p", "Previous assessment"),
        ("click ‹ / ›", "Previous / next assessment"),
        ("scroll", "Previous / next assessment"),
        ("?", "Toggle this help"),
        ("q / Esc / Ctrl+C", "Quit"),
    ]
}
