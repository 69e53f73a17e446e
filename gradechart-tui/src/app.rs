//! Application state: single-owner, main-thread only.
//!
//! The navigator lives here and is only mutated through `dispatch`, one
//! input event at a time.

use chrono::NaiveDateTime;
use log::info;

use gradechart_core::{ChartNavigator, Command, RenderSpec};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Everything an input event can ask the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Command),
    ToggleHelp,
    CloseOverlay,
    Quit,
}

/// Top-level application state.
pub struct AppState {
    pub navigator: ChartNavigator,
    pub running: bool,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    /// Last navigation command, used to highlight its button.
    pub last_command: Option<Command>,
    pub source: String,
    pub loaded_at: NaiveDateTime,
}

impl AppState {
    pub fn new(navigator: ChartNavigator, source: impl Into<String>) -> Self {
        let source = source.into();
        let mut app = Self {
            navigator,
            running: true,
            overlay: Overlay::None,
            status_message: None,
            last_command: None,
            source,
            loaded_at: chrono::Local::now().naive_local(),
        };

        let clamped: usize = app
            .navigator
            .assessments()
            .iter()
            .map(|a| a.clamped())
            .sum();
        if clamped > 0 {
            app.set_warning(format!(
                "{clamped} score(s) above the maximum or below zero were clamped into 0..20"
            ));
        } else {
            app.set_status(format!(
                "Loaded {} assessments at {}",
                app.navigator.len(),
                app.loaded_at.format("%H:%M:%S")
            ));
        }
        app
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Navigate(command) => {
                self.navigator.apply(command);
                self.last_command = Some(command);
                self.status_message = None;
            }
            Action::ToggleHelp => {
                self.overlay = match self.overlay {
                    Overlay::Help => Overlay::None,
                    Overlay::None => Overlay::Help,
                };
            }
            Action::CloseOverlay => self.overlay = Overlay::None,
            Action::Quit => {
                info!("quit requested");
                self.running = false;
            }
        }
    }

    /// Fresh chart model for the current assessment.
    pub fn render_model(&self) -> RenderSpec {
        self.navigator.render_model()
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
