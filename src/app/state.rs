//! Defines the central, mutable state of the application.

use crate::config::AppConfig;

/// Holds the shared, mutable state of the application.
///
/// Wrapped in an `Arc<Mutex<...>>` so the event loop, menu activation
/// handlers and the async picker task can all reach it.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Whether the about panel is currently shown by the UI layer. Kept
    /// private so every change goes through [`AppState::toggle_about_dialog`].
    show_about_dialog: bool,
}

impl Default for AppState {
    /// Creates a default `AppState` instance, loading the configuration
    /// from disk.
    fn default() -> Self {
        Self {
            config: AppConfig::load().unwrap_or_default(),
            show_about_dialog: false,
        }
    }
}

impl AppState {
    /// State with the built-in default configuration, without touching the
    /// config file on disk. Intended for tests and headless use.
    pub fn with_default_config() -> Self {
        Self {
            config: AppConfig::default(),
            show_about_dialog: false,
        }
    }

    /// Inverts the about-panel flag and returns the new value.
    pub fn toggle_about_dialog(&mut self) -> bool {
        self.show_about_dialog = !self.show_about_dialog;
        self.show_about_dialog
    }

    /// Current visibility of the about panel.
    pub fn about_dialog_visible(&self) -> bool {
        self.show_about_dialog
    }
}
