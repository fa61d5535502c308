pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Persisted application settings. Currently just window geometry; new
/// fields should carry serde defaults so older config files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
    /// Persist size and position on exit and restore them at startup.
    pub remember_window_state: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: (1200.0, 800.0),
            window_position: (100.0, 100.0),
            remember_window_state: true,
        }
    }
}
