//! Persisted CLI configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Library directory holding per-video metadata documents.
    /// `None` falls back to the platform data directory.
    pub library_dir: Option<PathBuf>,
    /// Frame rate of the footage.
    pub frame_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_dir: None,
            frame_rate: filmroom_core::DEFAULT_FRAME_RATE,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("filmroom", None).unwrap_or_default()
    }

    pub fn library_dir(&self) -> PathBuf {
        self.library_dir
            .clone()
            .unwrap_or_else(filmroom_core::default_library_dir)
    }
}
