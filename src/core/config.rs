// src/core/config.rs - Scanner tuning, loaded from RON
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "data/config/scanner.ron";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScannerConfig {
    /// Alpha a revealed entity fades up to.
    pub reveal_alpha: f32,
    /// Seconds for a full fade in either direction.
    pub fade_duration: f32,
    pub default_range: f32,
    /// How far away a user may reach a device that is not in their hands.
    pub interaction_range: f32,
    pub index_cell_size: f32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            reveal_alpha: 0.8,
            fade_duration: 0.3,
            default_range: 4.0,
            interaction_range: 1.5,
            index_cell_size: 4.0,
        }
    }
}

impl ScannerConfig {
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                error!("Failed to parse scanner config {}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                error!("Failed to load scanner config {}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        let config: Self = ron::from_str(content)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.reveal_alpha = self.reveal_alpha.clamp(0.0, 1.0);
        self.fade_duration = self.fade_duration.max(0.0);
        self.default_range = self.default_range.max(0.0);
        self.interaction_range = self.interaction_range.max(0.0);
        if self.index_cell_size <= 0.0 {
            self.index_cell_size = Self::default().index_cell_size;
        }
        self
    }
}
