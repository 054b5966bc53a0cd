//! Physics and screen tuning
//!
//! Defaults match the `consts` module. A settings file is plain JSON; missing
//! fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Tile edge in pixels
    pub tile_size: i32,

    // === Screen (camera clamp) ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Actor motion ===
    /// Horizontal speed set by a walk input
    pub player_speed: i32,
    /// Upward speed while jumping
    pub jump_speed: i32,
    /// Downward acceleration per tick
    pub gravity: i32,
    /// Fall speed cap
    pub max_fall_speed: i32,
    /// Jump length in ticks
    pub jump_duration: i32,
    /// Ticks between walk frames
    pub animation_duration: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_speed: PLAYER_SPEED,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            jump_duration: PLAYER_JUMP_DURATION,
            animation_duration: ANIMATION_DURATION,
        }
    }
}

impl Settings {
    /// Size of one tile as a box extent
    pub fn tile_extent(&self) -> glam::IVec2 {
        glam::IVec2::splat(self.tile_size)
    }

    /// Goal (castle) hitbox, `GOAL_TILES` tiles on a side
    pub fn goal_extent(&self) -> glam::IVec2 {
        glam::IVec2::splat(self.tile_size.saturating_mul(GOAL_TILES))
    }

    /// Every field is a size, speed or duration and must be positive
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("tile_size", self.tile_size),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_speed", self.player_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("jump_duration", self.jump_duration),
            ("animation_duration", self.animation_duration),
        ];
        match fields.into_iter().find(|&(_, value)| value <= 0) {
            Some((field, value)) => Err(SettingsError::NonPositive { field, value }),
            None => Ok(()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => match settings.validate() {
                    Ok(()) => {
                        log::info!("Loaded settings from {}", path.display());
                        settings
                    }
                    Err(e) => {
                        log::warn!("Ignoring settings {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
