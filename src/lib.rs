//! Tile Platformer - simulation core for a firmware-hosted 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world state)
//! - `atlas`: Sprite atlas decoding from truecolor bitmaps
//! - `session`: Event dispatch shell around the simulation tick
//! - `settings`: Data-driven physics and screen tuning
//! - `error`: Load/decode errors

pub mod atlas;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use atlas::{Pixel, PixelFrame, SpriteAtlas, SpriteSheets};
pub use error::{DecodeError, LevelLoadError, SettingsError};
pub use session::{GameEvent, GameState, Key, PointerState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Edge length of one world tile in pixels
    pub const TILE_SIZE: i32 = 40;

    /// Default screen dimensions (or 800x600)
    pub const SCREEN_WIDTH: i32 = 1024;
    pub const SCREEN_HEIGHT: i32 = 768;

    /// Horizontal speed set by one walk input
    pub const PLAYER_SPEED: i32 = 6;
    /// Upward speed held for the whole jump
    pub const JUMP_SPEED: i32 = 6;
    /// Vertical acceleration per tick
    pub const GRAVITY: i32 = 2;
    /// Fall speed cap
    pub const MAX_FALL_SPEED: i32 = 2;
    /// Jump length in ticks
    pub const PLAYER_JUMP_DURATION: i32 = 25;
    /// Ticks between walk animation frames
    pub const ANIMATION_DURATION: i32 = 3;
    /// Ticks between coin animation frames
    pub const COIN_ANIMATION_DURATION: i32 = 5;
    /// Number of frames in the coin spin
    pub const COIN_FRAME_COUNT: i32 = 8;

    /// Goal (castle) hitbox edge in tiles
    pub const GOAL_TILES: i32 = 4;

    /// Offset of the actor probe boxes used for solid contact
    pub const SOLID_PROBE_INSET: i32 = 1;
    /// Amount the probe boxes are shrunk across the probed axis
    pub const SOLID_PROBE_SHRINK: i32 = 2;
    /// Inset of the lethal region inside a hazard tile
    pub const HAZARD_INSET: i32 = 3;

    /// Pointer cursor step for the debug keys
    pub const CURSOR_STEP: i32 = 10;
}
