//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per timer event
//! - Integer positions and momentum only
//! - Stable iteration order (object table order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod level;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{inset_box, minimal_separation, overlaps, separation_with_margin};
pub use level::{LevelFile, Tile, build_world_from_tiles, encode_level_text, load_level};
pub use resolve::{Resolution, resolve};
pub use state::{
    Actor, BrickStyle, Facing, GameObject, HazardLook, Level, MotionState, ObjectKind, World,
    DEFAULT_GOAL,
};
pub use tick::{TickInput, TickOutcome, tick};
