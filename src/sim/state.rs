//! World state and core simulation types
//!
//! Everything the tick reads or writes lives here. Objects are created once at
//! level load and afterwards only their `active` and `frame_index` change.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Look of a solid brick tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStyle {
    Green,
    Red,
    Mossy,
}

/// Look of a hazard tile; both kill on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardLook {
    /// Bare web
    Web,
    /// Web with a spider
    Spider,
}

/// What a world object is, and therefore how the resolver treats it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Empty,
    Solid(BrickStyle),
    Hazard(HazardLook),
    Collectible,
    Actor,
}

impl ObjectKind {
    /// Sprite index in the tiles (or coin) sheet for a freshly loaded object
    pub fn initial_frame(self) -> i32 {
        match self {
            ObjectKind::Solid(BrickStyle::Green) => 0,
            ObjectKind::Solid(BrickStyle::Red) => 1,
            ObjectKind::Solid(BrickStyle::Mossy) => 2,
            ObjectKind::Hazard(HazardLook::Web) => 3,
            ObjectKind::Hazard(HazardLook::Spider) => 4,
            ObjectKind::Collectible | ObjectKind::Actor | ObjectKind::Empty => 0,
        }
    }

    /// Whether the tile carries the solid flag
    pub fn is_solid(self) -> bool {
        matches!(self, ObjectKind::Solid(_) | ObjectKind::Hazard(_))
    }
}

/// One grid-aligned world entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub pos: IVec2,
    pub kind: ObjectKind,
    /// Currently shown sprite
    pub frame_index: i32,
    /// Inactive objects are neither drawn nor collided with
    pub active: bool,
    pub solid: bool,
}

impl GameObject {
    pub fn new(pos: IVec2, kind: ObjectKind) -> Self {
        Self {
            pos,
            kind,
            frame_index: kind.initial_frame(),
            active: true,
            solid: kind.is_solid(),
        }
    }
}

/// Direction the actor faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Vertical motion state; jumping and falling are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    /// On the ground, or drifting without a vertical state change
    #[default]
    Grounded,
    /// Rising at jump speed until the jump timer lapses
    Jumping,
    /// Gravity-driven descent after a jump
    Falling,
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub object: GameObject,
    pub facing: Facing,
    /// False between taking off and landing again
    pub can_jump: bool,
    pub motion: MotionState,
    pub is_moving: bool,
    pub momentum: IVec2,
    pub jump_timer: i32,
    pub animation_timer: i32,
    pub collected: u32,
}

impl Actor {
    pub fn new(pos: IVec2) -> Self {
        let mut object = GameObject::new(pos, ObjectKind::Actor);
        object.frame_index = 0;
        Self {
            object,
            facing: Facing::Right,
            can_jump: true,
            motion: MotionState::Grounded,
            is_moving: false,
            momentum: IVec2::ZERO,
            jump_timer: 0,
            animation_timer: ANIMATION_DURATION,
            collected: 0,
        }
    }

    /// A fresh actor whose walk animation runs at the tuned rate
    pub fn spawn(pos: IVec2, settings: &Settings) -> Self {
        Self {
            animation_timer: settings.animation_duration,
            ..Self::new(pos)
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.object.pos
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.motion == MotionState::Jumping
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.motion == MotionState::Falling
    }
}

/// Level bounds and goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Width in pixels; limits the camera
    pub width_px: u32,
    /// Height in pixels; falling below it kills the actor
    pub height_px: u32,
    /// Declared maximum number of objects
    pub object_capacity: u32,
    /// Top-left of the goal (castle)
    pub goal: IVec2,
}

/// Default goal position used when a level has no goal tile
pub const DEFAULT_GOAL: IVec2 = IVec2::new(600, 600);

/// The loaded world: bounds plus the flat object table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub level: Level,
    /// Object table in load order; resolution iterates in this order
    pub objects: Vec<GameObject>,
    /// Ticks until the next coin frame
    pub coin_animation_timer: i32,
}

impl World {
    pub fn new(level: Level, objects: Vec<GameObject>) -> Self {
        Self {
            level,
            objects,
            coin_animation_timer: COIN_ANIMATION_DURATION,
        }
    }

    /// Collectibles not yet picked up
    pub fn remaining_collectibles(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| o.kind == ObjectKind::Collectible && o.active)
            .count()
    }

    /// Advance the coin spin once every `COIN_ANIMATION_DURATION` ticks
    pub fn animate_collectibles(&mut self) {
        if self.coin_animation_timer > 0 {
            self.coin_animation_timer -= 1;
            return;
        }
        self.coin_animation_timer = COIN_ANIMATION_DURATION;

        for object in &mut self.objects {
            if object.kind == ObjectKind::Collectible {
                object.frame_index = (object.frame_index + 1) % COIN_FRAME_COUNT;
            }
        }
    }
}
