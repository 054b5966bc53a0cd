//! Actor motion: walk input, jump timer, gravity and integration
//!
//! State machine:
//! - `Grounded` --jump--> `Jumping` (momentum pinned to `-jump_speed`)
//! - `Jumping` --timer lapses or ceiling hit--> `Falling`
//! - `Falling` --ground hit while moving down--> `Grounded`

use glam::IVec2;

use super::state::{Actor, Facing, MotionState};
use crate::settings::Settings;

/// Sprite indices in the player sheet
pub mod frames {
    pub const WALK_RIGHT_FIRST: i32 = 0;
    pub const WALK_LEFT_FIRST: i32 = 4;
    pub const WALK_CYCLE: i32 = 4;
    pub const IDLE_RIGHT: i32 = 2;
    pub const IDLE_LEFT: i32 = 6;
    pub const JUMP_RIGHT: i32 = 8;
    pub const JUMP_LEFT: i32 = 9;
    pub const FALL_RIGHT: i32 = 10;
    pub const FALL_LEFT: i32 = 11;
}

impl Actor {
    fn facing_frame(&self, right: i32, left: i32) -> i32 {
        match self.facing {
            Facing::Right => right,
            Facing::Left => left,
        }
    }

    /// Set horizontal momentum from a walk input and step the walk animation
    pub fn walk(&mut self, facing: Facing, settings: &Settings) {
        self.facing = facing;
        self.momentum.x = match facing {
            Facing::Right => settings.player_speed,
            Facing::Left => -settings.player_speed,
        };

        if self.animation_timer <= 0 {
            let first = self.facing_frame(frames::WALK_RIGHT_FIRST, frames::WALK_LEFT_FIRST);
            self.object.frame_index = (self.object.frame_index + 1) % frames::WALK_CYCLE + first;
            self.animation_timer = settings.animation_duration;
        } else {
            self.animation_timer -= 1;
        }

        match self.motion {
            MotionState::Jumping => {
                self.object.frame_index = self.facing_frame(frames::JUMP_RIGHT, frames::JUMP_LEFT)
            }
            MotionState::Falling => {
                self.object.frame_index = self.facing_frame(frames::FALL_RIGHT, frames::FALL_LEFT)
            }
            MotionState::Grounded => {}
        }
    }

    fn start_jump(&mut self, settings: &Settings) {
        self.jump_timer = settings.jump_duration;
        self.motion = MotionState::Jumping;
        self.can_jump = false;
        self.object.frame_index = self.facing_frame(frames::JUMP_RIGHT, frames::JUMP_LEFT);
    }

    /// Jump request from the keyboard; needs `can_jump` and no fall in progress
    pub fn try_jump(&mut self, settings: &Settings) -> bool {
        if self.can_jump && !self.is_falling() {
            self.start_jump(settings);
            true
        } else {
            false
        }
    }

    /// Jump request from a pointer button; needs no vertical state at all
    pub fn try_pointer_jump(&mut self, settings: &Settings) -> bool {
        if self.motion == MotionState::Grounded {
            self.start_jump(settings);
            true
        } else {
            false
        }
    }

    /// Accelerate downward, or hold jump speed while the jump timer runs
    pub fn apply_gravity(&mut self, settings: &Settings) {
        self.momentum.y = (self.momentum.y + settings.gravity).min(settings.max_fall_speed);

        if self.is_jumping() {
            self.momentum.y = -settings.jump_speed;
            self.jump_timer -= 1;
            if self.jump_timer <= 0 {
                self.jump_timer = settings.jump_duration;
                self.motion = MotionState::Falling;
            }
        }
    }

    /// Ceiling contact cuts the jump short
    pub fn hit_ceiling(&mut self) {
        self.motion = MotionState::Falling;
        self.object.frame_index = self.facing_frame(frames::FALL_RIGHT, frames::FALL_LEFT);
    }

    /// Ground contact ends a fall and re-arms the jump
    pub fn land(&mut self) {
        self.motion = MotionState::Grounded;
        self.can_jump = true;
        if self.momentum.x == 0 {
            self.object.frame_index = self.facing_frame(frames::IDLE_RIGHT, frames::IDLE_LEFT);
        }
    }

    /// Apply momentum to position, then bleed one unit of horizontal speed
    pub fn integrate(&mut self) {
        if self.momentum == IVec2::ZERO {
            self.is_moving = false;
            return;
        }
        self.is_moving = true;

        self.object.pos += self.momentum;
        // Nothing stops the actor at the top edge except this clamp
        self.object.pos.y = self.object.pos.y.max(0);

        self.momentum.x -= self.momentum.x.signum();
    }

    /// Move the actor to an arbitrary point (debug cursor teleport)
    pub fn teleport(&mut self, to: IVec2) {
        self.object.pos = to;
    }
}
