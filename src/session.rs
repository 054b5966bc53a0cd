//! Game session: event dispatch around the simulation
//!
//! The platform layer blocks on keyboard, pointer and timer sources and hands
//! each one to `GameState::handle_event`. Input events only record intent;
//! the simulation advances exactly once per `GameEvent::Tick`.

use std::path::Path;

use glam::IVec2;

use crate::consts::CURSOR_STEP;
use crate::error::LevelLoadError;
use crate::settings::Settings;
use crate::sim::{Actor, Facing, TickInput, TickOutcome, World, load_level, tick};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Up,
    Left,
    Right,
    /// Toggle the debug cursor
    F1,
    /// Teleport the actor to the cursor
    F2,
    /// Cursor left
    F5,
    /// Cursor up
    F6,
    /// Cursor down
    F7,
    /// Cursor right
    F8,
    Other,
}

/// Pointer device state since the last poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub relative_x: i32,
    pub relative_y: i32,
    pub left_button: bool,
    pub right_button: bool,
}

/// One event from the platform scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Keyboard(Key),
    Pointer(PointerState),
    /// Periodic timer fired; run one simulation tick
    Tick,
}

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    /// Reached the goal with this many collectibles
    Won { score: u32 },
    Died,
    /// Player pressed escape
    Quit,
}

/// Complete session state for one level
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub world: World,
    pub actor: Actor,
    pub phase: SessionPhase,
    /// Top-left of the visible area in world pixels
    pub camera: IVec2,
    /// Debug cursor in screen pixels
    pub cursor: IVec2,
    pub show_cursor: bool,
    /// Cursor moved since the last tick (forces a redraw)
    pub cursor_moved: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Intent collected since the last tick
    pending: TickInput,
}

impl GameState {
    pub fn new(world: World, actor: Actor, settings: Settings) -> Self {
        let mut state = Self {
            settings,
            world,
            actor,
            phase: SessionPhase::Running,
            camera: IVec2::ZERO,
            cursor: IVec2::ZERO,
            show_cursor: false,
            cursor_moved: false,
            time_ticks: 0,
            pending: TickInput::default(),
        };
        state.update_camera();
        state
    }

    /// Load a level file and start a session on it
    pub fn load(path: impl AsRef<Path>, settings: Settings) -> Result<Self, LevelLoadError> {
        let (world, actor) = load_level(path, &settings)?;
        Ok(Self::new(world, actor, settings))
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Single entry point for every platform event.
    ///
    /// Returns the tick outcome for `GameEvent::Tick`. Events arriving after
    /// the session ended are ignored.
    pub fn handle_event(&mut self, event: GameEvent) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }
        match event {
            GameEvent::Keyboard(key) => {
                self.on_key(key);
                None
            }
            GameEvent::Pointer(pointer) => {
                self.on_pointer(pointer);
                None
            }
            GameEvent::Tick => Some(self.on_tick()),
        }
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::Escape => {
                log::info!("Quit requested");
                self.phase = SessionPhase::Quit;
            }
            Key::Up => self.pending.jump = true,
            Key::Left => self.pending.walk = Some(Facing::Left),
            Key::Right => self.pending.walk = Some(Facing::Right),
            Key::F1 => self.show_cursor = !self.show_cursor,
            Key::F2 => {
                if self.show_cursor {
                    self.actor.teleport(self.cursor + self.camera);
                }
            }
            Key::F5 => self.move_cursor(IVec2::new(-CURSOR_STEP, 0)),
            Key::F6 => self.move_cursor(IVec2::new(0, -CURSOR_STEP)),
            Key::F7 => self.move_cursor(IVec2::new(0, CURSOR_STEP)),
            Key::F8 => self.move_cursor(IVec2::new(CURSOR_STEP, 0)),
            Key::Other => {}
        }
    }

    fn move_cursor(&mut self, delta: IVec2) {
        self.cursor += delta;
        self.cursor_moved = true;
    }

    fn on_pointer(&mut self, pointer: PointerState) {
        self.cursor += IVec2::new(pointer.relative_x, pointer.relative_y);

        if pointer.left_button {
            self.pending.pointer_jump = true;
        } else if pointer.right_button && self.show_cursor {
            self.actor.teleport((self.cursor + self.camera).max(IVec2::ZERO));
        }
    }

    fn on_tick(&mut self) -> TickOutcome {
        let input = std::mem::take(&mut self.pending);
        let outcome = tick(&mut self.world, &mut self.actor, &input, &self.settings);
        self.time_ticks += 1;

        self.update_camera();
        self.cursor_moved = false;

        if outcome.died {
            log::info!("Actor died after {} ticks", self.time_ticks);
            self.phase = SessionPhase::Died;
        } else if outcome.won {
            log::info!("Level won with score {}", self.actor.collected);
            self.phase = SessionPhase::Won {
                score: self.actor.collected,
            };
        }
        outcome
    }

    /// Center the camera on the actor, clamped to the level bounds
    pub fn update_camera(&mut self) {
        let screen = IVec2::new(self.settings.screen_width, self.settings.screen_height);
        let level = IVec2::new(
            self.world.level.width_px as i32,
            self.world.level.height_px as i32,
        );

        let mut camera = self.actor.pos() - screen / 2;
        camera = camera.max(IVec2::ZERO);
        // Levels smaller than the screen end up with a negative offset
        if camera.x + screen.x > level.x {
            camera.x = level.x - screen.x;
        }
        if camera.y + screen.y > level.y {
            camera.y = level.y - screen.y;
        }
        self.camera = camera;
    }
}
