//! Fixed timestep simulation tick
//!
//! Order matters: gravity writes momentum, resolution clamps it, integration
//! applies it unmodified.

use super::collision::overlaps;
use super::resolve::resolve;
use super::state::{Actor, Facing, World};
use crate::settings::Settings;

/// Input intent gathered by the input layer before a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Walk left or right this tick
    pub walk: Option<Facing>,
    /// Keyboard jump request
    pub jump: bool,
    /// Pointer-button jump request
    pub pointer_jump: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Hazard contact or fell below the level
    pub died: bool,
    /// Actor reached the goal
    pub won: bool,
    /// Collectibles picked up this tick
    pub collected: u32,
}

/// Advance the world and actor by one tick.
///
/// A hazard hit ends the collision pass early but the tick still integrates
/// and evaluates win/death before returning.
pub fn tick(world: &mut World, actor: &mut Actor, input: &TickInput, settings: &Settings) -> TickOutcome {
    if let Some(facing) = input.walk {
        actor.walk(facing, settings);
    }
    if input.jump {
        actor.try_jump(settings);
    }
    if input.pointer_jump {
        actor.try_pointer_jump(settings);
    }

    actor.apply_gravity(settings);
    let resolution = resolve(world, actor, settings);
    actor.integrate();
    world.animate_collectibles();

    let fell_out = actor.pos().y > world.level.height_px as i32;
    let won = overlaps(
        world.level.goal,
        settings.goal_extent(),
        actor.pos(),
        settings.tile_extent(),
    );

    TickOutcome {
        died: resolution.died || fell_out,
        won,
        collected: resolution.collected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelFile, encode_level_text};
    use crate::sim::state::MotionState;

    fn build(text: &str) -> (World, Actor) {
        let level = LevelFile::parse(&encode_level_text(text)).unwrap();
        level.build(&Settings::default()).unwrap()
    }

    const FLAT: &str = "\
..................
..................
..................
..................
.P.............c..
GGGGGGGGGGGGGGGGGG
";

    #[test]
    fn test_idle_actor_rests_on_ground() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(FLAT);
        let start = actor.pos();

        for _ in 0..10 {
            let outcome = tick(&mut world, &mut actor, &TickInput::default(), &settings);
            assert!(!outcome.died);
            assert!(!outcome.won);
        }
        assert_eq!(actor.pos(), start);
        assert_eq!(actor.motion, MotionState::Grounded);
        assert!(!actor.is_moving);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(FLAT);
        let ground_y = actor.pos().y;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &mut actor, &jump, &settings);
        assert!(actor.is_jumping());
        assert!(!actor.can_jump);

        let mut peak = actor.pos().y;
        for _ in 0..200 {
            tick(&mut world, &mut actor, &TickInput::default(), &settings);
            peak = peak.min(actor.pos().y);
        }

        assert_eq!(peak, ground_y - 25 * settings.jump_speed - 6);
        assert_eq!(actor.pos().y, ground_y);
        assert_eq!(actor.motion, MotionState::Grounded);
        assert!(actor.can_jump);
    }

    #[test]
    fn test_walking_collects_coin() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(FLAT);
        let walk = TickInput {
            walk: Some(Facing::Right),
            ..Default::default()
        };

        let mut collected = 0;
        for _ in 0..200 {
            collected += tick(&mut world, &mut actor, &walk, &settings).collected;
        }
        assert_eq!(collected, 1);
        assert_eq!(actor.collected, 1);
        assert_eq!(world.remaining_collectibles(), 0);
        assert_eq!(actor.facing, Facing::Right);
    }

    #[test]
    fn test_wall_blocks_walk() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(
            "\
.....
.P.G.
GGGGG
",
        );
        let walk = TickInput {
            walk: Some(Facing::Right),
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut world, &mut actor, &walk, &settings);
        }
        assert_eq!(actor.pos().x, 80);
    }

    #[test]
    fn test_falling_out_of_level_dies() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(
            "\
.P.
...
G..
",
        );
        let died = (0..200).any(|_| {
            tick(&mut world, &mut actor, &TickInput::default(), &settings).died
        });
        assert!(died);
        assert!(actor.pos().y > world.level.height_px as i32);
    }

    #[test]
    fn test_hazard_death_still_integrates() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(
            "\
.P.
.W.
GGG
",
        );
        // Falling onto the web
        actor.object.pos.y = 37;
        let outcome = tick(&mut world, &mut actor, &TickInput::default(), &settings);
        assert!(outcome.died);
        assert_eq!(actor.pos().y, 39);
    }

    #[test]
    fn test_reaching_goal_wins() {
        let settings = Settings::default();
        let (mut world, mut actor) = build(
            "\
.....
.PE..
GGGGG
",
        );
        let outcome = tick(&mut world, &mut actor, &TickInput::default(), &settings);
        assert!(outcome.won);
        assert!(!outcome.died);
    }
}
