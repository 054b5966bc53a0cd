//! Tile Platformer headless runner
//!
//! Drives the simulation with a scripted input stream on a built-in level, so
//! the physics can be watched through the log without a firmware display.

use tile_platformer::session::{GameEvent, GameState, Key, SessionPhase};
use tile_platformer::settings::Settings;
use tile_platformer::sim::{LevelFile, encode_level_text};

const DEMO_LEVEL: &str = "\
..............................
..............................
..............................
..............................
..............................
.........c..........E.........
........ggg...................
..P.............c.............
gggggg..gggggggggggggggggggggg
gggggg..gggggggggggggggggggggg
";

/// Upper bound on simulated ticks
const MAX_TICKS: u64 = 5_000;

fn main() {
    env_logger::init();
    log::info!("Tile Platformer (headless) starting...");

    let settings = Settings::default();
    let level = match LevelFile::parse(&encode_level_text(DEMO_LEVEL)) {
        Ok(level) => level,
        Err(e) => {
            log::error!("Demo level rejected: {}", e);
            std::process::exit(1);
        }
    };
    let (world, actor) = match level.build(&settings) {
        Ok(built) => built,
        Err(e) => {
            log::error!("Demo level rejected: {}", e);
            std::process::exit(1);
        }
    };

    let mut game = GameState::new(world, actor, settings);
    while game.is_running() && game.time_ticks < MAX_TICKS {
        game.handle_event(GameEvent::Keyboard(Key::Right));
        // Hop the pit and the platform
        if game.time_ticks % 30 == 0 {
            game.handle_event(GameEvent::Keyboard(Key::Up));
        }
        game.handle_event(GameEvent::Tick);

        if game.time_ticks % 60 == 0 {
            let pos = game.actor.pos();
            log::debug!(
                "tick {}: actor ({}, {}) momentum ({}, {}) {:?}",
                game.time_ticks,
                pos.x,
                pos.y,
                game.actor.momentum.x,
                game.actor.momentum.y,
                game.actor.motion
            );
        }
    }

    match game.phase {
        SessionPhase::Won { score } => println!("You win! Your score: {score}."),
        SessionPhase::Died => println!("You died."),
        SessionPhase::Quit | SessionPhase::Running => {
            println!("Stopped after {} ticks.", game.time_ticks)
        }
    }
}
