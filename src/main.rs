//! Die Again headless runner
//!
//! Plays a level with a simple autopilot and logs what happens. Useful for
//! watching hazard timing and balance changes without a renderer.
//!
//! Usage: `die-again [LEVEL_ID] [MAX_ATTEMPTS] [--tuning tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Play a Die Again level headless with a simple autopilot
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "die-again", version, about, long_about = None)]
struct Args {
    /// Level to play (1-3 are hand-authored, higher ids are generated)
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    level_id: u32,

    /// Attempts before giving up
    #[arg(default_value_t = 5)]
    max_attempts: u32,

    /// JSON file overriding the default physics and hazard tuning
    #[arg(short, long, value_name = "FILE")]
    tuning: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use die_again::Tuning;
    use die_again::consts::SIM_DT;
    use die_again::sim::{
        FrameScheduler, GameEvent, Session, SimPhase, SimulationPolicy, get_level,
    };

    env_logger::init();

    let Args {
        level_id,
        max_attempts,
        tuning,
    } = Args::parse();
    let tuning = match tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    let level = get_level(level_id);
    log::info!(
        "Die Again (native) - level {} \"{}\" [{:?}] {}",
        level.id,
        level.name,
        level.difficulty,
        level.hint
    );
    if let Err(e) = level.validate() {
        log::error!("Level {} is malformed: {}", level.id, e);
        return;
    }

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = Session::new(level, tuning, seed);
    let mut scheduler = FrameScheduler::new();
    let policy = SimulationPolicy::standard();

    session.start();
    session.spawn_bonus_gems(3);
    scheduler.start();

    // Ten simulated seconds per attempt
    const FRAMES_PER_ATTEMPT: u32 = 600;

    'attempts: for _ in 0..max_attempts {
        for _ in 0..FRAMES_PER_ATTEMPT {
            let mut input = autopilot::decide(&session);
            for event in scheduler.frame(SIM_DT, &mut session, &mut input, policy) {
                match event {
                    GameEvent::Win => {
                        println!(
                            "Level cleared after {} deaths ({} ticks)",
                            session.death_count(),
                            session.time_ticks()
                        );
                        break 'attempts;
                    }
                    GameEvent::Death => println!("YOU DIED (deaths: {})", session.death_count()),
                    GameEvent::GemCollected { collected, total } => {
                        println!("Gem {}/{}", collected, total)
                    }
                    GameEvent::Jackpot => println!("JACKPOT!"),
                }
            }
            if session.phase() != SimPhase::Running {
                break;
            }
        }
        if session.phase() == SimPhase::Running {
            log::info!("Attempt timed out, restarting");
        }
        session.restart();
    }
    scheduler.stop();

    match serde_json::to_string(session.gem_tally()) {
        Ok(json) => log::info!("Gem tally: {}", json),
        Err(e) => log::warn!("Could not serialize gem tally: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use die_again::sim::{Aabb, HazardKind, Session, TickInput};

    /// How far ahead (px) the bot looks for trouble
    const LOOKAHEAD: f32 = 60.0;

    /// Hold right, hop over anything deadly or any hole in the floor
    pub fn decide(session: &Session) -> TickInput {
        let size = session.tuning().player_size;
        let player = session.player();
        let body = player.bounds(size);

        let ahead = Aabb::new(
            glam::Vec2::new(body.max.x, body.min.y),
            glam::Vec2::new(LOOKAHEAD, size),
        );
        let danger = session
            .hazards()
            .any(|h| h.is_lethal() && h.collision_box().overlaps(&ahead));

        let probe = Aabb::new(
            glam::Vec2::new(body.max.x + LOOKAHEAD * 0.5, body.max.y),
            glam::Vec2::new(1.0, 2.0),
        );
        let floor_ahead = session.hazards().any(|h| {
            h.kind().is_platform()
                && h.kind() != HazardKind::OpeningFloor
                && h.collision_box().overlaps(&probe)
        });

        TickInput {
            right: true,
            jump: player.grounded && (danger || !floor_ahead),
            ..Default::default()
        }
    }
}
