//! Procedural level generation
//!
//! Levels past the authored table are built from a fixed skeleton (start
//! platform, end platform, goal) plus a left-to-right scan that lays floor
//! pieces and sprinkles spikes and movers. Hazard density grows with the id.

use rand::Rng;

use super::level::{DEFAULT_PLAYER_START, Difficulty, HazardKind, LevelDefinition, LevelObject};

/// Scan starts right after the start platform
const SCAN_START_X: f32 = 150.0;
/// Scan stops once the cursor passes this (end platform begins at 900)
const SCAN_END_X: f32 = 850.0;
/// Top of the floor row
const FLOOR_Y: f32 = 650.0;
const FLOOR_HEIGHT: f32 = 50.0;

/// Type roll thresholds: below WALL -> wall, below OPENING -> opening floor, else gap
const WALL_ROLL: f32 = 0.3;
const OPENING_ROLL: f32 = 0.8;

/// Generate a level for `id` with the thread-local RNG
pub fn generate_level(id: u32) -> LevelDefinition {
    generate_level_with(id, &mut rand::rng())
}

/// Generate a level for `id` drawing from `rng`
pub fn generate_level_with<R: Rng + ?Sized>(id: u32, rng: &mut R) -> LevelDefinition {
    let level_f = id as f32;

    let mut objects = vec![
        LevelObject::wall(0.0, FLOOR_Y, SCAN_START_X, FLOOR_HEIGHT),
        LevelObject::wall(900.0, FLOOR_Y, 100.0, FLOOR_HEIGHT),
        LevelObject::goal(950.0, 600.0),
    ];

    let num_pieces = 7 + id / 3;
    let spike_threshold = 0.6 - level_f * 0.01;
    let mover_threshold = 0.85 - level_f * 0.01;
    let base_width = (120.0 - level_f * 2.0).max(50.0);

    let mut cursor = SCAN_START_X;
    for _ in 0..num_pieces {
        let type_roll: f32 = rng.random();
        let width = base_width + rng.random::<f32>() * 100.0;

        if type_roll < WALL_ROLL {
            objects.push(LevelObject::wall(cursor, FLOOR_Y, width, FLOOR_HEIGHT));
        } else if type_roll < OPENING_ROLL {
            objects.push(LevelObject::new(
                HazardKind::OpeningFloor,
                cursor,
                FLOOR_Y,
                width,
                FLOOR_HEIGHT,
            ));
        }

        if rng.random::<f32>() > spike_threshold {
            objects.push(LevelObject::new(
                HazardKind::FallingSpike,
                cursor + 10.0,
                0.0,
                30.0,
                50.0,
            ));
        }

        if rng.random::<f32>() > mover_threshold {
            let spiked = rng.random_bool(0.5);
            objects.push(
                LevelObject::new(HazardKind::MovingWall, cursor + 40.0, 100.0, 40.0, 400.0)
                    .lethal(spiked),
            );
        }

        cursor += width + 25.0 + rng.random::<f32>() * (40.0 + level_f);
        if cursor > SCAN_END_X {
            break;
        }
    }

    log::info!(
        "Generated level {}: {} objects ({} floors, {} spikes, {} movers)",
        id,
        objects.len(),
        objects.iter().filter(|o| o.kind.is_platform() && o.kind != HazardKind::MovingWall).count(),
        objects.iter().filter(|o| o.kind == HazardKind::FallingSpike).count(),
        objects.iter().filter(|o| o.kind == HazardKind::MovingWall).count(),
    );

    LevelDefinition {
        id,
        name: format!("Spiked Nightmare {}", id),
        difficulty: if id > 10 {
            Difficulty::Impossible
        } else {
            Difficulty::Extreme
        },
        hint: "Avoid the spiked purple at all costs.".to_string(),
        player_start: DEFAULT_PLAYER_START,
        objects,
    }
}
