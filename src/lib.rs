//! Die Again - hazard simulation core for a rage platformer
//!
//! Core modules:
//! - `sim`: Per-frame simulation (kinematics, hazards, collisions, levels)
//! - `tuning`: Data-driven physics and hazard balance
//! - `error`: Failures surfaced by level and tuning loaders

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{LevelError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Host frame step (the simulation advances one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;

    /// Player box is a square
    pub const PLAYER_SIZE: f32 = 30.0;

    /// Per-tick velocities (pixels/tick)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = -13.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const FLY_SPEED: f32 = 6.0;
    /// Terminal fall speed, keeps a tick's displacement below the thinnest solid
    pub const MAX_FALL_SPEED: f32 = 24.0;

    /// Band used to decide which face of a solid the player came from
    pub const CONTACT_TOLERANCE: f32 = 12.0;

    /// Falling spikes and traps
    pub const SPIKE_TRIGGER_RADIUS: f32 = 60.0;
    pub const SPIKE_FALL_SPEED: f32 = 20.0;

    /// Opening floors
    pub const FLOOR_TRIGGER_RADIUS: f32 = 80.0;
    pub const FLOOR_SHAKE_TICKS: u32 = 40;
    pub const FLOOR_SHAKE_FREQUENCY: f32 = 0.9;
    pub const FLOOR_SHAKE_AMPLITUDE: f32 = 2.0;
    pub const FLOOR_DROP_SPEED: f32 = 18.0;
    /// Distance below the canvas a sinking floor travels before it is gone
    pub const FLOOR_SINK_MARGIN: f32 = 100.0;

    /// Moving walls
    pub const MOVER_RANGE: f32 = 250.0;
    pub const MOVER_BASE_SPEED: f32 = 4.0;
    pub const MOVER_SPEED_PER_LEVEL: f32 = 0.2;
    pub const MOVER_MAX_SPEED: f32 = 14.0;

    /// Disappearing floors vanish after this many ticks of contact
    pub const DISAPPEAR_CONTACT_TICKS: u32 = 25;

    /// Bonus gems
    pub const GEM_SIZE: f32 = 20.0;
    pub const GEM_BOB_RATE: f32 = 0.1;
    pub const GEM_BOB_AMPLITUDE: f32 = 4.0;
}
