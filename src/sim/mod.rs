//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per display frame)
//! - Seeded RNG only, except procedural levels which are random per visit
//! - Stable iteration order (arena order decides collision ties)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod geometry;
pub mod hazard;
pub mod level;
pub mod player;
pub mod policy;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Contact, Resolution, classify_contact, resolve};
pub use generator::{generate_level, generate_level_with};
pub use geometry::{Aabb, aabb_overlap};
pub use hazard::{FloorPhase, HazardInstance, HazardState};
pub use level::{
    AUTHORED_LEVEL_COUNT, Color, Difficulty, HazardKind, LevelDefinition, LevelObject,
    authored_level, get_level, is_authored,
};
pub use player::PlayerState;
pub use policy::SimulationPolicy;
pub use scheduler::FrameScheduler;
pub use state::{GameEvent, GemTally, Outcome, Session, SimPhase};
pub use tick::{TickInput, tick};
