//! Error types for level and tuning loading.
//!
//! The per-tick simulation itself never fails; only data coming from outside
//! the crate (hand-authored level files, tuning overrides) is validated here.

use thiserror::Error;

use crate::sim::HazardKind;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {id} has no goal")]
    MissingGoal { id: u32 },

    #[error("level {id} has {count} goals, expected exactly one")]
    MultipleGoals { id: u32, count: usize },

    #[error("level {id}: {kind:?} object #{index} has a non-positive size")]
    DegenerateObject {
        id: u32,
        index: usize,
        kind: HazardKind,
    },

    #[error("level {id}: object #{index} has non-finite coordinates")]
    NonFinite { id: u32, index: usize },

    #[error("level {id}: player start is not finite")]
    NonFiniteStart { id: u32 },

    #[error("malformed level json")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning json")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read tuning file")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
