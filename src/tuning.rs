//! Physics and hazard tuning
//!
//! Every number the simulation reads lives here so balance can be tweaked from a
//! JSON file without recompiling. Defaults reproduce the shipped game feel.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Simulation tuning values (units are pixels and ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player_size: f32,

    // === Player ===
    pub gravity: f32,
    /// Negative: up is -y
    pub jump_force: f32,
    pub move_speed: f32,
    pub fly_speed: f32,
    pub max_fall_speed: f32,
    /// Tolerance band for top/bottom/side contact classification
    pub contact_tolerance: f32,

    // === Spikes and traps ===
    pub spike_trigger_radius: f32,
    pub spike_fall_speed: f32,

    // === Opening floors ===
    pub floor_trigger_radius: f32,
    pub floor_shake_ticks: u32,
    pub floor_shake_frequency: f32,
    pub floor_shake_amplitude: f32,
    pub floor_drop_speed: f32,
    pub floor_sink_margin: f32,

    // === Moving walls ===
    pub mover_range: f32,
    pub mover_base_speed: f32,
    pub mover_speed_per_level: f32,
    pub mover_max_speed: f32,

    // === Disappearing floors ===
    pub disappear_contact_ticks: u32,

    // === Bonus gems ===
    pub gem_size: f32,
    pub gem_bob_rate: f32,
    pub gem_bob_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player_size: PLAYER_SIZE,

            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            fly_speed: FLY_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            contact_tolerance: CONTACT_TOLERANCE,

            spike_trigger_radius: SPIKE_TRIGGER_RADIUS,
            spike_fall_speed: SPIKE_FALL_SPEED,

            floor_trigger_radius: FLOOR_TRIGGER_RADIUS,
            floor_shake_ticks: FLOOR_SHAKE_TICKS,
            floor_shake_frequency: FLOOR_SHAKE_FREQUENCY,
            floor_shake_amplitude: FLOOR_SHAKE_AMPLITUDE,
            floor_drop_speed: FLOOR_DROP_SPEED,
            floor_sink_margin: FLOOR_SINK_MARGIN,

            mover_range: MOVER_RANGE,
            mover_base_speed: MOVER_BASE_SPEED,
            mover_speed_per_level: MOVER_SPEED_PER_LEVEL,
            mover_max_speed: MOVER_MAX_SPEED,

            disappear_contact_ticks: DISAPPEAR_CONTACT_TICKS,

            gem_size: GEM_SIZE,
            gem_bob_rate: GEM_BOB_RATE,
            gem_bob_amplitude: GEM_BOB_AMPLITUDE,
        }
    }
}

impl Tuning {
    /// Moving wall speed for a level, before policy adjustments
    pub fn mover_speed(&self, level_id: u32) -> f32 {
        (self.mover_base_speed + level_id as f32 * self.mover_speed_per_level)
            .min(self.mover_max_speed)
    }

    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation's assumptions
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        let finite = [
            self.canvas_width,
            self.canvas_height,
            self.player_size,
            self.gravity,
            self.jump_force,
            self.move_speed,
            self.fly_speed,
            self.max_fall_speed,
            self.contact_tolerance,
            self.spike_fall_speed,
            self.floor_drop_speed,
            self.mover_range,
            self.mover_max_speed,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return invalid("*", "all values must be finite");
        }
        if self.player_size <= 0.0 {
            return invalid("player_size", "must be positive");
        }
        if self.canvas_width <= self.player_size || self.canvas_height <= self.player_size {
            return invalid("canvas_width", "canvas must be larger than the player");
        }
        if self.move_speed <= 0.0 {
            return invalid("move_speed", "must be positive");
        }
        if self.gravity < 0.0 {
            return invalid("gravity", "must not pull upward");
        }
        if self.jump_force >= 0.0 {
            return invalid("jump_force", "must be negative (up is -y)");
        }
        if self.max_fall_speed <= 0.0 || self.max_fall_speed > self.player_size {
            return invalid("max_fall_speed", "must be positive and at most the player size");
        }
        if self.contact_tolerance < 0.0 || self.contact_tolerance >= self.player_size {
            return invalid("contact_tolerance", "must lie within the player box");
        }
        if self.floor_shake_ticks == 0 {
            return invalid("floor_shake_ticks", "must be at least one tick");
        }
        if self.mover_max_speed <= 0.0 || self.mover_range <= 0.0 {
            return invalid("mover_max_speed", "movers need a positive speed and range");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "move_speed": 6.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.move_speed, 6.0);
        assert_eq!(tuning.jump_force, JUMP_FORCE);
    }

    #[test]
    fn test_rejects_upward_jump_sign() {
        let err = Tuning::from_json(r#"{ "jump_force": 13.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "jump_force", .. }));
    }

    #[test]
    fn test_rejects_tunneling_fall_speed() {
        let err = Tuning::from_json(r#"{ "max_fall_speed": 80.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_fall_speed", .. }));
    }

    #[test]
    fn test_mover_speed_is_capped() {
        let tuning = Tuning::default();
        assert!((tuning.mover_speed(2) - 4.4).abs() < 1e-5);
        assert_eq!(tuning.mover_speed(500), MOVER_MAX_SPEED);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/nonexistent/die-again-tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
