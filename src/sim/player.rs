//! Player kinematics
//!
//! Arcade movement: horizontal speed is instantaneous, gravity accumulates per
//! tick, jumps are a single impulse from the ground.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::policy::SimulationPolicy;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub grounded: bool,
    pub facing_right: bool,
}

impl PlayerState {
    /// Fresh player at a level's start position
    pub fn spawn(start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            grounded: false,
            facing_right: true,
        }
    }

    #[inline]
    pub fn bounds(&self, size: f32) -> Aabb {
        Aabb::square(self.pos, size)
    }
}

/// Where the player wants to be this tick, before collisions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing_right: bool,
    /// Dropped below the bottom of the canvas
    pub fell_out: bool,
}

/// Integrate one tick of movement from input intent
pub fn integrate(
    player: &PlayerState,
    input: &TickInput,
    tuning: &Tuning,
    policy: SimulationPolicy,
) -> Candidate {
    let mut vel = player.vel;
    let mut facing_right = player.facing_right;

    if input.left {
        vel.x = -tuning.move_speed;
        facing_right = false;
    } else if input.right {
        vel.x = tuning.move_speed;
        facing_right = true;
    } else {
        vel.x = 0.0;
    }

    if policy.flying() {
        vel.y = if input.fly_up || input.jump {
            -tuning.fly_speed
        } else if input.fly_down {
            tuning.fly_speed
        } else {
            0.0
        };
    } else {
        if input.jump && player.grounded {
            vel.y = tuning.jump_force;
        }
        vel.y = (vel.y + tuning.gravity).min(tuning.max_fall_speed);
    }

    let mut pos = player.pos + vel;
    pos.x = pos.x.clamp(0.0, tuning.canvas_width - tuning.player_size);

    Candidate {
        pos,
        vel,
        facing_right,
        fell_out: pos.y > tuning.canvas_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_at(x: f32, y: f32) -> PlayerState {
        PlayerState {
            grounded: true,
            ..PlayerState::spawn(Vec2::new(x, y))
        }
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut player = PlayerState::spawn(Vec2::new(50.0, 100.0));
        let input = TickInput::default();
        for _ in 0..3 {
            let c = integrate(&player, &input, &tuning, SimulationPolicy::standard());
            player.pos = c.pos;
            player.vel = c.vel;
        }
        assert!((player.vel.y - 1.8).abs() < 1e-5);
        assert!((player.pos.y - (100.0 + 0.6 + 1.2 + 1.8)).abs() < 1e-4);
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let tuning = Tuning::default();
        let mut player = PlayerState::spawn(Vec2::new(50.0, -5000.0));
        for _ in 0..200 {
            let c = integrate(&player, &TickInput::default(), &tuning, SimulationPolicy::standard());
            player.pos = c.pos;
            player.vel = c.vel;
            assert!(player.vel.y <= tuning.max_fall_speed);
        }
        assert_eq!(player.vel.y, tuning.max_fall_speed);
    }

    #[test]
    fn test_jump_requires_ground() {
        let tuning = Tuning::default();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let c = integrate(&grounded_at(50.0, 620.0), &jump, &tuning, SimulationPolicy::standard());
        assert!((c.vel.y - (tuning.jump_force + tuning.gravity)).abs() < 1e-5);

        let airborne = PlayerState::spawn(Vec2::new(50.0, 400.0));
        let c = integrate(&airborne, &jump, &tuning, SimulationPolicy::standard());
        assert!((c.vel.y - tuning.gravity).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_intent_and_clamp() {
        let tuning = Tuning::default();
        let left = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let c = integrate(&grounded_at(2.0, 620.0), &left, &tuning, SimulationPolicy::standard());
        assert_eq!(c.pos.x, 0.0);
        assert_eq!(c.vel.x, -tuning.move_speed);
        assert!(!c.facing_right);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let edge = tuning.canvas_width - tuning.player_size;
        let c = integrate(&grounded_at(edge - 1.0, 620.0), &right, &tuning, SimulationPolicy::standard());
        assert_eq!(c.pos.x, edge);
        assert!(c.facing_right);

        let idle = integrate(&grounded_at(100.0, 620.0), &TickInput::default(), &tuning, SimulationPolicy::standard());
        assert_eq!(idle.vel.x, 0.0);
    }

    #[test]
    fn test_fly_mode_ignores_gravity() {
        let tuning = Tuning::default();
        let policy = SimulationPolicy::FLY;
        let hover = integrate(&PlayerState::spawn(Vec2::new(50.0, 300.0)), &TickInput::default(), &tuning, policy);
        assert_eq!(hover.vel.y, 0.0);
        assert_eq!(hover.pos.y, 300.0);

        let up = TickInput {
            fly_up: true,
            ..Default::default()
        };
        let c = integrate(&PlayerState::spawn(Vec2::new(50.0, 300.0)), &up, &tuning, policy);
        assert_eq!(c.vel.y, -tuning.fly_speed);

        let down = TickInput {
            fly_down: true,
            ..Default::default()
        };
        let c = integrate(&PlayerState::spawn(Vec2::new(50.0, 300.0)), &down, &tuning, policy);
        assert_eq!(c.vel.y, tuning.fly_speed);
    }

    #[test]
    fn test_fell_out_flag() {
        let tuning = Tuning::default();
        let player = PlayerState {
            vel: Vec2::new(0.0, 10.0),
            ..PlayerState::spawn(Vec2::new(50.0, 695.0))
        };
        let c = integrate(&player, &TickInput::default(), &tuning, SimulationPolicy::standard());
        assert!(c.fell_out);
    }
}
