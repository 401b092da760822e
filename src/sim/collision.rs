//! Collision resolution between the player and hazards
//!
//! The candidate position from kinematics is tested against every active
//! hazard in arena order. Lethal contacts flag a death, solids push the
//! candidate out along one axis, the goal flags a win and gems are reported
//! back to the session for collection.
//!
//! Which face was hit is decided from the player's and the hazard's
//! *previous* boxes, with a tolerance band so a player that sank a few pixels
//! into a floor still counts as landing on it. When two solids want to
//! correct the same axis in one tick, the first one in arena order wins.

use glam::Vec2;

use super::geometry::{Aabb, aabb_overlap};
use super::hazard::{HazardInstance, HazardState};
use super::player::{Candidate, PlayerState};
use super::policy::SimulationPolicy;
use crate::tuning::Tuning;

/// Vertical speed after bumping a ceiling (small push back down)
const CEILING_BOUNCE: f32 = 1.0;

/// Face of a solid the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Top,
    Bottom,
    Left,
    Right,
}

/// Classify contact from where the player was last tick
pub fn classify_contact(prev: &Aabb, obj: &Aabb, tolerance: f32) -> Option<Contact> {
    if prev.max.y <= obj.min.y + tolerance {
        Some(Contact::Top)
    } else if prev.min.y >= obj.max.y - tolerance {
        Some(Contact::Bottom)
    } else if prev.max.x <= obj.min.x + tolerance {
        Some(Contact::Left)
    } else if prev.min.x >= obj.max.x - tolerance {
        Some(Contact::Right)
    } else {
        None
    }
}

/// Result of resolving one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    /// A lethal hazard was touched (already filtered by policy)
    pub death: bool,
    /// The goal was touched
    pub win: bool,
    /// Arena indices of gems overlapped this tick
    pub gems: Vec<usize>,
}

/// Resolve the candidate against all active hazards
pub fn resolve(
    prev: &PlayerState,
    candidate: &Candidate,
    hazards: &mut [HazardInstance],
    tuning: &Tuning,
    policy: SimulationPolicy,
) -> Resolution {
    let size = tuning.player_size;
    let prev_box = prev.bounds(size);
    let flying = policy.flying();

    let mut res = Resolution {
        pos: candidate.pos,
        vel: candidate.vel,
        grounded: false,
        death: false,
        win: false,
        gems: Vec::new(),
    };
    let mut x_resolved = false;
    let mut y_resolved = false;

    for (index, hazard) in hazards.iter_mut().enumerate() {
        if !hazard.active || !aabb_overlap(res.pos, size, hazard) {
            continue;
        }

        match hazard.state {
            HazardState::Gem { .. } => {
                res.gems.push(index);
                continue;
            }
            HazardState::Goal => {
                res.win = true;
                continue;
            }
            _ => {}
        }

        if hazard.is_lethal() && !policy.no_traps() {
            res.death = true;
            continue;
        }

        if !hazard.is_solid() {
            continue;
        }

        // Both boxes as they stood last tick, so a fast mover cannot slip past the band
        let obj = hazard.collision_box();
        match classify_contact(&prev_box, &hazard.previous_box(), tuning.contact_tolerance) {
            Some(Contact::Top) if !y_resolved => {
                res.pos.y = obj.min.y - size;
                res.vel.y = 0.0;
                res.grounded = true;
                y_resolved = true;
                hazard.register_landing(tuning, policy);
            }
            Some(Contact::Bottom) if !y_resolved && !flying => {
                res.pos.y = obj.max.y;
                res.vel.y = CEILING_BOUNCE;
                y_resolved = true;
            }
            Some(Contact::Left) if !x_resolved && !flying => {
                res.pos.x = obj.min.x - size;
                x_resolved = true;
            }
            Some(Contact::Right) if !x_resolved && !flying => {
                res.pos.x = obj.max.x;
                x_resolved = true;
            }
            _ => {}
        }
    }

    res.pos.x = res.pos.x.clamp(0.0, tuning.canvas_width - size);
    res
}
