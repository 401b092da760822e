//! Fixed timestep simulation tick
//!
//! One call advances a running session by exactly one tick: hazards first (they
//! react to where the player stood last tick), then kinematics, the fall check,
//! collision resolution and finally the terminal check and commit.

use super::collision::resolve;
use super::hazard::AdvanceContext;
use super::player::integrate;
use super::policy::SimulationPolicy;
use super::state::{GameEvent, Outcome, Session, SimPhase};

/// Input intent for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump from the ground, or climb when flying
    pub jump: bool,
    pub fly_up: bool,
    pub fly_down: bool,
    /// End the attempt as a win (needs `INSTANT_COMMANDS`)
    pub instant_win: bool,
    /// End the attempt as a death (needs `INSTANT_COMMANDS`)
    pub instant_death: bool,
}

/// Advance the session by one fixed tick and report what happened
pub fn tick(session: &mut Session, input: &TickInput, policy: SimulationPolicy) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != SimPhase::Running {
        return events;
    }
    session.time_ticks += 1;

    if policy.instant_commands() {
        let forced = if input.instant_win {
            Some(Outcome::Win)
        } else if input.instant_death {
            Some(Outcome::Death)
        } else {
            None
        };
        if let Some(outcome) = forced {
            events.extend(session.terminate(outcome));
            return events;
        }
    }

    // Hazards see the last confirmed player box
    let ctx = AdvanceContext {
        player: session.player.bounds(session.tuning.player_size),
        tuning: &session.tuning,
        policy,
    };
    for hazard in session.hazards.iter_mut() {
        hazard.advance(&ctx);
    }

    let candidate = integrate(&session.player, input, &session.tuning, policy);

    if candidate.fell_out {
        if policy.no_traps() {
            // Nothing catches the player; keep falling
            session.player.pos = candidate.pos;
            session.player.vel = candidate.vel;
            session.player.grounded = false;
            session.player.facing_right = candidate.facing_right;
        } else {
            events.extend(session.terminate(Outcome::Death));
        }
        return events;
    }

    let res = resolve(
        &session.player,
        &candidate,
        &mut session.hazards,
        &session.tuning,
        policy,
    );

    for index in res.gems {
        events.extend(session.collect_gem(index));
    }

    if res.win {
        events.extend(session.terminate(Outcome::Win));
        return events;
    }
    if res.death {
        events.extend(session.terminate(Outcome::Death));
        return events;
    }

    session.player.pos = res.pos;
    session.player.vel = res.vel;
    session.player.grounded = res.grounded;
    session.player.facing_right = candidate.facing_right;
    events
}
