//! Host-side frame scheduler
//!
//! Converts variable display frames into fixed simulation ticks. Stopping the
//! scheduler detaches it from the session, so a frame delivered afterwards
//! does nothing.

use super::policy::SimulationPolicy;
use super::state::{GameEvent, Session, SimPhase};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we are willing to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-step accumulator driving a [`Session`]
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    accumulator: f32,
    attached: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the frame source; leftover time is discarded
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.attached = true;
    }

    /// Detach from the frame source
    pub fn stop(&mut self) {
        self.attached = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.attached
    }

    /// Run as many ticks as `dt` seconds of wall time cover.
    ///
    /// One-shot inputs are cleared after the first tick that sees them.
    pub fn frame(
        &mut self,
        dt: f32,
        session: &mut Session,
        input: &mut TickInput,
        policy: SimulationPolicy,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.attached {
            return events;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if session.phase() != SimPhase::Running {
                self.accumulator = 0.0;
                break;
            }
            events.extend(tick(session, input, policy));
            self.accumulator -= SIM_DT;
            substeps += 1;

            input.instant_win = false;
            input.instant_death = false;
        }

        // Drop backlog we could not simulate this frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::get_level;
    use crate::sim::state::Outcome;
    use crate::tuning::Tuning;

    fn running() -> Session {
        let mut session = Session::new(get_level(1), Tuning::default(), 7);
        session.start();
        session
    }

    #[test]
    fn test_fixed_steps_per_frame() {
        let mut session = running();
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        let mut input = TickInput::default();

        // Two and a half ticks of time: two ticks now, the remainder carries over
        scheduler.frame(SIM_DT * 2.5, &mut session, &mut input, SimulationPolicy::standard());
        assert_eq!(session.time_ticks(), 2);
        scheduler.frame(SIM_DT * 0.6, &mut session, &mut input, SimulationPolicy::standard());
        assert_eq!(session.time_ticks(), 3);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut session = running();
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        let mut input = TickInput::default();
        scheduler.frame(5.0, &mut session, &mut input, SimulationPolicy::standard());
        assert!(session.time_ticks() <= MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_detached_frame_does_nothing() {
        let mut session = running();
        let mut scheduler = FrameScheduler::new();
        let mut input = TickInput::default();
        assert!(!scheduler.is_running());
        scheduler.frame(0.05, &mut session, &mut input, SimulationPolicy::standard());
        assert_eq!(session.time_ticks(), 0);

        scheduler.start();
        scheduler.stop();
        scheduler.frame(0.05, &mut session, &mut input, SimulationPolicy::standard());
        assert_eq!(session.time_ticks(), 0);
    }

    #[test]
    fn test_one_shot_input_consumed() {
        let mut session = running();
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        let mut input = TickInput {
            right: true,
            instant_death: true,
            ..Default::default()
        };
        let events = scheduler.frame(
            SIM_DT * 3.0,
            &mut session,
            &mut input,
            SimulationPolicy::admin(),
        );
        assert_eq!(events, vec![GameEvent::Death]);
        assert_eq!(session.phase(), SimPhase::Terminated(Outcome::Death));
        assert!(!input.instant_death);
        assert!(input.right);
        // Terminated sessions stop consuming ticks
        assert_eq!(session.time_ticks(), 1);
    }
}
