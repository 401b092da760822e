//! Session state and core simulation types
//!
//! A [`Session`] owns everything one attempt at one level needs: the read-only
//! level, the hazard arena, the player and the terminal phase. The arena is
//! rebuilt from scratch on every (re)start, never patched across attempts.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::{HazardInstance, HazardState};
use super::level::{HazardKind, LevelDefinition, LevelObject};
use super::player::PlayerState;
use crate::tuning::Tuning;

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Death,
    Win,
}

/// Current phase of the simulation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Not simulating (before start, or after the host stopped the session)
    Idle,
    /// Advancing one tick per frame
    Running,
    /// Attempt over; frozen until the host restarts or moves on
    Terminated(Outcome),
}

/// Events reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Death,
    Win,
    /// A bonus gem was picked up
    GemCollected { collected: u32, total: u32 },
    /// Every injected bonus gem has been collected
    Jackpot,
}

/// Bonus gem bookkeeping for the current gem rain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemTally {
    pub spawned: u32,
    pub collected: u32,
    pub jackpot_fired: bool,
}

#[derive(Debug, Clone)]
struct BonusGem {
    object: LevelObject,
    collected: bool,
}

/// One level being played
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) level: LevelDefinition,
    pub(crate) tuning: Tuning,
    pub(crate) hazards: Vec<HazardInstance>,
    pub(crate) player: PlayerState,
    pub(crate) phase: SimPhase,
    pub(crate) time_ticks: u64,
    death_count: u32,
    bonus: Vec<BonusGem>,
    gems: GemTally,
    rng: Pcg32,
}

impl Session {
    /// Create an idle session; call [`Session::start`] to begin simulating
    pub fn new(level: LevelDefinition, tuning: Tuning, seed: u64) -> Self {
        let player = PlayerState::spawn(level.player_start);
        let mut session = Self {
            level,
            tuning,
            hazards: Vec::new(),
            player,
            phase: SimPhase::Idle,
            time_ticks: 0,
            death_count: 0,
            bonus: Vec::new(),
            gems: GemTally::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        session.rebuild();
        session
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Hazards still in play, in arena order (what the renderer draws)
    pub fn hazards(&self) -> impl Iterator<Item = &HazardInstance> {
        self.hazards.iter().filter(|h| h.active)
    }

    /// Whole arena including deactivated hazards
    pub fn arena(&self) -> &[HazardInstance] {
        &self.hazards
    }

    pub fn death_count(&self) -> u32 {
        self.death_count
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn gem_tally(&self) -> &GemTally {
        &self.gems
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        self.restart();
    }

    /// Rebuild the arena, respawn the player and resume simulating.
    /// The death counter survives.
    pub fn restart(&mut self) {
        self.rebuild();
        self.phase = SimPhase::Running;
        log::info!(
            "Level {} started (attempt {})",
            self.level.id,
            self.death_count + 1
        );
    }

    /// Host left the play screen; ticks become no-ops
    pub fn stop(&mut self) {
        self.phase = SimPhase::Idle;
    }

    fn rebuild(&mut self) {
        let level_id = self.level.id;
        let mut hazards: Vec<HazardInstance> = self
            .level
            .objects
            .iter()
            .enumerate()
            .map(|(i, obj)| HazardInstance::from_object(i as u32, obj, level_id, &self.tuning))
            .collect();

        for (slot, gem) in self.bonus.iter().enumerate() {
            if !gem.collected {
                let id = hazards.len() as u32;
                hazards.push(HazardInstance::bonus_gem(id, &gem.object, slot));
            }
        }

        self.hazards = hazards;
        self.player = PlayerState::spawn(self.level.player_start);
        self.time_ticks = 0;
    }

    /// Scatter `count` bonus gems over the level (gem rain)
    pub fn spawn_bonus_gems(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        // A finished rain makes room for a new one
        if self.gems.jackpot_fired {
            self.gems = GemTally::default();
            self.bonus.clear();
        }

        let size = self.tuning.gem_size;
        let max_x = (self.tuning.canvas_width - 2.0 * size).max(size + 1.0);
        let max_y = (self.tuning.canvas_height - 200.0).max(81.0);
        for _ in 0..count {
            let x = self.rng.random_range(size..max_x);
            let y = self.rng.random_range(80.0..max_y);
            let object = LevelObject::new(HazardKind::CollectibleGem, x, y, size, size);

            let slot = self.bonus.len();
            let id = self.hazards.len() as u32;
            self.hazards
                .push(HazardInstance::bonus_gem(id, &object, slot));
            self.bonus.push(BonusGem {
                object,
                collected: false,
            });
        }
        self.gems.spawned += count;
        log::info!("Gem rain: {} bonus gems spawned", count);
    }

    /// Collect the gem at arena `index`. Inactive or non-gem hazards are ignored.
    pub fn collect_gem(&mut self, index: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(hazard) = self.hazards.get_mut(index) else {
            return events;
        };
        if !hazard.active {
            return events;
        }
        let HazardState::Gem { bonus_slot, .. } = hazard.state else {
            return events;
        };
        hazard.active = false;

        // Authored gems are decoration, only the rain counts
        let Some(gem) = bonus_slot.and_then(|slot| self.bonus.get_mut(slot)) else {
            return events;
        };
        gem.collected = true;
        self.gems.collected += 1;
        events.push(GameEvent::GemCollected {
            collected: self.gems.collected,
            total: self.gems.spawned,
        });

        if self.gems.collected >= self.gems.spawned && !self.gems.jackpot_fired {
            self.gems.jackpot_fired = true;
            log::info!("Jackpot! All {} bonus gems collected", self.gems.spawned);
            events.push(GameEvent::Jackpot);
        }
        events
    }

    /// Host shortcut (admin instant win / death override)
    pub fn force_outcome(&mut self, outcome: Outcome) -> Option<GameEvent> {
        self.terminate(outcome)
    }

    /// Running -> Terminated. Returns the event only on the first call per attempt.
    pub(crate) fn terminate(&mut self, outcome: Outcome) -> Option<GameEvent> {
        if self.phase != SimPhase::Running {
            return None;
        }
        self.phase = SimPhase::Terminated(outcome);
        match outcome {
            Outcome::Death => {
                self.death_count += 1;
                log::info!(
                    "Died on level {} after {} ticks (deaths: {})",
                    self.level.id,
                    self.time_ticks,
                    self.death_count
                );
                Some(GameEvent::Death)
            }
            Outcome::Win => {
                log::info!(
                    "Level {} cleared in {} ticks",
                    self.level.id,
                    self.time_ticks
                );
                Some(GameEvent::Win)
            }
        }
    }

    /// Player box center, handy for hosts and bots
    pub fn player_center(&self) -> Vec2 {
        self.player.bounds(self.tuning.player_size).center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::get_level;

    fn session(id: u32) -> Session {
        Session::new(get_level(id), Tuning::default(), 12345)
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(1);
        assert_eq!(s.phase(), SimPhase::Idle);
        assert_eq!(s.hazards().count(), s.level().objects.len());
        assert_eq!(s.player().pos, s.level().player_start);
    }

    #[test]
    fn test_restart_rebuilds_and_keeps_deaths() {
        let mut s = session(1);
        s.start();
        s.hazards[0].active = false;
        s.player.pos = Vec2::new(500.0, 100.0);
        assert_eq!(s.force_outcome(Outcome::Death), Some(GameEvent::Death));
        assert_eq!(s.death_count(), 1);

        s.restart();
        assert_eq!(s.phase(), SimPhase::Running);
        assert!(s.arena().iter().all(|h| h.active));
        assert_eq!(s.player().pos, s.level().player_start);
        assert!(!s.player().grounded && s.player().facing_right);
        assert_eq!(s.death_count(), 1);
    }

    #[test]
    fn test_terminate_is_one_shot() {
        let mut s = session(1);
        // Not running yet: nothing to report
        assert_eq!(s.force_outcome(Outcome::Win), None);
        s.start();
        assert_eq!(s.force_outcome(Outcome::Win), Some(GameEvent::Win));
        assert_eq!(s.force_outcome(Outcome::Win), None);
        assert_eq!(s.force_outcome(Outcome::Death), None);
        assert_eq!(s.death_count(), 0);
    }

    #[test]
    fn test_jackpot_fires_once() {
        let mut s = session(1);
        s.start();
        s.spawn_bonus_gems(5);
        let gems: Vec<usize> = s
            .arena()
            .iter()
            .enumerate()
            .filter(|(_, h)| h.kind() == HazardKind::CollectibleGem)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(gems.len(), 5);

        let mut jackpots = 0;
        for &i in &gems {
            let events = s.collect_gem(i);
            assert!(matches!(events[0], GameEvent::GemCollected { .. }));
            jackpots += events.iter().filter(|e| **e == GameEvent::Jackpot).count();
        }
        assert_eq!(jackpots, 1);
        assert_eq!(s.gem_tally().collected, 5);

        // Spurious sixth collection
        assert!(s.collect_gem(gems[0]).is_empty());
        // Walls are not gems
        assert!(s.collect_gem(0).is_empty());
        assert!(s.collect_gem(999).is_empty());
    }

    #[test]
    fn test_restart_keeps_uncollected_gems_only() {
        let mut s = session(1);
        s.start();
        s.spawn_bonus_gems(3);
        let first_gem = s.level().objects.len();
        s.collect_gem(first_gem);
        s.restart();
        let gems = s
            .hazards()
            .filter(|h| h.kind() == HazardKind::CollectibleGem)
            .count();
        assert_eq!(gems, 2);
        assert_eq!(s.gem_tally().collected, 1);
    }

    #[test]
    fn test_gems_land_inside_canvas() {
        let mut s = session(2);
        s.spawn_bonus_gems(50);
        for gem in s.hazards().filter(|h| h.kind() == HazardKind::CollectibleGem) {
            assert!(gem.pos.x >= 0.0 && gem.pos.x + gem.size.x <= 1000.0);
            assert!(gem.pos.y >= 80.0 && gem.pos.y <= 500.0);
        }
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut s = session(1);
        s.start();
        s.stop();
        assert_eq!(s.phase(), SimPhase::Idle);
        assert_eq!(s.force_outcome(Outcome::Death), None);
    }
}
