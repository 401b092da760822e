//! Runtime hazard instances
//!
//! Each level object becomes a [`HazardInstance`] when a session (re)starts.
//! Per-kind runtime data lives in [`HazardState`], so a moving wall carries its
//! anchor and direction while a wall carries nothing at all.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, trigger_distance_x};
use super::level::{Color, HazardKind, LevelObject};
use super::policy::SimulationPolicy;
use crate::tuning::Tuning;

/// Lifecycle of an opening floor (trapdoor)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FloorPhase {
    /// Waiting for the player to come close
    Dormant,
    /// Triggered, visibly shaking but still solid
    Shaking { ticks: u32, tremble: f32 },
    /// Dropping out of the level, no longer solid
    Sinking,
    /// Shake finished but sinking is suppressed by policy; solid forever
    Held,
}

/// Kind-specific runtime state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardState {
    Wall,
    Goal,
    /// Static floor spike
    Trap,
    FallingSpike { falling: bool },
    MovingWall {
        anchor_y: f32,
        /// +1 down, -1 up
        direction: f32,
        speed: f32,
        lethal: bool,
    },
    DisappearingFloor { contact_ticks: u32 },
    OpeningFloor { phase: FloorPhase },
    Gem {
        bob_phase: f32,
        bob: f32,
        /// Index into the session's bonus gem list (None for authored gems)
        bonus_slot: Option<usize>,
    },
}

/// Per-tick inputs a hazard needs to advance
#[derive(Debug, Clone, Copy)]
pub struct AdvanceContext<'a> {
    /// Player box at the last confirmed position
    pub player: Aabb,
    pub tuning: &'a Tuning,
    pub policy: SimulationPolicy,
}

/// A level object with runtime state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardInstance {
    pub id: u32,
    /// Current top-left corner
    pub pos: Vec2,
    /// Top-left corner before this tick's advance
    pub prev_pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Cleared permanently when the hazard leaves play
    pub active: bool,
    pub state: HazardState,
}

impl HazardInstance {
    /// Instantiate a level object for a session on level `level_id`
    pub fn from_object(id: u32, obj: &LevelObject, level_id: u32, tuning: &Tuning) -> Self {
        let state = match obj.kind {
            HazardKind::Wall => HazardState::Wall,
            HazardKind::Goal => HazardState::Goal,
            HazardKind::Trap => HazardState::Trap,
            HazardKind::FallingSpike => HazardState::FallingSpike { falling: false },
            HazardKind::MovingWall => HazardState::MovingWall {
                anchor_y: obj.pos.y,
                direction: 1.0,
                speed: tuning.mover_speed(level_id),
                lethal: obj.lethal,
            },
            HazardKind::DisappearingFloor => HazardState::DisappearingFloor { contact_ticks: 0 },
            HazardKind::OpeningFloor => HazardState::OpeningFloor {
                phase: FloorPhase::Dormant,
            },
            HazardKind::CollectibleGem => HazardState::Gem {
                bob_phase: 0.0,
                bob: 0.0,
                bonus_slot: None,
            },
        };

        Self {
            id,
            pos: obj.pos,
            prev_pos: obj.pos,
            size: obj.size,
            color: obj.color,
            active: true,
            state,
        }
    }

    /// Instantiate an injected bonus gem
    pub fn bonus_gem(id: u32, obj: &LevelObject, bonus_slot: usize) -> Self {
        Self {
            id,
            pos: obj.pos,
            prev_pos: obj.pos,
            size: obj.size,
            color: obj.color,
            active: true,
            state: HazardState::Gem {
                bob_phase: 0.0,
                bob: 0.0,
                bonus_slot: Some(bonus_slot),
            },
        }
    }

    pub fn kind(&self) -> HazardKind {
        match self.state {
            HazardState::Wall => HazardKind::Wall,
            HazardState::Goal => HazardKind::Goal,
            HazardState::Trap => HazardKind::Trap,
            HazardState::FallingSpike { .. } => HazardKind::FallingSpike,
            HazardState::MovingWall { .. } => HazardKind::MovingWall,
            HazardState::DisappearingFloor { .. } => HazardKind::DisappearingFloor,
            HazardState::OpeningFloor { .. } => HazardKind::OpeningFloor,
            HazardState::Gem { .. } => HazardKind::CollectibleGem,
        }
    }

    /// Geometry used for every overlap test
    #[inline]
    pub fn collision_box(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Collision box as it stood before this tick's advance
    #[inline]
    pub fn previous_box(&self) -> Aabb {
        Aabb::new(self.prev_pos, self.size)
    }

    /// Vertical offset the renderer applies (tremble, bob). Never collides.
    pub fn visual_offset(&self) -> f32 {
        match self.state {
            HazardState::OpeningFloor {
                phase: FloorPhase::Shaking { tremble, .. },
            } => tremble,
            HazardState::Gem { bob, .. } => bob,
            _ => 0.0,
        }
    }

    /// Where the renderer should draw the top-left corner
    pub fn render_pos(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.visual_offset())
    }

    /// Touching this kills the player
    pub fn is_lethal(&self) -> bool {
        match self.state {
            HazardState::Trap | HazardState::FallingSpike { .. } => true,
            HazardState::MovingWall { lethal, .. } => lethal,
            _ => false,
        }
    }

    /// Blocks movement (floors and walls, except a trapdoor that is dropping away)
    pub fn is_solid(&self) -> bool {
        match self.state {
            HazardState::Wall
            | HazardState::MovingWall { .. }
            | HazardState::DisappearingFloor { .. } => true,
            HazardState::OpeningFloor { phase } => phase != FloorPhase::Sinking,
            _ => false,
        }
    }

    /// Advance one tick. Inactive hazards are frozen.
    pub fn advance(&mut self, ctx: &AdvanceContext) {
        if !self.active {
            return;
        }
        self.prev_pos = self.pos;
        let tuning = ctx.tuning;
        let proximity = trigger_distance_x(&ctx.player, &self.collision_box());

        match &mut self.state {
            HazardState::Wall
            | HazardState::Goal
            | HazardState::Trap
            | HazardState::DisappearingFloor { .. } => {}

            HazardState::FallingSpike { falling } => {
                if !*falling && proximity < tuning.spike_trigger_radius {
                    *falling = true;
                    log::debug!("Spike {} released", self.id);
                }
                if *falling {
                    self.pos.y += tuning.spike_fall_speed;
                }
            }

            HazardState::MovingWall {
                anchor_y,
                direction,
                speed,
                ..
            } => {
                let speed = if ctx.policy.slow_movers() {
                    *speed * 0.5
                } else {
                    *speed
                };
                self.pos.y += *direction * speed;
                if (self.pos.y - *anchor_y).abs() > tuning.mover_range {
                    *direction = -*direction;
                }
            }

            HazardState::OpeningFloor { phase } => {
                if *phase == FloorPhase::Dormant && proximity < tuning.floor_trigger_radius {
                    log::debug!("Opening floor {} triggered", self.id);
                    *phase = FloorPhase::Shaking {
                        ticks: 0,
                        tremble: 0.0,
                    };
                }

                let mut next = None;
                match phase {
                    FloorPhase::Shaking { ticks, tremble } => {
                        *ticks += 1;
                        if *ticks < tuning.floor_shake_ticks {
                            *tremble = (*ticks as f32 * tuning.floor_shake_frequency).sin()
                                * tuning.floor_shake_amplitude;
                        } else if ctx.policy.stable_floors() {
                            next = Some(FloorPhase::Held);
                        } else {
                            next = Some(FloorPhase::Sinking);
                        }
                    }
                    FloorPhase::Sinking => next = Some(FloorPhase::Sinking),
                    FloorPhase::Dormant | FloorPhase::Held => {}
                }

                if let Some(next) = next {
                    *phase = next;
                    if next == FloorPhase::Sinking {
                        self.pos.y += tuning.floor_drop_speed;
                        if self.pos.y > tuning.canvas_height + tuning.floor_sink_margin {
                            self.active = false;
                            log::debug!("Opening floor {} gone", self.id);
                        }
                    }
                }
            }

            HazardState::Gem { bob_phase, bob, .. } => {
                *bob_phase += tuning.gem_bob_rate;
                *bob = bob_phase.sin() * tuning.gem_bob_amplitude;
            }
        }
    }

    /// The player is standing on this hazard this tick
    pub fn register_landing(&mut self, tuning: &Tuning, policy: SimulationPolicy) {
        if let HazardState::DisappearingFloor { contact_ticks } = &mut self.state {
            *contact_ticks += 1;
            if *contact_ticks > tuning.disappear_contact_ticks && !policy.stable_floors() {
                self.active = false;
                log::debug!("Disappearing floor {} vanished", self.id);
            }
        }
    }
}
