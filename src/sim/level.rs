//! Static level descriptions
//!
//! A [`LevelDefinition`] is read-only for the whole session. Levels 1-3 are
//! hand-authored; every other id is produced by the procedural generator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::generator::generate_level;
use crate::error::LevelError;

/// Number of hand-authored levels (ids `1..=AUTHORED_LEVEL_COUNT`)
pub const AUTHORED_LEVEL_COUNT: u32 = 3;

/// Where every level drops the player
pub const DEFAULT_PLAYER_START: Vec2 = Vec2::new(50.0, 600.0);

/// Level object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Wall,
    Trap,
    Goal,
    MovingWall,
    FallingSpike,
    DisappearingFloor,
    OpeningFloor,
    CollectibleGem,
}

impl HazardKind {
    /// Floors and walls the player can stand on or bump into
    pub fn is_platform(self) -> bool {
        matches!(
            self,
            HazardKind::Wall
                | HazardKind::MovingWall
                | HazardKind::DisappearingFloor
                | HazardKind::OpeningFloor
        )
    }
}

/// Cosmetic RGB color, passed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const NEON_PURPLE: Color = Color(0x6d28d9);
    pub const GOAL_GREEN: Color = Color(0x00ff00);
    pub const GEM_GOLD: Color = Color(0xffd700);

    fn default_for(kind: HazardKind) -> Self {
        match kind {
            HazardKind::Goal => Color::GOAL_GREEN,
            HazardKind::CollectibleGem => Color::GEM_GOLD,
            _ => Color::NEON_PURPLE,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::NEON_PURPLE
    }
}

/// A placed object in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    pub pos: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub color: Color,
    pub kind: HazardKind,
    /// Only meaningful for moving walls (spiked vs inert)
    #[serde(default)]
    pub lethal: bool,
}

impl LevelObject {
    pub fn new(kind: HazardKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color: Color::default_for(kind),
            kind,
            lethal: false,
        }
    }

    pub fn wall(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(HazardKind::Wall, x, y, w, h)
    }

    pub fn goal(x: f32, y: f32) -> Self {
        Self::new(HazardKind::Goal, x, y, 40.0, 40.0)
    }

    /// Mark as spiked
    pub fn lethal(mut self, lethal: bool) -> Self {
        self.lethal = lethal;
        self
    }
}

/// Difficulty label shown on the level card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Hard,
    Extreme,
    Impossible,
}

/// Complete description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    pub name: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub hint: String,
    pub player_start: Vec2,
    pub objects: Vec<LevelObject>,
}

impl LevelDefinition {
    /// Parse a hand-authored level and make sure it is playable
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check the structural invariants every level must hold
    pub fn validate(&self) -> Result<(), LevelError> {
        let id = self.id;
        if !self.player_start.is_finite() {
            return Err(LevelError::NonFiniteStart { id });
        }
        for (index, obj) in self.objects.iter().enumerate() {
            if !obj.pos.is_finite() || !obj.size.is_finite() {
                return Err(LevelError::NonFinite { id, index });
            }
            if obj.size.x <= 0.0 || obj.size.y <= 0.0 {
                return Err(LevelError::DegenerateObject {
                    id,
                    index,
                    kind: obj.kind,
                });
            }
        }
        match self.goal_count() {
            0 => Err(LevelError::MissingGoal { id }),
            1 => Ok(()),
            count => Err(LevelError::MultipleGoals { id, count }),
        }
    }

    pub fn goal_count(&self) -> usize {
        self.count_of(HazardKind::Goal)
    }

    pub fn count_of(&self, kind: HazardKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    pub fn is_procedural(&self) -> bool {
        !is_authored(self.id)
    }
}

/// Is `id` covered by the hand-authored table?
pub fn is_authored(id: u32) -> bool {
    (1..=AUTHORED_LEVEL_COUNT).contains(&id)
}

/// Look up a level by id, generating one past the authored table
pub fn get_level(id: u32) -> LevelDefinition {
    match authored_level(id) {
        Some(level) => {
            log::info!("Loaded authored level {} \"{}\"", level.id, level.name);
            level
        }
        None => generate_level(id),
    }
}

/// The hand-authored level with this id, if any
pub fn authored_level(id: u32) -> Option<LevelDefinition> {
    use HazardKind::*;

    let objects = match id {
        1 => vec![
            LevelObject::wall(0.0, 650.0, 300.0, 50.0),
            LevelObject::new(OpeningFloor, 300.0, 650.0, 100.0, 50.0),
            LevelObject::wall(400.0, 650.0, 600.0, 50.0),
            LevelObject::new(Trap, 500.0, 630.0, 40.0, 20.0),
            LevelObject::goal(950.0, 600.0),
        ],
        2 => vec![
            LevelObject::wall(0.0, 650.0, 200.0, 50.0),
            LevelObject::new(OpeningFloor, 200.0, 650.0, 100.0, 50.0),
            LevelObject::wall(300.0, 650.0, 700.0, 50.0),
            LevelObject::new(MovingWall, 350.0, 100.0, 80.0, 500.0).lethal(true),
            LevelObject::new(MovingWall, 650.0, 50.0, 80.0, 500.0).lethal(true),
            LevelObject::goal(950.0, 600.0),
        ],
        3 => vec![
            // Wide starting platform
            LevelObject::wall(0.0, 650.0, 300.0, 50.0),
            LevelObject::new(OpeningFloor, 300.0, 650.0, 250.0, 50.0),
            LevelObject::wall(600.0, 500.0, 200.0, 30.0),
            // Inert mover, only blocks
            LevelObject::new(MovingWall, 580.0, 100.0, 40.0, 250.0),
            LevelObject::wall(800.0, 450.0, 200.0, 50.0),
            LevelObject::goal(920.0, 400.0),
            LevelObject::new(FallingSpike, 700.0, 0.0, 30.0, 60.0),
        ],
        _ => return None,
    };

    let (name, difficulty) = match id {
        1 => ("Violet Symphony", Difficulty::Hard),
        2 => ("Neon Labyrinth", Difficulty::Extreme),
        _ => ("Neon Unwind", Difficulty::Hard),
    };

    Some(LevelDefinition {
        id,
        name: name.to_string(),
        difficulty,
        hint: "Much more doable now, right?".to_string(),
        player_start: DEFAULT_PLAYER_START,
        objects,
    })
}
