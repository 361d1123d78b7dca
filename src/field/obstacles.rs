//! Obstacles placed on top of terrain, and the registry that owns them.

use serde::{Deserialize, Serialize};

/// Hit points every generated obstacle starts with.
pub const OBSTACLE_MAX_HP: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Placed on dirt; cannot be destroyed
    Rock,
    /// Placed on grass; can be cut down
    Tree,
}

impl ObstacleKind {
    pub fn ascii_char(&self) -> char {
        match self {
            ObstacleKind::Rock => 'o',
            ObstacleKind::Tree => 'T',
        }
    }
}

/// Handle to an obstacle stored in an [`ObstacleRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub destructible: bool,
    pub hp: f32,
    pub max_hp: f32,
}

impl Obstacle {
    /// An indestructible rock at full health.
    pub fn rock() -> Self {
        Self {
            kind: ObstacleKind::Rock,
            destructible: false,
            hp: OBSTACLE_MAX_HP,
            max_hp: OBSTACLE_MAX_HP,
        }
    }

    /// A destructible tree at full health.
    pub fn tree() -> Self {
        Self {
            kind: ObstacleKind::Tree,
            destructible: true,
            hp: OBSTACLE_MAX_HP,
            max_hp: OBSTACLE_MAX_HP,
        }
    }

    /// Apply damage. Returns true once a destructible obstacle reaches zero hp.
    pub fn damage(&mut self, amount: f32) -> bool {
        if !self.destructible {
            return false;
        }
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        self.is_destroyed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destructible && self.hp <= 0.0
    }
}

/// Allocates obstacle records and hands back references to attach to tiles.
pub trait ObstacleRegistry {
    fn create(&mut self, obstacle: Obstacle) -> ObstacleId;
    fn get(&self, id: ObstacleId) -> Option<&Obstacle>;
    fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle>;
    fn remove(&mut self, id: ObstacleId) -> Option<Obstacle>;
}

/// Default registry: a slot vector indexed by [`ObstacleId`].
///
/// Removed slots are left empty, so ids are never reused.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleStore {
    slots: Vec<Option<Obstacle>>,
}

impl ObstacleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live obstacles.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|o| (ObstacleId(idx as u32), o)))
    }
}

impl ObstacleRegistry for ObstacleStore {
    fn create(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = ObstacleId(self.slots.len() as u32);
        self.slots.push(Some(obstacle));
        id
    }

    fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.slots.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.slots.get_mut(id.0 as usize).and_then(|slot| slot.as_mut())
    }

    fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.slots.get_mut(id.0 as usize).and_then(|slot| slot.take())
    }
}
