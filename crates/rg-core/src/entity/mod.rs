//! Initial state of everything placed on a fresh level: the player,
//! hostile mobs and item pickups

mod placement;

pub use placement::EntityPlacer;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Coordinate;

/// Health and strength of a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightStats {
    pub health: u32,
    pub strength: u32,
}

impl FightStats {
    pub const fn new(health: u32, strength: u32) -> Self {
        Self { health, strength }
    }
}

/// Player start state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInitState {
    pub coordinate: Coordinate,
    pub fight_stats: FightStats,
}

/// AI disposition of a mob
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MobMode {
    /// Ignores the player until attacked
    Passive,
    /// Hunts the player on sight
    Aggressive,
    /// Keeps its distance from the player
    Cowardly,
}

/// Hostile entity start state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobInitState {
    pub coordinate: Coordinate,
    pub fight_stats: FightStats,
    pub mode: MobMode,
}

/// Stat bonus granted while an item is worn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bonus {
    pub strength: u32,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub bonus: Bonus,
}

impl Armor {
    /// Armor named after its bonus values
    pub fn magical(bonus: Bonus) -> Self {
        Self {
            name: format!("Magical armor +{} +{}", bonus.strength, bonus.health),
            bonus,
        }
    }
}

/// An item description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Item {
    Armor(Armor),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Armor(armor) => &armor.name,
        }
    }

    pub fn bonus(&self) -> Bonus {
        match self {
            Item::Armor(armor) => armor.bonus,
        }
    }
}

/// Item pickup start state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInitState {
    pub coordinate: Coordinate,
    pub item: Item,
}
