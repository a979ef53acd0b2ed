//! Rejection-sampling placement of entities on room floor
//!
//! Candidates are drawn uniformly over the whole grid and rejected unless
//! they are unoccupied `RoomSpace`. Every entity gets a bounded number of
//! draws, and placement fails up front when there is not enough free floor
//! left to satisfy the request at all.

use hashbrown::HashSet;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::config::{CountRange, GenConfig};
use crate::dungeon::{CellType, Coordinate, Grid};
use crate::error::{GenError, PlacementKind, Result};
use crate::rng::LevelRng;

use super::{
    Armor, Bonus, FightStats, Item, ItemInitState, MobInitState, MobMode, PlayerInitState,
};

/// Places entities on a finished grid, tracking occupied cells
#[derive(Debug)]
pub struct EntityPlacer<'a> {
    grid: &'a Grid,
    config: &'a GenConfig,
    occupied: HashSet<Coordinate>,
}

impl<'a> EntityPlacer<'a> {
    pub fn new(grid: &'a Grid, config: &'a GenConfig) -> Self {
        Self {
            grid,
            config,
            occupied: HashSet::new(),
        }
    }

    /// Cells taken so far
    pub fn occupied(&self) -> &HashSet<Coordinate> {
        &self.occupied
    }

    /// Mark a cell as taken; returns false if it already was
    pub fn occupy(&mut self, coord: Coordinate) -> bool {
        self.occupied.insert(coord)
    }

    /// Floor cells still available
    pub fn free_cells(&self) -> usize {
        self.grid
            .coords_of(CellType::RoomSpace)
            .into_iter()
            .filter(|c| !self.occupied.contains(c))
            .count()
    }

    /// Fresh fighter stats: full health, random strength
    fn roll_stats(&self, rng: &mut LevelRng) -> FightStats {
        FightStats::new(
            self.config.max_health,
            rng.range_inclusive(0, self.config.max_strength as usize) as u32,
        )
    }

    /// Put the player at `start` and roll their stats
    pub fn place_player(&mut self, start: Coordinate, rng: &mut LevelRng) -> PlayerInitState {
        self.occupy(start);
        PlayerInitState {
            coordinate: start,
            fight_stats: self.roll_stats(rng),
        }
    }

    /// Draw a free floor cell, giving up after the configured attempts
    fn sample_free_cell(
        &mut self,
        kind: PlacementKind,
        placed: usize,
        requested: usize,
        rng: &mut LevelRng,
    ) -> Result<Coordinate> {
        let attempts = self.config.max_placement_attempts;
        for _ in 0..attempts {
            let col = rng.rn2(self.grid.width());
            let row = rng.rn2(self.grid.height());
            let coord = Coordinate::new(row, col);
            if self.grid.get(coord) != Some(CellType::RoomSpace) || self.occupied.contains(&coord)
            {
                continue;
            }
            self.occupied.insert(coord);
            return Ok(coord);
        }
        warn!(%kind, placed, requested, attempts, "no free floor found");
        Err(GenError::PlacementExhausted {
            kind,
            placed,
            requested,
            attempts,
        })
    }

    /// Roll how many entities to place and check the floor can take them
    fn roll_count(
        &self,
        kind: PlacementKind,
        range: CountRange,
        rng: &mut LevelRng,
    ) -> Result<usize> {
        let requested = rng.range_inclusive(range.min, range.max);
        if self.free_cells() < requested {
            warn!(%kind, requested, free = self.free_cells(), "not enough floor");
            return Err(GenError::PlacementExhausted {
                kind,
                placed: 0,
                requested,
                attempts: 0,
            });
        }
        Ok(requested)
    }

    /// Place a random number of mobs with random stats and modes
    pub fn place_mobs(&mut self, rng: &mut LevelRng) -> Result<Vec<MobInitState>> {
        let kind = PlacementKind::Mob;
        let requested = self.roll_count(kind, self.config.mob_count, rng)?;
        let modes: Vec<MobMode> = MobMode::iter().collect();

        let mut mobs = Vec::with_capacity(requested);
        for placed in 0..requested {
            let coordinate = self.sample_free_cell(kind, placed, requested, rng)?;
            let fight_stats = self.roll_stats(rng);
            let mode = rng.choose(&modes).copied().unwrap_or(MobMode::Aggressive);
            mobs.push(MobInitState {
                coordinate,
                fight_stats,
                mode,
            });
        }
        Ok(mobs)
    }

    /// Place a random number of magical armor pickups
    pub fn place_items(&mut self, rng: &mut LevelRng) -> Result<Vec<ItemInitState>> {
        let kind = PlacementKind::Item;
        let requested = self.roll_count(kind, self.config.item_count, rng)?;

        let mut items = Vec::with_capacity(requested);
        for placed in 0..requested {
            let coordinate = self.sample_free_cell(kind, placed, requested, rng)?;
            let bonus = Bonus {
                strength: rng.range_inclusive(0, self.config.max_strength as usize) as u32,
                health: rng.range_inclusive(0, self.config.max_health as usize) as u32,
            };
            items.push(ItemInitState {
                coordinate,
                item: Item::Armor(Armor::magical(bonus)),
            });
        }
        Ok(items)
    }
}
