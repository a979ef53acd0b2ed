//! Level assembly
//!
//! Runs the pipeline partition -> stamp rooms -> carve corridors ->
//! place entities and hands the result to the caller.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GenConfig;
use crate::dungeon::{
    CorridorStats, Coordinate, Grid, Room, build_room_tree, draw_room_tree, generate_corridors,
};
use crate::entity::{EntityPlacer, ItemInitState, MobInitState, PlayerInitState};
use crate::error::Result;
use crate::rng::LevelRng;

/// Symbol drawn for the player
pub const PLAYER_SYMBOL: char = '@';
/// Symbol drawn for a mob
pub const MOB_SYMBOL: char = '*';
/// Symbol drawn for an item
pub const ITEM_SYMBOL: char = '!';

/// A fully generated level, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub grid: Grid,
    pub player: PlayerInitState,
    pub mobs: Vec<MobInitState>,
    pub items: Vec<ItemInitState>,
}

impl GeneratedLevel {
    /// Every entity coordinate: player first, then mobs, then items
    pub fn entity_coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        core::iter::once(self.player.coordinate)
            .chain(self.mobs.iter().map(|m| m.coordinate))
            .chain(self.items.iter().map(|i| i.coordinate))
    }

    /// Symbol at a cell with entities drawn over terrain
    pub fn symbol_at(&self, coord: Coordinate) -> char {
        if self.player.coordinate == coord {
            PLAYER_SYMBOL
        } else if self.mobs.iter().any(|m| m.coordinate == coord) {
            MOB_SYMBOL
        } else if self.items.iter().any(|i| i.coordinate == coord) {
            ITEM_SYMBOL
        } else {
            self.grid.get(coord).map(|c| c.symbol()).unwrap_or(' ')
        }
    }
}

impl fmt::Display for GeneratedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.height() {
            let line: String = (0..self.grid.width())
                .map(|col| self.symbol_at(Coordinate::new(row, col)))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Rooms and carved grid, before any entity is placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub rooms: Room,
    pub grid: Grid,
    pub corridors: CorridorStats,
}

impl LevelLayout {
    /// Place the player in the root room's centre, then mobs and items
    pub fn populate(&self, config: &GenConfig, rng: &mut LevelRng) -> Result<GeneratedLevel> {
        let mut placer = EntityPlacer::new(&self.grid, config);
        let player = placer.place_player(self.rooms.center(), rng);
        let mobs = placer.place_mobs(rng)?;
        let items = placer.place_items(rng)?;
        debug!(
            player = %player.coordinate,
            mobs = mobs.len(),
            items = items.len(),
            "entities placed"
        );

        Ok(GeneratedLevel {
            grid: self.grid.clone(),
            player,
            mobs,
            items,
        })
    }
}

/// Partition, stamp and carve a level without placing entities
#[instrument(skip_all, fields(width = config.width, height = config.height, seed = rng.seed()))]
pub fn generate_layout(config: &GenConfig, rng: &mut LevelRng) -> Result<LevelLayout> {
    config.validate()?;

    let rooms = build_room_tree(config, rng)?;
    debug!(rooms = rooms.count(), depth = rooms.depth(), "room tree built");

    let mut grid = Grid::new(config.height, config.width);
    draw_room_tree(&mut grid, &rooms);

    let corridors = generate_corridors(&mut grid, &rooms, rng);
    debug!(
        connections = corridors.connections,
        truncated = corridors.truncated,
        "corridors carved"
    );

    Ok(LevelLayout {
        rooms,
        grid,
        corridors,
    })
}

/// Generate a level from an explicit random source
pub fn generate_level_with_rng(config: &GenConfig, rng: &mut LevelRng) -> Result<GeneratedLevel> {
    generate_layout(config, rng)?.populate(config, rng)
}

/// Generate a level that can be replayed from `seed`
pub fn generate_level_seeded(config: &GenConfig, seed: u64) -> Result<GeneratedLevel> {
    generate_level_with_rng(config, &mut LevelRng::new(seed))
}

/// Generate a level from fresh entropy
pub fn generate_level(config: &GenConfig) -> Result<GeneratedLevel> {
    generate_level_with_rng(config, &mut LevelRng::from_entropy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::CellType;
    use crate::error::GenError;

    fn scenario_config() -> GenConfig {
        GenConfig::new(20, 20).with_max_room(6, 6)
    }

    /// First seed whose layout has room for every entity
    fn first_populated(config: &GenConfig) -> (LevelLayout, GeneratedLevel) {
        (0..100)
            .find_map(|seed| {
                let mut rng = LevelRng::new(seed);
                let layout = generate_layout(config, &mut rng).unwrap();
                let level = layout.populate(config, &mut rng).ok()?;
                Some((layout, level))
            })
            .expect("some seed should produce a populated level")
    }

    #[test]
    fn test_scenario_twenty_by_twenty() {
        let config = scenario_config();
        let (layout, level) = first_populated(&config);

        assert!(layout.rooms.count() >= 1);
        assert!(layout.rooms.contains_interior(level.player.coordinate));
        assert!((3..=6).contains(&level.mobs.len()));
        assert!((3..=6).contains(&level.items.len()));
        for c in level.entity_coordinates() {
            assert!(c.row < 20 && c.col < 20);
            assert_eq!(level.grid.get(c), Some(CellType::RoomSpace));
        }
    }

    #[test]
    fn test_scenario_only_fails_on_small_floor() {
        let config = scenario_config();
        for seed in 0..50 {
            let mut rng = LevelRng::new(seed);
            let layout = generate_layout(&config, &mut rng).unwrap();
            match layout.populate(&config, &mut rng) {
                Ok(_) => {}
                Err(GenError::PlacementExhausted { requested, .. }) => {
                    // Only a level with barely any floor may run out
                    let floor = layout.grid.count(CellType::RoomSpace);
                    assert!(floor < 1 + 6 + 6 + requested, "seed {}: floor {}", seed, floor);
                }
                Err(other) => panic!("seed {}: unexpected {}", seed, other),
            }
        }
    }

    #[test]
    fn test_scenario_too_small() {
        let config = GenConfig::new(5, 5);
        let err = generate_level_seeded(&config, 1).unwrap_err();
        assert!(matches!(err, GenError::InsufficientSpace { .. }));
    }

    #[test]
    fn test_invalid_config_rejected_before_generation() {
        let config = GenConfig::new(40, 40).with_min_room(9, 4);
        assert!(matches!(
            generate_level_seeded(&config, 1),
            Err(GenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_seeded_replay() {
        let config = GenConfig::new(48, 24);
        for seed in 0..10 {
            match (
                generate_level_seeded(&config, seed),
                generate_level_seeded(&config, seed),
            ) {
                (Ok(a), Ok(b)) => {
                    assert_eq!(a, b);
                    assert_eq!(a.to_string(), b.to_string());
                }
                (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
                _ => panic!("seed {} diverged", seed),
            }
        }
    }

    #[test]
    fn test_display_overlays_entities() {
        let (_, level) = first_populated(&scenario_config());
        let text = level.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 20);

        let p = level.player.coordinate;
        assert_eq!(lines[p.row].chars().nth(p.col), Some(PLAYER_SYMBOL));
        assert_eq!(text.matches(PLAYER_SYMBOL).count(), 1);
        assert_eq!(text.matches(MOB_SYMBOL).count(), level.mobs.len());
        assert_eq!(text.matches(ITEM_SYMBOL).count(), level.items.len());
    }
}
