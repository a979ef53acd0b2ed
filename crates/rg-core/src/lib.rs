//! rg-core: procedural generation of a single dungeon level
//!
//! A level is built in four stages: the map is recursively partitioned
//! into a tree of rooms, the rooms are stamped onto a cell grid, each
//! room is joined to its children by a random-walk corridor, and finally
//! the player, mobs and items are dropped onto free room floor.
//!
//! Generation is pure and synchronous. With a seeded [`LevelRng`] the
//! same config always produces the same level.

pub mod command;
pub mod config;
pub mod dungeon;
pub mod entity;
pub mod error;
pub mod level;

mod rng;

pub use config::{CountRange, GenConfig};
pub use error::{GenError, PlacementKind, Result};
pub use level::{
    GeneratedLevel, LevelLayout, generate_layout, generate_level, generate_level_seeded,
    generate_level_with_rng,
};
pub use rng::LevelRng;
