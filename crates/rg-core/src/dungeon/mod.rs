//! Dungeon layout
//!
//! Contains the cell grid, the room partition tree, room stamping,
//! corridor carving and the reachability check.

mod cell;
mod connectivity;
mod corridor;
mod grid;
mod raster;
mod room;

pub use cell::CellType;
pub use connectivity::{ConnectivityReport, is_reachable, label_regions};
pub use corridor::{
    CarveOutcome, CorridorStats, dig_corridor, door_endpoints, generate_corridors, join_rooms,
};
pub use grid::{Coordinate, Grid};
pub use raster::{draw_room, draw_room_tree};
pub use room::{Room, RoomIter, RoomLimits, build_room_tree, generate_rooms};
