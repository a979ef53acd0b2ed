//! Messages exchanged between the game controller and a display process
//!
//! Only the message shapes live here; how they are framed and carried is
//! up to the transport.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::{Coordinate, Grid};
use crate::entity::{Item, ItemInitState};
use crate::level::GeneratedLevel;

/// One-cell player movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum MoveType {
    Up,
    Down,
    Left,
    Right,
}

impl MoveType {
    /// (row, column) offset
    pub const fn delta(self) -> (isize, isize) {
        match self {
            MoveType::Up => (-1, 0),
            MoveType::Down => (1, 0),
            MoveType::Left => (0, -1),
            MoveType::Right => (0, 1),
        }
    }

    /// Neighbouring cell in this direction, if it is on the grid
    pub fn step(self, from: Coordinate, grid: &Grid) -> Option<Coordinate> {
        let (dr, dc) = self.delta();
        let row = from.row.checked_add_signed(dr)?;
        let col = from.col.checked_add_signed(dc)?;
        let to = Coordinate::new(row, col);
        grid.in_bounds(to).then_some(to)
    }
}

/// What to do with an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemActionType {
    Drop,
    Use,
    Wear,
    RemoveFromSlot,
}

/// A requested change to the game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    PlayerMove(MoveType),
    ItemAction { action: ItemActionType, item: Item },
}

/// Controller/display message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    /// Display asks for the current level
    AskMap,
    /// Controller sends the current level
    SendMap(Box<GeneratedLevel>),
    /// Display asks for the items on the level
    AskItemsList,
    /// Controller sends the items on the level
    SendItemsList(Vec<ItemInitState>),
    /// Display requests a state change
    ChangeState(StateChange),
    SaveGame,
    LoadGame,
}

impl Command {
    /// Check if this message flows from the display to the controller
    pub fn is_request(&self) -> bool {
        match self {
            Command::AskMap
            | Command::AskItemsList
            | Command::ChangeState(_)
            | Command::SaveGame
            | Command::LoadGame => true,
            Command::SendMap(_) | Command::SendItemsList(_) => false,
        }
    }
}
