//! Generation errors

use thiserror::Error;

/// What the placer was trying to put on the map when it ran out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PlacementKind {
    #[strum(serialize = "mob")]
    Mob,
    #[strum(serialize = "item")]
    Item,
}

/// Level generation errors
#[derive(Debug, Error)]
pub enum GenError {
    #[error(
        "insufficient space: a {width}x{height} level cannot hold a {min_width}x{min_height} room"
    )]
    InsufficientSpace {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    #[error("placement exhausted: placed {placed} of {requested} {kind}s after {attempts} attempts")]
    PlacementExhausted {
        kind: PlacementKind,
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
