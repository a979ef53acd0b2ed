//! Generation configuration
//!
//! Level size plus the tunables of the room partition, the entity
//! placer and the stat rolls. A config file must give the level size;
//! every tunable has a default, so the file only names what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Default minimum room width
pub const MIN_WIDTH: usize = 4;
/// Default minimum room height
pub const MIN_HEIGHT: usize = 4;
/// Default maximum room width
pub const MAX_WIDTH: usize = 8;
/// Default maximum room height
pub const MAX_HEIGHT: usize = 8;

/// Default health cap (and starting health of every fighter)
pub const MAX_HEALTH: u32 = 100;
/// Default strength cap
pub const MAX_STRENGTH: u32 = 20;

/// Default cap on rejection-sampling draws per placed entity
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Inclusive count range, e.g. how many mobs to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Default for CountRange {
    fn default() -> Self {
        Self::new(3, 6)
    }
}

/// Level generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Grid width in columns
    pub width: usize,
    /// Grid height in rows
    pub height: usize,

    #[serde(default = "default_min_width")]
    pub min_room_width: usize,
    #[serde(default = "default_min_height")]
    pub min_room_height: usize,
    #[serde(default = "default_max_width")]
    pub max_room_width: usize,
    #[serde(default = "default_max_height")]
    pub max_room_height: usize,

    #[serde(default = "default_max_health")]
    pub max_health: u32,
    #[serde(default = "default_max_strength")]
    pub max_strength: u32,

    #[serde(default)]
    pub mob_count: CountRange,
    #[serde(default)]
    pub item_count: CountRange,

    /// Draws allowed per entity before placement gives up
    #[serde(default = "default_max_placement_attempts")]
    pub max_placement_attempts: usize,
}

fn default_min_width() -> usize {
    MIN_WIDTH
}

fn default_min_height() -> usize {
    MIN_HEIGHT
}

fn default_max_width() -> usize {
    MAX_WIDTH
}

fn default_max_height() -> usize {
    MAX_HEIGHT
}

fn default_max_health() -> u32 {
    MAX_HEALTH
}

fn default_max_strength() -> u32 {
    MAX_STRENGTH
}

fn default_max_placement_attempts() -> usize {
    MAX_PLACEMENT_ATTEMPTS
}

impl Default for GenConfig {
    fn default() -> Self {
        Self::new(40, 20)
    }
}

impl GenConfig {
    /// Config for a `width` x `height` level with default tunables
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            min_room_width: MIN_WIDTH,
            min_room_height: MIN_HEIGHT,
            max_room_width: MAX_WIDTH,
            max_room_height: MAX_HEIGHT,
            max_health: MAX_HEALTH,
            max_strength: MAX_STRENGTH,
            mob_count: CountRange::default(),
            item_count: CountRange::default(),
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn with_min_room(mut self, width: usize, height: usize) -> Self {
        self.min_room_width = width;
        self.min_room_height = height;
        self
    }

    pub fn with_max_room(mut self, width: usize, height: usize) -> Self {
        self.max_room_width = width;
        self.max_room_height = height;
        self
    }

    pub fn with_stat_caps(mut self, max_health: u32, max_strength: u32) -> Self {
        self.max_health = max_health;
        self.max_strength = max_strength;
        self
    }

    pub fn with_mob_count(mut self, min: usize, max: usize) -> Self {
        self.mob_count = CountRange::new(min, max);
        self
    }

    pub fn with_item_count(mut self, min: usize, max: usize) -> Self {
        self.item_count = CountRange::new(min, max);
        self
    }

    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Parse a config from JSON; missing tunables take their defaults
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject settings the generator cannot honour
    ///
    /// Level size is not checked here: a level too small for its root
    /// room fails later with [`GenError::InsufficientSpace`].
    pub fn validate(&self) -> Result<()> {
        if self.min_room_width < 2 || self.min_room_height < 2 {
            return Err(GenError::InvalidConfig(format!(
                "minimum room size {}x{} leaves no interior",
                self.min_room_width, self.min_room_height
            )));
        }
        if self.min_room_width > self.max_room_width || self.min_room_height > self.max_room_height
        {
            return Err(GenError::InvalidConfig(format!(
                "minimum room size {}x{} exceeds maximum {}x{}",
                self.min_room_width, self.min_room_height, self.max_room_width, self.max_room_height
            )));
        }
        for (name, range) in [("mob", self.mob_count), ("item", self.item_count)] {
            if range.min > range.max {
                return Err(GenError::InvalidConfig(format!(
                    "{} count range [{}, {}] is inverted",
                    name, range.min, range.max
                )));
            }
        }
        if self.max_placement_attempts == 0 {
            return Err(GenError::InvalidConfig(
                "max_placement_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
