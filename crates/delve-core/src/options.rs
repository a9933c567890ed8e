//! Generation parameters
//!
//! Holds everything one generation run needs, with defaults and eager
//! validation.

use serde::{Deserialize, Serialize};

use crate::dungeon::Tile;
use crate::error::ConfigError;

/// Smallest accepted height or width
pub const MIN_DIMENSION: usize = 5;

/// Display symbols for each tile kind
///
/// Opaque to the generator: symbols are only looked up when a finished
/// dungeon is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSymbols {
    pub wall: String,
    pub floor: String,
    pub path: String,
    pub door: String,
}

impl Default for TileSymbols {
    fn default() -> Self {
        Self {
            wall: "#".to_owned(),
            floor: ".".to_owned(),
            path: " ".to_owned(),
            door: "+".to_owned(),
        }
    }
}

impl TileSymbols {
    /// Symbol for a tile
    pub fn symbol(&self, tile: Tile) -> &str {
        match tile {
            Tile::Wall => &self.wall,
            Tile::Floor => &self.floor,
            Tile::Path => &self.path,
            Tile::Door => &self.door,
        }
    }
}

/// User-configurable generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Grid height in tiles
    pub height: usize,
    /// Grid width in tiles
    pub width: usize,
    /// Seed string for the random stream
    pub seed: String,
    /// Number of candidate rooms to attempt
    pub room_tries: u32,
    /// Widens the room size distribution
    pub extra_room_size: u32,
    /// 0..=100, higher values turn corridors more often
    pub winding_percent: u32,
    /// Index given to the first accepted room
    pub start_index: i64,
    /// Display symbols, passed through untouched
    pub tiles: TileSymbols,
    /// Carve junctions as doors (otherwise as plain path)
    pub doors: bool,
    /// One-in-n chance to open a redundant connector, creating loops
    pub extra_connector_chance: Option<u32>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            height: 40,
            width: 40,
            seed: String::new(),
            room_tries: 100,
            extra_room_size: 0,
            winding_percent: 0,
            start_index: 0,
            tiles: TileSymbols::default(),
            doors: true,
            extra_connector_chance: None,
        }
    }
}

impl GeneratorOptions {
    /// Options for a `height` x `width` grid with all other defaults
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_room_tries(mut self, room_tries: u32) -> Self {
        self.room_tries = room_tries;
        self
    }

    pub fn with_extra_room_size(mut self, extra_room_size: u32) -> Self {
        self.extra_room_size = extra_room_size;
        self
    }

    pub fn with_winding_percent(mut self, winding_percent: u32) -> Self {
        self.winding_percent = winding_percent;
        self
    }

    pub fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_doors(mut self, doors: bool) -> Self {
        self.doors = doors;
        self
    }

    pub fn with_extra_connector_chance(mut self, chance: Option<u32>) -> Self {
        self.extra_connector_chance = chance;
        self
    }

    pub fn with_tiles(mut self, tiles: TileSymbols) -> Self {
        self.tiles = tiles;
        self
    }

    /// Reject parameters the generator cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height < MIN_DIMENSION {
            return Err(ConfigError::TooSmall {
                axis: "height",
                value: self.height,
                min: MIN_DIMENSION,
            });
        }
        if self.width < MIN_DIMENSION {
            return Err(ConfigError::TooSmall {
                axis: "width",
                value: self.width,
                min: MIN_DIMENSION,
            });
        }
        if self.room_tries == 0 {
            return Err(ConfigError::NoRoomTries);
        }
        if self.winding_percent > 100 {
            return Err(ConfigError::WindingOutOfRange(self.winding_percent));
        }
        if self.extra_connector_chance == Some(0) {
            return Err(ConfigError::ZeroExtraConnectorChance);
        }
        Ok(())
    }
}
