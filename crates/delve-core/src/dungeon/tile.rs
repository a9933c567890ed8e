//! Tile states

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// State of one grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Wall = 0,
    /// Room interior
    Floor = 1,
    /// Maze corridor
    Path = 2,
    /// Junction between two regions
    Door = 3,
}

impl Tile {
    /// Anything but wall can be walked on
    pub const fn is_open(&self) -> bool {
        !matches!(self, Tile::Wall)
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall)
    }
}
