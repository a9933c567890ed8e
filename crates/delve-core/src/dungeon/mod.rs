//! Dungeon system
//!
//! Grid, rooms and the four generation stages: room placement, maze growth,
//! region connection and dead-end removal.

mod connector;
mod generator;
mod grid;
mod maze;
mod placement;
mod prune;
mod room;
mod tile;

pub use connector::{Connectivity, Connector, MIN_JUNCTION_SPACING, RegionMerger, find_connectors};
pub use generator::{Dungeon, Generator};
pub use grid::{Bounds, Coord, Direction, Grid, RegionId};
pub use placement::{MIN_ROOM_SIZE, ROOM_MARGIN};
pub use room::{Corner, Room};
pub use tile::Tile;
