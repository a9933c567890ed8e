//! delve-core: rooms-and-mazes dungeon generation
//!
//! Places non-overlapping rooms, fills the gaps with mazes, joins every
//! region through junctions and prunes corridor dead ends. Output is fully
//! determined by the seed string and options. No I/O happens here.

pub mod colour;
pub mod dungeon;
pub mod error;
pub mod options;
mod rng;

pub use colour::Colour;
pub use dungeon::{Dungeon, Generator};
pub use error::{ConfigError, GenerateError};
pub use options::{GeneratorOptions, MIN_DIMENSION, TileSymbols};
pub use rng::{DungeonRng, RandomSource};
