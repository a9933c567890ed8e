//! Dungeon generation pipeline
//!
//! [`Generator`] owns the grid, region map and rooms of one run and exposes
//! each stage. [`Dungeon::generate`] runs the stages in their fixed order
//! (rooms, mazes, connection, pruning) and freezes the result.

use log::debug;
use serde::Serialize;

use super::connector::{Connectivity, RegionMerger};
use super::grid::{Bounds, Coord, Grid, RegionId};
use super::room::Room;
use super::tile::Tile;
use crate::error::{ConfigError, GenerateError};
use crate::options::{GeneratorOptions, TileSymbols};
use crate::rng::{DungeonRng, RandomSource};

/// Mutable state of a generation run
#[derive(Debug, Clone)]
pub struct Generator<R: RandomSource = DungeonRng> {
    pub(crate) grid: Grid,
    pub(crate) rooms: Vec<Room>,
    /// Number of regions allocated so far; ids are `0..region_count`
    pub(crate) region_count: usize,
    pub(crate) rng: R,
    /// Tile carved at opened connectors
    pub(crate) junction: Tile,
    pub(crate) extra_connector_chance: Option<u32>,
    pub(crate) merger: Option<RegionMerger>,
    pub(crate) connectivity: Option<Connectivity>,
}

impl<R: RandomSource> Generator<R> {
    /// All-wall grid of the given size
    pub fn new(bounds: Bounds, rng: R) -> Self {
        Self {
            grid: Grid::new(bounds),
            rooms: Vec::new(),
            region_count: 0,
            rng,
            junction: Tile::Door,
            extra_connector_chance: None,
            merger: None,
            connectivity: None,
        }
    }

    /// Tile used for junctions (door by default)
    pub fn with_junction(mut self, tile: Tile) -> Self {
        self.junction = tile;
        self
    }

    pub fn with_extra_connector_chance(mut self, chance: Option<u32>) -> Self {
        self.extra_connector_chance = chance;
        self
    }

    /// Allocate the next region id
    pub(crate) fn new_region(&mut self) -> RegionId {
        let id = self.region_count;
        self.region_count += 1;
        id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// Region of the cell at `at`, resolved through merges once regions
    /// have been connected
    pub fn region_at(&self, at: Coord) -> Option<RegionId> {
        let region = self.grid.region(at)?;
        Some(match &self.merger {
            Some(merger) => merger.find(region),
            None => region,
        })
    }

    /// Freeze the current state into a read-only dungeon
    pub fn finish(self, symbols: TileSymbols) -> Dungeon {
        let representatives = match &self.merger {
            Some(merger) => merger.representatives().to_vec(),
            None => (0..self.region_count).collect(),
        };
        let connectivity = match self.connectivity {
            Some(connectivity) => connectivity,
            None if self.region_count <= 1 => Connectivity::Complete,
            None => Connectivity::Incomplete {
                open_regions: representatives.clone(),
            },
        };
        Dungeon {
            grid: self.grid,
            rooms: self.rooms,
            representatives,
            connectivity,
            symbols,
        }
    }
}

impl Generator<DungeonRng> {
    /// Validate `opts` and seed a generator from them
    pub fn from_options(opts: &GeneratorOptions) -> Result<Self, ConfigError> {
        opts.validate()?;
        let junction = if opts.doors { Tile::Door } else { Tile::Path };
        Ok(Generator::new(
            Bounds::new(opts.height, opts.width),
            DungeonRng::new(&opts.seed),
        )
        .with_junction(junction)
        .with_extra_connector_chance(opts.extra_connector_chance))
    }
}

/// A finished dungeon
///
/// Read-only: renderers get the grid, rooms and bounds but no way to change
/// them. Serializes for dumps; there is no way to load one back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dungeon {
    grid: Grid,
    rooms: Vec<Room>,
    representatives: Vec<RegionId>,
    connectivity: Connectivity,
    symbols: TileSymbols,
}

impl Dungeon {
    /// Run every stage with `opts`
    pub fn generate(opts: &GeneratorOptions) -> Result<Self, GenerateError> {
        let mut generator = Generator::from_options(opts)?;

        generator.place_rooms(opts.room_tries, opts.extra_room_size, opts.start_index);
        generator.grow_mazes(opts.winding_percent);
        generator.connect_regions();
        generator.remove_dead_ends();

        let dungeon = generator.finish(opts.tiles.clone());
        debug!(
            "generated {}x{} dungeon with {} rooms (seed {:?})",
            opts.width,
            opts.height,
            dungeon.rooms.len(),
            opts.seed
        );
        Ok(dungeon)
    }

    pub fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rooms in acceptance order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn symbols(&self) -> &TileSymbols {
        &self.symbols
    }

    /// Tile at (x, y), `None` outside the grid
    pub fn tile_at(&self, x: usize, y: usize) -> Option<Tile> {
        let at = Coord::new(x, y);
        self.grid.bounds().contains(at).then(|| self.grid.tile(at))
    }

    /// Room covering (x, y)
    pub fn room_at(&self, x: usize, y: usize) -> Option<&Room> {
        let at = Coord::new(x, y);
        self.rooms.iter().find(|room| room.contains(at))
    }

    /// Merged region of (x, y); every open cell of a fully connected
    /// dungeon reports the same id
    pub fn region_at(&self, x: usize, y: usize) -> Option<RegionId> {
        let region = self.grid.region(Coord::new(x, y))?;
        Some(self.representatives.get(region).copied().unwrap_or(region))
    }

    /// Positions of every door, column-major
    pub fn doors(&self) -> impl Iterator<Item = Coord> + '_ {
        self.grid
            .open_cells()
            .filter(move |&at| self.grid.tile(at) == Tile::Door)
    }

    /// One string per row, each tile replaced by its configured symbol
    pub fn glyph_rows(&self) -> Vec<String> {
        self.grid
            .rows()
            .map(|row| row.iter().map(|&tile| self.symbols.symbol(tile)).collect())
            .collect()
    }
}
