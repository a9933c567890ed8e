//! Tile grid and region map
//!
//! Two parallel `height x width` arrays: the tile state of every cell and the
//! region id it was carved under. Cells are stored row-major.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::tile::Tile;

/// Identifier of a region (one room or one maze tree)
pub type RegionId = usize;

/// Grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance
    pub fn manhattan(&self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Compass directions, in the order they are tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "S")]
    South,
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "W")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step as (dx, dy), y grows downwards
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub height: usize,
    pub width: usize,
}

impl Bounds {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.x < self.width && at.y < self.height
    }

    /// `at` moved `steps` cells towards `dir`, or `None` if that leaves the grid
    pub fn step(&self, at: Coord, dir: Direction, steps: usize) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = at.x.checked_add_signed(dx * steps as isize)?;
        let y = at.y.checked_add_signed(dy * steps as isize)?;
        let to = Coord { x, y };
        self.contains(to).then_some(to)
    }

    /// True if `at` lies on the outermost ring of cells
    pub fn on_border(&self, at: Coord) -> bool {
        at.x == 0 || at.y == 0 || at.x + 1 == self.width || at.y + 1 == self.height
    }

    /// Every position, x outer and y inner
    pub fn column_major(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord { x, y }))
    }
}

/// Tile store plus region map
///
/// Serialize-only: a grid is always built by [`Grid::new`], which sizes both
/// arrays to `height * width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    bounds: Bounds,
    tiles: Vec<Tile>,
    regions: Vec<Option<RegionId>>,
}

impl Grid {
    /// Solid wall everywhere, no regions
    pub fn new(bounds: Bounds) -> Self {
        let len = bounds.height * bounds.width;
        Self {
            bounds,
            tiles: vec![Tile::Wall; len],
            regions: vec![None; len],
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn index(&self, at: Coord) -> usize {
        at.y * self.bounds.width + at.x
    }

    /// Tile at `at`; out-of-bounds reads as wall
    pub fn tile(&self, at: Coord) -> Tile {
        if self.bounds.contains(at) {
            self.tiles[self.index(at)]
        } else {
            Tile::Wall
        }
    }

    /// Region `at` was carved under
    pub fn region(&self, at: Coord) -> Option<RegionId> {
        if self.bounds.contains(at) {
            self.regions[self.index(at)]
        } else {
            None
        }
    }

    pub fn is_wall(&self, at: Coord) -> bool {
        self.tile(at).is_wall()
    }

    /// Set the tile and region of one cell. Walls never carry a region.
    ///
    /// Out-of-bounds positions are ignored.
    pub fn carve(&mut self, at: Coord, tile: Tile, region: Option<RegionId>) {
        if !self.bounds.contains(at) {
            return;
        }
        let idx = self.index(at);
        self.tiles[idx] = tile;
        self.regions[idx] = if tile.is_wall() { None } else { region };
    }

    /// In-bounds 4-neighbours in N, S, E, W order
    pub fn neighbours(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.bounds.step(at, dir, 1))
    }

    /// Number of non-wall 4-neighbours
    pub fn open_neighbours(&self, at: Coord) -> usize {
        self.neighbours(at)
            .filter(|&n| self.tile(n).is_open())
            .count()
    }

    /// Rows of tiles, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.bounds.width.max(1))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Positions of all non-wall cells, column-major
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bounds
            .column_major()
            .filter(move |&at| self.tile(at).is_open())
    }
}
