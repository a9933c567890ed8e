//! Rooms
//!
//! Axis-aligned rectangles occupying `[x, x + width) x [y, y + height)`.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::grid::{Coord, Direction};
use crate::colour::Colour;

/// Corner of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Corner {
    #[strum(serialize = "NW")]
    NorthWest,
    #[strum(serialize = "NE")]
    NorthEast,
    #[strum(serialize = "SW")]
    SouthWest,
    #[strum(serialize = "SE")]
    SouthEast,
}

/// A rectangular room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// X coordinate of the left column
    pub x: usize,
    /// Y coordinate of the top row
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Position in acceptance order, offset by the configured start index
    pub index: i64,
    /// Display colour
    pub colour: Colour,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize, index: i64, colour: Colour) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
            colour,
        }
    }

    /// One past the rightmost column
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// One past the bottom row
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// True if the rooms intersect or merely touch.
    ///
    /// All four comparisons are inclusive, so two accepted rooms always have
    /// at least one wall cell between them.
    pub fn overlaps(&self, other: &Room) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Integer-floored center
    pub fn center(&self) -> Coord {
        Coord::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Euclidean distance between centers
    pub fn distance_to(&self, other: &Room) -> f64 {
        let a = self.center();
        let b = other.center();
        let dx = a.x as f64 - b.x as f64;
        let dy = a.y as f64 - b.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Every cell of the room, column-major (x outer, y inner)
    pub fn tiles(&self) -> impl Iterator<Item = Coord> + use<> {
        let (x0, x1, y0, y1) = (self.x, self.right(), self.y, self.bottom());
        (x0..x1).flat_map(move |x| (y0..y1).map(move |y| Coord::new(x, y)))
    }

    /// Half-open bounds test
    pub fn contains(&self, at: Coord) -> bool {
        at.x >= self.x && at.x < self.right() && at.y >= self.y && at.y < self.bottom()
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Perimeter cells excluding corners, tagged with the side they face
    pub fn edges(&self) -> Vec<(Direction, Coord)> {
        let mut edges = Vec::new();
        if self.width < 2 || self.height < 2 {
            return edges;
        }
        let (last_x, last_y) = (self.right() - 1, self.bottom() - 1);
        for x in self.x + 1..last_x {
            edges.push((Direction::North, Coord::new(x, self.y)));
            edges.push((Direction::South, Coord::new(x, last_y)));
        }
        for y in self.y + 1..last_y {
            edges.push((Direction::West, Coord::new(self.x, y)));
            edges.push((Direction::East, Coord::new(last_x, y)));
        }
        edges
    }

    /// The four corner cells
    pub fn corners(&self) -> [(Corner, Coord); 4] {
        let (last_x, last_y) = (self.right() - 1, self.bottom() - 1);
        [
            (Corner::NorthWest, Coord::new(self.x, self.y)),
            (Corner::NorthEast, Coord::new(last_x, self.y)),
            (Corner::SouthWest, Coord::new(self.x, last_y)),
            (Corner::SouthEast, Coord::new(last_x, last_y)),
        ]
    }
}
