//! Room placement by rejection sampling
//!
//! Each try draws, in order: size, rectangularity, orientation, x, y and the
//! room colour. A candidate that overlaps an accepted room (or does not fit
//! inside the margins) is thrown away without using an index or a region.

use log::debug;

use super::generator::Generator;
use super::room::Room;
use super::tile::Tile;
use crate::colour::Colour;
use crate::rng::RandomSource;

/// Smallest side length of a room
pub const MIN_ROOM_SIZE: usize = 2;

/// Rooms start at least this far from the top-left edge and end at least
/// this far from the bottom-right edge.
pub const ROOM_MARGIN: usize = 2;

impl<R: RandomSource> Generator<R> {
    /// Attempt `tries` random rooms and carve every one that fits.
    ///
    /// Returns the number of rooms accepted. Indices run from `start_index`
    /// in acceptance order without gaps.
    pub fn place_rooms(&mut self, tries: u32, extra_size: u32, start_index: i64) -> usize {
        let bounds = self.grid.bounds();
        let mut index = start_index;
        let mut placed = 0;

        for _ in 0..tries {
            let spread = (1 + 2 * extra_size as usize) as f64;
            let size = ((self.rng.next_f64() * spread + 1.0).floor() as usize).max(MIN_ROOM_SIZE);
            let rectangularity = (self.rng.next_f64() * (1.0 + size as f64 / 2.0)).floor() as usize;

            let (mut width, mut height) = (size, size);
            if self.rng.chance(0.5) {
                width += rectangularity;
            } else {
                height += rectangularity;
            }

            let x_roll = self.rng.next_f64();
            let y_roll = self.rng.next_f64();
            let colour = Colour::random(&mut self.rng);

            let (Some(x), Some(y)) = (
                place_axis(x_roll, bounds.width, width),
                place_axis(y_roll, bounds.height, height),
            ) else {
                continue;
            };

            let room = Room::new(x, y, width, height, index, colour);
            if self.rooms.iter().any(|other| room.overlaps(other)) {
                continue;
            }

            let region = self.new_region();
            for at in room.tiles() {
                self.grid.carve(at, Tile::Floor, Some(region));
            }
            self.rooms.push(room);
            index += 1;
            placed += 1;
        }

        debug!("placed {placed} of {tries} candidate rooms");
        placed
    }
}

/// Map a roll in [0, 1) to a start coordinate in
/// `[ROOM_MARGIN, bound - extent - ROOM_MARGIN]`, or `None` if the extent
/// leaves no room for the margins.
fn place_axis(roll: f64, bound: usize, extent: usize) -> Option<usize> {
    let span = bound.checked_sub(extent + 2 * ROOM_MARGIN - 1)?;
    if span == 0 {
        return None;
    }
    Some(ROOM_MARGIN + ((roll * span as f64) as usize).min(span - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::grid::{Bounds, Coord};
    use crate::rng::DungeonRng;

    fn generator(height: usize, width: usize, seed: &str) -> Generator<DungeonRng> {
        Generator::new(Bounds::new(height, width), DungeonRng::new(seed))
    }

    #[test]
    fn test_place_axis() {
        // width 10, room 3: starts 2..=5
        assert_eq!(place_axis(0.0, 10, 3), Some(2));
        assert_eq!(place_axis(0.999, 10, 3), Some(5));
        // exactly fits: 2 + 2 + 2 margin on a 6-wide grid
        assert_eq!(place_axis(0.5, 6, 2), Some(2));
        assert_eq!(place_axis(0.5, 5, 2), None);
        assert_eq!(place_axis(0.5, 3, 4), None);
    }

    #[test]
    fn test_rooms_do_not_overlap() {
        let mut g = generator(40, 40, "overlap");
        let placed = g.place_rooms(200, 2, 0);
        assert_eq!(placed, g.rooms().len());
        assert!(placed > 0);
        for (i, a) in g.rooms().iter().enumerate() {
            for b in &g.rooms()[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_rooms_respect_margin() {
        let mut g = generator(25, 31, "margin");
        g.place_rooms(150, 1, 0);
        for room in g.rooms() {
            assert!(room.x >= ROOM_MARGIN && room.y >= ROOM_MARGIN);
            assert!(room.right() <= 31 - ROOM_MARGIN);
            assert!(room.bottom() <= 25 - ROOM_MARGIN);
            assert!(room.width >= MIN_ROOM_SIZE && room.height >= MIN_ROOM_SIZE);
        }
    }

    #[test]
    fn test_indices_are_sequential() {
        let mut g = generator(40, 40, "indices");
        g.place_rooms(100, 0, 7);
        let indices: Vec<i64> = g.rooms().iter().map(|r| r.index).collect();
        let expected: Vec<i64> = (7..7 + indices.len() as i64).collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn test_each_room_has_its_own_region() {
        let mut g = generator(40, 40, "regions");
        g.place_rooms(100, 0, 0);
        assert_eq!(g.region_count(), g.rooms().len());
        for (region, room) in g.rooms().iter().enumerate() {
            for at in room.tiles() {
                assert_eq!(g.grid().tile(at), Tile::Floor);
                assert_eq!(g.grid().region(at), Some(region));
            }
        }
        assert_eq!(
            g.grid().count(Tile::Floor),
            g.rooms().iter().map(Room::area).sum::<usize>()
        );
    }

    #[test]
    fn test_zero_tries_places_nothing() {
        let mut g = generator(20, 20, "none");
        assert_eq!(g.place_rooms(0, 0, 0), 0);
        assert!(g.rooms().is_empty());
        assert_eq!(g.region_count(), 0);
        assert_eq!(g.grid().count(Tile::Floor), 0);
        assert!(g.grid().is_wall(Coord::new(2, 2)));
    }

    #[test]
    fn test_grid_too_small_for_any_room() {
        let mut g = generator(5, 5, "tiny");
        assert_eq!(g.place_rooms(50, 0, 0), 0);
    }
}
