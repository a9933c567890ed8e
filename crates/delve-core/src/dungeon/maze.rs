//! Maze growth (randomized depth-first carving)
//!
//! Every wall cell on the odd lattice seeds a new maze tree. Trees advance
//! two cells at a time so passages stay one tile wide with a wall between
//! parallel runs.

use log::debug;

use super::generator::Generator;
use super::grid::{Coord, Direction};
use super::tile::Tile;
use crate::rng::RandomSource;

impl<R: RandomSource> Generator<R> {
    /// Fill every remaining lattice cell with maze corridors.
    ///
    /// Scans rows top to bottom, columns left to right, on odd coordinates.
    /// Returns the number of maze trees grown.
    pub fn grow_mazes(&mut self, winding_percent: u32) -> usize {
        let bounds = self.grid.bounds();
        let mut grown = 0;

        for y in (1..bounds.height.saturating_sub(1)).step_by(2) {
            for x in (1..bounds.width.saturating_sub(1)).step_by(2) {
                let at = Coord::new(x, y);
                if !self.grid.is_wall(at) {
                    continue;
                }
                self.grow_maze(at, winding_percent);
                grown += 1;
            }
        }

        debug!("grew {grown} maze trees");
        grown
    }

    /// Grow one maze tree from `start` under a fresh region
    pub fn grow_maze(&mut self, start: Coord, winding_percent: u32) {
        let region = self.new_region();
        self.grid.carve(start, Tile::Path, Some(region));

        let mut cells = vec![start];
        let mut last_dir: Option<Direction> = None;

        while let Some(&cell) = cells.last() {
            let open: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&dir| self.can_carve(cell, dir))
                .collect();

            if open.is_empty() {
                // Dead branch, back up
                cells.pop();
                last_dir = None;
                continue;
            }

            let dir = match last_dir.filter(|dir| open.contains(dir)) {
                Some(last) if self.rng.below(101) > winding_percent as usize => last,
                _ => open[self.rng.below(open.len())],
            };

            let bounds = self.grid.bounds();
            let (Some(mid), Some(next)) = (bounds.step(cell, dir, 1), bounds.step(cell, dir, 2))
            else {
                // can_carve already proved both steps are in bounds
                cells.pop();
                continue;
            };
            self.grid.carve(mid, Tile::Path, Some(region));
            self.grid.carve(next, Tile::Path, Some(region));

            cells.push(next);
            last_dir = Some(dir);
        }
    }

    /// A step towards `dir` is legal when the next two cells are still wall
    /// and the third one is inside the grid.
    fn can_carve(&self, from: Coord, dir: Direction) -> bool {
        let bounds = self.grid.bounds();
        if bounds.step(from, dir, 3).is_none() {
            return false;
        }
        match (bounds.step(from, dir, 1), bounds.step(from, dir, 2)) {
            (Some(one), Some(two)) => self.grid.is_wall(one) && self.grid.is_wall(two),
            _ => false,
        }
    }
}
