//! Dead-end removal

use log::debug;

use super::generator::Generator;
use super::tile::Tile;
use crate::rng::RandomSource;

impl<R: RandomSource> Generator<R> {
    /// Fill every open cell with at most one open neighbour, repeating
    /// until a full pass changes nothing.
    ///
    /// Returns the number of cells filled.
    pub fn remove_dead_ends(&mut self) -> usize {
        let bounds = self.grid.bounds();
        let mut removed = 0;

        loop {
            let mut changed = false;
            for at in bounds.column_major() {
                if self.grid.is_wall(at) || self.grid.open_neighbours(at) > 1 {
                    continue;
                }
                self.grid.carve(at, Tile::Wall, None);
                removed += 1;
                changed = true;
            }
            if !changed {
                break;
            }
        }

        debug!("removed {removed} dead-end cells");
        removed
    }
}
