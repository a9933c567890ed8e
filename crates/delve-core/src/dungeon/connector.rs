//! Region connection (spanning merge through wall connectors)
//!
//! A connector is a wall cell touching two or more distinct regions. Random
//! connectors are opened one at a time, merging the regions they touch,
//! until a single region is left or no useful connector remains.

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::generator::Generator;
use super::grid::{Coord, Direction, Grid, RegionId};
use crate::rng::RandomSource;

/// Connectors closer than this to an opened junction are discarded
pub const MIN_JUNCTION_SPACING: usize = 2;

/// Result of region connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// Every region was merged into one
    Complete,
    /// Connectors ran out first; these representatives are still apart
    Incomplete { open_regions: Vec<RegionId> },
}

impl Connectivity {
    pub fn is_complete(&self) -> bool {
        matches!(self, Connectivity::Complete)
    }
}

/// A wall cell between regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub at: Coord,
    /// Distinct region ids around the cell, in N, S, E, W order of discovery
    pub regions: Vec<RegionId>,
}

/// Tracks merged regions using equivalence classes
///
/// Every id maps directly to its representative; a union rewrites all
/// members of the absorbed classes, so lookups are never stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMerger {
    merged: Vec<RegionId>,
    open: BTreeSet<RegionId>,
}

impl RegionMerger {
    /// Create a merger where each of `count` regions is its own class
    pub fn new(count: usize) -> Self {
        Self {
            merged: (0..count).collect(),
            open: (0..count).collect(),
        }
    }

    /// Current representative of `region`
    pub fn find(&self, region: RegionId) -> RegionId {
        self.merged.get(region).copied().unwrap_or(region)
    }

    /// Representatives of `regions`, duplicates removed, first-seen order kept
    pub fn resolve(&self, regions: &[RegionId]) -> Vec<RegionId> {
        let mut resolved: Vec<RegionId> = Vec::with_capacity(regions.len());
        for &region in regions {
            let rep = self.find(region);
            if !resolved.contains(&rep) {
                resolved.push(rep);
            }
        }
        resolved
    }

    /// Fold the classes of `sources` into the class of `dest`
    pub fn union(&mut self, dest: RegionId, sources: &[RegionId]) {
        let dest = self.find(dest);
        let sources: Vec<RegionId> = sources
            .iter()
            .map(|&s| self.find(s))
            .filter(|&s| s != dest)
            .collect();
        if sources.is_empty() {
            return;
        }
        for rep in &mut self.merged {
            if sources.contains(rep) {
                *rep = dest;
            }
        }
        for source in &sources {
            self.open.remove(source);
        }
    }

    pub fn are_connected(&self, a: RegionId, b: RegionId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of classes still apart
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Representatives of the classes still apart, ascending
    pub fn open_regions(&self) -> Vec<RegionId> {
        self.open.iter().copied().collect()
    }

    /// Representative of every region id
    pub fn representatives(&self) -> &[RegionId] {
        &self.merged
    }
}

/// Every interior wall cell touching two or more regions, column-major
pub fn find_connectors(grid: &Grid) -> Vec<Connector> {
    let bounds = grid.bounds();
    let mut connectors = Vec::new();

    for x in 1..bounds.width.saturating_sub(1) {
        for y in 1..bounds.height.saturating_sub(1) {
            let at = Coord::new(x, y);
            if !grid.is_wall(at) {
                continue;
            }

            let mut regions: Vec<RegionId> = Vec::with_capacity(4);
            for region in grid.neighbours(at).filter_map(|n| grid.region(n)) {
                if !regions.contains(&region) {
                    regions.push(region);
                }
            }

            if regions.len() >= 2 {
                connectors.push(Connector { at, regions });
            }
        }
    }

    connectors
}

impl<R: RandomSource> Generator<R> {
    /// Open junctions until every region is joined.
    ///
    /// Running out of connectors with regions still apart is reported as
    /// [`Connectivity::Incomplete`] rather than failing.
    pub fn connect_regions(&mut self) -> &Connectivity {
        let mut merger = RegionMerger::new(self.region_count);
        merge_touching_regions(&self.grid, &mut merger);

        let mut connectors = find_connectors(&self.grid);
        connectors.retain(|c| merger.resolve(&c.regions).len() > 1);
        debug!(
            "{} regions, {} candidate connectors",
            merger.open_count(),
            connectors.len()
        );

        let mut junctions = 0;
        while merger.open_count() > 1 && !connectors.is_empty() {
            let pick = self.rng.below(connectors.len());
            let connector = connectors[pick].clone();

            let regions = merger.resolve(&connector.regions);
            let Some((&dest, sources)) = regions.split_first() else {
                connectors.swap_remove(pick);
                continue;
            };
            self.grid.carve(connector.at, self.junction, Some(dest));
            merger.union(dest, sources);
            junctions += 1;

            let rng = &mut self.rng;
            let extra_chance = self.extra_connector_chance;
            let mut extras = Vec::new();
            connectors.retain(|c| {
                if c.at.manhattan(connector.at) < MIN_JUNCTION_SPACING {
                    return false;
                }
                if merger.resolve(&c.regions).len() > 1 {
                    return true;
                }
                if let Some(n) = extra_chance {
                    if rng.one_in(n) {
                        extras.push(c.clone());
                    }
                }
                false
            });

            for extra in extras {
                let region = merger.find(extra.regions[0]);
                self.grid.carve(extra.at, self.junction, Some(region));
                junctions += 1;
            }
        }

        let connectivity = if merger.open_count() <= 1 {
            Connectivity::Complete
        } else {
            let open_regions = merger.open_regions();
            warn!(
                "connectors exhausted with {} regions still apart: {:?}",
                open_regions.len(),
                open_regions
            );
            Connectivity::Incomplete { open_regions }
        };
        debug!("opened {junctions} junctions");

        self.merger = Some(merger);
        self.connectivity.insert(connectivity)
    }
}

/// Union regions whose cells already share an edge
fn merge_touching_regions(grid: &Grid, merger: &mut RegionMerger) {
    let bounds = grid.bounds();
    for at in grid.open_cells() {
        let Some(region) = grid.region(at) else {
            continue;
        };
        for dir in [Direction::East, Direction::South] {
            let Some(next) = bounds.step(at, dir, 1) else {
                continue;
            };
            if let Some(other) = grid.region(next) {
                if !merger.are_connected(region, other) {
                    merger.union(region, &[other]);
                }
            }
        }
    }
}
