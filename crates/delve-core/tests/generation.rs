use std::collections::{HashMap, HashSet, VecDeque};

use delve_core::dungeon::{Bounds, Coord, Direction, Generator, Grid, RegionId, Tile};
use delve_core::{Dungeon, DungeonRng, GeneratorOptions};
use proptest::prelude::*;

fn open_cells(grid: &Grid) -> Vec<Coord> {
    grid.open_cells().collect()
}

/// Number of open cells reachable from the first open cell
fn reachable(grid: &Grid) -> usize {
    let Some(start) = grid.open_cells().next() else {
        return 0;
    };
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(at) = queue.pop_front() {
        for next in grid.neighbours(at) {
            if grid.tile(next).is_open() && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

fn assert_connected(grid: &Grid) {
    assert_eq!(reachable(grid), open_cells(grid).len(), "grid is not connected");
}

fn assert_no_dead_ends(grid: &Grid) {
    for at in grid.open_cells() {
        assert!(grid.open_neighbours(at) >= 2, "dead end at {at:?}");
    }
}

fn staged(height: usize, width: usize, seed: &str, tries: u32, winding: u32) -> Generator {
    let mut generator = Generator::new(Bounds::new(height, width), DungeonRng::new(seed));
    generator.place_rooms(tries, 0, 0);
    generator.grow_mazes(winding);
    generator
}

#[test]
fn test_example_scenario() {
    let opts = GeneratorOptions::new(20, 20)
        .with_seed("test")
        .with_room_tries(50)
        .with_extra_room_size(0)
        .with_winding_percent(0);

    let dungeon = Dungeon::generate(&opts).unwrap();
    assert!(!dungeon.rooms().is_empty());
    assert!(dungeon.connectivity().is_complete());
    assert_connected(dungeon.grid());
    assert_no_dead_ends(dungeon.grid());

    let again = Dungeon::generate(&opts).unwrap();
    assert_eq!(again.grid(), dungeon.grid());
    assert_eq!(again.rooms(), dungeon.rooms());
}

#[test]
fn test_zero_room_tries_gives_pure_maze() {
    let mut generator = staged(20, 20, "test", 0, 0);
    assert!(generator.rooms().is_empty());
    assert_eq!(generator.region_count(), 1);

    assert!(generator.connect_regions().is_complete());
    generator.remove_dead_ends();

    let grid = generator.grid();
    assert_eq!(grid.count(Tile::Floor), 0);
    assert_connected(grid);
    assert_no_dead_ends(grid);
}

#[test]
fn test_maze_trees_are_perfect() {
    let generator = staged(41, 41, "trees", 80, 30);
    let grid = generator.grid();
    let room_regions: HashSet<RegionId> = generator
        .rooms()
        .iter()
        .filter_map(|room| grid.region(Coord::new(room.x, room.y)))
        .collect();

    let mut cells: HashMap<RegionId, usize> = HashMap::new();
    let mut edges: HashMap<RegionId, usize> = HashMap::new();
    for at in grid.open_cells() {
        let Some(region) = grid.region(at) else {
            panic!("open cell {at:?} has no region");
        };
        if room_regions.contains(&region) {
            continue;
        }
        *cells.entry(region).or_default() += 1;
        for dir in [Direction::East, Direction::South] {
            if let Some(next) = grid.bounds().step(at, dir, 1) {
                if grid.region(next) == Some(region) {
                    *edges.entry(region).or_default() += 1;
                }
            }
        }
    }

    assert!(!cells.is_empty());
    for (region, count) in cells {
        let edge_count = edges.get(&region).copied().unwrap_or(0);
        assert_eq!(count, edge_count + 1, "maze region {region} has a cycle or a gap");
    }
}

/// Cells whose two open neighbours sit on opposite sides
fn straight_cells(grid: &Grid) -> usize {
    grid.open_cells()
        .filter(|&at| {
            let open: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&dir| {
                    grid.bounds()
                        .step(at, dir, 1)
                        .is_some_and(|n| grid.tile(n).is_open())
                })
                .collect();
            open.len() == 2 && open[0].opposite() == open[1]
        })
        .count()
}

#[test]
fn test_winding_percent_controls_turns() {
    let mut straight = 0;
    let mut winding = 0;
    for seed in 0..12 {
        let seed = format!("winding-{seed}");
        straight += straight_cells(staged(41, 41, &seed, 0, 0).grid());
        winding += straight_cells(staged(41, 41, &seed, 0, 100).grid());
    }
    assert!(
        straight > winding,
        "winding 0 gave {straight} straight cells, winding 100 gave {winding}"
    );
}

#[test]
fn test_start_index_offsets_room_indices() {
    let opts = GeneratorOptions::new(30, 30)
        .with_seed("offset")
        .with_room_tries(80)
        .with_start_index(-3);
    let dungeon = Dungeon::generate(&opts).unwrap();
    for (i, room) in dungeon.rooms().iter().enumerate() {
        assert_eq!(room.index, i as i64 - 3);
    }
}

#[test]
fn test_extra_connectors_keep_invariants() {
    let opts = GeneratorOptions::new(31, 31)
        .with_seed("extra")
        .with_room_tries(60)
        .with_extra_connector_chance(Some(1));
    let looped = Dungeon::generate(&opts).unwrap();
    for door in looped.doors() {
        assert!(!looped.bounds().on_border(door));
    }
    if looped.connectivity().is_complete() {
        assert_connected(looped.grid());
    }
    assert_no_dead_ends(looped.grid());
}

#[test]
fn test_different_seeds_differ() {
    let a = Dungeon::generate(&GeneratorOptions::new(31, 31).with_seed("one")).unwrap();
    let b = Dungeon::generate(&GeneratorOptions::new(31, 31).with_seed("two")).unwrap();
    assert_ne!(a.grid(), b.grid());
}

fn options_strategy() -> impl Strategy<Value = GeneratorOptions> {
    (
        5usize..45,
        5usize..45,
        "[a-z0-9]{0,8}",
        1u32..120,
        0u32..4,
        0u32..=100,
    )
        .prop_map(|(height, width, seed, tries, extra, winding)| {
            GeneratorOptions::new(height, width)
                .with_seed(seed)
                .with_room_tries(tries)
                .with_extra_room_size(extra)
                .with_winding_percent(winding)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_generation_is_deterministic(opts in options_strategy()) {
        let a = Dungeon::generate(&opts).unwrap();
        let b = Dungeon::generate(&opts).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_rooms_never_overlap_and_keep_margin(opts in options_strategy()) {
        let dungeon = Dungeon::generate(&opts).unwrap();
        let rooms = dungeon.rooms();
        for (i, a) in rooms.iter().enumerate() {
            prop_assert!(a.x >= 2 && a.y >= 2);
            prop_assert!(a.right() <= opts.width - 2);
            prop_assert!(a.bottom() <= opts.height - 2);
            for b in &rooms[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn test_finished_dungeon_has_no_dead_ends(opts in options_strategy()) {
        let dungeon = Dungeon::generate(&opts).unwrap();
        for at in dungeon.grid().open_cells() {
            prop_assert!(dungeon.grid().open_neighbours(at) >= 2);
        }
    }

    #[test]
    fn test_complete_connectivity_means_one_component(opts in options_strategy()) {
        let dungeon = Dungeon::generate(&opts).unwrap();
        if dungeon.connectivity().is_complete() {
            let grid = dungeon.grid();
            prop_assert_eq!(reachable(grid), grid.open_cells().count());
        }
    }

    #[test]
    fn test_border_is_never_carved(opts in options_strategy()) {
        let dungeon = Dungeon::generate(&opts).unwrap();
        let bounds = dungeon.bounds();
        for at in bounds.column_major().filter(|&at| bounds.on_border(at)) {
            prop_assert_eq!(dungeon.grid().tile(at), Tile::Wall);
        }
    }

    #[test]
    fn test_pruning_reaches_fixpoint(seed in "[a-z]{1,6}", tries in 0u32..60) {
        let mut generator = staged(27, 33, &seed, tries, 40);
        generator.connect_regions();
        generator.remove_dead_ends();
        let settled = generator.grid().clone();
        prop_assert_eq!(generator.remove_dead_ends(), 0);
        prop_assert_eq!(generator.grid(), &settled);
    }
}
