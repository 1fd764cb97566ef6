// grid.rs - Sparse grid types for Conway's Game of Life

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::debug;

// Moore neighborhood offsets
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 1), (1, 0), (1, -1),
    (0, 1),         (0, -1),
    (-1, 1), (-1, 0), (-1, -1),
];

/// Integer lattice position, used as the grid key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The surrounding positions. Positions past the `i32` range do not
    /// exist, so cells on the lattice edge have fewer than 8.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            Some(Coord::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
        })
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Tracked state of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    alive: bool,
    neighbors: u8,    // live cells among the 8 neighbors
    next_alive: bool, // only meaningful inside `advance`
}

impl Cell {
    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn neighbors(&self) -> u8 {
        self.neighbors
    }
}

/// B3/S23.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Births and deaths committed by one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    pub births: usize,
    pub deaths: usize,
}

/// Unbounded Life grid that only tracks live cells and their dead neighbors.
///
/// Every record is either alive or has at least one live neighbor, and its
/// neighbor count always matches the live records around it.
#[derive(Debug, Clone, Default)]
pub struct SparseGrid {
    cells: HashMap<Coord, Cell>,
}

impl SparseGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked records (live cells plus their dead frontier).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn population(&self) -> usize {
        self.cells.values().filter(|cell| cell.alive).count()
    }

    pub fn cell(&self, pos: Coord) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    pub fn is_alive(&self, pos: Coord) -> bool {
        self.cells.get(&pos).is_some_and(|cell| cell.alive)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.cells.iter().map(|(&pos, cell)| (pos, cell))
    }

    /// Visits every record once, in no particular order.
    pub fn for_each_cell<F: FnMut(Coord, bool)>(&self, mut visit: F) {
        for (&pos, cell) in &self.cells {
            visit(pos, cell.alive);
        }
    }

    /// Makes `pos` alive. Returns false if it already was.
    pub fn paint_alive(&mut self, pos: Coord) -> bool {
        if self.is_alive(pos) {
            return false;
        }
        self.set_alive(pos, true);
        true
    }

    /// Kills `pos` if it is alive, then drops isolated dead records.
    pub fn erase_alive(&mut self, pos: Coord) -> bool {
        if !self.is_alive(pos) {
            return false;
        }
        self.set_alive(pos, false);
        self.prune();
        true
    }

    pub fn clear(&mut self) {
        self.cells = HashMap::new();
    }

    /// Advances one generation.
    pub fn advance(&mut self) -> StepStats {
        // Compute against the current counts only.
        for cell in self.cells.values_mut() {
            cell.next_alive = next_state(cell.alive, cell.neighbors);
        }

        // Commit. Propagation touches counts of other records, so flips are
        // collected before any of them is applied.
        let flips: Vec<(Coord, bool)> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.next_alive != cell.alive)
            .map(|(&pos, cell)| (pos, cell.next_alive))
            .collect();

        let mut stats = StepStats::default();
        for (pos, alive) in flips {
            self.set_alive(pos, alive);
            if alive {
                stats.births += 1;
            } else {
                stats.deaths += 1;
            }
        }

        self.prune();
        debug!(
            "advance: +{} -{}, {} records tracked",
            stats.births,
            stats.deaths,
            self.cells.len()
        );
        stats
    }

    // Must be called once per actual flip, or neighbor counts drift.
    fn set_alive(&mut self, pos: Coord, alive: bool) {
        self.cells.entry(pos).or_default().alive = alive;

        for neighbor in pos.neighbors() {
            match self.cells.entry(neighbor) {
                Entry::Occupied(mut entry) => {
                    let cell = entry.get_mut();
                    if alive {
                        cell.neighbors += 1;
                    } else {
                        cell.neighbors -= 1;
                    }
                }
                Entry::Vacant(entry) => {
                    // A decrement always targets a tracked neighbor.
                    debug_assert!(alive, "untracked neighbor {neighbor:?} of dying cell {pos:?}");
                    if alive {
                        entry.insert(Cell {
                            alive: false,
                            neighbors: 1,
                            next_alive: false,
                        });
                    }
                }
            }
        }
    }

    fn prune(&mut self) {
        self.cells.retain(|_, cell| cell.alive || cell.neighbors > 0);
    }
}
