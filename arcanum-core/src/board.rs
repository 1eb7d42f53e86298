//! Board geometry: coordinates, hex adjacency, BFS distance

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Number of columns (A-K)
pub const NUM_COLS: u8 = 11;

/// Row range (inclusive)
pub const MIN_ROW: u8 = 1;
pub const MAX_ROW: u8 = 13;

/// The three contested control points ("mystic zones"): E7, G7, I7
pub const CONTROL_POINTS: [Coord; 3] = [
    Coord::new(4, 7),
    Coord::new(6, 7),
    Coord::new(8, 7),
];

/// A board cell, addressed by column (0-10, displayed A-K) and row (1-13).
///
/// The board is a rectangular grid carrying a hexagonal adjacency rule, so
/// neighbor sets depend on row parity (see [`Coord::neighbors`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        self.col < NUM_COLS && self.row >= MIN_ROW && self.row <= MAX_ROW
    }

    /// Iterate every cell on the board
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..NUM_COLS).flat_map(|col| (MIN_ROW..=MAX_ROW).map(move |row| Coord::new(col, row)))
    }

    /// Valid hex neighbors of this cell.
    ///
    /// Base neighbors are above/below in the same column and left/right in
    /// the same row. The diagonal pair depends on row parity: odd rows
    /// connect to (col+1, row+-1), even rows to (col-1, row+-1). Swapping
    /// the parity breaks reachability symmetry.
    pub fn neighbors(&self) -> Vec<Coord> {
        let col = self.col as i16;
        let row = self.row as i16;

        let mut candidates = vec![
            (col, row - 1),
            (col, row + 1),
            (col - 1, row),
            (col + 1, row),
        ];

        if row % 2 == 1 {
            candidates.push((col + 1, row - 1));
            candidates.push((col + 1, row + 1));
        } else {
            candidates.push((col - 1, row - 1));
            candidates.push((col - 1, row + 1));
        }

        candidates
            .into_iter()
            .filter(|&(c, r)| c >= 0 && r >= 0)
            .map(|(c, r)| Coord::new(c as u8, r as u8))
            .filter(Coord::is_valid)
            .collect()
    }

    /// Shortest-path distance to `other` over the adjacency graph, by BFS.
    ///
    /// Returns `None` when either end is off the board or no path exists.
    /// The board is small enough that plain BFS is the right tool, and unit
    /// edge weights make the result tie-free.
    pub fn distance_to(&self, other: Coord) -> Option<u32> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }

        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();
        queue.push_back((*self, 0u32));
        visited.insert(*self);

        while let Some((current, dist)) = queue.pop_front() {
            if current == other {
                return Some(dist);
            }
            for neighbor in current.neighbors() {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, dist + 1));
                }
            }
        }

        None
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row)
    }
}
