//! 2048 board rules: slide, merge, spawn.

use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Side length of the square board.
pub const TILE_COUNT_PER_ROW_OR_COLUMN: usize = 4;

const SIZE: usize = TILE_COUNT_PER_ROW_OR_COLUMN;

/// Largest tile a 4×4 board can ever hold.
pub const MAX_TILE: u32 = 1 << 17;

/// Tile values row by row; `0` marks an empty cell.
pub type Grid = [[u32; SIZE]; SIZE];

/// Direction the player pushes the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

/// Outcome of a single move before any tile is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Whether any tile moved or merged.
    pub moved: bool,
    /// Sum of the tiles produced by merges.
    pub points: u32,
}

/// True for an empty cell or a power of two between 2 and [`MAX_TILE`].
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

/// A 2048 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: Grid,
}

impl Board {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board holding `cells` as given; callers check tiles with [`is_valid_tile`].
    pub fn from_grid(cells: Grid) -> Self {
        Self { cells }
    }

    /// Current tile values.
    pub fn grid(&self) -> Grid {
        self.cells
    }

    /// Fresh game board with two starting tiles.
    pub fn start<R: Rng>(rng: &mut R) -> Self {
        let mut board = Self::new();
        board.spawn_tile(rng);
        board.spawn_tile(rng);
        board
    }

    /// Apply a player move; on change spawn one new tile.
    pub fn play<R: Rng>(&mut self, direction: Direction, rng: &mut R) -> SlideOutcome {
        let outcome = self.slide(direction);
        if outcome.moved {
            self.spawn_tile(rng);
        }
        outcome
    }

    /// Compact and merge every line toward `direction` without spawning.
    pub fn slide(&mut self, direction: Direction) -> SlideOutcome {
        let mut outcome = SlideOutcome {
            moved: false,
            points: 0,
        };

        for index in 0..SIZE {
            let line = self.line(direction, index);
            let (merged, points) = merge_line(line);
            if merged != line {
                outcome.moved = true;
                self.set_line(direction, index, merged);
            }
            outcome.points = outcome.points.saturating_add(points);
        }

        outcome
    }

    /// Place a 2 (90%) or a 4 (10%) on a random empty cell.
    ///
    /// Returns the cell coordinates, or `None` when the board is full.
    pub fn spawn_tile<R: Rng>(&mut self, rng: &mut R) -> Option<(usize, usize)> {
        let empty: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col] == 0)
            .collect();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.random_range(0..empty.len())];
        self.cells[row][col] = if rng.random_bool(0.9) { 2 } else { 4 };
        Some((row, col))
    }

    /// True when no move can change the board.
    pub fn is_game_over(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.cells[row][col];
                if value == 0 {
                    return false;
                }
                if col + 1 < SIZE && self.cells[row][col + 1] == value {
                    return false;
                }
                if row + 1 < SIZE && self.cells[row + 1][col] == value {
                    return false;
                }
            }
        }
        true
    }

    /// Highest tile on the board, `0` when empty.
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    // Lines are read so that index 0 is the side tiles move toward.
    fn line(&self, direction: Direction, index: usize) -> [u32; SIZE] {
        let mut line = [0; SIZE];
        for (offset, slot) in line.iter_mut().enumerate() {
            let (row, col) = cell_for(direction, index, offset);
            *slot = self.cells[row][col];
        }
        line
    }

    fn set_line(&mut self, direction: Direction, index: usize, line: [u32; SIZE]) {
        for (offset, value) in line.into_iter().enumerate() {
            let (row, col) = cell_for(direction, index, offset);
            self.cells[row][col] = value;
        }
    }
}

fn cell_for(direction: Direction, index: usize, offset: usize) -> (usize, usize) {
    match direction {
        Direction::Left => (index, offset),
        Direction::Right => (index, SIZE - 1 - offset),
        Direction::Up => (offset, index),
        Direction::Down => (SIZE - 1 - offset, index),
    }
}

/// Compact one line toward index 0, merging each tile at most once.
fn merge_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let mut result = [0; SIZE];
    let mut points: u32 = 0;
    let mut write = 0;
    let mut pending: Option<u32> = None;

    for value in line.into_iter().filter(|&value| value != 0) {
        match pending {
            Some(previous) if previous == value => {
                let merged = previous.saturating_mul(2);
                result[write] = merged;
                points = points.saturating_add(merged);
                write += 1;
                pending = None;
            }
            Some(previous) => {
                result[write] = previous;
                write += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(previous) = pending {
        result[write] = previous;
    }

    (result, points)
}
