//! Common types for the game core: grid coordinates, orientation and board errors.

use core::fmt;

use crate::config::BOARD_SIZE;
use crate::ship::ShipType;

/// A (row, column) coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the coordinate lies on the 10×10 grid.
    pub const fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Orthogonal neighbours inside the grid, in up, down, left, right order.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        let up = self.row.checked_sub(1).map(|r| Position::new(r, self.col));
        let down = self.row.checked_add(1).map(|r| Position::new(r, self.col));
        let left = self.col.checked_sub(1).map(|c| Position::new(self.row, c));
        let right = self.col.checked_add(1).map(|c| Position::new(self.row, c));
        [up, down, left, right]
            .into_iter()
            .flatten()
            .filter(Position::in_bounds)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

/// Board notation: column letter followed by the 1-based row, e.g. `A1`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < 26 {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation of the line through two positions: same row is horizontal,
    /// anything else counts as vertical.
    pub fn of_line(a: Position, b: Position) -> Self {
        if a.row == b.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Returns `true` if `other` lies on the line through `anchor` in this orientation.
    pub fn on_line(self, anchor: Position, other: Position) -> bool {
        match self {
            Orientation::Horizontal => anchor.row == other.row,
            Orientation::Vertical => anchor.col == other.col,
        }
    }
}

/// Errors returned by board placement and firing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate is outside the grid.
    InvalidPosition(Position),
    /// Ship footprint leaves the grid.
    ShipOutOfBounds,
    /// Ship footprint overlaps an occupied cell.
    ShipOverlaps,
    /// Random placement ran out of attempts for this ship.
    UnableToPlaceShip(ShipType),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidPosition(pos) => {
                write!(f, "Position ({}, {}) is off the board", pos.row, pos.col)
            }
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::UnableToPlaceShip(ship) => {
                write!(f, "Unable to place {} after repeated attempts", ship.name())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
