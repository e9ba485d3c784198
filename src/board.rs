//! The 10×10 grid of cells owned by one side.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Position;
use crate::config::BOARD_SIZE;
use crate::ship::ShipType;

/// State of one grid square.
///
/// Legal transitions are `Empty -> Occupied` during placement and
/// `Occupied -> Hit` / `Empty -> Miss` during firing. `Hit` and `Miss` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Occupied(ShipType),
    Hit(ShipType),
    Miss,
}

impl Cell {
    /// Ship type tagged on this cell, if any.
    pub fn occupant(&self) -> Option<ShipType> {
        match *self {
            Cell::Occupied(t) | Cell::Hit(t) => Some(t),
            Cell::Empty | Cell::Miss => None,
        }
    }

    /// Already fired upon.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Cell::Hit(_) | Cell::Miss)
    }

    /// Not fired upon yet.
    pub fn is_unfired(&self) -> bool {
        !self.is_resolved()
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(ShipType::Carrier) => 'C',
            Cell::Occupied(ShipType::Battleship) => 'B',
            Cell::Occupied(ShipType::Cruiser) => 'R',
            Cell::Occupied(ShipType::Submarine) => 'S',
            Cell::Occupied(ShipType::Destroyer) => 'D',
            Cell::Hit(_) => 'X',
            Cell::Miss => 'o',
        }
    }
}

/// A side's board. Cheap to copy so engine operations can return new values.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub const fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Cell at `pos`, or `None` off the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.in_bounds() {
            Some(self.cells[pos.row][pos.col])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row][pos.col] = cell;
    }

    /// `true` for in-grid cells that have not been fired upon.
    pub fn is_unfired(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|c| c.is_unfired())
    }

    /// All coordinates in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }

    pub fn unfired_positions(&self) -> Vec<Position> {
        Self::positions().filter(|&p| self.is_unfired(p)).collect()
    }

    /// Number of cells matching `pred`.
    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&Cell) -> bool,
    {
        self.cells.iter().flatten().filter(|c| pred(*c)).count()
    }

    /// The view the other side gets: ships not yet hit are hidden.
    pub fn masked(&self) -> Board {
        let mut view = *self;
        for row in view.cells.iter_mut() {
            for cell in row.iter_mut() {
                if let Cell::Occupied(_) = cell {
                    *cell = Cell::Empty;
                }
            }
        }
        view
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            if r + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        writeln!(f, "{}", self)?;
        write!(f, "}}")
    }
}
