//! Stateless game engine: placement, firing and win detection.
//!
//! Every operation takes its inputs by reference and hands back new values,
//! so earlier boards and fleets stay inspectable.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, Cell};
use crate::common::{BoardError, Orientation, Position};
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS, MAX_SEEDING_ROUNDS};
use crate::game::GameState;
use crate::ship::{Fleet, Ship};

/// Board and ship after a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub ship: Ship,
}

/// Board and fleet after seeding a whole fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub board: Board,
    pub fleet: Fleet,
}

/// Outcome of firing at one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotResolution {
    pub board: Board,
    pub fleet: Fleet,
    pub hit: bool,
    /// The ship this shot finished off, if any.
    pub sunk: Option<Ship>,
}

/// `size` consecutive coordinates from `start`, along columns when horizontal
/// and along rows otherwise. No bounds checking; coordinates saturate at
/// `usize::MAX`.
pub fn compute_ship_footprint(size: usize, start: Position, orientation: Orientation) -> Vec<Position> {
    (0..size)
        .map(|i| match orientation {
            Orientation::Horizontal => Position::new(start.row, start.col.saturating_add(i)),
            Orientation::Vertical => Position::new(start.row.saturating_add(i), start.col),
        })
        .collect()
}

fn check_placement(
    board: &Board,
    ship: &Ship,
    start: Position,
    orientation: Orientation,
) -> Result<Vec<Position>, BoardError> {
    if !start.in_bounds() {
        return Err(BoardError::ShipOutOfBounds);
    }
    let footprint = compute_ship_footprint(ship.size(), start, orientation);
    for &pos in &footprint {
        match board.get(pos) {
            None => return Err(BoardError::ShipOutOfBounds),
            Some(Cell::Occupied(_)) => return Err(BoardError::ShipOverlaps),
            Some(_) => {}
        }
    }
    Ok(footprint)
}

/// `true` iff the whole footprint is on the grid and none of it is occupied.
pub fn can_place(board: &Board, ship: &Ship, start: Position, orientation: Orientation) -> bool {
    check_placement(board, ship, start, orientation).is_ok()
}

/// Place `ship` on a copy of `board`.
pub fn place(
    board: &Board,
    ship: &Ship,
    start: Position,
    orientation: Orientation,
) -> Result<Placement, BoardError> {
    let footprint = check_placement(board, ship, start, orientation)?;
    let mut new_board = *board;
    for &pos in &footprint {
        new_board.set(pos, Cell::Occupied(ship.ship_type()));
    }
    log::debug!(
        "placed {} at {} ({:?})",
        ship.ship_type(),
        start,
        orientation
    );
    Ok(Placement {
        board: new_board,
        ship: ship.with_positions(footprint),
    })
}

/// Seed every unplaced ship of `fleet` onto `board` at random.
///
/// Each ship gets [`MAX_PLACEMENT_ATTEMPTS`] tries with a 50/50 orientation and
/// a start drawn so the footprint stays on the grid.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    fleet: &Fleet,
) -> Result<Deployment, BoardError> {
    let mut board = *board;
    let mut fleet = fleet.clone();
    for ship_type in FLEET {
        let ship = fleet.get(ship_type);
        if ship.is_placed() {
            continue;
        }
        let size = ship.size();
        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_row, max_col) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE, BOARD_SIZE - size + 1),
                Orientation::Vertical => (BOARD_SIZE - size + 1, BOARD_SIZE),
            };
            let start = Position::new(rng.random_range(0..max_row), rng.random_range(0..max_col));
            if let Ok(p) = place(&board, ship, start, orientation) {
                placed = Some(p);
                break;
            }
        }
        match placed {
            Some(p) => {
                board = p.board;
                fleet.replace(p.ship);
            }
            None => {
                log::warn!("failed to place {} randomly", ship_type);
                return Err(BoardError::UnableToPlaceShip(ship_type));
            }
        }
    }
    Ok(Deployment { board, fleet })
}

/// Fire at `pos`. Firing at an already resolved cell is a no-op reporting a miss.
pub fn fire_at(board: &Board, fleet: &Fleet, pos: Position) -> Result<ShotResolution, BoardError> {
    let cell = board.get(pos).ok_or(BoardError::InvalidPosition(pos))?;
    let mut new_board = *board;
    let mut new_fleet = fleet.clone();
    let mut hit = false;
    let mut sunk = None;

    match cell {
        Cell::Hit(_) | Cell::Miss => {
            log::debug!("redundant shot at {}", pos);
        }
        Cell::Occupied(ship_type) => {
            new_board.set(pos, Cell::Hit(ship_type));
            hit = true;
            let ship = new_fleet.get_mut(ship_type);
            ship.register_hit();
            if ship.is_sunk() {
                sunk = Some(ship.clone());
            }
            log::debug!("hit {} at {}", ship_type, pos);
        }
        Cell::Empty => {
            new_board.set(pos, Cell::Miss);
            log::debug!("miss at {}", pos);
        }
    }

    Ok(ShotResolution {
        board: new_board,
        fleet: new_fleet,
        hit,
        sunk,
    })
}

/// The win condition: every ship of the fleet is sunk.
pub fn is_fleet_destroyed(fleet: &Fleet) -> bool {
    fleet.iter().all(Ship::is_sunk)
}

/// Start a match: empty boards, fresh fleets, the opponent fleet seeded at
/// random, the player to place ships.
///
/// Seeding is retried from an empty board up to [`MAX_SEEDING_ROUNDS`] times
/// before the fault is returned.
pub fn initialize_game<R: Rng + ?Sized>(rng: &mut R) -> Result<GameState, BoardError> {
    let mut last_err = None;
    for round in 0..MAX_SEEDING_ROUNDS {
        match place_fleet_randomly(rng, &Board::new(), &Fleet::new()) {
            Ok(deployment) => return Ok(GameState::new(deployment)),
            Err(e) => {
                log::warn!("opponent fleet seeding round {} failed: {}", round + 1, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or(BoardError::UnableToPlaceShip(FLEET[0])))
}
