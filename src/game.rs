//! Match state: phase, turn, both sides' boards and fleets, and the winner.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use rand::Rng;

use crate::ai::AgentState;
use crate::board::Board;
use crate::common::{BoardError, Orientation, Position};
use crate::engine::{self, Deployment};
use crate::ship::{Fleet, ShipType};

const MSG_SETUP: &str = "Place your ships!";
const MSG_PLACING: &str = "Select a ship and place it on your board.";
const MSG_READY: &str = "All ships placed! Your turn - attack the enemy!";
const MSG_VICTORY: &str = "VICTORY! You destroyed the enemy fleet!";
const MSG_DEFEAT: &str = "DEFEAT! Your fleet has been destroyed!";

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    Playing,
    GameOver,
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Opponent,
}

/// What happened on one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub shooter: Side,
    pub target: Position,
    pub hit: bool,
    pub sunk: Option<ShipType>,
    /// Set when this shot ended the match.
    pub winner: Option<Side>,
}

/// Errors from driving a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Operation not allowed in the current phase.
    WrongPhase,
    /// The other side is to move.
    NotYourTurn,
    /// This ship type is already on the board.
    ShipAlreadyPlaced(ShipType),
    /// The cell was fired upon before.
    AlreadyFired(Position),
    /// A simulated match did not finish within its shot budget.
    Stalled,
    /// Underlying board error.
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase => write!(f, "Not allowed in the current game phase"),
            GameError::NotYourTurn => write!(f, "It is not this side's turn"),
            GameError::ShipAlreadyPlaced(t) => write!(f, "The {} is already placed", t),
            GameError::AlreadyFired(pos) => write!(f, "{} was already fired upon", pos),
            GameError::Stalled => write!(f, "Match did not finish within the shot budget"),
            GameError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            _ => None,
        }
    }
}

/// Per-match state. Replaced wholesale when a new game starts.
///
/// `winner` is set exactly when `phase` is [`Phase::GameOver`]. Deserialized
/// snapshots are checked against this and against board/fleet agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "GameStateRecord"))]
pub struct GameState {
    phase: Phase,
    turn: Side,
    player_board: Board,
    opponent_board: Board,
    player_fleet: Fleet,
    opponent_fleet: Fleet,
    winner: Option<Side>,
    message: String,
    last_shot: Option<Position>,
}

/// Unchecked wire form of [`GameState`].
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct GameStateRecord {
    phase: Phase,
    turn: Side,
    player_board: Board,
    opponent_board: Board,
    player_fleet: Fleet,
    opponent_fleet: Fleet,
    winner: Option<Side>,
    message: String,
    last_shot: Option<Position>,
}

#[cfg(feature = "std")]
impl TryFrom<GameStateRecord> for GameState {
    type Error = &'static str;

    fn try_from(r: GameStateRecord) -> Result<Self, Self::Error> {
        let state = GameState {
            phase: r.phase,
            turn: r.turn,
            player_board: r.player_board,
            opponent_board: r.opponent_board,
            player_fleet: r.player_fleet,
            opponent_fleet: r.opponent_fleet,
            winner: r.winner,
            message: r.message,
            last_shot: r.last_shot,
        };
        state.validate()?;
        Ok(state)
    }
}

impl GameState {
    /// Setup-phase state around an already seeded opponent fleet.
    pub(crate) fn new(opponent: Deployment) -> Self {
        Self {
            phase: Phase::Setup,
            turn: Side::Player,
            player_board: Board::new(),
            opponent_board: opponent.board,
            player_fleet: Fleet::new(),
            opponent_fleet: opponent.fleet,
            winner: None,
            message: MSG_SETUP.to_string(),
            last_shot: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Human-readable status line.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_shot(&self) -> Option<Position> {
        self.last_shot
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    pub fn player_fleet(&self) -> &Fleet {
        &self.player_fleet
    }

    pub fn opponent_fleet(&self) -> &Fleet {
        &self.opponent_fleet
    }

    /// Place one of the player's ships. A failed placement leaves the state untouched.
    pub fn place_player_ship(
        &mut self,
        ship_type: ShipType,
        start: Position,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::WrongPhase);
        }
        let ship = self.player_fleet.get(ship_type);
        if ship.is_placed() {
            return Err(GameError::ShipAlreadyPlaced(ship_type));
        }
        let placement = engine::place(&self.player_board, ship, start, orientation)?;
        self.player_board = placement.board;
        self.player_fleet.replace(placement.ship);
        self.after_placement();
        Ok(())
    }

    /// Seed all of the player's unplaced ships at random.
    pub fn place_player_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::WrongPhase);
        }
        let deployment = engine::place_fleet_randomly(rng, &self.player_board, &self.player_fleet)?;
        self.player_board = deployment.board;
        self.player_fleet = deployment.fleet;
        self.after_placement();
        Ok(())
    }

    fn after_placement(&mut self) {
        if self.player_fleet.all_placed() {
            self.phase = Phase::Playing;
            self.turn = Side::Player;
            self.message = MSG_READY.to_string();
        } else {
            self.message = MSG_PLACING.to_string();
        }
    }

    fn check_turn(&self, side: Side) -> Result<(), GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::WrongPhase);
        }
        if self.turn != side {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Resolve the player's shot on the opponent board.
    pub fn player_fire(&mut self, target: Position) -> Result<TurnReport, GameError> {
        self.check_turn(Side::Player)?;
        match self.opponent_board.get(target) {
            None => return Err(BoardError::InvalidPosition(target).into()),
            Some(cell) if cell.is_resolved() => return Err(GameError::AlreadyFired(target)),
            Some(_) => {}
        }

        let shot = engine::fire_at(&self.opponent_board, &self.opponent_fleet, target)?;
        self.opponent_board = shot.board;
        self.opponent_fleet = shot.fleet;
        self.last_shot = Some(target);
        let sunk = shot.sunk.map(|s| s.ship_type());

        let winner = if engine::is_fleet_destroyed(&self.opponent_fleet) {
            self.finish(Side::Player);
            Some(Side::Player)
        } else {
            self.message = match sunk {
                Some(t) => format!("You sunk their {}!", t),
                None if shot.hit => "HIT!".to_string(),
                None => "Miss...".to_string(),
            };
            self.turn = Side::Opponent;
            None
        };

        Ok(TurnReport {
            shooter: Side::Player,
            target,
            hit: shot.hit,
            sunk,
            winner,
        })
    }

    /// Let the targeting agent pick a cell on the player board, resolve it and
    /// feed the outcome back to the agent.
    pub fn opponent_fire<R: Rng + ?Sized>(
        &mut self,
        agent: &mut AgentState,
        rng: &mut R,
    ) -> Result<TurnReport, GameError> {
        self.check_turn(Side::Opponent)?;
        let target = agent.select_target(rng, &self.player_board);
        let shot = engine::fire_at(&self.player_board, &self.player_fleet, target)?;
        agent.record_outcome(&shot.board, target, shot.hit, shot.sunk.is_some());
        self.player_board = shot.board;
        self.player_fleet = shot.fleet;
        self.last_shot = Some(target);
        let sunk = shot.sunk.map(|s| s.ship_type());

        let winner = if engine::is_fleet_destroyed(&self.player_fleet) {
            self.finish(Side::Opponent);
            Some(Side::Opponent)
        } else {
            let what = match sunk {
                Some(t) => format!("Enemy sunk your {}!", t),
                None if shot.hit => "Enemy HIT your ship!".to_string(),
                None => "Enemy missed!".to_string(),
            };
            self.message = format!("{} Your turn!", what);
            self.turn = Side::Player;
            None
        };

        Ok(TurnReport {
            shooter: Side::Opponent,
            target,
            hit: shot.hit,
            sunk,
            winner,
        })
    }

    #[cfg(feature = "std")]
    fn validate(&self) -> Result<(), &'static str> {
        fleet_matches_board(&self.player_fleet, &self.player_board)?;
        fleet_matches_board(&self.opponent_fleet, &self.opponent_board)?;
        if !self.opponent_fleet.all_placed() {
            return Err("opponent fleet is not fully placed");
        }
        if self.phase != Phase::Setup && !self.player_fleet.all_placed() {
            return Err("player fleet is not fully placed");
        }
        match (self.phase, self.winner) {
            (Phase::GameOver, Some(Side::Player)) if !engine::is_fleet_destroyed(&self.opponent_fleet) => {
                Err("player won with the opponent fleet afloat")
            }
            (Phase::GameOver, Some(Side::Opponent)) if !engine::is_fleet_destroyed(&self.player_fleet) => {
                Err("opponent won with the player fleet afloat")
            }
            (Phase::GameOver, Some(_)) | (Phase::Setup | Phase::Playing, None) => Ok(()),
            (Phase::GameOver, None) => Err("finished game without a winner"),
            (_, Some(_)) => Err("winner set before the game is over"),
        }
    }

    fn finish(&mut self, winner: Side) {
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        self.message = match winner {
            Side::Player => MSG_VICTORY,
            Side::Opponent => MSG_DEFEAT,
        }
        .to_string();
        log::info!("game over, {:?} wins", winner);
    }
}

/// Every placed ship sits on cells tagged with its type, its hit count equals
/// its `Hit` cells, and no other cell carries a ship.
#[cfg(feature = "std")]
fn fleet_matches_board(fleet: &Fleet, board: &Board) -> Result<(), &'static str> {
    use crate::board::Cell;

    let mut ship_cells = 0;
    for ship in fleet.iter() {
        if !ship.is_placed() {
            if ship.hit_count() != 0 {
                return Err("unplaced ship has hits");
            }
            continue;
        }
        if ship.positions().len() != ship.size() {
            return Err("ship footprint has the wrong length");
        }
        let mut hits = 0;
        for &pos in ship.positions() {
            match board.get(pos) {
                Some(Cell::Occupied(t)) if t == ship.ship_type() => {}
                Some(Cell::Hit(t)) if t == ship.ship_type() => hits += 1,
                _ => return Err("ship footprint does not match the board"),
            }
        }
        if hits != ship.hit_count() {
            return Err("ship hit count does not match the board");
        }
        ship_cells += ship.size();
    }
    if board.count(|c| c.occupant().is_some()) != ship_cells {
        return Err("board has ship cells outside the fleet");
    }
    Ok(())
}
