use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::AgentState;
use crate::common::{BoardError, Orientation, Position};
use crate::engine;
use crate::game::{GameError, GameState, TurnReport};
use crate::ship::ShipType;

/// One human-vs-computer match session: the game state, the opponent's
/// targeting state and the random source both draw from.
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    agent: AgentState,
    rng: SmallRng,
}

impl Session {
    /// Start a session with an entropy-seeded RNG.
    #[cfg(feature = "std")]
    pub fn new() -> Result<Self, BoardError> {
        let mut seed_rng = rand::rng();
        Self::with_rng(SmallRng::from_rng(&mut seed_rng))
    }

    /// Start a reproducible session.
    pub fn with_seed(seed: u64) -> Result<Self, BoardError> {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: SmallRng) -> Result<Self, BoardError> {
        let state = engine::initialize_game(&mut rng)?;
        Ok(Self {
            state,
            agent: AgentState::new(),
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    /// Throw the current match away and start over.
    pub fn new_game(&mut self) -> Result<(), BoardError> {
        self.state = engine::initialize_game(&mut self.rng)?;
        self.agent.reset();
        log::debug!("new game started");
        Ok(())
    }

    pub fn place_ship(
        &mut self,
        ship_type: ShipType,
        start: Position,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.state.place_player_ship(ship_type, start, orientation)
    }

    pub fn place_fleet_randomly(&mut self) -> Result<(), GameError> {
        self.state.place_player_fleet_randomly(&mut self.rng)
    }

    pub fn fire(&mut self, target: Position) -> Result<TurnReport, GameError> {
        self.state.player_fire(target)
    }

    /// Play the opponent's move. Any presentation delay belongs to the caller.
    pub fn opponent_turn(&mut self) -> Result<TurnReport, GameError> {
        self.state.opponent_fire(&mut self.agent, &mut self.rng)
    }
}
