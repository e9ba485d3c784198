//! Computer-vs-computer matches, used by the `sim` binary.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::AgentState;
use crate::config::BOARD_SIZE;
use crate::engine;
use crate::game::{GameError, Phase, Side};

/// Summary of a finished simulated match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchReport {
    pub seed: u64,
    pub winner: Side,
    pub player_shots: usize,
    pub opponent_shots: usize,
    pub player_ships_left: usize,
    pub opponent_ships_left: usize,
}

/// Play a full match from `seed`. The player side seeds its fleet at random
/// and fires with its own targeting agent against the opponent board.
pub fn simulate_match(seed: u64) -> Result<MatchReport, GameError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = engine::initialize_game(&mut rng)?;
    state.place_player_fleet_randomly(&mut rng)?;

    let mut gunner = AgentState::new();
    let mut opponent = AgentState::new();
    let mut player_shots = 0;
    let mut opponent_shots = 0;
    let budget = 2 * BOARD_SIZE * BOARD_SIZE;

    while state.phase() == Phase::Playing {
        if player_shots + opponent_shots >= budget {
            return Err(GameError::Stalled);
        }
        match state.turn() {
            Side::Player => {
                let view = state.opponent_board().masked();
                let target = gunner.select_target(&mut rng, &view);
                let report = state.player_fire(target)?;
                let view = state.opponent_board().masked();
                gunner.record_outcome(&view, target, report.hit, report.sunk.is_some());
                player_shots += 1;
            }
            Side::Opponent => {
                state.opponent_fire(&mut opponent, &mut rng)?;
                opponent_shots += 1;
            }
        }
    }

    let winner = state.winner().ok_or(GameError::WrongPhase)?;
    log::debug!(
        "seed {}: {:?} won after {} player and {} opponent shots",
        seed,
        winner,
        player_shots,
        opponent_shots
    );
    Ok(MatchReport {
        seed,
        winner,
        player_shots,
        opponent_shots,
        player_ships_left: state.player_fleet().remaining(),
        opponent_ships_left: state.opponent_fleet().remaining(),
    })
}
