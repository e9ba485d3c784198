// Hunt/target search for the computer opponent.
// Hunt mode fires uniformly at random over unfired cells; target mode works
// through a queue of follow-up cells around a damaged ship.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{Orientation, Position};

/// Search mode of the targeting agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// No active target.
    #[default]
    Hunt,
    /// Pursuing a damaged, not yet sunk ship.
    Target,
}

/// Search state of the targeting agent, owned by the match session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    mode: Mode,
    target_queue: VecDeque<Position>,
    hit_streak: Vec<Position>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to hunting with no queued targets and no hit streak.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Follow-up cells, next candidate first.
    pub fn target_queue(&self) -> &VecDeque<Position> {
        &self.target_queue
    }

    /// Hits on the ship currently pursued, oldest first.
    pub fn hit_streak(&self) -> &[Position] {
        &self.hit_streak
    }

    /// Choose the next cell to fire at on `board`.
    pub fn select_target<R: Rng + ?Sized>(&mut self, rng: &mut R, board: &Board) -> Position {
        if self.mode == Mode::Target && !self.target_queue.is_empty() {
            while let Some(pos) = self.target_queue.pop_front() {
                if board.is_unfired(pos) {
                    return pos;
                }
            }
            log::trace!("target queue exhausted, back to hunting");
            self.mode = Mode::Hunt;
        }
        hunt(rng, board)
    }

    /// Learn from the resolved shot at `target`; `board` is the board after the shot.
    pub fn record_outcome(&mut self, board: &Board, target: Position, hit: bool, sunk: bool) {
        if !hit {
            return;
        }
        if sunk {
            log::trace!("ship sunk at {}, back to hunting", target);
            self.hit_streak.clear();
            self.target_queue.clear();
            self.mode = Mode::Hunt;
            return;
        }

        self.hit_streak.push(target);
        if self.mode == Mode::Hunt {
            log::trace!("hit at {}, targeting", target);
        }
        self.mode = Mode::Target;

        let fresh = |p: &Position| board.is_unfired(*p);
        match self.hit_streak.as_slice() {
            [.., a, b] => {
                let line = Orientation::of_line(*a, *b);
                let (aligned, across): (Vec<Position>, Vec<Position>) =
                    target.neighbors().partition(|&p| line.on_line(target, p));

                // Cells on the hull line go first, including ones queued by earlier hits.
                let mut merged: Vec<Position> = Vec::new();
                let candidates = aligned
                    .into_iter()
                    .chain(self.target_queue.drain(..))
                    .chain(across);
                for p in candidates.filter(fresh) {
                    if !merged.contains(&p) {
                        merged.push(p);
                    }
                }
                let (front, back): (Vec<Position>, Vec<Position>) =
                    merged.into_iter().partition(|&p| line.on_line(target, p));
                self.target_queue.extend(front);
                self.target_queue.extend(back);
            }
            _ => {
                for p in target.neighbors().filter(fresh) {
                    if !self.target_queue.contains(&p) {
                        self.target_queue.push_back(p);
                    }
                }
            }
        }
    }
}

/// Uniformly random unfired cell; `(0, 0)` when none remain.
fn hunt<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Position {
    let candidates = board.unfired_positions();
    if candidates.is_empty() {
        log::warn!("no unfired cells left, falling back to A1");
        return Position::new(0, 0);
    }
    candidates[rng.random_range(0..candidates.len())]
}
