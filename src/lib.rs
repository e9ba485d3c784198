#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod board;
mod common;
mod config;
mod engine;
mod game;
#[cfg(feature = "std")]
mod logging;
mod session;
mod ship;
pub mod sim;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use engine::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use session::*;
pub use ship::*;
pub use sim::{simulate_match, MatchReport};
