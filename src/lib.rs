//! Tic-Tac-Total solver
//!
//! This crate provides:
//! - An exhaustive minimax solver with alpha-beta pruning, generic over an
//!   abstract game-state contract
//! - A complete Tic-Tac-Total game implementation with validation
//! - Deterministic tie-breaking between equally optimal moves (column, then
//!   row, then placed value) and a guaranteed preference for immediate wins

pub mod error;
pub mod game;
pub mod search;
pub mod t3;

pub use error::{Error, Result};
pub use game::GameState;
pub use search::choose;
pub use t3::{BoardState, Move, Player};
