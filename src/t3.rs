//! Tic-Tac-Total game implementation

pub mod board;
pub mod lines;

pub use board::{BoardState, Move, Player};
pub use lines::{LineAnalyzer, TARGET_SUM, WINNING_LINES};
