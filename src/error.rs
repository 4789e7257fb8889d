//! Error types for the Tic-Tac-Total solver

use thiserror::Error;

use crate::t3::Player;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({col}, {row}) is already occupied")]
    OccupiedCell { col: u8, row: u8 },

    #[error("cell ({col}, {row}) is outside the 3x3 board")]
    OutOfBounds { col: u8, row: u8 },

    #[error("value {value} is not playable by the {player} player")]
    IllegalValue { value: u8, player: Player },

    #[error("game already over")]
    GameOver,

    #[error("non-terminal state has no available moves")]
    NoMovesAvailable,

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error(
        "invalid value counts: odd={odd_count}, even={even_count} (must be equal or differ by 1)"
    )]
    InvalidValueCounts { odd_count: usize, even_count: usize },

    #[error("invalid player '{player}' in '{label}' (expected 'O' or 'E')")]
    InvalidPlayerString { player: String, label: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
