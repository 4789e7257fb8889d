//! Board state representation and basic operations

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::game::GameState;

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Places the odd values 1, 3, 5; moves first by default
    Odds,
    /// Places the even values 2, 4, 6
    Evens,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::Odds => Player::Evens,
            Player::Evens => Player::Odds,
        }
    }

    /// The values this player may place, in ascending order.
    ///
    /// Ascending order matters: [`BoardState::legal_moves`] relies on it to
    /// emit moves already sorted by column, row, and value.
    pub fn values(self) -> [u8; 3] {
        match self {
            Player::Odds => [1, 3, 5],
            Player::Evens => [2, 4, 6],
        }
    }

    /// Whether this player is allowed to place the given value
    pub fn can_play(self, value: u8) -> bool {
        (1..=6).contains(&value)
            && match self {
                Player::Odds => value % 2 == 1,
                Player::Evens => value % 2 == 0,
            }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Odds => write!(f, "odds"),
            Player::Evens => write!(f, "evens"),
        }
    }
}

/// A numbered move: place `value` at (`col`, `row`).
///
/// Field order is load-bearing: the derived `Ord` compares column, then
/// row, then value, which is exactly the enumeration order the solver's
/// tie-breaking relies on.
///
/// # Examples
///
/// ```
/// use tictactotal::Move;
///
/// assert!(Move::new(0, 2, 5) < Move::new(1, 0, 1));
/// assert!(Move::new(1, 0, 1) < Move::new(1, 0, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    pub col: u8,
    pub row: u8,
    pub value: u8,
}

impl Move {
    /// Create a new move
    pub fn new(col: u8, row: u8, value: u8) -> Self {
        Move { col, row, value }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.value, self.col, self.row)
    }
}

/// Complete board state including cell values and whose turn it is
///
/// This type implements `Copy` for efficiency since it's only 10 bytes
/// (9 bytes for cells + 1 byte for the player enum). Cells hold 0 when
/// empty, otherwise the placed value 1-6; values are reusable, so the same
/// number may appear in several cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [u8; 9],
    pub to_move: Player,
}

/// Count of odd- and even-valued cells on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ValueCount {
    odd: usize,
    even: usize,
}

impl BoardState {
    /// Create a new empty board with Odds to move
    pub fn new() -> Self {
        Self::new_with_player(Player::Odds)
    }

    /// Create a new empty board with a specified player to move first
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [0; 9],
            to_move: first_player,
        }
    }

    fn index(col: u8, row: u8) -> usize {
        usize::from(row) * 3 + usize::from(col)
    }

    /// Get the value at a cell, 0 when empty
    pub fn get(&self, col: u8, row: u8) -> u8 {
        self.cells[Self::index(col, row)]
    }

    /// Check if a cell is open
    pub fn is_open(&self, col: u8, row: u8) -> bool {
        self.get(col, row) == 0
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Apply a move and return a new board state.
    ///
    /// # Errors
    ///
    /// Returns error if the cell is out of bounds or occupied, or if the
    /// value is not one the mover is allowed to place.
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, mv: Move) -> Result<BoardState, crate::Error> {
        if mv.col >= 3 || mv.row >= 3 {
            return Err(crate::Error::OutOfBounds {
                col: mv.col,
                row: mv.row,
            });
        }
        if !self.is_open(mv.col, mv.row) {
            return Err(crate::Error::OccupiedCell {
                col: mv.col,
                row: mv.row,
            });
        }
        if !self.to_move.can_play(mv.value) {
            return Err(crate::Error::IllegalValue {
                value: mv.value,
                player: self.to_move,
            });
        }

        let mut next = *self;
        next.cells[Self::index(mv.col, mv.row)] = mv.value;
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// Get legal moves in this position, sorted by column, row, value.
    ///
    /// Empty when the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        for col in 0..3 {
            for row in 0..3 {
                if !self.is_open(col, row) {
                    continue;
                }
                for value in self.to_move.values() {
                    moves.push(Move::new(col, row, value));
                }
            }
        }
        moves
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&0)
    }

    /// Check if the player who just moved completed a 13-sum line
    pub fn is_win(&self) -> bool {
        LineAnalyzer::has_target_sum(&self.cells)
    }

    /// Check if the game ended with a full board and no 13-sum line
    pub fn is_tie(&self) -> bool {
        self.is_full() && !self.is_win()
    }

    /// Check if the game is over (win or tie)
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_full()
    }

    /// Get the winner if there is one.
    ///
    /// A completed line always belongs to the player who moved last, no
    /// matter whose values make up the sum.
    pub fn winner(&self) -> Option<Player> {
        if self.is_win() {
            Some(self.to_move.opponent())
        } else {
            None
        }
    }

    /// Check if the player to move can complete a 13-sum line right now
    pub fn has_immediate_win(&self) -> bool {
        !self.is_terminal() && LineAnalyzer::has_immediate_win(&self.cells, self.to_move.values())
    }

    fn count_values(cells: &[u8; 9]) -> ValueCount {
        let mut count = ValueCount { odd: 0, even: 0 };
        for &cell in cells {
            if cell == 0 {
                continue;
            }
            if cell % 2 == 1 {
                count.odd += 1;
            } else {
                count.even += 1;
            }
        }
        count
    }

    fn determine_turn_from_counts(count: &ValueCount) -> Result<Player, crate::Error> {
        if count.odd == count.even {
            Ok(Player::Odds)
        } else if count.odd == count.even + 1 {
            Ok(Player::Evens)
        } else {
            Err(crate::Error::InvalidValueCounts {
                odd_count: count.odd,
                even_count: count.even,
            })
        }
    }

    fn ensure_turn_consistent_with_counts(
        count: &ValueCount,
        player: Player,
        context: &str,
    ) -> Result<(), crate::Error> {
        let valid = match player {
            Player::Odds => count.odd == count.even || count.even == count.odd + 1,
            Player::Evens => count.odd == count.even || count.odd == count.even + 1,
        };

        if valid {
            Ok(())
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "value counts (odd={}, even={}) are inconsistent with {} to move in '{}'",
                    count.odd, count.even, player, context
                ),
            })
        }
    }

    fn parse_player(player_str: &str, context: &str) -> Result<Player, crate::Error> {
        match player_str {
            "O" => Ok(Player::Odds),
            "E" => Ok(Player::Evens),
            _ => Err(crate::Error::InvalidPlayerString {
                player: player_str.to_string(),
                label: context.to_string(),
            }),
        }
    }

    fn parse_cells(chars: &[char], context: &str) -> Result<[u8; 9], crate::Error> {
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [0u8; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = match c {
                '.' | '0' => 0,
                '1'..='6' => c as u8 - b'0',
                _ => {
                    return Err(crate::Error::InvalidCellCharacter {
                        character: c,
                        position: i,
                        context: context.to_string(),
                    });
                }
            };
        }

        Ok(cells)
    }

    fn split_board_and_turn(cleaned: &str) -> Result<(&str, Option<Player>), crate::Error> {
        if let Some(idx) = cleaned.find('_') {
            let board = &cleaned[..idx];
            let suffix = &cleaned[idx + 1..];
            let player = Self::parse_player(suffix, cleaned)?;
            Ok((board, Some(player)))
        } else {
            Ok((cleaned, None))
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string holds 9 characters row by row (whitespace is filtered
    /// out): `.` or `0` for an empty cell, `1`-`6` for a placed value. An
    /// optional `_O` or `_E` suffix sets the player to move explicitly; when
    /// omitted, the turn is inferred from the value counts, defaulting to
    /// odds-first semantics.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board part has fewer than 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The odd/even value counts are invalid (difference greater than 1)
    /// - A provided `_O`/`_E` suffix conflicts with the value counts
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactotal::{BoardState, Player};
    ///
    /// let board = BoardState::from_string("66.13....").unwrap();
    /// assert_eq!(board.to_move, Player::Odds);
    /// assert_eq!(board.get(0, 0), 6);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, specified_turn) = Self::split_board_and_turn(&cleaned)?;
        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, s)?;
        let count = Self::count_values(&cells);

        let to_move = if let Some(turn) = specified_turn {
            Self::ensure_turn_consistent_with_counts(&count, turn, s).map(|_| turn)?
        } else {
            Self::determine_turn_from_counts(&count)?
        };

        Ok(BoardState { cells, to_move })
    }

    /// Get a canonical string representation for use as a key
    pub fn encode(&self) -> String {
        let cells: String = self
            .cells
            .iter()
            .map(|&c| {
                if c == 0 {
                    '.'
                } else {
                    char::from(b'0' + c)
                }
            })
            .collect();
        let turn = match self.to_move {
            Player::Odds => 'O',
            Player::Evens => 'E',
        };
        format!("{cells}_{turn}")
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            if cell == 0 {
                write!(f, ".")?;
            } else {
                write!(f, "{cell}")?;
            }
            if (i + 1) % 3 == 0 && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl GameState for BoardState {
    type Action = Move;

    fn is_win(&self) -> bool {
        self.is_win()
    }

    fn is_tie(&self) -> bool {
        self.is_tie()
    }

    fn transitions(&self) -> BTreeMap<Move, BoardState> {
        self.legal_moves()
            .into_iter()
            .map(|mv| {
                let next = self
                    .make_move(mv)
                    .expect("legal move generation should not fail");
                (mv, next)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = BoardState::new();
        assert_eq!(board.to_move, Player::Odds);
        assert_eq!(board.occupied_count(), 0);
        for col in 0..3 {
            for row in 0..3 {
                assert!(board.is_open(col, row));
            }
        }
    }

    #[test]
    fn test_make_move() {
        let board = BoardState::new();

        let next = board.make_move(Move::new(1, 1, 5)).unwrap();
        assert_eq!(next.get(1, 1), 5);
        assert_eq!(next.to_move, Player::Evens);

        // Original is untouched
        assert!(board.is_open(1, 1));

        // Move on occupied cell
        let result = next.make_move(Move::new(1, 1, 2));
        assert!(matches!(
            result,
            Err(crate::Error::OccupiedCell { col: 1, row: 1 })
        ));
    }

    #[test]
    fn test_make_move_rejects_wrong_parity() {
        let board = BoardState::new();
        let result = board.make_move(Move::new(0, 0, 2));
        assert!(matches!(
            result,
            Err(crate::Error::IllegalValue {
                value: 2,
                player: Player::Odds
            })
        ));
    }

    #[test]
    fn test_make_move_rejects_out_of_bounds() {
        let board = BoardState::new();
        let result = board.make_move(Move::new(3, 0, 1));
        assert!(matches!(result, Err(crate::Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_legal_moves() {
        let board = BoardState::new();
        // 9 open cells x 3 placeable values
        assert_eq!(board.legal_moves().len(), 27);
        assert!(
            board
                .legal_moves()
                .iter()
                .all(|mv| Player::Odds.can_play(mv.value))
        );

        let board = board.make_move(Move::new(0, 0, 1)).unwrap();
        assert_eq!(board.legal_moves().len(), 24);
        assert!(
            board
                .legal_moves()
                .iter()
                .all(|mv| Player::Evens.can_play(mv.value))
        );
    }

    #[test]
    fn test_win_detection_row() {
        let mut board = BoardState::new();
        board = board.make_move(Move::new(0, 0, 5)).unwrap(); // odds
        board = board.make_move(Move::new(1, 1, 6)).unwrap(); // evens
        board = board.make_move(Move::new(1, 0, 3)).unwrap(); // odds
        board = board.make_move(Move::new(2, 1, 2)).unwrap(); // evens
        assert!(!board.is_terminal());

        board = board.make_move(Move::new(2, 0, 5)).unwrap(); // 5 + 3 + 5 = 13

        assert!(board.is_win());
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::Odds));
    }

    #[test]
    fn test_win_detection_column() {
        let mut board = BoardState::new();
        board = board.make_move(Move::new(0, 0, 5)).unwrap(); // odds
        board = board.make_move(Move::new(1, 0, 2)).unwrap(); // evens
        board = board.make_move(Move::new(0, 1, 3)).unwrap(); // odds
        board = board.make_move(Move::new(1, 1, 4)).unwrap(); // evens
        board = board.make_move(Move::new(0, 2, 5)).unwrap(); // 5 + 3 + 5 = 13

        assert!(board.is_win());
        assert_eq!(board.winner(), Some(Player::Odds));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let mut board = BoardState::new();
        board = board.make_move(Move::new(0, 0, 5)).unwrap(); // odds
        board = board.make_move(Move::new(2, 0, 6)).unwrap(); // evens
        board = board.make_move(Move::new(1, 1, 3)).unwrap(); // odds
        board = board.make_move(Move::new(0, 1, 2)).unwrap(); // evens
        board = board.make_move(Move::new(2, 2, 5)).unwrap(); // 5 + 3 + 5 = 13

        assert!(board.is_win());
        assert_eq!(board.winner(), Some(Player::Odds));
    }

    #[test]
    fn test_win_with_opponent_values_in_line() {
        // Odds completes 6 + 6 + 1 using two values Evens placed.
        let board = BoardState::from_string("66.13....").unwrap();
        let next = board.make_move(Move::new(2, 0, 1)).unwrap();

        assert!(next.is_win());
        assert_eq!(next.winner(), Some(Player::Odds));
    }

    #[test]
    fn test_tie_detection() {
        let board = BoardState::from_string("121212121").unwrap();

        assert!(board.is_full());
        assert!(board.is_tie());
        assert!(!board.is_win());
        assert_eq!(board.winner(), None);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_full_board_with_win_is_not_tie() {
        // Top row sums to 13 on a completely filled board.
        let board = BoardState::from_string("553221461").unwrap();

        assert!(board.is_full());
        assert!(board.is_win());
        assert!(!board.is_tie());
    }

    #[test]
    fn test_no_legal_moves_after_win() {
        let board = BoardState::from_string("5532.4...").unwrap();
        assert!(board.is_win());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_has_immediate_win() {
        let board = BoardState::from_string("66.13....").unwrap();
        assert!(board.has_immediate_win());

        let empty = BoardState::new();
        assert!(!empty.has_immediate_win());
    }

    #[test]
    fn test_transitions_enumerate_column_then_row_then_value() {
        let board = BoardState::from_string("64.2151.1").unwrap();
        let actions: Vec<Move> = board.transitions().into_keys().collect();

        assert_eq!(
            actions,
            vec![
                Move::new(1, 2, 2),
                Move::new(1, 2, 4),
                Move::new(1, 2, 6),
                Move::new(2, 0, 2),
                Move::new(2, 0, 4),
                Move::new(2, 0, 6),
            ]
        );
        // legal_moves already emits the same order
        assert_eq!(actions, board.legal_moves());
    }

    #[test]
    fn test_transitions_apply_the_keyed_move() {
        let board = BoardState::new();
        for (mv, next) in board.transitions() {
            assert_eq!(next.get(mv.col, mv.row), mv.value);
            assert_eq!(next.to_move, Player::Evens);
        }
    }

    #[test]
    fn test_from_string_infers_turn() {
        let board = BoardState::from_string("66.13....").unwrap();
        assert_eq!(board.to_move, Player::Odds);

        let board = BoardState::from_string("1........").unwrap();
        assert_eq!(board.to_move, Player::Evens);

        // Invalid string length
        assert!(BoardState::from_string("66").is_err());

        // Invalid character
        assert!(BoardState::from_string("66X13....").is_err());

        // Three odd values and none even cannot occur in a game
        let result = BoardState::from_string("135......");
        assert!(matches!(
            result,
            Err(crate::Error::InvalidValueCounts {
                odd_count: 3,
                even_count: 0
            })
        ));
    }

    #[test]
    fn test_from_string_with_turn_suffix() {
        let board = BoardState::from_string("........._E").unwrap();
        assert_eq!(board.to_move, Player::Evens);

        // Evens opened, so one even value with odds to move is fine
        let board = BoardState::from_string("2........_O").unwrap();
        assert_eq!(board.to_move, Player::Odds);
    }

    #[test]
    fn test_from_string_rejects_inconsistent_suffix() {
        let err = BoardState::from_string("1........_O").unwrap_err();
        assert!(
            err.to_string().contains("inconsistent with odds to move"),
            "expected inconsistency error, got {err}"
        );
    }

    #[test]
    fn test_from_string_rejects_bad_suffix() {
        assert!(matches!(
            BoardState::from_string("........._Q"),
            Err(crate::Error::InvalidPlayerString { .. })
        ));
    }

    #[test]
    fn test_encode_roundtrip() {
        let board = BoardState::from_string("66.13....").unwrap();
        assert_eq!(board.encode(), "66.13...._O");

        let parsed = BoardState::from_string(&board.encode()).unwrap();
        assert_eq!(parsed, board);

        let empty = BoardState::new();
        assert_eq!(empty.encode(), "........._O");
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_string("66.13....").unwrap();
        let display = format!("{board}");
        assert_eq!(display, "66.\n13.\n...");
    }

    #[test]
    fn test_player_values_and_parity() {
        assert_eq!(Player::Odds.values(), [1, 3, 5]);
        assert_eq!(Player::Evens.values(), [2, 4, 6]);
        assert_eq!(Player::Odds.opponent(), Player::Evens);

        assert!(Player::Odds.can_play(5));
        assert!(!Player::Odds.can_play(4));
        assert!(Player::Evens.can_play(4));
        assert!(!Player::Evens.can_play(7));
        assert!(!Player::Evens.can_play(0));
    }

    #[test]
    fn test_occupied_count() {
        let mut board = BoardState::new();
        assert_eq!(board.occupied_count(), 0);

        board = board.make_move(Move::new(0, 0, 1)).unwrap();
        board = board.make_move(Move::new(1, 0, 2)).unwrap();
        assert_eq!(board.occupied_count(), 2);
    }
}
