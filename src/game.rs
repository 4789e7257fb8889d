//! Game-state port - the abstraction the solver searches over
//!
//! The solver never touches a concrete board representation. It consumes
//! this trait only, so any two-player, zero-sum, perfect-information game
//! with a small tree can be plugged in.

use std::{collections::BTreeMap, fmt};

/// Immutable snapshot of a game at some point in play.
///
/// A state is exactly one of: non-terminal, a win for the player who just
/// moved, or a tie. `is_win` and `is_tie` are never both true.
///
/// # Transition ordering
///
/// The solver breaks ties between equally optimal actions by taking the
/// first one encountered in [`transitions`] iteration order. Implementors
/// must therefore give [`GameState::Action`] an `Ord` that sorts by column,
/// then row, then placed value; the returned `BTreeMap` then iterates in
/// that order by construction. The solver never re-sorts.
///
/// # Examples
///
/// ```
/// use tictactotal::{BoardState, GameState};
///
/// let state = BoardState::new();
/// assert!(!state.is_terminal());
/// assert_eq!(state.transitions().len(), 27); // 9 open cells x 3 values
/// ```
///
/// [`transitions`]: Self::transitions
pub trait GameState: Sized {
    /// Move descriptor with a stable identity, usable as a map key.
    type Action: Copy + Ord + fmt::Debug;

    /// Whether the player who moved into this state completed a win.
    fn is_win(&self) -> bool;

    /// Whether the game ended with no winner.
    fn is_tie(&self) -> bool;

    /// Legal actions mapped to the states they produce, iterated in the
    /// action ordering described above.
    fn transitions(&self) -> BTreeMap<Self::Action, Self>;

    /// Whether the game has concluded.
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_tie()
    }
}
