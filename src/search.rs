//! Exhaustive minimax search with alpha-beta pruning
//!
//! Scores live in a three-value domain relative to whoever is about to move
//! at a node: [`LOSS`] (the opponent just won), [`TIE`], and [`WIN`]. A win
//! always favors the player who moved last, so terminal wins are scored
//! against the side to move. Pruning is a pure optimization: the chosen
//! action and score always equal those of an unpruned full-depth minimax.

use crate::{Error, Result, game::GameState};

/// Utility of a state already lost for the player about to move.
pub const LOSS: i32 = 0;
/// Utility of a tied game.
pub const TIE: i32 = 1;
/// Utility of a state the player about to move is guaranteed to win.
pub const WIN: i32 = 2;

/// A minimax score paired with the action that guarantees it.
///
/// The action is `None` only at terminal nodes or before any child has been
/// evaluated; otherwise it is one of the legal actions at the scored node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActionScore<A> {
    score: i32,
    action: Option<A>,
}

/// Pick the optimal action from a non-terminal state.
///
/// The returned action maximizes the mover's guaranteed outcome under
/// optimal play by both sides. When several actions share the optimal
/// outcome, the first one in the state's transition enumeration (column,
/// then row, then placed value) is returned, except that an immediately
/// winning action always beats a win that only materializes deeper in the
/// tree.
///
/// # Errors
///
/// Returns [`Error::GameOver`] when called on a terminal state and
/// [`Error::NoMovesAvailable`] when a non-terminal state unexpectedly has
/// no transitions; neither occurs in a well-formed game.
///
/// # Examples
///
/// ```
/// use tictactotal::{BoardState, Move, choose};
///
/// // Odds can complete 6 + 6 + 1 = 13 in the top row right away.
/// let state = BoardState::from_string("66.13....").unwrap();
/// assert_eq!(choose(&state).unwrap(), Move::new(2, 0, 1));
/// ```
pub fn choose<S: GameState>(state: &S) -> Result<S::Action> {
    if state.is_terminal() {
        return Err(Error::GameOver);
    }

    alpha_beta(state, i32::MIN, i32::MAX, true)
        .action
        .ok_or(Error::NoMovesAvailable)
}

/// Recursive alpha-beta evaluation.
///
/// `maximizing` is true when the agent being optimized for is about to move
/// at `state`. Alpha and beta travel by value; each call returns a fresh
/// result, so sibling branches share nothing.
fn alpha_beta<S: GameState>(
    state: &S,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> ActionScore<S::Action> {
    if state.is_win() {
        // The previous mover completed this win, so it counts against
        // whoever is about to move.
        let score = if maximizing { LOSS } else { WIN };
        return ActionScore { score, action: None };
    }
    if state.is_tie() {
        return ActionScore {
            score: TIE,
            action: None,
        };
    }

    if maximizing {
        let mut best = ActionScore {
            score: i32::MIN,
            action: None,
        };
        for (action, child) in state.transitions() {
            if child.is_win() {
                // An immediate win is never passed over for a deeper or
                // tied alternative, even one already adopted.
                return ActionScore {
                    score: WIN,
                    action: Some(action),
                };
            }
            let score = alpha_beta(&child, alpha, beta, false).score;
            if score > best.score {
                best = ActionScore {
                    score,
                    action: Some(action),
                };
            }
            alpha = alpha.max(best.score);
            if beta <= alpha {
                // Remaining siblings cannot beat the minimizing
                // ancestor's guarantee.
                break;
            }
        }
        best
    } else {
        let mut best = ActionScore {
            score: i32::MAX,
            action: None,
        };
        for (action, child) in state.transitions() {
            if child.is_win() {
                return ActionScore {
                    score: LOSS,
                    action: Some(action),
                };
            }
            let score = alpha_beta(&child, alpha, beta, true).score;
            if score < best.score {
                best = ActionScore {
                    score,
                    action: Some(action),
                };
            }
            beta = beta.min(best.score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
