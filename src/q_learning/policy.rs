//! Epsilon-greedy action selection

use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    q_learning::q_table::ActionValueFunc,
    tictactoe::State,
};

/// Pick a move for `table`'s owner in `state`.
///
/// With probability `epsilon` a uniformly random empty cell is returned.
/// Otherwise the best recorded action is used, falling back to a random
/// empty cell when the state has never been visited.
///
/// # Errors
///
/// Returns `NoValidMoves` if `state` has no empty cells.
pub fn choose_action<R: Rng + ?Sized>(
    table: &ActionValueFunc,
    state: &State,
    epsilon: f64,
    rng: &mut R,
) -> Result<usize> {
    let unoccupied = state.unoccupied();
    if unoccupied.is_empty() {
        return Err(Error::NoValidMoves);
    }

    if rng.random::<f64>() < epsilon {
        return random_position(&unoccupied, rng);
    }

    match table.best_action(state, rng) {
        Some(action) => Ok(action.pos),
        None => random_position(&unoccupied, rng),
    }
}

fn random_position<R: Rng + ?Sized>(unoccupied: &[usize], rng: &mut R) -> Result<usize> {
    unoccupied.choose(rng).copied().ok_or(Error::NoValidMoves)
}
