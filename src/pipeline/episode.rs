//! Self-play episode driver

use rand::Rng;

use crate::{
    Result,
    q_learning::{ActionValueFunc, LearningParams, TdAlgorithm, choose_action},
    tictactoe::State,
};

/// Play one game between `first` and `second` (in that move order), updating
/// both tables along the way, and return the terminal state.
///
/// A move can only be scored once the opponent has answered it, so updates
/// run one ply behind: after each reply, the player who moved before it is
/// updated with her earlier state, her action, and the state after the reply.
/// When the game ends, the player who made the last move is updated against
/// the terminal state directly. Every move by either side is scored exactly
/// once.
pub fn run_episode<R: Rng + ?Sized>(
    algorithm: TdAlgorithm,
    first: &mut ActionValueFunc,
    second: &mut ActionValueFunc,
    params: &LearningParams,
    rng: &mut R,
) -> Result<State> {
    let mut s = State::new();
    let mut a = choose_action(first, &s, params.epsilon, rng)?;
    let mut s1 = s.take_action(first.player(), a)?;

    // tables[0] is the player whose pending move (s, a) gets scored next;
    // tables[1] is the one about to reply.
    let mut tables = [first, second];

    loop {
        let reply = choose_action(&*tables[1], &s1, params.epsilon, rng)?;
        let s2 = s1.take_action(tables[1].player(), reply)?;

        algorithm.update(&mut *tables[0], &s, a, &s2, params, rng)?;

        s = s1;
        s1 = s2;
        a = reply;
        tables.swap(0, 1);

        if s1.is_terminal() {
            algorithm.update(&mut *tables[0], &s, a, &s1, params, rng)?;
            log::debug!("episode finished: {} (winner '{}')", s1.encode(), s1.winner());
            return Ok(s1);
        }
    }
}
