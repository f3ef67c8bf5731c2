//! Reward-per-episode evaluation against an untrained opponent

use rand::Rng;

use crate::{
    Result,
    q_learning::{ActionValueFunc, choose_action, observe_reward},
    tictactoe::State,
};

/// Discounted return of one greedy game played by `table` against a fresh,
/// empty opposing table (which therefore moves uniformly at random).
///
/// A coin flip decides who opens. A reward term `gamma^t * r` is added each
/// time the outcome of `table`'s last move becomes observable: after the
/// opponent's reply, or immediately when `table`'s own move ends the game.
/// `t` counts the plies played so far. `table` is never modified.
pub fn reward_per_episode<R: Rng + ?Sized>(
    table: &ActionValueFunc,
    gamma: f64,
    rng: &mut R,
) -> Result<f64> {
    let player = table.player();
    let opponent = ActionValueFunc::new(player.opponent())?;

    let mut total = 0.0;
    let mut t = 0;
    let mut s = State::new();

    if rng.random_bool(0.5) {
        let opening = choose_action(&opponent, &s, 0.0, rng)?;
        s = s.take_action(opponent.player(), opening)?;
        t += 1;
    }

    loop {
        let a = choose_action(table, &s, 0.0, rng)?;
        let s1 = s.take_action(player, a)?;
        t += 1;
        if s1.is_terminal() {
            total += gamma.powi(t) * observe_reward(player, &s1)?;
            break;
        }

        let reply = choose_action(&opponent, &s1, 0.0, rng)?;
        let s2 = s1.take_action(opponent.player(), reply)?;
        t += 1;
        total += gamma.powi(t) * observe_reward(player, &s2)?;

        s = s2;
        if s.is_terminal() {
            break;
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_reward_is_bounded_by_discount() {
        let mut rng = StdRng::seed_from_u64(17);
        let table = ActionValueFunc::new(Player::Circle).unwrap();

        for _ in 0..200 {
            let reward = reward_per_episode(&table, 0.9, &mut rng).unwrap();
            // Only the final observation can be non-zero, and a game lasts at least 5 plies.
            assert!(reward.abs() <= 0.9f64.powi(5) + 1e-12, "got {reward}");
        }
    }

    #[test]
    fn test_undiscounted_reward_is_game_outcome() {
        let mut rng = StdRng::seed_from_u64(99);
        let table = ActionValueFunc::new(Player::Cross).unwrap();

        for _ in 0..100 {
            let reward = reward_per_episode(&table, 1.0, &mut rng).unwrap();
            assert!([-1.0, 0.0, 1.0].contains(&reward), "got {reward}");
        }
    }

    #[test]
    fn test_evaluation_does_not_touch_table() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut table = ActionValueFunc::new(Player::Circle).unwrap();
        table.update(&State::new(), 4, 0.6).unwrap();
        let before = table.clone();

        for _ in 0..50 {
            reward_per_episode(&table, 0.9, &mut rng).unwrap();
        }

        assert_eq!(table.len(), before.len());
        assert_eq!(table.scores(&State::new()), before.scores(&State::new()));
    }
}
