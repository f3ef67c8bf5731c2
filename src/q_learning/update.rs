//! Reward observation and the two temporal difference update rules

use std::fmt;

use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    q_learning::{
        policy::choose_action,
        q_table::{ActionValueFunc, SCORE_DRAW, SCORE_LOSE, SCORE_WIN},
    },
    tictactoe::{Player, State},
};

/// Temporal difference rule used during self-play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TdAlgorithm {
    /// On-policy: bootstrap from the action the policy actually samples
    Sarsa,
    /// Off-policy: bootstrap from the best recorded action
    #[value(alias = "qlearning")]
    QLearning,
}

impl TdAlgorithm {
    /// Apply this rule to the (s, a) entry of `table`, observing `s_next`
    pub fn update<R: Rng + ?Sized>(
        self,
        table: &mut ActionValueFunc,
        s: &State,
        a: usize,
        s_next: &State,
        params: &LearningParams,
        rng: &mut R,
    ) -> Result<()> {
        match self {
            TdAlgorithm::Sarsa => sarsa(
                table,
                s,
                a,
                s_next,
                params.epsilon,
                params.alpha,
                params.gamma,
                rng,
            ),
            TdAlgorithm::QLearning => q_learning(table, s, a, s_next, params.alpha, params.gamma, rng),
        }
    }
}

impl fmt::Display for TdAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TdAlgorithm::Sarsa => write!(f, "SARSA"),
            TdAlgorithm::QLearning => write!(f, "Q-learning"),
        }
    }
}

/// Hyperparameters shared by both update rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearningParams {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration probability ε
    pub epsilon: f64,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}

impl LearningParams {
    /// Check every parameter lies in [0, 1]
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Immediate reward for `player` given the board contents
///
/// # Errors
///
/// Returns `InvalidPlayer` for `Player::None`.
pub fn observe_reward(player: Player, state: &State) -> Result<f64> {
    if !player.is_mover() {
        return Err(Error::InvalidPlayer);
    }

    let winner = state.winner();
    Ok(if winner == player {
        SCORE_WIN
    } else if winner == Player::None {
        SCORE_DRAW
    } else {
        SCORE_LOSE
    })
}

/// SARSA update
///
/// Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') - Q(s,a)]
///
/// When `s_next` is terminal the bootstrap value is the terminal reward
/// itself, so the reward enters the target twice (r + γr).
#[allow(clippy::too_many_arguments)]
pub fn sarsa<R: Rng + ?Sized>(
    table: &mut ActionValueFunc,
    s: &State,
    a: usize,
    s_next: &State,
    epsilon: f64,
    alpha: f64,
    gamma: f64,
    rng: &mut R,
) -> Result<()> {
    let reward = observe_reward(table.player(), s_next)?;

    let next_q = if s_next.is_terminal() {
        reward
    } else {
        let next_action = choose_action(table, s_next, epsilon, rng)?;
        table.q(s_next, next_action)?
    };

    let current_q = table.q(s, a)?;
    let new_q = current_q + alpha * (reward + gamma * next_q - current_q);
    table.update(s, a, new_q)
}

/// Q-learning update
///
/// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
///
/// Terminal `s_next` is not special-cased; an unseen terminal state
/// bootstraps from the draw score.
pub fn q_learning<R: Rng + ?Sized>(
    table: &mut ActionValueFunc,
    s: &State,
    a: usize,
    s_next: &State,
    alpha: f64,
    gamma: f64,
    rng: &mut R,
) -> Result<()> {
    let reward = observe_reward(table.player(), s_next)?;
    let max_next_q = table.best(s_next, rng);

    let current_q = table.q(s, a)?;
    let new_q = current_q + alpha * (reward + gamma * max_next_q - current_q);
    table.update(s, a, new_q)
}
