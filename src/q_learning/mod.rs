//! Q-learning and SARSA temporal difference learning
//!
//! Both agents in a self-play run own a tabular [`ActionValueFunc`] keyed by
//! board contents. Moves are picked epsilon-greedily and each (state, action)
//! entry is nudged toward a bootstrapped target once the opponent has replied.
//!
//! ## Key Differences
//!
//! | Aspect | Q-learning | SARSA |
//! |--------|------------|-------|
//! | Policy | Off-policy | On-policy |
//! | Bootstrap | best Q(s',·) | Q(s',a') for a sampled a' |
//! | Terminal s' | draw score if unseen | terminal reward |
//!
//! ## Usage Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use tictactoe_td::q_learning::{ActionValueFunc, TdAlgorithm, LearningParams, choose_action};
//! use tictactoe_td::tictactoe::{Player, State};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut circle = ActionValueFunc::new(Player::Circle)?;
//! let s = State::new();
//! let a = choose_action(&circle, &s, 0.1, &mut rng)?;
//! let s_next = s.take_action(Player::Circle, a)?;
//! TdAlgorithm::QLearning.update(&mut circle, &s, a, &s_next, &LearningParams::default(), &mut rng)?;
//! # Ok::<(), tictactoe_td::Error>(())
//! ```

pub mod policy;
pub mod q_table;
pub mod update;

pub use policy::choose_action;
pub use q_table::{
    ActionValueFunc, PositionScore, SCORE_DRAW, SCORE_LOSE, SCORE_WIN, StateActions,
};
pub use update::{LearningParams, TdAlgorithm, observe_reward, q_learning, sarsa};
