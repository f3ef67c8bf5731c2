//! Tabular action-value function for temporal difference learning

use std::collections::HashMap;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    tictactoe::{Player, State, StateKey},
};

/// Score given to players who won a game
pub const SCORE_WIN: f64 = 1.0;
/// Score given to players who drew; also the value of anything unseen
pub const SCORE_DRAW: f64 = 0.0;
/// Score given to players who lost a game
pub const SCORE_LOSE: f64 = -1.0;

/// A candidate action and its current score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionScore {
    pub pos: usize,
    pub score: f64,
}

impl PositionScore {
    pub fn new(pos: usize, score: f64) -> Self {
        Self { pos, score }
    }
}

/// Scored candidate actions for a single state
///
/// Every position that was unoccupied when the collection was built is
/// recorded up front with the draw score. The board never has more than nine
/// cells, so a flat vector is enough and the set of positions stays fixed for
/// the lifetime of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StateActions {
    actions: Vec<PositionScore>,
}

impl StateActions {
    pub fn new(state: &State) -> Self {
        Self {
            actions: state
                .unoccupied()
                .into_iter()
                .map(|pos| PositionScore::new(pos, SCORE_DRAW))
                .collect(),
        }
    }

    /// Score recorded for `pos`, if it is one of the candidate actions
    pub fn get(&self, pos: usize) -> Option<f64> {
        self.actions
            .iter()
            .find(|action| action.pos == pos)
            .map(|action| action.score)
    }

    /// Overwrite the score for `pos`; returns false if `pos` is not a candidate
    pub fn update(&mut self, pos: usize, score: f64) -> bool {
        match self.actions.iter_mut().find(|action| action.pos == pos) {
            Some(action) => {
                action.score = score;
                true
            }
            None => false,
        }
    }

    /// Highest scoring action, ties broken uniformly at random
    pub fn best<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PositionScore> {
        let top = self
            .actions
            .iter()
            .map(|action| action.score)
            .fold(f64::NEG_INFINITY, f64::max);

        let tied: Vec<PositionScore> = self
            .actions
            .iter()
            .copied()
            .filter(|action| action.score == top)
            .collect();

        tied.choose(rng).copied()
    }

    pub fn as_slice(&self) -> &[PositionScore] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Action-value function Q(s, a) owned by one player
///
/// States are allocated lazily on first update. Anything never visited reads
/// as the draw score.
#[derive(Debug, Clone)]
pub struct ActionValueFunc {
    player: Player,
    state_actions: HashMap<StateKey, StateActions>,
}

impl ActionValueFunc {
    /// Create an empty table for `player`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlayer` for `Player::None`.
    pub fn new(player: Player) -> Result<Self> {
        if !player.is_mover() {
            return Err(Error::InvalidPlayer);
        }
        Ok(Self {
            player,
            state_actions: HashMap::new(),
        })
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Score of a (state, action) pair
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if the state has been visited but `pos` was not
    /// unoccupied at that time.
    pub fn q(&self, state: &State, pos: usize) -> Result<f64> {
        match self.state_actions.get(&state.key()) {
            None => Ok(SCORE_DRAW),
            Some(actions) => actions.get(pos).ok_or_else(|| Error::UnknownAction {
                position: pos,
                state: state.encode(),
            }),
        }
    }

    /// Set the score of a (state, action) pair, allocating the state if needed
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if `pos` is not a candidate action of `state`.
    pub fn update(&mut self, state: &State, pos: usize, score: f64) -> Result<()> {
        let actions = self
            .state_actions
            .entry(state.key())
            .or_insert_with(|| StateActions::new(state));

        if actions.update(pos, score) {
            Ok(())
        } else {
            if actions.is_empty() {
                self.state_actions.remove(&state.key());
            }
            Err(Error::UnknownAction {
                position: pos,
                state: state.encode(),
            })
        }
    }

    /// Score of the best action in `state`, or the draw score if unseen
    pub fn best<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> f64 {
        self.best_action(state, rng)
            .map_or(SCORE_DRAW, |action| action.score)
    }

    /// Best recorded action in `state`, or `None` if the state is unseen
    pub fn best_action<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> Option<PositionScore> {
        self.state_actions
            .get(&state.key())
            .and_then(|actions| actions.best(rng))
    }

    /// Recorded actions for `state`, if it has been visited
    pub fn scores(&self, state: &State) -> Option<&StateActions> {
        self.state_actions.get(&state.key())
    }

    pub fn contains(&self, state: &State) -> bool {
        self.state_actions.contains_key(&state.key())
    }

    /// Number of visited states
    pub fn len(&self) -> usize {
        self.state_actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state_actions.is_empty()
    }
}
