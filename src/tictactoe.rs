//! Tic-Tac-Toe game implementation

pub mod board;
pub mod lines;

pub use board::{Player, State, StateKey, take_action};
pub use lines::{LineAnalyzer, WINNING_LINES};
