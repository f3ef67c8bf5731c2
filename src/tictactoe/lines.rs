//! Winning line analysis for Tic-Tac-Toe

use super::Player;

/// Winning line indices on the 3x3 board, in the order they are checked
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [6, 4, 2], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of the first fully claimed line, or `Player::None`
    pub fn first_owner(cells: &[Player; 9]) -> Player {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::line_owner(cells, line))
            .unwrap_or(Player::None)
    }

    /// Number of lines fully claimed by any mover
    pub fn claimed_lines(cells: &[Player; 9]) -> usize {
        WINNING_LINES
            .iter()
            .filter(|line| Self::line_owner(cells, line).is_some())
            .count()
    }

    fn line_owner(cells: &[Player; 9], line: &[usize; 3]) -> Option<Player> {
        let owner = cells[line[0]];
        (owner.is_mover() && cells[line[1]] == owner && cells[line[2]] == owner).then_some(owner)
    }
}
