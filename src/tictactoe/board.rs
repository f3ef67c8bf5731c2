//! Board state representation and basic operations

use std::fmt;

use super::lines::LineAnalyzer;

/// Owner of a cell, or the mover tag for an agent
///
/// `Player::None` marks an empty cell and is never a valid mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Player {
    #[default]
    None,
    Circle,
    Cross,
}

impl Player {
    /// Whether this tag may place a mark on the board
    pub fn is_mover(self) -> bool {
        !matches!(self, Player::None)
    }

    /// Get the opponent player (`None` stays `None`)
    pub fn opponent(self) -> Player {
        match self {
            Player::Circle => Player::Cross,
            Player::Cross => Player::Circle,
            Player::None => Player::None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::None => ' ',
            Player::Circle => 'O',
            Player::Cross => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Player> {
        match c {
            '.' | ' ' | '_' => Some(Player::None),
            'O' | 'o' | '0' => Some(Player::Circle),
            'X' | 'x' => Some(Player::Cross),
            _ => None,
        }
    }

    fn trit(self) -> u16 {
        match self {
            Player::None => 0,
            Player::Circle => 1,
            Player::Cross => 2,
        }
    }

    fn from_trit(trit: u16) -> Option<Player> {
        match trit {
            0 => Some(Player::None),
            1 => Some(Player::Circle),
            2 => Some(Player::Cross),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Packed base-3 encoding of a board, used as the table key
///
/// Cell 0 is the least significant trit. Two states with the same contents
/// always produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(u16);

impl StateKey {
    /// Number of distinct keys (3^9)
    pub const CARDINALITY: u16 = 19_683;

    pub fn value(self) -> u16 {
        self.0
    }
}

/// Immutable snapshot of the 3x3 grid, row-major with index 0 top-left:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct State {
    cells: [Player; 9],
}

impl State {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Player; 9]) -> Self {
        Self { cells }
    }

    /// Create a board from 9 cell characters (`X`, `O`, `.`/`_`/space).
    ///
    /// Whitespace other than a literal cell space is not accepted, so rows
    /// must be written contiguously, e.g. `"X.XX.OOXO"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the string is not exactly 9 valid
    /// cell characters.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("board '{s}' must have exactly 9 cells, got {}", chars.len()),
            });
        }

        let mut cells = [Player::None; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Player::from_char(c).ok_or_else(|| crate::Error::InvalidConfiguration {
                message: format!("invalid character '{c}' at position {i} in board '{s}'"),
            })?;
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Player; 9] {
        &self.cells
    }

    /// Owner of the cell at `pos`, or `None` if `pos` is off the board
    pub fn get(&self, pos: usize) -> Option<Player> {
        self.cells.get(pos).copied()
    }

    /// Winner of the first completed line, or `Player::None`
    pub fn winner(&self) -> Player {
        LineAnalyzer::first_owner(&self.cells)
    }

    /// Check if the game is over (someone won or the board is full)
    pub fn is_terminal(&self) -> bool {
        self.winner() != Player::None || !self.cells.contains(&Player::None)
    }

    /// Empty positions in ascending order
    pub fn unoccupied(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Player::None)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_mover()).count()
    }

    /// Mark `pos` for `player` and return the resulting state
    ///
    /// # Errors
    ///
    /// * `InvalidPlayer` if `player` is `Player::None`
    /// * `InvalidPosition` if `pos` is not in 0-8
    /// * `InvalidMove` if the cell is already occupied
    #[must_use = "take_action returns a new state; the original is unchanged"]
    pub fn take_action(&self, player: Player, pos: usize) -> Result<State, crate::Error> {
        if !player.is_mover() {
            return Err(crate::Error::InvalidPlayer);
        }
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if self.cells[pos] != Player::None {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut cells = self.cells;
        cells[pos] = player;
        Ok(State { cells })
    }

    /// Canonical table key for this board
    pub fn key(&self) -> StateKey {
        let packed = self
            .cells
            .iter()
            .rev()
            .fold(0u16, |acc, &cell| acc * 3 + cell.trit());
        StateKey(packed)
    }

    /// Rebuild a board from its key; `None` if the key is out of range
    pub fn from_key(key: StateKey) -> Option<Self> {
        if key.0 >= StateKey::CARDINALITY {
            return None;
        }
        let mut rest = key.0;
        let mut cells = [Player::None; 9];
        for cell in &mut cells {
            *cell = Player::from_trit(rest % 3)?;
            rest /= 3;
        }
        Some(Self { cells })
    }

    /// Compact single-line encoding, `.` for empty cells
    pub fn encode(&self) -> String {
        self.cells
            .iter()
            .map(|&cell| match cell {
                Player::None => '.',
                other => other.to_char(),
            })
            .collect()
    }
}

/// Free-function form of [`State::take_action`]
pub fn take_action(player: Player, state: &State, pos: usize) -> Result<State, crate::Error> {
    state.take_action(player, pos)
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self.encode();
        for (i, c) in encoded.chars().enumerate() {
            write!(f, "{c}")?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
