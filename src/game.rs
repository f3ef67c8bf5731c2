//! Human-vs-agent play in the terminal
//!
//! Cells are addressed by column letter and row number, with row 3 at the top:
//!
//! ```text
//!      a   b   c
//! 3  | 0 | 1 | 2 |
//! 2  | 3 | 4 | 5 |
//! 1  | 6 | 7 | 8 |
//! ```
//!
//! Input and output are generic so sessions can be driven by stdin/stdout or
//! by in-memory buffers.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::{
    Error, Result,
    q_learning::{ActionValueFunc, choose_action},
    tictactoe::{Player, State},
};

const SEPARATOR: &str = "   -------------";

/// Who the human plays and who opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user: Player,
    pub opponent_first: bool,
}

/// Render a board with column letters and row numbers
pub fn render_board(state: &State) -> String {
    let mut out = String::from("     a   b   c\n");
    out.push_str(SEPARATOR);
    out.push('\n');
    for (row, label) in ["3", "2", "1"].iter().enumerate() {
        let cells = &state.cells()[row * 3..row * 3 + 3];
        out.push_str(&format!(
            "{label}  | {} | {} | {} |\n",
            cells[0], cells[1], cells[2]
        ));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

/// Parse a move such as `b2` into a cell index
pub fn parse_move(input: &str) -> Option<usize> {
    let mut chars = input.trim().chars();
    let col = match chars.next()?.to_ascii_lowercase() {
        'a' => 0,
        'b' => 1,
        'c' => 2,
        _ => return None,
    };
    let row = match chars.next()? {
        '3' => 0,
        '2' => 1,
        '1' => 2,
        _ => return None,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(row * 3 + col)
}

/// Closing line for the human's point of view
pub fn outcome_message(winner: Player, user: Player) -> &'static str {
    if winner == user {
        "You won!"
    } else if winner == Player::None {
        "Draw"
    } else {
        "You lost :("
    }
}

fn read_line<B: BufRead>(input: &mut B) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Ask for a move until the human names an empty cell, returning the new state
fn take_user_action<B: BufRead, W: Write>(
    user: Player,
    state: &State,
    input: &mut B,
    output: &mut W,
) -> Result<State> {
    write!(output, "Your turn ({user}): ")?;
    output.flush()?;
    loop {
        let line = read_line(input)?;
        if let Some(pos) = parse_move(&line) {
            match state.take_action(user, pos) {
                Ok(next) => return Ok(next),
                Err(Error::InvalidMove { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        write!(output, "Wrong move '{line}', please try again: ")?;
        output.flush()?;
    }
}

/// Play one game against `opponent`, which always moves greedily.
///
/// Returns the winner (`Player::None` for a draw).
///
/// # Errors
///
/// * `InvalidConfiguration` if the human and the table hold the same mark
/// * `InputClosed` if input ends before the game does
pub fn play_game<B: BufRead, W: Write, R: Rng + ?Sized>(
    session: Session,
    opponent: &ActionValueFunc,
    input: &mut B,
    output: &mut W,
    rng: &mut R,
) -> Result<Player> {
    if !session.user.is_mover() || session.user != opponent.player().opponent() {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "human plays '{}' but the agent plays '{}'",
                session.user,
                opponent.player()
            ),
        });
    }

    let mut s = State::new();
    if session.opponent_first {
        let a = choose_action(opponent, &s, 0.0, rng)?;
        s = s.take_action(opponent.player(), a)?;
    }
    write!(output, "{}", render_board(&s))?;

    loop {
        s = take_user_action(session.user, &s, input, output)?;
        write!(output, "{}", render_board(&s))?;
        if s.is_terminal() {
            break;
        }

        let a = choose_action(opponent, &s, 0.0, rng)?;
        s = s.take_action(opponent.player(), a)?;
        write!(output, "{}", render_board(&s))?;
        if s.is_terminal() {
            break;
        }
    }

    let winner = s.winner();
    writeln!(output, "{}\n", outcome_message(winner, session.user))?;
    Ok(winner)
}

/// Ask which mark the human wants and whether they open.
///
/// Anything other than `X` picks O. For the opening question, `Y` or `N`
/// decide it; any other answer is settled by a coin flip.
pub fn prompt_session<B: BufRead, W: Write, R: Rng + ?Sized>(
    input: &mut B,
    output: &mut W,
    rng: &mut R,
) -> Result<Session> {
    write!(output, "Please choose a player, O or X: ")?;
    output.flush()?;
    let user = if read_line(input)?.eq_ignore_ascii_case("x") {
        Player::Cross
    } else {
        Player::Circle
    };
    writeln!(output, "You are player {user}")?;

    write!(
        output,
        "Do you want to go first? Y for yes, N for no, others for either way: "
    )?;
    output.flush()?;
    let answer = read_line(input)?;
    let opponent_first = if answer.eq_ignore_ascii_case("y") {
        false
    } else if answer.eq_ignore_ascii_case("n") {
        true
    } else {
        rng.random_bool(0.5)
    };

    Ok(Session {
        user,
        opponent_first,
    })
}
