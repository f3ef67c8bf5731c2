//! Test suite for the Tic-Tac-Toe board model
//! Validates game rules and invariants over the reachable state space

use std::collections::{HashSet, VecDeque};

use tictactoe_td::{
    Error,
    tictactoe::{LineAnalyzer, Player, State, WINNING_LINES, take_action},
};

/// Every board reachable by legal play with `first` opening
fn reachable_states(first: Player) -> Vec<State> {
    let mut states = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    queue.push_back((State::new(), first));
    visited.insert(State::new().key());

    while let Some((state, to_move)) = queue.pop_front() {
        states.push(state);
        if state.is_terminal() {
            continue;
        }
        for pos in state.unoccupied() {
            let next = state.take_action(to_move, pos).unwrap();
            if visited.insert(next.key()) {
                queue.push_back((next, to_move.opponent()));
            }
        }
    }
    states
}

mod winning_lines {
    use super::*;

    #[test]
    fn test_every_line_wins_for_its_owner() {
        for player in [Player::Circle, Player::Cross] {
            for line in WINNING_LINES {
                let mut cells = [Player::None; 9];
                for idx in line {
                    cells[idx] = player;
                }
                let state = State::from_cells(cells);
                assert_eq!(state.winner(), player, "line {line:?}");
                assert!(state.is_terminal());
            }
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // O X O
        // O X X
        // X O O
        let state = State::from_string("OXOOXXXOO").unwrap();
        assert_eq!(state.winner(), Player::None);
        assert!(state.is_terminal());
        assert!(state.unoccupied().is_empty());
    }

    #[test]
    fn test_partial_line_is_not_a_win() {
        let state = State::from_string("XX.OO....").unwrap();
        assert_eq!(state.winner(), Player::None);
        assert!(!state.is_terminal());
    }
}

mod take_action_rules {
    use super::*;

    #[test]
    fn test_occupied_cells_are_rejected() {
        let state = State::from_string("X.O.X.O..").unwrap();
        for pos in 0..9 {
            let result = take_action(Player::Circle, &state, pos);
            if state.unoccupied().contains(&pos) {
                let next = result.unwrap();
                for other in 0..9 {
                    if other == pos {
                        assert_eq!(next.get(other), Some(Player::Circle));
                    } else {
                        assert_eq!(next.get(other), state.get(other));
                    }
                }
            } else {
                assert!(
                    matches!(result, Err(Error::InvalidMove { position }) if position == pos),
                    "expected InvalidMove at {pos}"
                );
            }
        }
    }

    #[test]
    fn test_none_is_never_a_mover() {
        let state = State::new();
        for pos in 0..9 {
            assert!(matches!(
                take_action(Player::None, &state, pos),
                Err(Error::InvalidPlayer)
            ));
        }
    }
}

mod reachable_space {
    use super::*;

    #[test]
    fn test_valid_game_states() {
        assert_eq!(
            reachable_states(Player::Cross).len(),
            5478,
            "Should have exactly 5,478 valid game states"
        );
    }

    #[test]
    fn test_at_most_one_winner_in_legal_play() {
        for first in [Player::Circle, Player::Cross] {
            for state in reachable_states(first) {
                let owners: HashSet<Player> = WINNING_LINES
                    .iter()
                    .filter_map(|line| {
                        let owner = state.cells()[line[0]];
                        (owner.is_mover() && line.iter().all(|&idx| state.cells()[idx] == owner))
                            .then_some(owner)
                    })
                    .collect();
                assert!(owners.len() <= 1, "two winners on {}", state.encode());
                if LineAnalyzer::claimed_lines(state.cells()) > 0 {
                    assert!(state.is_terminal());
                }
            }
        }
    }

    #[test]
    fn test_keys_are_unique_across_reachable_states() {
        let states = reachable_states(Player::Circle);
        let keys: HashSet<_> = states.iter().map(State::key).collect();
        assert_eq!(keys.len(), states.len());
        for state in states {
            assert_eq!(State::from_key(state.key()), Some(state));
        }
    }
}
