// Integration tests for the mastermind-solver application
// These tests verify that all modules work together correctly

use mastermind_solver::cli::CliInterface;
use mastermind_solver::*;
use std::io::Cursor;

fn code(s: &str) -> Code {
    s.parse().unwrap()
}

/// Plays `secret` through the line interface, answering each guess the way
/// an honest user would, and returns the script that was typed.
fn honest_script(secret: Code, selector: &dyn GuessSelector, opening: Opening) -> String {
    let mut session = Session::with_opening(opening, selector);
    let mut script = String::new();
    while let Some(guess) = session.current_guess() {
        if session.is_over() {
            break;
        }
        let feedback = score(&guess, &secret);
        script.push_str(&format!("{} {}\n", feedback.exact(), feedback.partial()));
        session.apply_feedback(feedback, selector).unwrap();
    }
    script
}

#[test]
fn test_end_to_end_win_on_first_guess() {
    // secret UDRL, the default opening
    let input = "4 0\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let session = game_loop(&mut interface, &NaiveSelector, Opening::default());

    assert_eq!(session.status(), SessionStatus::Solved);
    assert_eq!(session.candidates().len(), 256);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.guesses_made(), 1);
}

#[test]
fn test_end_to_end_all_same_secret() {
    let secret = code("UUUU");
    let first = score(&code("UDRL"), &secret);
    assert_eq!(first, Feedback::new(1, 0).unwrap());

    let input = "1 0\n4 0\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let session = game_loop(&mut interface, &NaiveSelector, Opening::default());

    assert_eq!(session.status(), SessionStatus::Solved);
    assert_eq!(session.history()[1].guess, secret);
    assert_eq!(session.guesses_made(), session.history().len());
}

#[test]
fn test_invalid_input_is_rejected_at_the_boundary() {
    let input = "abc\n5 0\n3 2\n-1 0\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let session = game_loop(&mut interface, &NaiveSelector, Opening::default());

    assert_eq!(session.guesses_made(), 0);
    assert_eq!(session.candidates().len(), 256);
}

#[test]
fn test_undecodable_line_does_not_end_the_game() {
    let input = b"\xff\xfe\n1 0\n4 0\n".to_vec();
    let mut interface = CliInterface::new(Cursor::new(input));
    let session = game_loop(&mut interface, &NaiveSelector, Opening::default());

    assert_eq!(session.status(), SessionStatus::Solved);
    assert_eq!(session.history()[1].guess, code("UUUU"));
    assert_eq!(session.guesses_made(), 2);
}

#[test]
fn test_contradictory_feedback_then_reset() {
    let input = "1 0\n2 0\n0 0\nreset\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let session = game_loop(&mut interface, &NaiveSelector, Opening::default());

    assert_eq!(session, Session::default());
}

#[test]
fn test_contradictory_feedback_leaves_empty_set() {
    let input = "1 0\n2 0\nhistory\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let session = game_loop(&mut interface, &NaiveSelector, Opening::default());

    assert_eq!(session.status(), SessionStatus::Contradiction);
    assert!(session.candidates().is_empty());
    assert_eq!(session.current_guess(), None);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_eof_ends_the_loop() {
    let mut interface = CliInterface::new(Cursor::new("1 1\n"));
    let session = game_loop(&mut interface, &MinimaxSelector, Opening::default());
    assert_eq!(session.guesses_made(), 1);
    assert_eq!(session.status(), SessionStatus::InProgress);
}

#[test]
fn test_scripted_games_reach_the_secret() {
    let space = generate_code_space();
    let strategies: [(&dyn GuessSelector, Opening); 3] = [
        (&NaiveSelector, Opening::default()),
        (&MinimaxSelector, Opening::default()),
        (&MinimaxSelector, Opening::Auto),
    ];
    for (selector, opening) in strategies {
        for secret in space.iter().step_by(17) {
            let script = honest_script(*secret, selector, opening);
            let mut interface = CliInterface::new(Cursor::new(script));
            let session = game_loop(&mut interface, selector, opening);

            assert_eq!(session.status(), SessionStatus::Solved, "{secret}");
            assert_eq!(session.history().last().unwrap().guess, *secret);
            assert_eq!(session.guesses_made(), session.history().len());
        }
    }
}

#[test]
fn test_secret_survives_every_round() {
    let secret = code("LDLR");
    let space = generate_code_space();
    let mut candidates = space.clone();
    let mut guess = code("UDRL");
    let mut previous = candidates.len();

    for _ in 0..8 {
        let feedback = score(&guess, &secret);
        if feedback == Feedback::WIN {
            break;
        }
        candidates = filter_candidates(&candidates, &guess, feedback);
        assert!(candidates.contains(&secret));
        assert!(candidates.len() <= previous);
        previous = candidates.len();
        guess = minimax_guess(&candidates, &space).unwrap();
    }
    assert_eq!(guess, secret);
}

#[test]
fn test_selectors_agree_on_degenerate_sets() {
    let space = generate_code_space();
    let only = code("DDLR");
    for selector in [Strategy::Naive.selector(), Strategy::Minimax.selector()] {
        assert_eq!(selector.select(&[], &space), None);
        assert_eq!(selector.select(&[only], &space), Some(only));
    }
}

#[test]
fn test_first_round_partition_bound() {
    let space = generate_code_space();
    let guess = MinimaxSelector.select(&space, &space).unwrap();
    // best worst case over the whole space, found by exhaustive search
    assert_eq!(worst_case_partition(&guess, &space), 46);
    assert!(worst_case_partition(&guess, &space) < worst_case_partition(&code("UDRL"), &space));
}

#[test]
fn test_session_round_trips_through_json() {
    let mut session = Session::default();
    session
        .apply_feedback(Feedback::new(0, 2).unwrap(), &MinimaxSelector)
        .unwrap();
    let json = serde_json::to_string_pretty(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.candidates(), session.candidates());
    assert_eq!(restored.history(), session.history());
    assert_eq!(restored.current_guess(), session.current_guess());
}
