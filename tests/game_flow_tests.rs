//! End-to-end game flow tests.
//!
//! These drive a `Session` on virtual time, the way a presentation layer
//! would: clicks arrive, timers fire, the view is read back.

use std::time::Duration;

use memory_match::core::{Action, CardFace, CardId, GameConfig, GameState, ImageId, Phase};
use memory_match::rules::{self, Evaluation, Ignored};
use memory_match::session::{ManualClock, Session};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Started session with deck `[A,A,B,B,C,C,D,D,E,E,F,F]`.
fn arranged_session() -> (Session<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut session = Session::with_seed(GameConfig::default(), 42, clock.clone()).unwrap();
    assert!(session.start("ada").is_accepted());

    let layout: Vec<ImageId> = (0..6u8).flat_map(|i| [ImageId(i), ImageId(i)]).collect();
    session.state_mut().arrange(&layout).unwrap();
    (session, clock)
}

fn id_at(session: &Session<ManualClock>, index: usize) -> CardId {
    session.state().cards()[index].id
}

fn face_at(session: &Session<ManualClock>, index: usize) -> CardFace {
    session.state().cards()[index].face()
}

// =============================================================================
// Fixed-deck scenario
// =============================================================================

/// Mismatch, wait out the flip-back, then match.
#[test]
fn test_fixed_deck_scenario() {
    let (mut session, clock) = arranged_session();

    // A then B: no match
    session.click(id_at(&session, 0));
    let outcome = session.click(id_at(&session, 2));
    assert!(matches!(outcome.evaluation, Some(Evaluation::Mismatch(_))));
    assert_eq!(session.state().moves(), 1);
    assert_eq!(session.state().matches(), 0);

    clock.advance(ms(900));
    assert_eq!(session.poll(), 1);
    assert_eq!(face_at(&session, 0), CardFace::Hidden);
    assert_eq!(face_at(&session, 2), CardFace::Hidden);

    // A then A: match
    session.click(id_at(&session, 0));
    let outcome = session.click(id_at(&session, 1));
    assert!(matches!(outcome.evaluation, Some(Evaluation::Match(_))));
    assert_eq!(session.state().moves(), 2);
    assert_eq!(session.state().matches(), 1);
    assert_eq!(face_at(&session, 0), CardFace::Matched);
    assert_eq!(face_at(&session, 1), CardFace::Matched);
    assert!(session.state().selection().is_empty());
}

/// A third click while a mismatch is on display does nothing.
#[test]
fn test_third_click_during_mismatch_is_noop() {
    let (mut session, _clock) = arranged_session();
    session.click(id_at(&session, 0));
    session.click(id_at(&session, 2));
    let before = session.view();

    let outcome = session.click(id_at(&session, 4));

    assert_eq!(outcome.ignored, Some(Ignored::Evaluating));
    assert_eq!(session.view(), before);
}

/// Moves count evaluations, not clicks.
#[test]
fn test_moves_count_pairs_not_clicks() {
    let (mut session, clock) = arranged_session();

    session.click(id_at(&session, 0));
    assert_eq!(session.state().moves(), 0);

    session.click(id_at(&session, 3));
    assert_eq!(session.state().moves(), 1);

    // Rejected clicks never count
    session.click(id_at(&session, 5));
    session.click(id_at(&session, 0));
    assert_eq!(session.state().moves(), 1);

    clock.advance(ms(900));
    session.poll();
    session.click(id_at(&session, 2));
    session.click(id_at(&session, 3));
    assert_eq!(session.state().moves(), 2);
    assert_eq!(session.state().matches(), 1);
}

// =============================================================================
// Winning
// =============================================================================

/// The win flag waits for the reveal delay after the last match.
#[test]
fn test_win_flag_after_reveal_delay() {
    let (mut session, clock) = arranged_session();

    for pair in 0..6 {
        session.click(id_at(&session, pair * 2));
        session.click(id_at(&session, pair * 2 + 1));
    }

    assert_eq!(session.state().matches(), 6);
    assert!(!session.state().is_game_won());
    assert_eq!(session.pending_timers(), 1);

    clock.advance(ms(499));
    assert_eq!(session.poll(), 0);
    assert!(!session.state().is_game_won());

    clock.advance(ms(1));
    assert_eq!(session.poll(), 1);
    assert!(session.state().is_game_won());
    assert_eq!(session.state().phase(), Phase::Won);

    let view = session.view();
    assert!(view.is_game_won);
    assert_eq!(view.moves, 6);
    assert_eq!(view.matches, 6);

    let result = rules::result(session.state()).unwrap();
    assert_eq!(result.player_name, "ada");
    assert_eq!(result.moves, 6);
}

/// Play-again from the win screen deals a fresh game.
#[test]
fn test_play_again_after_win() {
    let (mut session, clock) = arranged_session();
    for pair in 0..6 {
        session.click(id_at(&session, pair * 2));
        session.click(id_at(&session, pair * 2 + 1));
    }
    clock.advance(ms(500));
    session.poll();
    let old_ids: Vec<CardId> = session.state().cards().iter().map(|c| c.id).collect();

    assert!(session.reset().is_accepted());

    let state = session.state();
    assert_eq!(state.phase(), Phase::Playing);
    assert_eq!(state.moves(), 0);
    assert_eq!(state.matches(), 0);
    assert!(!state.is_game_won());
    assert!(state.selection().is_empty());
    assert!(state.cards().iter().all(|c| c.face() == CardFace::Hidden));
    assert!(state.cards().iter().all(|c| !old_ids.contains(&c.id)));
}

// =============================================================================
// Reset during delays
// =============================================================================

/// Reset during the win-reveal delay: the old win never lands.
#[test]
fn test_reset_during_win_reveal() {
    let (mut session, clock) = arranged_session();
    for pair in 0..6 {
        session.click(id_at(&session, pair * 2));
        session.click(id_at(&session, pair * 2 + 1));
    }

    clock.advance(ms(200));
    session.reset();
    clock.advance(ms(1000));

    assert_eq!(session.poll(), 0);
    assert!(!session.state().is_game_won());
    assert_eq!(session.state().matches(), 0);
}

/// A stale timer dispatched by hand is rejected by the rules too.
#[test]
fn test_stale_timer_rejected_by_rules() {
    let (mut session, _clock) = arranged_session();
    session.click(id_at(&session, 0));
    let outcome = session.click(id_at(&session, 2));
    let flip = match &outcome.commands[..] {
        [memory_match::rules::Command::Schedule { action, .. }] => action.clone(),
        other => panic!("unexpected commands {other:?}"),
    };

    session.reset();
    let first_new = id_at(&session, 0);
    session.click(first_new);

    let outcome = session.dispatch(flip);
    assert!(matches!(outcome.ignored, Some(Ignored::StaleTimer { .. })));
    assert_eq!(session.state().selection(), &[first_new]);
}

// =============================================================================
// Snapshots and replay
// =============================================================================

/// A restored snapshot keeps playing exactly like the original.
#[test]
fn test_snapshot_restore_continues_identically() {
    let clock = ManualClock::new();
    let mut original = Session::with_seed(GameConfig::default(), 5, clock.clone()).unwrap();
    original.start("ada");
    let first = original.state().cards()[0].id;
    original.click(first);

    let bytes = original.state().to_bytes().unwrap();
    let restored_state = GameState::from_bytes(&bytes).unwrap();
    let mut restored = Session::from_state(restored_state, clock.clone());

    assert_eq!(restored.view(), original.view());

    original.reset();
    restored.reset();
    assert_eq!(restored.view(), original.view());
}

/// Seed plus history reproduces a whole session, timers included.
#[test]
fn test_replay_from_history() {
    let clock = ManualClock::new();
    let mut session = Session::with_seed(GameConfig::default(), 77, clock.clone()).unwrap();
    session.start("ada");

    for _ in 0..20 {
        let legal = rules::legal_clicks(session.state());
        if let Some(&id) = legal.first() {
            session.click(id);
        }
        clock.advance(ms(1000));
        session.poll();
    }

    let replayed = rules::replay(GameConfig::default(), 77, session.state().history()).unwrap();
    assert_eq!(replayed.view(), session.view());
    assert_eq!(replayed.history(), session.state().history());
}

/// The reducer can be used on its own, without a session.
#[test]
fn test_reducer_without_session() {
    let state = GameState::new(GameConfig::default(), 3).unwrap();
    let (state, outcome) = rules::reduce(&state, &Action::start("ada"));
    assert!(outcome.is_accepted());

    let a = state.cards()[0].id;
    let (after_click, _) = rules::reduce(&state, &Action::ClickCard(a));

    assert_eq!(state.selection().len(), 0);
    assert_eq!(after_click.selection(), &[a]);
}
