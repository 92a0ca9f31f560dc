use std::sync::Once;

use askforge_core::{update, AppState, Effect, Message, Msg, Role, STAGE_DELAY};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(forge_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

#[test]
fn empty_or_whitespace_input_is_ignored() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "   \n ");
    let view = next.view();

    assert!(effects.is_empty());
    assert!(view.messages.is_empty());
    assert!(!view.busy);
}

#[test]
fn trivial_query_skips_stages_and_sends_immediately() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "hello");
    let view = next.view();

    assert!(view.busy);
    assert_eq!(view.input, "");
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].role, Role::User);
    assert_eq!(view.messages[0].content, "hello");
    assert_eq!(
        effects,
        vec![Effect::SendRequest {
            messages: vec![Message::user("hello")],
        }]
    );
}

#[test]
fn research_query_schedules_first_stage_instead_of_sending() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "Summarize the latest inflation report");

    assert!(next.view().busy);
    assert_eq!(effects, vec![Effect::ScheduleStage { delay: STAGE_DELAY }]);
}

#[test]
fn input_is_trimmed_before_it_becomes_a_message() {
    init_logging();
    let state = AppState::new();

    let (next, _effects) = submit(state, "  hello  ");

    assert_eq!(next.view().messages[0].content, "hello");
}

#[test]
fn submit_is_rejected_while_busy() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = submit(state, "hello");

    let (next, effects) = submit(state, "hello again");
    let view = next.view();

    assert!(effects.is_empty());
    assert_eq!(view.messages.len(), 1);
}

#[test]
fn history_includes_prior_turns() {
    init_logging();
    let state = AppState::new();
    let (state, _) = submit(state, "hello");
    let (state, _) = update(state, Msg::ChunkReceived("Hi, how can I help?".into()));
    let (state, _) = update(state, Msg::StreamEnded);

    let (_state, effects) = submit(state, "hey, another one");

    assert_eq!(
        effects,
        vec![Effect::SendRequest {
            messages: vec![
                Message::user("hello"),
                Message::assistant("Hi, how can I help?"),
                Message::user("hey, another one"),
            ],
        }]
    );
}

#[test]
fn dirty_flag_is_set_by_updates_and_consumed_once() {
    init_logging();
    let state = AppState::new();
    let (mut state, _) = update(state, Msg::InputChanged("hi".into()));

    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}
