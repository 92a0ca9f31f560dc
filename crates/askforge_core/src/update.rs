use crate::stages::{is_trivial_query, STAGE_DELAY};
use crate::{AppState, Effect, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => {
            // Reject while busy: the input affordance is disabled, but the
            // state machine is the authority.
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            let trimmed = state.input().trim().to_string();
            if trimmed.is_empty() {
                return (state, Vec::new());
            }
            let with_stages = !is_trivial_query(&trimmed);
            state.begin_turn(trimmed, with_stages);
            if with_stages {
                vec![Effect::ScheduleStage { delay: STAGE_DELAY }]
            } else {
                vec![Effect::SendRequest {
                    messages: state.request_history(),
                }]
            }
        }
        Msg::StageTimerFired => {
            if state.phase() != Phase::AwaitingStages {
                return (state, Vec::new());
            }
            if state.insert_stage() {
                vec![Effect::ScheduleStage { delay: STAGE_DELAY }]
            } else {
                vec![Effect::SendRequest {
                    messages: state.request_history(),
                }]
            }
        }
        Msg::ChunkReceived(delta) => {
            if state.phase() == Phase::Streaming {
                state.apply_chunk(&delta);
            }
            Vec::new()
        }
        Msg::StreamEnded => {
            if state.phase() != Phase::Idle {
                state.end_turn();
            }
            Vec::new()
        }
        Msg::StreamFailed { reason: _ } => {
            // Same transition as a normal end: partial content stays
            // visible and the busy affordance must clear.
            if state.phase() != Phase::Idle {
                state.end_turn();
            }
            Vec::new()
        }
    };

    (state, effects)
}
