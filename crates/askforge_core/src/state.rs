use crate::stages::STAGE_LABELS;
use crate::view_model::{AppViewModel, MessageView};
use crate::Message;

/// Where the controller is within a conversation turn.
///
/// The busy affordance of the UI derives from this: anything other than
/// `Idle` means a submission is in flight and further submits are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Stage markers are still being inserted; the request has not been sent.
    AwaitingStages,
    /// The request is in flight and chunks may arrive.
    Streaming,
}

/// Bookkeeping for the turn currently in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TurnContext {
    /// Message count up to and including the submitted user message.
    base_len: usize,
    /// Stage markers inserted so far this turn.
    stages_inserted: usize,
    /// Stage markers still to insert.
    stages_remaining: usize,
    /// Raw streamed text accumulated so far (pre-collapse).
    buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    messages: Vec<Message>,
    /// Indices into `messages` that hold stage markers. Stable because the
    /// transcript only ever truncates past the current turn's markers.
    marker_indices: Vec<usize>,
    input: String,
    phase: Phase,
    turn: Option<TurnContext>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            messages: self
                .messages
                .iter()
                .enumerate()
                .map(|(index, m)| MessageView {
                    role: m.role,
                    content: m.content.clone(),
                    stage_marker: self.marker_indices.contains(&index),
                })
                .collect(),
            input: self.input.clone(),
            busy: self.phase != Phase::Idle,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it; used to coalesce repaints.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        self.mark_dirty();
    }

    /// Appends the user message, clears the input and opens a new turn.
    pub(crate) fn begin_turn(&mut self, user_text: String, with_stages: bool) {
        self.messages.push(Message::user(user_text));
        self.input.clear();
        self.turn = Some(TurnContext {
            base_len: self.messages.len(),
            stages_inserted: 0,
            stages_remaining: if with_stages { STAGE_LABELS.len() } else { 0 },
            buffer: String::new(),
        });
        self.phase = if with_stages {
            Phase::AwaitingStages
        } else {
            Phase::Streaming
        };
        self.mark_dirty();
    }

    /// The history to send upstream: everything up to and including the
    /// submitted user message. Stage markers are inserted after `base_len`
    /// and therefore never leak into the request.
    pub(crate) fn request_history(&self) -> Vec<Message> {
        match &self.turn {
            Some(turn) => self.messages[..turn.base_len].to_vec(),
            None => self.messages.clone(),
        }
    }

    /// Appends the next stage marker. Returns `true` while more remain;
    /// after the last one the phase advances to `Streaming`.
    pub(crate) fn insert_stage(&mut self) -> bool {
        let Some(turn) = self.turn.as_mut() else {
            return false;
        };
        if turn.stages_remaining == 0 {
            return false;
        }
        let label = STAGE_LABELS[turn.stages_inserted];
        self.messages.push(Message::assistant(label));
        self.marker_indices.push(self.messages.len() - 1);
        turn.stages_inserted += 1;
        turn.stages_remaining -= 1;
        let more = turn.stages_remaining > 0;
        if !more {
            self.phase = Phase::Streaming;
        }
        self.mark_dirty();
        more
    }

    /// Accumulates a decoded delta and republishes the whole buffer:
    /// the message tail (everything past the user message plus inserted
    /// stage markers) is replaced by one assistant message holding the
    /// newline-collapsed text so far.
    pub(crate) fn apply_chunk(&mut self, delta: &str) {
        let Some(turn) = self.turn.as_mut() else {
            return;
        };
        turn.buffer.push_str(delta);
        let collapsed = collapse_newlines(&turn.buffer);
        let keep = turn.base_len + turn.stages_inserted;
        self.messages.truncate(keep);
        self.messages.push(Message::assistant(collapsed));
        self.mark_dirty();
    }

    /// Closes the turn and returns to `Idle`. Called on both normal stream
    /// end and failure so the busy affordance always clears.
    pub(crate) fn end_turn(&mut self) {
        self.turn = None;
        self.phase = Phase::Idle;
        self.mark_dirty();
    }
}

/// Collapses every run of two or more consecutive newlines into one.
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_newline = false;
    for ch in text.chars() {
        if ch == '\n' {
            if last_was_newline {
                continue;
            }
            last_was_newline = true;
        } else {
            last_was_newline = false;
        }
        out.push(ch);
    }
    out
}
