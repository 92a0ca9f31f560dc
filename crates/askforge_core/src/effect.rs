use std::time::Duration;

use crate::Message;

/// Side effects requested by `update`, executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the conversation history to the relay and stream the reply back
    /// as `ChunkReceived` messages, terminated by exactly one of
    /// `StreamEnded` or `StreamFailed`.
    SendRequest { messages: Vec<Message> },
    /// Fire `StageTimerFired` after the delay.
    ScheduleStage { delay: Duration },
}
