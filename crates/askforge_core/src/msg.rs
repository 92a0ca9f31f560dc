#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the pending-input buffer.
    InputChanged(String),
    /// User submitted the pending input.
    Submitted,
    /// A stage timer elapsed; the next stage marker should appear.
    StageTimerFired,
    /// A decoded text delta arrived from the response stream.
    ChunkReceived(String),
    /// The response stream finished normally.
    StreamEnded,
    /// The request or stream read failed; the turn is abandoned.
    StreamFailed { reason: String },
}
