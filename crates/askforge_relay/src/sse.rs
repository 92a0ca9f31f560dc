//! Line-oriented parsing of the provider's server-sent-event stream.
//!
//! The provider emits `data: <json>` records terminated by `data: [DONE]`.
//! Records can be split across network chunks at any byte, so raw bytes are
//! buffered until a full line is available.

use serde::Deserialize;

/// One parsed record of the upstream stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text; empty when the record carried no content delta.
    Delta(String),
    /// The `[DONE]` sentinel; the stream is complete.
    Done,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Parses one SSE line. Blank lines, comments and unparseable payloads
/// yield `None` and are skipped by the caller.
pub fn parse_event(line: &str) -> Option<StreamEvent> {
    let line = line.trim_end_matches('\r');
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload == "[DONE]" {
        return Some(StreamEvent::Done);
    }
    let chunk: StreamChunk = serde_json::from_str(payload).ok()?;
    let delta = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .unwrap_or_default();
    Some(StreamEvent::Delta(delta))
}

/// Accumulates raw wire bytes and yields complete lines.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Pops the next complete line, without its terminating newline.
    /// Bytes after the last newline stay buffered for the next chunk.
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=newline).collect();
        let line = &line[..line.len() - 1];
        Some(String::from_utf8_lossy(line).into_owned())
    }
}
