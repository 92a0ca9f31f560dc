//! AskForge relay: the HTTP endpoint that forwards a conversation to the
//! hosted completion provider and streams the filtered reply back as plain
//! text.

mod config;
mod decode;
mod error;
mod filter;
mod policy;
mod server;
mod sse;
mod upstream;

pub use config::RelayConfig;
pub use decode::StreamDecoder;
pub use error::RelayError;
pub use filter::strip_emoji;
pub use policy::{system_message, SYSTEM_PROMPT};
pub use server::{router, ChatRequest, RelayServer, RelayState};
pub use sse::{parse_event, SseLineBuffer, StreamEvent};
pub use upstream::{CompletionClient, WireMessage};
