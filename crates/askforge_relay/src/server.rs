//! The relay's own HTTP surface: `POST /api/chat`.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_stream::wrappers::ReceiverStream;

use forge_logging::{forge_debug, forge_info, forge_warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::filter::strip_emoji;
use crate::sse::{parse_event, SseLineBuffer, StreamEvent};
use crate::upstream::{CompletionClient, WireMessage};

/// Request body of `POST /api/chat`: the conversation so far, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
}

/// State shared across handlers. The relay keeps no per-conversation state;
/// this is just the outbound client.
#[derive(Debug)]
pub struct RelayState {
    pub client: CompletionClient,
}

/// Register the chat route.
pub fn router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/api/chat", post(relay_chat))
        .with_state(state)
}

/// Relays one conversation turn.
///
/// The upstream SSE stream is unwrapped record by record; each content delta
/// is emoji-stripped and forwarded as raw bytes. A pre-stream upstream
/// failure maps to an error response; a mid-stream failure aborts the body.
async fn relay_chat(
    State(state): State<Arc<RelayState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, RelayError> {
    if request.messages.is_empty() {
        return Err(RelayError::BadRequest("messages must not be empty".into()));
    }
    forge_debug!("relaying {} message(s) upstream", request.messages.len());

    let upstream = state.client.stream_completion(request.messages).await?;

    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Bytes, io::Error>>(16);
    tokio::spawn(async move {
        let mut stream = upstream.bytes_stream();
        let mut lines = SseLineBuffer::new();
        'relay: while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    forge_warn!("upstream stream failed mid-response: {err}");
                    let _ = tx.send(Err(io::Error::other(err))).await;
                    return;
                }
            };
            lines.push(&chunk);
            while let Some(line) = lines.next_line() {
                match parse_event(&line) {
                    Some(StreamEvent::Delta(delta)) => {
                        let filtered = strip_emoji(&delta);
                        if filtered.is_empty() {
                            continue;
                        }
                        let bytes = Bytes::copy_from_slice(filtered.as_bytes());
                        if tx.send(Ok(bytes)).await.is_err() {
                            // Caller hung up; stop reading upstream.
                            break 'relay;
                        }
                    }
                    Some(StreamEvent::Done) => break 'relay,
                    None => {}
                }
            }
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx));
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response())
}

/// A bound-but-not-yet-running relay, so callers can separate the bind
/// (and its error) from the serve loop.
#[derive(Debug)]
pub struct RelayServer {
    listener: TcpListener,
    router: Router,
}

impl RelayServer {
    pub async fn bind(config: RelayConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(&config.bind_address).await?;
        forge_info!("relay listening on {}", listener.local_addr()?);
        let state = Arc::new(RelayState {
            client: CompletionClient::new(config),
        });
        Ok(Self {
            listener,
            router: router(state),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until the process exits.
    pub async fn run(self) -> io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
