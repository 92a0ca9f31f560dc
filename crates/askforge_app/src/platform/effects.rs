use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use askforge_core::{Effect, Message, Msg};
use askforge_relay::{ChatRequest, RelayConfig, RelayServer, StreamDecoder, WireMessage};
use forge_logging::{forge_error, forge_info};
use futures_util::StreamExt;

use super::app::AppEvent;

enum RunnerCommand {
    Send { messages: Vec<Message> },
    Stage { delay: Duration },
}

/// Executes controller effects on a background tokio runtime and feeds the
/// outcomes back to the main loop as [`Msg`]s.
///
/// The runtime also hosts the relay itself, so the whole application is a
/// single process; requests go over loopback to the bound port.
pub struct EffectRunner {
    cmd_tx: mpsc::Sender<RunnerCommand>,
}

impl EffectRunner {
    pub fn new(event_tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RunnerCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<std::io::Result<SocketAddr>>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

            let server = match runtime.block_on(RelayServer::bind(RelayConfig::from_env())) {
                Ok(server) => server,
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };
            let addr = match server.local_addr() {
                Ok(addr) => addr,
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(addr));
            runtime.spawn(async move {
                if let Err(err) = server.run().await {
                    forge_error!("relay server stopped: {err}");
                }
            });

            let endpoint = format!("http://{addr}/api/chat");
            let http = reqwest::Client::new();
            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                match command {
                    RunnerCommand::Stage { delay } => {
                        runtime.spawn(async move {
                            tokio::time::sleep(delay).await;
                            let _ = event_tx.send(AppEvent::Core(Msg::StageTimerFired));
                        });
                    }
                    RunnerCommand::Send { messages } => {
                        let http = http.clone();
                        let endpoint = endpoint.clone();
                        runtime.spawn(async move {
                            stream_response(http, endpoint, messages, event_tx).await;
                        });
                    }
                }
            }
        });

        let addr = ready_rx.recv()??;
        forge_info!("in-process relay ready at {addr}");
        Ok(Self { cmd_tx })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendRequest { messages } => {
                    let _ = self.cmd_tx.send(RunnerCommand::Send { messages });
                }
                Effect::ScheduleStage { delay } => {
                    let _ = self.cmd_tx.send(RunnerCommand::Stage { delay });
                }
            }
        }
    }
}

/// Posts the conversation to the relay and pumps the plain-text response
/// back chunk by chunk. Every exit path emits exactly one terminal message,
/// either `StreamEnded` or `StreamFailed`.
async fn stream_response(
    http: reqwest::Client,
    endpoint: String,
    messages: Vec<Message>,
    event_tx: mpsc::Sender<AppEvent>,
) {
    let send = |msg: Msg| {
        let _ = event_tx.send(AppEvent::Core(msg));
    };

    let request = ChatRequest {
        messages: messages.iter().map(to_wire).collect(),
    };
    let response = match http.post(&endpoint).json(&request).send().await {
        Ok(response) => response,
        Err(err) => {
            forge_error!("chat request failed: {err}");
            send(Msg::StreamFailed {
                reason: err.to_string(),
            });
            return;
        }
    };
    if !response.status().is_success() {
        let status = response.status().as_u16();
        forge_error!("chat request rejected with status {status}");
        send(Msg::StreamFailed {
            reason: format!("relay returned status {status}"),
        });
        return;
    }

    let mut stream = response.bytes_stream();
    let mut decoder = StreamDecoder::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                let text = decoder.push(&chunk);
                if !text.is_empty() {
                    send(Msg::ChunkReceived(text));
                }
            }
            Err(err) => {
                forge_error!("response stream failed: {err}");
                send(Msg::StreamFailed {
                    reason: err.to_string(),
                });
                return;
            }
        }
    }
    let tail = decoder.finish();
    if !tail.is_empty() {
        send(Msg::ChunkReceived(tail));
    }
    send(Msg::StreamEnded);
}

fn to_wire(message: &Message) -> WireMessage {
    WireMessage {
        role: message.role.as_str().to_owned(),
        content: message.content.clone(),
    }
}
