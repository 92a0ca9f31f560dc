use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use askforge_core::{update, AppState, Msg};
use forge_logging::{forge_info, forge_warn};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;

/// Everything the main loop reacts to: controller messages from the effect
/// runner plus terminal input.
pub enum AppEvent {
    Core(Msg),
    InputLine(String),
    Eof,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    forge_info!("askforge starting");

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(event_tx.clone())?;
    spawn_stdin_reader(event_tx);

    let mut state = AppState::new();
    ui::render::repaint(&state.view())?;
    state.consume_dirty();

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            AppEvent::Core(msg) => msg,
            AppEvent::InputLine(line) => {
                state = dispatch(state, Msg::InputChanged(line), &runner);
                Msg::Submitted
            }
            AppEvent::Eof => break,
        };
        state = dispatch(state, msg, &runner);
        if state.consume_dirty() {
            ui::render::repaint(&state.view())?;
        }
    }

    forge_info!("askforge exiting");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

/// Reads stdin line by line on a dedicated thread. Each line is one
/// submission; EOF ends the session.
fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::InputLine(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    forge_warn!("stdin read failed: {err}");
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::Eof);
    });
}
