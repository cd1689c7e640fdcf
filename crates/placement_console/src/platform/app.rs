use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use placement_client::{ClientSettings, ReqwestBackend};
use placement_core::{has_spreadsheet_extension, update, AppState, Msg, SPREADSHEET_EXTENSIONS};
use placement_logging::{placement_debug, placement_info, placement_warn};

use super::effects::{EffectRunner, EffectSink};
use super::input::{parse_command, Command};
use super::logging::{self, LogDestination};
use super::{config, ui};

/// Everything the dispatch loop reacts to, in arrival order.
#[derive(Debug)]
pub enum ConsoleEvent {
    Input(String),
    InputClosed,
    Core(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let config = config::load()?;
    placement_info!("Using backend {}", config.backend_base_url);
    let backend = ReqwestBackend::new(ClientSettings {
        base_url: config.backend_base_url,
    })?;

    let (event_tx, event_rx) = mpsc::channel::<ConsoleEvent>();
    let runner = EffectRunner::new(Arc::new(backend), event_tx.clone())?;
    spawn_input_reader(event_tx);

    let mut console = Console::new(runner, io::stdout());
    console.redraw()?;
    console.print(ui::constants::HELP_TEXT)?;

    while let Ok(event) = event_rx.recv() {
        let keep_running = match event {
            ConsoleEvent::Input(line) => console.handle_command(parse_command(&line))?,
            ConsoleEvent::Core(msg) => {
                console.dispatch(msg)?;
                true
            }
            ConsoleEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }

    placement_info!("Console closed");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<ConsoleEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if events.send(ConsoleEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = events.send(ConsoleEvent::InputClosed);
    });
}

/// Owns the view state; the only place `update` is called.
struct Console<S, W> {
    state: AppState,
    effects: S,
    out: W,
}

impl<S: EffectSink, W: Write> Console<S, W> {
    fn new(effects: S, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
        }
    }

    /// Returns `false` when the operator asked to quit.
    fn handle_command(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Dispatch(msg) => {
                if let Msg::FileSelected(path) = &msg {
                    if !has_spreadsheet_extension(path) {
                        placement_warn!("Selected file {:?} is not a spreadsheet", path);
                        self.print(&format!(
                            "Note: expected one of {:?}; uploading anyway if asked.",
                            SPREADSHEET_EXTENSIONS
                        ))?;
                    }
                }
                self.dispatch(msg)?;
            }
            Command::Show => self.redraw()?,
            Command::Help => self.print(ui::constants::HELP_TEXT)?,
            Command::Quit => return Ok(false),
            Command::Unknown(word) => {
                self.print(&format!("Unknown command `{word}`. Type `help` for the list."))?;
            }
        }
        Ok(true)
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let settles = matches!(
            msg,
            Msg::RequestSucceeded { .. } | Msg::RequestFailed { .. }
        );

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if settles && !was_dirty {
            placement_debug!("Ignored result of a superseded request");
        }
        self.effects.enqueue(effects);

        if was_dirty {
            self.redraw()?;
        }
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        let view = self.state.view();
        writeln!(self.out)?;
        for line in ui::render::render(&view) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}
