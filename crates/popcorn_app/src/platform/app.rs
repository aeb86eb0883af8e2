use std::io;
use std::panic;
use std::time::Duration;

use anyhow::{Context, Result};
use engine_logging::{engine_error, engine_info, engine_warn};
use log::LevelFilter;
use popcorn_core::{update, AppState, Msg};
use popcorn_engine::{ensure_data_dir, EngineHandle, FileStore};
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::cursor::Show;
use ratatui::crossterm::event::{self, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;

use super::config::{load_config, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::persistence;
use super::ui;
use super::ui::input::UiState;

const LOG_FILENAME: &str = "popcorn.log";
const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app() -> Result<()> {
    let working_dir = std::env::current_dir().context("resolving working directory")?;
    let loaded = load_config(&working_dir.join(CONFIG_FILENAME));
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let data_dir = config.data_dir(&working_dir);
    ensure_data_dir(&data_dir)
        .with_context(|| format!("preparing data directory {}", data_dir.display()))?;
    if let Err(err) = engine_logging::initialize_to_file(&data_dir.join(LOG_FILENAME), LevelFilter::Info)
    {
        eprintln!("Warning: could not create log file in {:?}: {}", data_dir, err);
    }
    if let Err(err) = &loaded {
        engine_warn!("Ignoring config, using defaults: {}", err);
    }
    engine_info!("Starting with data directory {:?}", data_dir);

    let store = FileStore::new(data_dir);
    let restored = persistence::load_watched(&store);
    let engine = EngineHandle::new(config.lookup_settings()).context("building lookup client")?;
    let runner = EffectRunner::new(engine, Box::new(store));

    let mut session = Session::new(runner);
    session.dispatch(Msg::RestoreWatched(restored));

    chain_panic_hook(leave_terminal);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = session.event_loop(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine_info!("Shutting down");
    result
}

/// Best-effort restore of the shell's terminal, usable from a panic.
fn leave_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Runs `restore` ahead of the current panic hook, so the panic message lands
/// on a usable terminal.
fn chain_panic_hook(restore: impl Fn() + Send + Sync + 'static) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        engine_error!("Panicked: {}", info);
        previous(info);
    }));
}

/// One running UI: every message is applied here, on the thread that owns the terminal.
struct Session {
    state: AppState,
    runner: EffectRunner,
    ui: UiState,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            ui: UiState::default(),
        }
    }

    /// Applies `msg` and runs its effects. Returns whether the state changed visibly.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
        self.state.consume_dirty()
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut redraw = true;
        while !self.ui.should_quit {
            if redraw {
                let view = self.state.view();
                self.ui.clamp_to(&view);
                terminal.draw(|frame| ui::render::render(frame, &view, &self.ui))?;
                redraw = false;
            }

            if event::poll(INPUT_POLL)? {
                match event::read()? {
                    Event::Key(key) => {
                        let view = self.state.view();
                        let before = self.ui.clone();
                        if let Some(msg) = ui::input::handle_key(key, &mut self.ui, &view) {
                            redraw |= self.dispatch(msg);
                        }
                        redraw |= self.ui != before;
                    }
                    Event::Resize(..) => redraw = true,
                    _ => {}
                }
            }

            for msg in self.runner.poll_messages() {
                redraw |= self.dispatch(msg);
            }
        }
        Ok(())
    }
}
