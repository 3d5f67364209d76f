mod logging;
mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::{debug, warn};
use typerace::{
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, FixedTicker, RaceEvent, RaceEventSource, Runner, Ticker},
    Mode, Race,
};

const DEFAULT_PROMPT: &str = "the quick brown fox jumps over the lazy dog";

/// terminal typing race with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// test mode; only `time` stops on the clock
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// seconds for `time` mode, word count for `words`
    #[clap(short = 'o', long)]
    mode_option: Option<u32>,

    /// text to type
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// raise log verbosity (-v, -vv, -vvv)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Overlay flags on top of the stored config.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(option) = self.mode_option {
            config.mode_option = option;
        }
        if let Some(prompt) = &self.prompt {
            config.prompt = Some(prompt.clone());
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Restarted,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub race: Race,
    /// Raw contents of the input field; the race receives it whole.
    pub buffer: String,
}

impl App {
    pub fn new(config: Config) -> Self {
        let race = Race::new(config.session(), config_prompt(&config));
        Self {
            config,
            race,
            buffer: String::new(),
        }
    }

    pub fn reset(&mut self) {
        self.race.teardown();
        self.race = Race::new(self.config.session(), config_prompt(&self.config));
        self.buffer.clear();
    }

    pub fn type_char(&mut self, c: char) {
        if self.race.has_finished() {
            return;
        }
        self.buffer.push(c);
        self.race.input_changed(&self.buffer);
    }

    pub fn backspace(&mut self) {
        if self.race.has_finished() || self.buffer.pop().is_none() {
            return;
        }
        self.race.input_changed(&self.buffer);
    }

    /// Restart keys only act on the results view; a running race keeps going.
    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if is_quit(&key) {
            return KeyOutcome::Quit;
        }
        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if self.race.is_running() => self.type_char(c),
            KeyCode::Char('r') | KeyCode::Enter if self.race.has_finished() => {
                self.reset();
                return KeyOutcome::Restarted;
            }
            _ => {}
        }
        KeyOutcome::Handled
    }
}

fn config_prompt(config: &Config) -> &str {
    config
        .prompt
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PROMPT)
}

fn load_config(cli: &Cli, store: &FileConfigStore) -> Config {
    let stored = store.load().unwrap_or_else(|err| {
        warn!(path = %store.path().display(), %err, "falling back to default config");
        Config::default()
    });
    let config = cli.apply_to(stored);
    if let Err(err) = store.save(&config) {
        warn!(%err, "could not save config");
    }
    config
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init_logging(cli.verbose);

    let store = FileConfigStore::new();
    let config = load_config(&cli, &store);
    debug!(?config, "effective config");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::per_second());
    let outcome = start_tui(&mut terminal, &mut app, &mut runner);

    app.race.teardown();
    runner.stop_clock();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend, E: RaceEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while let Some(event) = runner.step() {
        match event {
            RaceEvent::Tick => app.race.on_tick(),
            RaceEvent::Resize => {}
            RaceEvent::Key(key) => match app.on_key(key) {
                KeyOutcome::Quit => break,
                KeyOutcome::Restarted => runner.start_clock(),
                KeyOutcome::Handled => {}
            },
        }

        if app.race.has_finished() && runner.clock_running() {
            runner.stop_clock();
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}
