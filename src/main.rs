mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use minetype::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_tracing,
    matcher::Verdict,
    runtime::{spawn_fetch, CrosstermEventSource, GameEvent, Metronome, Runner},
    session::{Phase, SessionConfig, SessionController},
    supply::{FallbackSupply, GeminiSupply, WordSupply},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    sync::{mpsc::Sender, Arc},
    time::{Duration, Instant},
};
use tracing::{info, warn};

const REFRESH_MS: u64 = 100;
const TICK_INTERVAL: Duration = Duration::from_secs(1);
const FLASH_DURATION: Duration = Duration::from_millis(200);

/// blocky typing tui: type the romaji of minecraft words before the sun sets
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the romaji of Minecraft words before the timer runs out. Words come from Gemini when GEMINI_API_KEY (or API_KEY) is set, otherwise from a built-in list. Settings given here are remembered."
)]
pub struct Cli {
    /// length of a session in seconds
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    duration: Option<u32>,

    /// number of words to ask the word service for
    #[clap(short = 'w', long, value_parser = clap::value_parser!(u64).range(1..))]
    words: Option<u64>,

    /// gemini model used to generate words
    #[clap(short = 'm', long)]
    model: Option<String>,

    /// skip the word service and play the built-in list
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    offline: Option<bool>,

    /// shuffle the built-in list when it is used after a failed fetch
    #[clap(long, num_args = 0..=1, default_missing_value = "true")]
    shuffle: Option<bool>,

    /// keep the built-in list in its original order
    #[clap(long = "no-shuffle", conflicts_with = "shuffle")]
    no_shuffle: bool,
}

impl Cli {
    /// Overlays the flags that were given on top of the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(d) = self.duration {
            cfg.duration_secs = d;
        }
        if let Some(w) = self.words {
            cfg.word_count = usize::try_from(w).unwrap_or(usize::MAX);
        }
        if let Some(ref m) = self.model {
            cfg.model = m.clone();
        }
        if let Some(o) = self.offline {
            cfg.offline = o;
        }
        if let Some(s) = self.shuffle {
            cfg.shuffle_fallback = s;
        }
        if self.no_shuffle {
            cfg.shuffle_fallback = false;
        }
        cfg
    }
}

fn build_supply(cfg: &Config) -> Arc<dyn WordSupply> {
    if cfg.offline {
        Arc::new(FallbackSupply {
            shuffle: cfg.shuffle_fallback,
        })
    } else {
        Arc::new(
            GeminiSupply::from_env(cfg.model.clone(), cfg.requested_words())
                .with_shuffle_fallback(cfg.shuffle_fallback),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub session: SessionController,
    pub flash_until: Option<Instant>,
    pub last_gain: Option<i64>,
    metronome: Option<Metronome>,
    supply: Arc<dyn WordSupply>,
}

impl App {
    pub fn new(config: SessionConfig, supply: Arc<dyn WordSupply>) -> Self {
        Self {
            session: SessionController::new(config),
            flash_until: None,
            last_gain: None,
            metronome: None,
            supply,
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some_and(|t| Instant::now() < t)
    }

    fn begin(&mut self, tx: &Sender<GameEvent>) {
        if let Some(generation) = self.session.start() {
            self.flash_until = None;
            self.last_gain = None;
            spawn_fetch(Arc::clone(&self.supply), generation, tx.clone());
        }
    }

    fn handle(&mut self, event: GameEvent, tx: &Sender<GameEvent>) -> Flow {
        let flow = match event {
            GameEvent::Key(key) => self.on_key(key, tx),
            GameEvent::Tick { generation } => {
                self.session.tick(generation);
                Flow::Continue
            }
            GameEvent::WordsLoaded { generation, words } => {
                self.session.words_loaded(generation, words);
                Flow::Continue
            }
            GameEvent::Resize | GameEvent::Refresh => Flow::Continue,
        };
        if !self.is_flashing() {
            self.flash_until = None;
        }
        self.sync_metronome(tx);
        flow
    }

    /// Runs the one-second ticker exactly while a session is active
    fn sync_metronome(&mut self, tx: &Sender<GameEvent>) {
        let generation = self.session.generation();
        match self.session.phase() {
            Phase::Active => {
                if self.metronome.as_ref().map(Metronome::generation) != Some(generation) {
                    self.metronome = Some(Metronome::start(TICK_INTERVAL, generation, tx.clone()));
                }
            }
            Phase::Idle | Phase::Loading | Phase::Ended => {
                self.metronome = None;
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, tx: &Sender<GameEvent>) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        // ctrl+c to quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.session.phase() {
            Phase::Idle => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.begin(tx),
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
            Phase::Loading => {}
            Phase::Active => match key.code {
                KeyCode::Esc => {
                    self.session.abort();
                }
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    if let Some(outcome) = self.session.key(c) {
                        self.last_gain = Some(outcome.score_delta);
                        if outcome.verdict == Verdict::Mismatch {
                            self.flash_until = Some(Instant::now() + FLASH_DURATION);
                        }
                    }
                }
                _ => {}
            },
            Phase::Ended => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.begin(tx),
                KeyCode::Esc | KeyCode::Char('m') => {
                    self.session.reset();
                }
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = init_tracing(&AppDirs::log_dir());

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if let Err(e) = store.save(&config) {
        warn!(error = %e, path = %store.path().display(), "could not save config");
    }
    info!(?config, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(SessionConfig::from(&config), build_supply(&config));
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let tx = events.sender();
    let runner = Runner::new(events, Duration::from_millis(REFRESH_MS));

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        if app.handle(runner.step(), &tx) == Flow::Quit {
            break;
        }
    }

    Ok(())
}
