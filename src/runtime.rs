use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::debug;

use crate::supply::WordSupply;
use crate::word::WordItem;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// One second of session time has passed for `generation`
    Tick { generation: u64 },
    WordsLoaded {
        generation: u64,
        words: Vec<WordItem>,
    },
    /// Nothing arrived within the refresh interval
    Refresh,
}

/// Source of game events (keyboard, timer, word deliveries)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source: terminal input plus anything posted on `sender()`
pub struct CrosstermEventSource {
    tx: Sender<GameEvent>,
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if input_tx.send(GameEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if input_tx.send(GameEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }

    /// Handle for timers and fetch workers to post into the same queue
    pub fn sender(&self) -> Sender<GameEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: GameEventSource> {
    event_source: E,
    refresh: Duration,
}

impl<E: GameEventSource> Runner<E> {
    pub fn new(event_source: E, refresh: Duration) -> Self {
        Self {
            event_source,
            refresh,
        }
    }

    /// Blocks up to the refresh interval and returns the next event, or Refresh on timeout
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.refresh) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                GameEvent::Refresh
            }
        }
    }
}

/// Posts a `Tick` every interval until stopped or dropped.
///
/// Belongs to exactly one session generation; a stopped metronome never
/// sends again.
#[derive(Debug)]
pub struct Metronome {
    stopped: Arc<AtomicBool>,
    generation: u64,
}

impl Metronome {
    pub fn start(interval: Duration, generation: u64, tx: Sender<GameEvent>) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);

        thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::Acquire) {
                break;
            }
            if tx.send(GameEvent::Tick { generation }).is_err() {
                break;
            }
        });

        debug!(generation, "metronome started");
        Self {
            stopped,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            debug!(generation = self.generation, "metronome stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl Drop for Metronome {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs `supply.fetch()` on a worker thread and posts the result
pub fn spawn_fetch(supply: Arc<dyn WordSupply>, generation: u64, tx: Sender<GameEvent>) {
    thread::spawn(move || {
        let words = supply.fetch();
        let _ = tx.send(GameEvent::WordsLoaded { generation, words });
    });
}
