use crate::{
    clock::{ClockTick, SessionClock},
    matcher::{self, Verdict},
    rank::{rank_for, Rank},
    score::{ScoreKeeper, ScoreState},
    supply::fallback_words,
    word::{WordItem, WordQueue},
};
use tracing::{debug, info, warn};

pub const DEFAULT_DURATION_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub duration_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Loading,
    Active,
    Ended,
}

/// What an accepted keystroke did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub verdict: Verdict,
    pub score_delta: i64,
}

/// Read-only view of the session for rendering
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub phase: Phase,
    pub word: Option<&'a WordItem>,
    pub typed: &'a str,
    pub word_index: usize,
    pub queue_len: usize,
    pub remaining_secs: u32,
    pub time_fraction: f64,
    pub score: ScoreState,
    pub combo: u32,
    pub last_verdict: Option<Verdict>,
}

/// Owns one play session at a time and moves it through
/// Idle -> Loading -> Active -> Ended.
#[derive(Debug)]
pub struct SessionController {
    config: SessionConfig,
    phase: Phase,
    generation: u64,
    queue: Option<WordQueue>,
    buffer: String,
    keeper: ScoreKeeper,
    clock: SessionClock,
    last_verdict: Option<Verdict>,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            generation: 0,
            queue: None,
            buffer: String::new(),
            keeper: ScoreKeeper::new(),
            clock: SessionClock::new(config.duration_secs),
            last_verdict: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Id of the most recent start request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests a new session. Valid from `Idle` or `Ended`; returns the
    /// generation the word delivery must carry.
    pub fn start(&mut self) -> Option<u64> {
        match self.phase {
            Phase::Idle | Phase::Ended => {
                self.generation += 1;
                self.phase = Phase::Loading;
                info!(generation = self.generation, "loading words");
                Some(self.generation)
            }
            Phase::Loading | Phase::Active => None,
        }
    }

    /// Installs fetched words and begins play. Ignored unless loading the
    /// given generation.
    pub fn words_loaded(&mut self, generation: u64, words: Vec<WordItem>) -> bool {
        if self.phase != Phase::Loading || generation != self.generation {
            debug!(generation, current = self.generation, "ignoring stale word delivery");
            return false;
        }

        let queue = WordQueue::new(words).unwrap_or_else(|| {
            warn!("word supply delivered nothing typeable, using fallback words");
            WordQueue::new(fallback_words()).expect("fallback word list is never empty")
        });

        self.keeper = ScoreKeeper::new();
        self.buffer.clear();
        self.last_verdict = None;
        self.clock = SessionClock::new(self.config.duration_secs);
        self.clock.start();
        info!(words = queue.len(), secs = self.config.duration_secs, "session started");
        self.queue = Some(queue);
        self.phase = Phase::Active;
        true
    }

    /// Feeds one typed character. `None` when the key is not played.
    pub fn key(&mut self, c: char) -> Option<KeyOutcome> {
        if self.phase != Phase::Active || !matcher::is_accepted(c) {
            return None;
        }
        let queue = self.queue.as_mut()?;

        let verdict = matcher::evaluate(&queue.current().transliteration, &self.buffer, c);
        let score_delta = self.keeper.apply(verdict);
        match verdict {
            Verdict::Correct { completes_word } => {
                self.buffer.push(c.to_ascii_lowercase());
                if completes_word {
                    self.buffer.clear();
                    let next = queue.advance();
                    debug!(next = %next.transliteration, "word complete");
                }
            }
            Verdict::Mismatch => {}
        }
        self.last_verdict = Some(verdict);

        Some(KeyOutcome {
            verdict,
            score_delta,
        })
    }

    /// One second has passed for session `generation`. Returns true when this
    /// tick ended the session.
    pub fn tick(&mut self, generation: u64) -> bool {
        if self.phase != Phase::Active || generation != self.generation {
            return false;
        }
        match self.clock.tick() {
            ClockTick::Expired => {
                self.phase = Phase::Ended;
                let score = self.keeper.state();
                info!(
                    score = score.score,
                    accuracy = score.accuracy_percent(),
                    max_combo = score.max_combo,
                    "time up"
                );
                true
            }
            ClockTick::Counting(_) | ClockTick::Ignored => false,
        }
    }

    /// Abandons a running session and returns to the menu
    pub fn abort(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.clock.stop();
        info!("session aborted");
        self.clear();
        true
    }

    /// Leaves the results screen for the menu
    pub fn reset(&mut self) -> bool {
        if self.phase != Phase::Ended {
            return false;
        }
        self.clock.stop();
        self.clear();
        true
    }

    fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.queue = None;
        self.buffer.clear();
        self.keeper = ScoreKeeper::new();
        self.clock = SessionClock::new(self.config.duration_secs);
        self.last_verdict = None;
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn score(&self) -> ScoreState {
        self.keeper.state()
    }

    pub fn combo(&self) -> u32 {
        self.keeper.combo()
    }

    pub fn typed(&self) -> &str {
        &self.buffer
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    pub fn queue(&self) -> Option<&WordQueue> {
        self.queue.as_ref()
    }

    pub fn current_word(&self) -> Option<&WordItem> {
        match self.phase {
            Phase::Active | Phase::Ended => self.queue.as_ref().map(WordQueue::current),
            Phase::Idle | Phase::Loading => None,
        }
    }

    /// Final rank, available once the session has ended
    pub fn rank(&self) -> Option<Rank> {
        (self.phase == Phase::Ended).then(|| rank_for(self.keeper.state().score))
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            phase: self.phase,
            word: self.current_word(),
            typed: &self.buffer,
            word_index: self.queue.as_ref().map_or(0, WordQueue::index),
            queue_len: self.queue.as_ref().map_or(0, WordQueue::len),
            remaining_secs: self.clock.remaining_secs(),
            time_fraction: self.clock.fraction_remaining(),
            score: self.keeper.state(),
            combo: self.keeper.combo(),
            last_verdict: self.last_verdict,
        }
    }
}
