use std::sync::{mpsc, Arc};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use minetype::error::SupplyResult;
use minetype::runtime::{spawn_fetch, GameEvent, Metronome, Runner, TestEventSource};
use minetype::session::{Phase, SessionConfig, SessionController};
use minetype::supply::{fallback_words, FallbackSupply, GeminiSupply, WordSupply};
use minetype::word::{Category, WordItem};

/// Supply that always fails and recovers locally, like a dead network
struct BrokenSupply;

impl BrokenSupply {
    fn try_fetch(&self) -> SupplyResult<Vec<WordItem>> {
        minetype::supply::parse_words("<html>502</html>")
    }
}

impl WordSupply for BrokenSupply {
    fn fetch(&self) -> Vec<WordItem> {
        self.try_fetch().unwrap_or_else(|_| fallback_words())
    }
}

struct FixedSupply(Vec<WordItem>);

impl WordSupply for FixedSupply {
    fn fetch(&self) -> Vec<WordItem> {
        self.0.clone()
    }
}

fn key(c: char) -> GameEvent {
    GameEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Minimal host loop: routes runner events into the controller until `done`
fn drive<F>(
    session: &mut SessionController,
    runner: &Runner<TestEventSource>,
    steps: u32,
    mut done: F,
) where
    F: FnMut(&SessionController) -> bool,
{
    for _ in 0..steps {
        match runner.step() {
            GameEvent::WordsLoaded { generation, words } => {
                session.words_loaded(generation, words);
            }
            GameEvent::Tick { generation } => {
                session.tick(generation);
            }
            GameEvent::Key(k) => {
                if let KeyCode::Char(c) = k.code {
                    session.key(c);
                }
            }
            GameEvent::Resize | GameEvent::Refresh => {}
        }
        if done(session) {
            break;
        }
    }
}

#[test]
fn headless_session_loads_and_scores() {
    let mut session = SessionController::new(SessionConfig { duration_secs: 60 });
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    let supply = Arc::new(FixedSupply(vec![
        WordItem::new("ゾンビ", "zonbi", Category::Mob),
        WordItem::new("エンド", "endo", Category::Biome),
    ]));
    let generation = session.start().unwrap();
    spawn_fetch(supply, generation, tx.clone());

    drive(&mut session, &runner, 200, |s| s.phase() == Phase::Active);
    assert_eq!(session.phase(), Phase::Active);

    for c in "zonbie".chars() {
        tx.send(key(c)).unwrap();
    }
    drive(&mut session, &runner, 200, |s| s.typed() == "e");

    let score = session.score();
    assert_eq!(score.correct_chars, 6);
    assert_eq!(score.missed_chars, 0);
    // zonbi: 10+12+14+16+18 + 100, then 'e' at combo 5
    assert_eq!(score.score, 170 + 20);
    assert_eq!(session.queue().unwrap().index(), 1);
    assert_eq!(session.current_word().unwrap().transliteration, "endo");
}

#[test]
fn headless_supply_failure_still_reaches_active() {
    let mut session = SessionController::new(SessionConfig::default());
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    let generation = session.start().unwrap();
    spawn_fetch(Arc::new(BrokenSupply), generation, tx);
    drive(&mut session, &runner, 200, |s| s.phase() == Phase::Active);

    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.queue().unwrap().len(), fallback_words().len());
}

#[test]
fn headless_gemini_without_key_reaches_active() {
    let mut session = SessionController::new(SessionConfig::default());
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    let generation = session.start().unwrap();
    let supply = GeminiSupply::new(None, "gemini-2.5-flash", 25);
    spawn_fetch(Arc::new(supply), generation, tx);
    drive(&mut session, &runner, 200, |s| s.phase() == Phase::Active);

    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.queue().unwrap().words(), fallback_words().as_slice());
}

#[test]
fn headless_timed_session_ends_once() {
    let mut session = SessionController::new(SessionConfig { duration_secs: 2 });
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    let generation = session.start().unwrap();
    spawn_fetch(Arc::new(FallbackSupply::default()), generation, tx.clone());
    drive(&mut session, &runner, 200, |s| s.phase() == Phase::Active);
    assert_eq!(session.phase(), Phase::Active);

    let metronome = Metronome::start(Duration::from_millis(10), generation, tx);
    let mut endings = 0;
    for _ in 0..200u32 {
        if let GameEvent::Tick { generation } = runner.step() {
            if session.tick(generation) {
                endings += 1;
                metronome.stop();
            }
        }
        if session.phase() == Phase::Ended && metronome.is_stopped() {
            break;
        }
    }

    assert_eq!(endings, 1);
    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.remaining_secs(), 0);
    assert!(!session.is_clock_running());
}

#[test]
fn headless_late_delivery_after_replay_is_dropped() {
    let mut session = SessionController::new(SessionConfig { duration_secs: 1 });
    let first = session.start().unwrap();
    assert!(session.words_loaded(first, fallback_words()));
    assert!(session.tick(first));

    let second = session.start().unwrap();
    // A duplicate delivery for the first session must not start the second
    assert!(!session.words_loaded(first, vec![WordItem::new("x", "x", Category::Other)]));
    assert_eq!(session.phase(), Phase::Loading);

    assert!(session.words_loaded(second, vec![WordItem::new("ベッド", "beddo", Category::Item)]));
    assert_eq!(session.current_word().unwrap().transliteration, "beddo");
    // A straggling tick from the first session is ignored
    assert!(!session.tick(first));
    assert_eq!(session.remaining_secs(), 1);
}
