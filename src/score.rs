use crate::matcher::Verdict;

pub const BASE_POINTS: u32 = 10;
pub const COMBO_POINTS: u32 = 2;
pub const WORD_BONUS: u32 = 100;
pub const MISS_PENALTY: u32 = 5;

/// Running totals for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub correct_chars: u32,
    pub missed_chars: u32,
    pub max_combo: u32,
}

impl ScoreState {
    /// Fraction of keystrokes that were correct, 0.0 before anything is typed
    pub fn accuracy(&self) -> f64 {
        let total = self.correct_chars as u64 + self.missed_chars as u64;
        if total == 0 {
            0.0
        } else {
            self.correct_chars as f64 / total as f64
        }
    }

    pub fn accuracy_percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }
}

/// Applies the scoring rules; owns the score and the combo counter
#[derive(Debug, Clone, Default)]
pub struct ScoreKeeper {
    state: ScoreState,
    combo: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Applies everything one keystroke earns or costs in a single step and
    /// returns the change in score.
    pub fn apply(&mut self, verdict: Verdict) -> i64 {
        let before = self.state.score;
        match verdict {
            Verdict::Correct { completes_word } => {
                self.correct();
                if completes_word {
                    self.state.score = self.state.score.saturating_add(WORD_BONUS);
                }
            }
            Verdict::Mismatch => self.mismatch(),
        }
        self.state.score as i64 - before as i64
    }

    fn correct(&mut self) {
        let reward = BASE_POINTS.saturating_add(COMBO_POINTS.saturating_mul(self.combo));
        self.state.correct_chars = self.state.correct_chars.saturating_add(1);
        self.state.score = self.state.score.saturating_add(reward);
        self.combo = self.combo.saturating_add(1);
        self.state.max_combo = self.state.max_combo.max(self.combo);
    }

    fn mismatch(&mut self) {
        self.state.missed_chars = self.state.missed_chars.saturating_add(1);
        self.state.score = self.state.score.saturating_sub(MISS_PENALTY);
        self.combo = 0;
    }
}
