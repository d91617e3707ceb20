/// Result of checking one typed character against the current word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct { completes_word: bool },
    Mismatch,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }

    pub fn completes_word(&self) -> bool {
        matches!(
            self,
            Verdict::Correct {
                completes_word: true
            }
        )
    }
}

/// Characters that count as typing; everything else is a no-op during play
pub fn is_accepted(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-'
}

/// Checks `typed` against the character of `target` right after `buffer`.
///
/// `buffer` is the correctly typed prefix so far. A full buffer means the
/// word is waiting to be advanced, so any further character is a mismatch.
pub fn evaluate(target: &str, buffer: &str, typed: char) -> Verdict {
    let pos = buffer.chars().count();
    let target_len = target.chars().count();
    if pos >= target_len {
        return Verdict::Mismatch;
    }

    let typed = typed.to_ascii_lowercase();
    match target.chars().nth(pos) {
        Some(expected) if expected == typed => Verdict::Correct {
            completes_word: pos + 1 == target_len,
        },
        _ => Verdict::Mismatch,
    }
}
