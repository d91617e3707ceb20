use serde::{Deserialize, Serialize};

/// Broad grouping shown as a tag above the word
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Category {
    Mob,
    Item,
    Biome,
    #[serde(other)]
    Other,
}

/// A single target: the native word the player reads and the romaji they type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
    #[serde(rename = "japanese")]
    pub native: String,
    #[serde(rename = "romaji")]
    pub transliteration: String,
    pub category: Category,
}

impl WordItem {
    pub fn new(native: impl Into<String>, transliteration: impl Into<String>, category: Category) -> Self {
        Self {
            native: native.into(),
            transliteration: transliteration.into(),
            category,
        }
    }

    /// Number of characters the player has to type
    pub fn len(&self) -> usize {
        self.transliteration.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.transliteration.is_empty()
    }
}

/// Words for one session, cycled in order
#[derive(Debug, Clone, PartialEq)]
pub struct WordQueue {
    words: Vec<WordItem>,
    index: usize,
}

impl WordQueue {
    /// Returns `None` when there is nothing typeable in `words`.
    pub fn new(words: Vec<WordItem>) -> Option<Self> {
        let words: Vec<WordItem> = words.into_iter().filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            return None;
        }
        Some(Self { words, index: 0 })
    }

    pub fn current(&self) -> &WordItem {
        &self.words[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[WordItem] {
        &self.words
    }

    /// Moves to the next word, wrapping back to the first after the last
    pub fn advance(&mut self) -> &WordItem {
        self.index = (self.index + 1) % self.words.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(romaji: &[&str]) -> WordQueue {
        WordQueue::new(
            romaji
                .iter()
                .map(|r| WordItem::new("x", *r, Category::Other))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_queue_is_refused() {
        assert!(WordQueue::new(vec![]).is_none());
        assert!(WordQueue::new(vec![WordItem::new("空", "", Category::Other)]).is_none());
    }

    #[test]
    fn test_empty_transliterations_are_dropped() {
        let queue = WordQueue::new(vec![
            WordItem::new("空", "", Category::Other),
            WordItem::new("ゾンビ", "zonbi", Category::Mob),
        ])
        .unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current().transliteration, "zonbi");
    }

    #[test]
    fn test_advance_wraps_to_start() {
        let mut queue = queue_of(&["endo", "beddo", "neza-"]);

        assert_eq!(queue.index(), 0);
        assert_eq!(queue.advance().transliteration, "beddo");
        assert_eq!(queue.advance().transliteration, "neza-");
        assert_eq!(queue.advance().transliteration, "endo");
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn test_single_word_queue_loops_on_itself() {
        let mut queue = queue_of(&["zonbi"]);
        queue.advance();
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn test_word_item_wire_format() {
        let json = r#"{"japanese":"ゾンビ","romaji":"zonbi","category":"MOB"}"#;
        let item: WordItem = serde_json::from_str(json).unwrap();

        assert_eq!(item, WordItem::new("ゾンビ", "zonbi", Category::Mob));
        assert_eq!(item.len(), 5);
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        let json = r#"{"japanese":"x","romaji":"x","category":"FOOD"}"#;
        let item: WordItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Other);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Mob.to_string(), "MOB");
        assert_eq!(Category::Biome.to_string(), "BIOME");
    }
}
