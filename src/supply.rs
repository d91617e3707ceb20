use crate::{
    error::{SupplyError, SupplyResult},
    matcher,
    word::WordItem,
};
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Source of words for a session. `fetch` always produces a non-empty list.
pub trait WordSupply: Send + Sync {
    fn fetch(&self) -> Vec<WordItem>;
}

/// The built-in word list, in its original order
pub fn fallback_words() -> Vec<WordItem> {
    let file = WORDS_DIR
        .get_file("fallback.json")
        .expect("fallback word list not found");
    let contents = file
        .contents_utf8()
        .expect("Unable to interpret fallback word list as a string");
    serde_json::from_str(contents).expect("Unable to deserialize fallback word list")
}

fn shuffled_fallback() -> Vec<WordItem> {
    let mut words = fallback_words();
    words.shuffle(&mut rand::thread_rng());
    words
}

/// Offline supply that only ever serves the built-in list
#[derive(Debug, Clone, Default)]
pub struct FallbackSupply {
    pub shuffle: bool,
}

impl WordSupply for FallbackSupply {
    fn fetch(&self) -> Vec<WordItem> {
        if self.shuffle {
            shuffled_fallback()
        } else {
            fallback_words()
        }
    }
}

/// Lowercases, strips whitespace and maps the long vowel mark to `-`.
/// Returns `None` when the result is not typeable.
pub fn normalize(item: WordItem) -> Option<WordItem> {
    let transliteration: String = item
        .transliteration
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == 'ー' { '-' } else { c })
        .collect::<String>()
        .to_lowercase();

    if transliteration.is_empty() || !transliteration.chars().all(matcher::is_accepted) {
        return None;
    }

    Some(WordItem {
        transliteration,
        ..item
    })
}

/// Parses the JSON array the model returns into normalized words
pub fn parse_words(payload: &str) -> SupplyResult<Vec<WordItem>> {
    let raw: Vec<WordItem> = serde_json::from_str(payload)?;
    let total = raw.len();
    let words: Vec<WordItem> = raw.into_iter().filter_map(normalize).collect();
    if words.is_empty() {
        return Err(SupplyError::NoUsableWords(total));
    }
    if words.len() < total {
        debug!(dropped = total - words.len(), "dropped untypeable words");
    }
    Ok(words)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: serde_json::Value,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

/// Asks Gemini for a fresh batch of Minecraft words
#[derive(Debug, Clone)]
pub struct GeminiSupply {
    api_key: Option<String>,
    model: String,
    base_url: String,
    word_count: usize,
    shuffle_fallback: bool,
}

impl GeminiSupply {
    pub fn new(api_key: Option<String>, model: impl Into<String>, word_count: usize) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            word_count,
            shuffle_fallback: true,
        }
    }

    /// Reads the key from `GEMINI_API_KEY`, then `API_KEY`
    pub fn from_env(model: impl Into<String>, word_count: usize) -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok();
        Self::new(api_key, model, word_count)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_shuffle_fallback(mut self, shuffle: bool) -> Self {
        self.shuffle_fallback = shuffle;
        self
    }

    pub fn prompt(&self) -> String {
        format!(
            "Generate a list of {} Minecraft-related words for a typing game.\n\
             Mix easy and hard words.\n\
             Includes Mobs, Items, Biomes, and general terms.\n\
             Ensure the 'romaji' is strictly lowercase.\n\
             IMPORTANT: If the Japanese word contains the long vowel mark 'ー', you MUST \
             represent it as a hyphen '-' in the romaji (e.g., 'kuri-pa-' for 'クリーパー'). \
             Do not double the vowel.\n\
             Do not include spaces in the romaji.",
            self.word_count
        )
    }

    fn request_body(&self) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(self.prompt()),
                }],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "japanese": { "type": "STRING", "description": "The word in Japanese (Kanji/Kana)" },
                            "romaji": { "type": "STRING", "description": "The word in Romaji (English letters)" },
                            "category": { "type": "STRING", "enum": ["MOB", "ITEM", "BIOME", "OTHER"] }
                        },
                        "required": ["japanese", "romaji", "category"]
                    }
                }
            }),
        }
    }

    pub fn try_fetch(&self) -> SupplyResult<Vec<WordItem>> {
        let api_key = self.api_key.as_deref().ok_or(SupplyError::MissingApiKey)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let resp = client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&self.request_body())
            .send()?
            .error_for_status()?
            .json::<GenerateResponse>()?;

        let text = resp.first_text().ok_or(SupplyError::EmptyResponse)?;
        parse_words(&text)
    }
}

impl WordSupply for GeminiSupply {
    fn fetch(&self) -> Vec<WordItem> {
        match self.try_fetch() {
            Ok(words) => {
                info!(count = words.len(), model = %self.model, "fetched words");
                words
            }
            Err(SupplyError::MissingApiKey) => {
                warn!("no API key found, using fallback words");
                fallback_words()
            }
            Err(e) => {
                warn!(error = %e, "word fetch failed, using fallback words");
                if self.shuffle_fallback {
                    shuffled_fallback()
                } else {
                    fallback_words()
                }
            }
        }
    }
}
