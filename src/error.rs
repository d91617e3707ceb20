use thiserror::Error;

/// Reasons a remote word fetch can fail. None of these reach the player:
/// the supply falls back to the built-in list.
#[derive(Error, Debug)]
pub enum SupplyError {
    #[error("no API key in GEMINI_API_KEY or API_KEY")]
    MissingApiKey,

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response carried no text")]
    EmptyResponse,

    #[error("no usable words in response ({0} rejected)")]
    NoUsableWords(usize),
}

pub type SupplyResult<T> = Result<T, SupplyError>;
