use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomescoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Search failed: {0}")]
    SearchError(String),

    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    #[error("Model call failed: {0}")]
    ModelError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Prompt cancelled: {0}")]
    PromptError(String),
}

impl HomescoutError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            HomescoutError::HttpError(_) => Some(
                "Check your internet connection, or try:\n  homescout doctor"
            ),
            HomescoutError::MissingApiKey => Some(
                "Set the key in your environment:\n  export GEMINI_API_KEY=<your key>\nOr add `api_key = \"...\"` to the config file (see `homescout init`)"
            ),
            HomescoutError::RateLimited(_) => Some(
                "The model API is throttling requests. Wait a minute and retry,\nor lower `max_results` in the config file"
            ),
            HomescoutError::SearchError(_) => Some(
                "The search provider may be blocking automated queries.\nTry again later or narrow the query with a more specific location"
            ),
            HomescoutError::ConfigError(_) => Some(
                "Run `homescout init` to write a fresh default config file"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HomescoutError>;
