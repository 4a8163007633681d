//! Language model client for extraction and summaries.
//!
//! Everything that needs generated text goes through the [`TextModel`]
//! trait; the Gemini REST client is the only real implementation. Retry
//! with exponential backoff lives here, next to the network call it
//! protects, so callers only ever see the final success or failure.

use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;
use crate::error::{HomescoutError, Result};
use crate::http::{AGENT, USER_AGENT};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Anything that can turn a prompt into text
pub trait TextModel {
    /// Generate a completion for the prompt. May fail transiently; retry
    /// policy is the implementation's concern, not the caller's.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Retry policy for rate-limited model calls
#[derive(Debug, Clone, Copy)]
pub struct Retry {
    /// Total attempts before giving up
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each subsequent retry
    pub initial_delay: Duration,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(5),
        }
    }
}

impl From<&RetryConfig> for Retry {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_secs(config.initial_delay_secs),
        }
    }
}

/// Google Gemini REST client
pub struct GeminiClient {
    api_key: String,
    model: String,
    retry: Retry,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            retry: Retry::default(),
        }
    }

    pub fn with_retry(mut self, retry: Retry) -> Self {
        self.retry = retry;
        self
    }

    fn call_once(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = AGENT
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .send_json(&payload)?;
        let raw = response.into_body().read_to_string()?;
        let body: serde_json::Value = serde_json::from_str(&raw)?;
        response_text(&body)
    }
}

impl TextModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        with_retry(self.retry, || self.call_once(prompt))
    }
}

/// Pull the generated text out of a generateContent response body
fn response_text(body: &serde_json::Value) -> Result<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| HomescoutError::ModelError("response had no text candidates".into()))
}

/// Run a call, sleeping through rate limits until the attempt cap
pub(crate) fn with_retry<T>(retry: Retry, mut call: impl FnMut() -> Result<T>) -> Result<T> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match call() {
            Err(e) if is_rate_limited(&e) => {
                if attempt >= retry.max_attempts {
                    return Err(HomescoutError::RateLimited(format!(
                        "gave up after {} attempts: {}",
                        attempt, e
                    )));
                }
                thread::sleep(backoff_delay(retry.initial_delay, attempt));
            }
            other => return other,
        }
    }
}

fn is_rate_limited(err: &HomescoutError) -> bool {
    matches!(
        err,
        HomescoutError::HttpError(ureq::Error::StatusCode(429)) | HomescoutError::RateLimited(_)
    )
}

/// Exponential backoff with a little jitter to avoid thundering retries
fn backoff_delay(initial: Duration, attempt: u32) -> Duration {
    let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..=1000));
    base_delay(initial, attempt) + jitter
}

fn base_delay(initial: Duration, attempt: u32) -> Duration {
    initial * 2u32.saturating_pow(attempt.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_base_delay_doubles() {
        let initial = Duration::from_secs(5);
        assert_eq!(base_delay(initial, 1), Duration::from_secs(5));
        assert_eq!(base_delay(initial, 2), Duration::from_secs(10));
        assert_eq!(base_delay(initial, 3), Duration::from_secs(20));
    }

    #[test]
    fn test_response_text_happy_path() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  hello  " }] }
            }]
        });
        assert_eq!(response_text(&body).unwrap(), "hello");
    }

    #[test]
    fn test_response_text_missing_candidates() {
        let body = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(
            response_text(&body),
            Err(HomescoutError::ModelError(_))
        ));
    }

    #[test]
    fn test_with_retry_recovers_after_rate_limits() {
        let calls = Cell::new(0u32);
        let retry = Retry {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
        };
        let result = with_retry(retry, || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(HomescoutError::RateLimited("throttled".into()))
            } else {
                Ok("done")
            }
        });
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_with_retry_gives_up_at_cap() {
        let calls = Cell::new(0u32);
        let retry = Retry {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1),
        };
        let result: Result<()> = with_retry(retry, || {
            calls.set(calls.get() + 1);
            Err(HomescoutError::RateLimited("throttled".into()))
        });
        assert!(matches!(result, Err(HomescoutError::RateLimited(_))));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_with_retry_passes_other_errors_through() {
        let calls = Cell::new(0u32);
        let result: Result<()> = with_retry(Retry::default(), || {
            calls.set(calls.get() + 1);
            Err(HomescoutError::ModelError("bad response".into()))
        });
        assert!(matches!(result, Err(HomescoutError::ModelError(_))));
        assert_eq!(calls.get(), 1);
    }
}
