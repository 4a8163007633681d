//! Shared blocking HTTP agent.

use std::time::Duration;

use once_cell::sync::Lazy;

/// Default HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every outbound request
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; homescout/0.1; +https://github.com/homescout/homescout)";

/// Shared HTTP agent for connection pooling
pub(crate) static AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        .build()
        .into()
});
