//! Web search for property listings.
//!
//! The search side of the pipeline is a thin collaborator: build a query
//! from the buyer's preferences, hand it to a provider, get back listings.
//! The provider sits behind a trait so the pipeline and tests never depend
//! on the network.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{HomescoutError, Result};
use crate::http::{AGENT, USER_AGENT};
use crate::preferences::UserPreferences;

/// One search hit for a property listing
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Where listings come from
pub trait SearchProvider {
    /// Run a text query, returning up to `max_results` listings.
    /// May return fewer, or none at all.
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<Listing>>;
}

/// Build the listing search query from the buyer's preferences.
/// Only clauses the buyer actually supplied make it into the query.
pub fn build_query(prefs: &UserPreferences) -> String {
    let mut parts = vec![format!("property for sale in {}", prefs.location)];
    if !prefs.budget.trim().is_empty() {
        parts.push(format!("budget {}", prefs.budget));
    }
    if !prefs.carpet_area.trim().is_empty() {
        parts.push(format!("carpet area around {} sq ft", prefs.carpet_area));
    }
    if !prefs.floor_preference.trim().is_empty() {
        parts.push(format!("floor preference {}", prefs.floor_preference));
    }
    parts.join(" ")
}

/// DuckDuckGo HTML search (no API key needed)
pub struct DuckDuckGo {
    region: String,
}

impl DuckDuckGo {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

impl SearchProvider for DuckDuckGo {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<Listing>> {
        let url = format!(
            "https://html.duckduckgo.com/html/?q={}&kl={}",
            urlencoding::encode(query),
            self.region
        );

        let request = AGENT.get(&url).header("User-Agent", USER_AGENT);
        let response = request.call()?;
        let html = response.into_body().read_to_string()?;

        parse_results(&html, max_results)
    }
}

/// Parse DuckDuckGo's HTML results page into listings
fn parse_results(html: &str, max_results: usize) -> Result<Vec<Listing>> {
    let document = Html::parse_document(html);
    let result_sel = Selector::parse("div.result")
        .map_err(|e| HomescoutError::SearchError(format!("{:?}", e)))?;
    let title_sel = Selector::parse("a.result__a")
        .map_err(|e| HomescoutError::SearchError(format!("{:?}", e)))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| HomescoutError::SearchError(format!("{:?}", e)))?;

    let mut listings = Vec::new();
    for result in document.select(&result_sel) {
        if listings.len() >= max_results {
            break;
        }

        // Sponsored results carry a result--ad class
        if result
            .value()
            .attr("class")
            .is_some_and(|c| c.contains("result--ad"))
        {
            continue;
        }

        let Some(anchor) = result.select(&title_sel).next() else {
            continue;
        };
        let title = collapse_whitespace(&anchor.text().collect::<Vec<_>>().join(" "));
        let href = anchor.value().attr("href").unwrap_or_default();
        if title.is_empty() || href.is_empty() {
            continue;
        }

        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|s| collapse_whitespace(&s.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_default();

        listings.push(Listing {
            title,
            snippet,
            url: resolve_result_url(href),
        });
    }

    Ok(listings)
}

/// DuckDuckGo wraps result links in a redirect; pull the target back out
fn resolve_result_url(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        href.to_string()
    };

    if let Ok(parsed) = Url::parse(&absolute) {
        if parsed.path().starts_with("/l/") {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }
    }

    absolute
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
