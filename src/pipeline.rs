//! Drives the full run: search, extract, match, rank.
//!
//! Per-listing extraction failures are collected and reported alongside the
//! ranking instead of aborting the run or scoring the listing at zero.

use crate::error::Result;
use crate::extract;
use crate::llm::TextModel;
use crate::matcher;
use crate::preferences::UserPreferences;
use crate::score::{self, RankedProperty};
use crate::search::{self, Listing, SearchProvider};

/// A listing the extractor could not turn into attributes
#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    pub listing: Listing,
    pub reason: String,
}

/// Everything a run produced
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Properties in final ranked order
    pub ranked: Vec<RankedProperty>,
    /// Listings dropped because extraction failed
    pub failures: Vec<ExtractionFailure>,
}

/// Extract, match, and rank an already-fetched batch of listings.
/// Listings are processed in discovery order, which is what ranking ties
/// fall back to.
pub fn analyze_listings(
    model: &dyn TextModel,
    prefs: &UserPreferences,
    listings: &[Listing],
) -> PipelineOutcome {
    let mut comparisons = Vec::new();
    let mut failures = Vec::new();

    for listing in listings {
        match extract::extract_attributes(model, listing) {
            Ok(attributes) => {
                comparisons.push(matcher::match_listing(&attributes, prefs, listing));
            }
            Err(e) => failures.push(ExtractionFailure {
                listing: listing.clone(),
                reason: e.to_string(),
            }),
        }
    }

    PipelineOutcome {
        ranked: score::rank(comparisons),
        failures,
    }
}

/// Full run: search for listings, analyze the first `analyze_limit` of them
pub fn run(
    provider: &dyn SearchProvider,
    model: &dyn TextModel,
    prefs: &UserPreferences,
    max_results: usize,
    analyze_limit: usize,
) -> Result<PipelineOutcome> {
    let query = search::build_query(prefs);
    let listings = provider.search(&query, max_results)?;
    let limit = listings.len().min(analyze_limit);
    Ok(analyze_listings(model, prefs, &listings[..limit]))
}
