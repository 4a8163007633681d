//! Natural-language summaries for localities, builders, and properties.
//!
//! Research summaries are best-effort: a handful of narrow web searches
//! feed the model, and if nothing useful comes back the summary is simply
//! absent. Callers treat `Ok(None)` as "nothing to show", not a failure.

use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::llm::TextModel;
use crate::preferences::UserPreferences;
use crate::search::SearchProvider;

/// Pause between research queries to stay polite with the search provider
const QUERY_DELAY: Duration = Duration::from_secs(1);

const LOCALITY_PROMPT: &str = r#"You are a helpful AI assistant summarizing information about the locality of {{location}} for a potential home buyer. Based on the following information found on the internet, provide a concise summary covering aspects like nearby schools, hospitals, malls, distance from railway station, metro station, airport, places to visit, crime rate, safety parameters, and any potential problems.

Information:
{{snippets}}

Locality Summary for Buyer:"#;

const BUILDER_PROMPT: &str = r#"You are a helpful AI assistant summarizing information about a property builder named {{builder}}. Based on the following information found on the internet, provide a concise summary of potential pros and cons for a buyer.

Information:
{{snippets}}

Summary of potential pros:
-

Summary of potential cons:
-"#;

const PROPERTY_PROMPT: &str = r#"Based on your preferences:
Location: {{location}}
Budget: {{budget}}
Carpet Area: {{carpet_area}} sq ft
Floor Preference: {{floor_preference}}
Preferred Amenities: {{preferred_amenities}}
Financing Options: {{financing}}

And the following comparison points for this property:
{{findings}}

Provide a short, concise summary of how well this property aligns with the user's overall preferences, highlighting potential pros and cons."#;

/// The research angles used to profile a locality for a buyer
pub fn locality_queries(location: &str) -> Vec<String> {
    [
        "schools",
        "hospitals",
        "malls",
        "distance from railway station",
        "distance from metro station",
        "distance from airport",
        "places to visit",
        "crime rate safety",
        "problems",
    ]
    .iter()
    .map(|aspect| format!("{} {}", location, aspect))
    .collect()
}

/// The research angles used to profile a builder
pub fn builder_queries(builder: &str) -> Vec<String> {
    ["reputation", "past projects", "reviews"]
        .iter()
        .map(|aspect| format!("{} {}", builder, aspect))
        .collect()
}

/// Research a locality and summarize the findings for a buyer.
/// Returns `Ok(None)` when no snippets turned up to summarize.
pub fn locality_summary(
    provider: &dyn SearchProvider,
    model: &dyn TextModel,
    location: &str,
) -> Result<Option<String>> {
    let snippets = gather_snippets(provider, &locality_queries(location));
    if snippets.is_empty() {
        return Ok(None);
    }

    let prompt = LOCALITY_PROMPT
        .replace("{{location}}", location)
        .replace("{{snippets}}", &snippets.join(" "));
    model.generate(&prompt).map(Some)
}

/// Research a builder's reputation and summarize pros and cons
pub fn builder_summary(
    provider: &dyn SearchProvider,
    model: &dyn TextModel,
    builder: &str,
) -> Result<Option<String>> {
    if builder.trim().is_empty() {
        return Ok(None);
    }

    let snippets = gather_snippets(provider, &builder_queries(builder));
    if snippets.is_empty() {
        return Ok(None);
    }

    let prompt = BUILDER_PROMPT
        .replace("{{builder}}", builder)
        .replace("{{snippets}}", &snippets.join(" "));
    model.generate(&prompt).map(Some)
}

/// Summarize how one ranked property lines up with the buyer's preferences
pub fn property_summary(
    model: &dyn TextModel,
    prefs: &UserPreferences,
    findings: &[String],
) -> Result<String> {
    let prompt = PROPERTY_PROMPT
        .replace("{{location}}", &prefs.location)
        .replace("{{budget}}", &prefs.budget)
        .replace("{{carpet_area}}", &prefs.carpet_area)
        .replace("{{floor_preference}}", &prefs.floor_preference)
        .replace("{{preferred_amenities}}", &prefs.preferred_amenities)
        .replace("{{financing}}", &prefs.financing)
        .replace("{{findings}}", &findings.join(" "));
    model.generate(&prompt)
}

/// Run each query for a single result and collect the snippets.
/// A failed query contributes nothing rather than killing the research pass.
fn gather_snippets(provider: &dyn SearchProvider, queries: &[String]) -> Vec<String> {
    let mut snippets = Vec::new();
    for (i, query) in queries.iter().enumerate() {
        if i > 0 {
            thread::sleep(QUERY_DELAY);
        }
        if let Ok(results) = provider.search(query, 1) {
            snippets.extend(
                results
                    .into_iter()
                    .map(|r| r.snippet)
                    .filter(|s| !s.is_empty()),
            );
        }
    }
    snippets
}
