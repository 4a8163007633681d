//! End-to-end pipeline tests with stubbed collaborators

use homescout::error::{HomescoutError, Result};
use homescout::llm::TextModel;
use homescout::pipeline;
use homescout::preferences::UserPreferences;
use homescout::search::{Listing, SearchProvider};

// ============================================================================
// Stub collaborators
// ============================================================================

enum CannedResponse {
    Json(&'static str),
    Fail(&'static str),
}

/// Model stub keyed by a marker string found in the prompt (listing titles
/// work well since the extraction prompt embeds them)
struct StubModel {
    responses: Vec<(&'static str, CannedResponse)>,
}

impl TextModel for StubModel {
    fn generate(&self, prompt: &str) -> Result<String> {
        for (marker, response) in &self.responses {
            if prompt.contains(marker) {
                return match response {
                    CannedResponse::Json(json) => Ok(json.to_string()),
                    CannedResponse::Fail(reason) => {
                        Err(HomescoutError::RateLimited(reason.to_string()))
                    }
                };
            }
        }
        Err(HomescoutError::ModelError("no canned response for prompt".into()))
    }
}

struct StubSearch {
    listings: Vec<Listing>,
}

impl SearchProvider for StubSearch {
    fn search(&self, _query: &str, max_results: usize) -> Result<Vec<Listing>> {
        Ok(self.listings.iter().take(max_results).cloned().collect())
    }
}

fn listing(title: &str, snippet: &str) -> Listing {
    Listing {
        title: title.to_string(),
        snippet: snippet.to_string(),
        url: format!("https://example.com/{}", title.replace(' ', "-").to_lowercase()),
    }
}

fn prefs() -> UserPreferences {
    UserPreferences {
        location: "Chembur".to_string(),
        budget: "1 Cr - 1.5 Cr".to_string(),
        carpet_area: "800".to_string(),
        floor_preference: String::new(),
        preferred_amenities: "Parking, Gym".to_string(),
        financing: String::new(),
    }
}

const STRONG_MATCH_JSON: &str = r#"{
    "price": "1.2 Cr",
    "area_sqft": 820,
    "bedrooms": 2,
    "amenities": ["Parking", "Gym"],
    "builder": "Acme Constructions",
    "locality_highlights": "Heart of Chembur"
}"#;

const WEAK_MATCH_JSON: &str = r#"{
    "price": "2 Cr",
    "area_sqft": 1000,
    "amenities": ["Garden"]
}"#;

// ============================================================================
// Tests
// ============================================================================

#[test]
fn failed_extraction_is_excluded_not_zero_scored() {
    let listings = vec![
        listing("First flat in Chembur", "820 sq ft"),
        listing("Second flat in Chembur", "820 sq ft"),
        listing("Third flat in Chembur", "820 sq ft"),
    ];
    let model = StubModel {
        responses: vec![
            ("First flat", CannedResponse::Json(STRONG_MATCH_JSON)),
            ("Second flat", CannedResponse::Fail("rate limit exhausted")),
            ("Third flat", CannedResponse::Json(STRONG_MATCH_JSON)),
        ],
    };

    let outcome = pipeline::analyze_listings(&model, &prefs(), &listings);

    assert_eq!(outcome.ranked.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].listing.title.contains("Second flat"));
    // Equal scores, so discovery order survives
    assert!(outcome.ranked[0].comparison.listing.title.contains("First flat"));
    assert!(outcome.ranked[1].comparison.listing.title.contains("Third flat"));
}

#[test]
fn stronger_match_ranks_first_regardless_of_discovery_order() {
    let listings = vec![
        listing("Distant flat in Thane", "Spacious living"),
        listing("Chembur gem", "Right by the station"),
    ];
    let model = StubModel {
        responses: vec![
            ("Distant flat", CannedResponse::Json(WEAK_MATCH_JSON)),
            ("Chembur gem", CannedResponse::Json(STRONG_MATCH_JSON)),
        ],
    };

    let outcome = pipeline::analyze_listings(&model, &prefs(), &listings);

    assert_eq!(outcome.ranked.len(), 2);
    assert!(outcome.ranked[0].comparison.listing.title.contains("Chembur gem"));
    // location 5 + budget 4 + area 3 + amenities 2
    assert_eq!(outcome.ranked[0].score, 14);
    assert_eq!(outcome.ranked[0].rank, 1);
    assert_eq!(outcome.ranked[1].score, 0);
    assert_eq!(outcome.ranked[1].rank, 2);
}

#[test]
fn ranking_is_deterministic_across_runs() {
    let listings = vec![
        listing("Alpha flat in Chembur", ""),
        listing("Beta flat in Chembur", ""),
        listing("Gamma flat in Thane", ""),
    ];
    let model = StubModel {
        responses: vec![
            ("Alpha flat", CannedResponse::Json(STRONG_MATCH_JSON)),
            ("Beta flat", CannedResponse::Json(STRONG_MATCH_JSON)),
            ("Gamma flat", CannedResponse::Json(WEAK_MATCH_JSON)),
        ],
    };

    let first = pipeline::analyze_listings(&model, &prefs(), &listings);
    let second = pipeline::analyze_listings(&model, &prefs(), &listings);

    let order = |outcome: &pipeline::PipelineOutcome| {
        outcome
            .ranked
            .iter()
            .map(|p| (p.comparison.listing.url.clone(), p.score, p.rank))
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&first), order(&second));
}

#[test]
fn code_fenced_model_output_still_parses() {
    let listings = vec![listing("Fenced flat in Chembur", "")];
    let model = StubModel {
        responses: vec![(
            "Fenced flat",
            CannedResponse::Json("```json\n{\"price\": \"1.2 Cr\"}\n```"),
        )],
    };

    let outcome = pipeline::analyze_listings(&model, &prefs(), &listings);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.ranked.len(), 1);
    assert!(outcome.ranked[0]
        .comparison
        .findings
        .contains(&"Budget: Potentially within budget.".to_string()));
}

#[test]
fn non_json_model_output_is_an_extraction_failure() {
    let listings = vec![listing("Chatty flat in Chembur", "")];
    let model = StubModel {
        responses: vec![(
            "Chatty flat",
            CannedResponse::Json("Sorry, I could not find structured data here."),
        )],
    };

    let outcome = pipeline::analyze_listings(&model, &prefs(), &listings);

    assert!(outcome.ranked.is_empty());
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].reason.contains("not a JSON object"));
}

#[test]
fn run_caps_analysis_at_the_limit() {
    let provider = StubSearch {
        listings: vec![
            listing("One in Chembur", ""),
            listing("Two in Chembur", ""),
            listing("Three in Chembur", ""),
            listing("Four in Chembur", ""),
        ],
    };
    let model = StubModel {
        responses: vec![
            ("One in", CannedResponse::Json(STRONG_MATCH_JSON)),
            ("Two in", CannedResponse::Json(STRONG_MATCH_JSON)),
            ("Three in", CannedResponse::Json(STRONG_MATCH_JSON)),
            ("Four in", CannedResponse::Json(STRONG_MATCH_JSON)),
        ],
    };

    let outcome = pipeline::run(&provider, &model, &prefs(), 4, 2).unwrap();

    assert_eq!(outcome.ranked.len(), 2);
    let titles: Vec<&str> = outcome
        .ranked
        .iter()
        .map(|p| p.comparison.listing.title.as_str())
        .collect();
    assert_eq!(titles, vec!["One in Chembur", "Two in Chembur"]);
}

#[test]
fn empty_search_results_produce_an_empty_outcome() {
    let provider = StubSearch { listings: vec![] };
    let model = StubModel { responses: vec![] };

    let outcome = pipeline::run(&provider, &model, &prefs(), 5, 3).unwrap();

    assert!(outcome.ranked.is_empty());
    assert!(outcome.failures.is_empty());
}
