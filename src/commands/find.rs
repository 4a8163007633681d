//! The find command: search, analyze, rank, recommend

use colored::Colorize;
use inquire::Text;

use homescout::config::Config;
use homescout::error::{HomescoutError, Result};
use homescout::llm::{GeminiClient, Retry, TextModel};
use homescout::normalize;
use homescout::pipeline;
use homescout::preferences::UserPreferences;
use homescout::score::RankedProperty;
use homescout::search::{self, DuckDuckGo, SearchProvider};
use homescout::summarize;

use crate::utils::{format_rupees, truncate_str};

pub fn cmd_find(
    location: Option<String>,
    budget: Option<String>,
    area: Option<String>,
    floor: Option<String>,
    amenities: Option<String>,
    financing: Option<String>,
    max_results: Option<usize>,
    top: Option<usize>,
    no_summaries: bool,
    json: bool,
    yes: bool,
) -> Result<()> {
    let config = Config::load()?;
    let prefs = resolve_preferences(
        location, budget, area, floor, amenities, financing, yes, json,
    )?;

    let api_key = config.resolve_api_key()?;
    let model = GeminiClient::new(api_key, &config.model).with_retry(Retry::from(&config.retry));
    let provider = DuckDuckGo::new(&config.region);

    let max_results = max_results.unwrap_or(config.max_results);
    let top_k = top.unwrap_or(config.top_k);

    let query = search::build_query(&prefs);
    if !json {
        println!("{} {}", "Searching for:".cyan().bold(), query);
        let window = normalize::parse_budget(&prefs.budget);
        if let (Some(low), Some(high)) = (window.low, window.high) {
            println!(
                "{} {} - {}",
                "Budget window:".cyan().bold(),
                format_rupees(low),
                format_rupees(high)
            );
        }
    }

    let listings = provider.search(&query, max_results)?;
    if listings.is_empty() {
        if json {
            let output = serde_json::json!({
                "query": query,
                "properties": [],
                "failures": [],
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "{}",
                "No search results found based on your preferences.".yellow()
            );
        }
        return Ok(());
    }

    let analyze_limit = config.analyze_limit.min(listings.len());
    if !json {
        println!(
            "Found {} listings; analyzing the top {}...\n",
            listings.len(),
            analyze_limit
        );
    }

    let outcome = pipeline::analyze_listings(&model, &prefs, &listings[..analyze_limit]);

    if !json {
        for failure in &outcome.failures {
            eprintln!(
                "{} {}: {}",
                "Analysis failed for".yellow(),
                truncate_str(&failure.listing.title, 60),
                failure.reason
            );
        }
    }

    if json {
        return print_json(&query, &prefs, &outcome);
    }

    if outcome.ranked.is_empty() {
        println!(
            "{}",
            "No suitable properties found based on your preferences.".yellow()
        );
        return Ok(());
    }

    if !no_summaries {
        print_locality_summary(&provider, &model, &prefs.location);
    }

    let shown = top_k.min(outcome.ranked.len());
    println!(
        "{}",
        format!("Top {} Property Recommendations", shown).bold()
    );
    for property in outcome.ranked.iter().take(top_k) {
        print_recommendation(property);

        if no_summaries {
            continue;
        }
        if let Some(builder) = property.comparison.attributes.builder.as_deref() {
            print_builder_summary(&provider, &model, builder);
        }
        match summarize::property_summary(&model, &prefs, &property.comparison.findings) {
            Ok(summary) => println!("\n  {}\n  {}", "Summary:".bold(), summary),
            Err(e) => eprintln!("  {} {}", "Could not summarize property:".yellow(), e),
        }
    }

    Ok(())
}

/// Fill in missing preferences from the wizard, or defaults with --yes
fn resolve_preferences(
    location: Option<String>,
    budget: Option<String>,
    area: Option<String>,
    floor: Option<String>,
    amenities: Option<String>,
    financing: Option<String>,
    yes: bool,
    json: bool,
) -> Result<UserPreferences> {
    let interactive = !yes && !json && atty::is(atty::Stream::Stdin);

    let location = match location {
        Some(l) => l,
        None if interactive => Text::new("Preferred location?")
            .with_default("Mumbai")
            .with_help_message("Locality or city to search in")
            .prompt()
            .map_err(|e| HomescoutError::PromptError(e.to_string()))?,
        None => {
            return Err(HomescoutError::ConfigError(
                "--location is required in non-interactive mode. Usage: homescout find --location <AREA>".into(),
            ));
        }
    };

    Ok(UserPreferences {
        location,
        budget: resolve_field(budget, interactive, "Budget range?", "e.g., 1 Cr - 1.5 Cr")?,
        carpet_area: resolve_field(area, interactive, "Expected carpet area (sq ft)?", "e.g., 800")?,
        floor_preference: resolve_field(floor, interactive, "Preferred floor?", "e.g., higher floor")?,
        preferred_amenities: resolve_field(
            amenities,
            interactive,
            "Preferred amenities (comma-separated)?",
            "e.g., Parking, Gym",
        )?,
        financing: resolve_field(financing, interactive, "Financing options?", "e.g., Pre-approved Loan")?,
    })
}

fn resolve_field(
    value: Option<String>,
    interactive: bool,
    prompt: &str,
    help: &str,
) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Text::new(prompt)
            .with_help_message(help)
            .prompt()
            .map_err(|e| HomescoutError::PromptError(e.to_string())),
        None => Ok(String::new()),
    }
}

fn print_recommendation(property: &RankedProperty) {
    println!("\n{}", format!("Recommendation {}", property.rank).green().bold());
    println!("  {} {}", "Property:".bold(), property.comparison.listing.title);
    println!("  {} {}", "Link:".bold(), property.comparison.listing.url);
    println!("  {} {}", "Score:".bold(), property.score);
    for finding in &property.comparison.findings {
        println!("    - {}", finding);
    }
}

fn print_locality_summary(provider: &dyn SearchProvider, model: &dyn TextModel, location: &str) {
    println!("\n{}", format!("Locality Information for {}", location).bold());
    match summarize::locality_summary(provider, model, location) {
        Ok(Some(summary)) => println!("{}\n", summary),
        Ok(None) => println!("No significant locality information found online to summarize.\n"),
        Err(e) => eprintln!("{} {}\n", "Could not summarize locality:".yellow(), e),
    }
}

fn print_builder_summary(provider: &dyn SearchProvider, model: &dyn TextModel, builder: &str) {
    if builder.trim().is_empty() {
        return;
    }
    println!("\n  {}", format!("Builder Information for {}", builder).bold());
    match summarize::builder_summary(provider, model, builder) {
        Ok(Some(summary)) => println!("  {}", summary),
        Ok(None) => println!("  No significant builder information found online to summarize."),
        Err(e) => eprintln!("  {} {}", "Could not summarize builder:".yellow(), e),
    }
}

fn print_json(
    query: &str,
    prefs: &UserPreferences,
    outcome: &pipeline::PipelineOutcome,
) -> Result<()> {
    let properties: Vec<serde_json::Value> = outcome
        .ranked
        .iter()
        .map(|p| {
            serde_json::json!({
                "rank": p.rank,
                "score": p.score,
                "title": p.comparison.listing.title,
                "url": p.comparison.listing.url,
                "findings": p.comparison.findings,
            })
        })
        .collect();
    let failures: Vec<serde_json::Value> = outcome
        .failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "title": f.listing.title,
                "url": f.listing.url,
                "reason": f.reason,
            })
        })
        .collect();

    let output = serde_json::json!({
        "query": query,
        "preferences": prefs,
        "properties": properties,
        "failures": failures,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
