//! Standalone research commands: locality, builder

use colored::Colorize;

use homescout::config::Config;
use homescout::error::Result;
use homescout::llm::{GeminiClient, Retry};
use homescout::search::DuckDuckGo;
use homescout::summarize;

pub fn cmd_locality(location: &str) -> Result<()> {
    let config = Config::load()?;
    let model = GeminiClient::new(config.resolve_api_key()?, &config.model)
        .with_retry(Retry::from(&config.retry));
    let provider = DuckDuckGo::new(&config.region);

    println!("{}", format!("Locality Information for {}", location).bold());
    println!("Researching schools, transport, safety and more...\n");

    match summarize::locality_summary(&provider, &model, location)? {
        Some(summary) => println!("{}", summary),
        None => println!(
            "{}",
            "No significant locality information found online to summarize.".yellow()
        ),
    }
    Ok(())
}

pub fn cmd_builder(name: &str) -> Result<()> {
    let config = Config::load()?;
    let model = GeminiClient::new(config.resolve_api_key()?, &config.model)
        .with_retry(Retry::from(&config.retry));
    let provider = DuckDuckGo::new(&config.region);

    println!("{}", format!("Builder Information for {}", name).bold());
    println!("Researching reputation, past projects and reviews...\n");

    match summarize::builder_summary(&provider, &model, name)? {
        Some(summary) => println!("{}", summary),
        None => println!(
            "{}",
            "No significant builder information found online to summarize.".yellow()
        ),
    }
    Ok(())
}
