//! homescout - preference-driven property search assistant CLI

use clap::Parser;

use homescout::cli::{Cli, Commands};
use homescout::error::Result;

mod commands;
mod utils;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            location,
            budget,
            area,
            floor,
            amenities,
            financing,
            max_results,
            top,
            no_summaries,
            json,
            yes,
        } => commands::cmd_find(
            location, budget, area, floor, amenities, financing,
            max_results, top, no_summaries, json, yes,
        ),

        Commands::Locality { location } => commands::cmd_locality(&location),
        Commands::Builder { name } => commands::cmd_builder(&name),

        Commands::Doctor => commands::cmd_doctor(),
        Commands::Init => commands::cmd_init(),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
