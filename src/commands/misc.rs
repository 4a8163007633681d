//! Miscellaneous commands: doctor, init, completions

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;

use homescout::cli::{Cli, CompletionShell};
use homescout::config::Config;
use homescout::error::Result;
use homescout::search::{DuckDuckGo, SearchProvider};

/// Check configuration and collaborator reachability
pub fn cmd_doctor() -> Result<()> {
    println!("\n{}\n", "homescout doctor".bold());

    let config = Config::load()?;
    println!("  Config file: {}", Config::config_path()?.display());
    println!("  Model: {}", config.model);
    println!("  Search region: {}", config.region);
    println!();

    match config.resolve_api_key() {
        Ok(_) => println!("  {} Gemini API key is set", "✓".green()),
        Err(_) => println!(
            "  {} GEMINI_API_KEY is not set (export it or add api_key to the config)",
            "✗".red()
        ),
    }

    let provider = DuckDuckGo::new(&config.region);
    match provider.search("property for sale in Mumbai", 1) {
        Ok(results) if !results.is_empty() => {
            println!("  {} Search provider reachable", "✓".green())
        }
        Ok(_) => println!(
            "  {} Search provider reachable but returned no results",
            "!".yellow()
        ),
        Err(e) => println!("  {} Search provider unreachable: {}", "✗".red(), e),
    }

    Ok(())
}

/// Write a default config file if none exists
pub fn cmd_init() -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    Config::default().save()?;
    println!("{} Wrote default config to {}", "✓".green(), path.display());
    println!("Set GEMINI_API_KEY in your environment to start searching.");
    Ok(())
}

/// Generate shell completions on stdout
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "homescout", &mut io::stdout());
    Ok(())
}
