use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "homescout")]
#[command(author, version, about = "A preference-driven property search assistant", long_about = None)]
#[command(after_help = r#"Examples:
  homescout find                                          Interactive preference wizard
  homescout find --location Chembur --budget "1 Cr - 1.5 Cr"
  homescout locality Chembur                              Research a locality
  homescout builder "Acme Constructions"                  Research a builder

Quick Start:
  1. export GEMINI_API_KEY=<your key>
  2. homescout find
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search listings and rank them against your preferences
    #[command(after_help = r#"Examples:
  homescout find                               Prompt for every preference
  homescout find --location Chembur --budget "1 Cr - 1.5 Cr" --area 800
  homescout find --location Powai --amenities "Parking, Gym" --top 5
  homescout find --location Chembur --yes      Skip prompts, defaults for the rest
  homescout find --location Chembur --json     Machine-readable output
"#)]
    Find {
        /// Preferred locality (e.g., "Chembur")
        #[arg(long)]
        location: Option<String>,

        /// Budget, single value or range (e.g., "1 Cr - 1.5 Cr")
        #[arg(long)]
        budget: Option<String>,

        /// Expected carpet area in sq ft (e.g., 800)
        #[arg(long)]
        area: Option<String>,

        /// Preferred floor or placement requirements
        #[arg(long)]
        floor: Option<String>,

        /// Comma-separated amenity wishlist (e.g., "Parking, Gym")
        #[arg(long)]
        amenities: Option<String>,

        /// Financing requirements (e.g., "Pre-approved Loan")
        #[arg(long)]
        financing: Option<String>,

        /// Maximum search results to fetch (overrides config)
        #[arg(long)]
        max_results: Option<usize>,

        /// How many recommendations to show (overrides config)
        #[arg(long)]
        top: Option<usize>,

        /// Skip locality/builder/property summary generation
        #[arg(long)]
        no_summaries: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Skip all interactive prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Research a locality and summarize it for a buyer
    Locality {
        /// Locality name (e.g., "Chembur")
        location: String,
    },

    /// Research a builder's reputation and past projects
    Builder {
        /// Builder name
        name: String,
    },

    /// Check configuration and collaborator reachability
    Doctor,

    /// Write a default config file
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
