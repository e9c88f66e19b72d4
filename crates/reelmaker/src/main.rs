//! Reelmaker CLI binary.
//!
//! - Interpret a story idea into a storyboard plan
//! - Run the full scene pipeline and merge the reel

use clap::Parser;
use reelmaker::{ObservabilityConfig, ReelConfig, Studio, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_pipeline, run_storyboard};

    // Credentials may live in a local .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let config = ReelConfig::load_with(cli.config.as_deref())?;
    let studio = Studio::replicate(config)?;

    match cli.command {
        Commands::Storyboard { idea, out } => {
            run_storyboard(&studio, idea, out.as_deref()).await?;
        }

        Commands::Run { idea, plan } => {
            run_pipeline(&studio, idea, plan.as_deref()).await?;
        }
    }

    Ok(())
}
