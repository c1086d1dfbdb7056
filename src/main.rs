use clap::Parser;
use tracing_subscriber::EnvFilter;

use rgi_tiers::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("rgi_tiers=debug,info")
    } else {
        EnvFilter::new("rgi_tiers=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Classify(args) => {
            cli::classify::run(args, cli.verbose)?;
        }
        cli::Commands::Partial(args) => {
            cli::partial::run(args, cli.verbose)?;
        }
        cli::Commands::PredictedGenes(args) => {
            cli::predicted::run(args, cli.verbose)?;
        }
    }

    Ok(())
}
