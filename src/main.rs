use clap::Parser;
use polyradar::app::App;
use polyradar::config::Config;
use tokio::signal;
use tracing::{error, info};

/// Prediction market radar: scan events, classify and tag the markets
/// worth watching, publish the ranked list.
#[derive(Parser)]
#[command(name = "polyradar", version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Scan and rank, but skip the publish step.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let mut config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    if cli.dry_run {
        config.dry_run = true;
    }

    config.init_logging();
    info!(dry_run = config.dry_run, "polyradar starting");

    tokio::select! {
        result = App::run(config) => {
            match result {
                Ok(summary) => {
                    info!(
                        events = summary.events_seen,
                        tagged = summary.markets_tagged,
                        published = summary.published.as_deref().unwrap_or("none"),
                        "Scan complete"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Fatal error");
                    std::process::exit(1);
                }
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("polyradar stopped");
}
