use anyhow::Result;
use clap::Parser;
use polyradar::archive;
use polyradar::config::Config;
use tracing::info;

/// Sweep staged radar artifacts into the bank checkout.
#[derive(Parser)]
#[command(name = "polyradar-archive", version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Sweep this date instead of today (YYYY-MM-DD).
    #[arg(long)]
    date: Option<chrono::NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    // No credentials needed here, this run never leaves the filesystem.
    let config = Config::load_unchecked(&cli.config)?;
    config.init_logging();

    let date = cli.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let moved = archive::relocate_for_date(&config.archive, date)?;

    info!(moved, %date, "Archive sweep complete");
    Ok(())
}
