use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cfddns::{config::Settings, daemon};

#[derive(Parser)]
#[command(name = "cfddns")]
#[command(about = "Dynamic DNS updater for Cloudflare - keeps A records pointed at your public IP")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Run a single reconciliation pass and exit, ignoring repeat_ms
    #[arg(long)]
    once: bool,
}

fn init_logging(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config)?;
    init_logging(&settings.log_level);

    if cli.once {
        settings.repeat_ms = None;
    }

    info!("Starting cfddns");
    daemon::run(settings).await
}
