//! # Mailcraft
//!
//! Command-line entry point.

use clap::Parser;
use mailcraft_cli::CliArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for markup
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailcraft=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    tracing::debug!("Parsed arguments: {:?}", args);

    let stdout = std::io::stdout();
    mailcraft_cli::run(args, &mut stdout.lock())
}
