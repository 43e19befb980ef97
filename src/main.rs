use clap::Parser;
use sortdir::cli::{Cli, run};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the report or JSON on stdout.
    // Use RUST_LOG=debug to see every move.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)?;
    Ok(())
}
