mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vidmatch=info,vidmatch_core=info,vidmatch_api=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    commands::run(args).await
}
