pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod facts;
pub mod frontend;
pub mod state;
pub mod views;

use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;
use crate::facts::FunFactFetcher;
use crate::frontend::Frontend;
use crate::state::AppState;

/// Install the global tracing subscriber. Logs go to stderr so they do not
/// interleave with the views on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("fishpedia=info,fishpedia_client=info,fishpedia_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Run the terminal front-end on stdin/stdout over a freshly seeded catalog.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    tracing::info!("Starting FishPedia");

    let state = AppState::seeded().into_shared();
    let fetcher = FunFactFetcher::new(&config);
    if !fetcher.has_credentials() {
        tracing::warn!("No API key configured, fun facts are unavailable");
    }

    let mut frontend = Frontend::new(
        state,
        fetcher,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )?;
    frontend.run().await?;

    tracing::info!("FishPedia closed");
    Ok(())
}
