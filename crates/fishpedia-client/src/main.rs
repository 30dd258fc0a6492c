//! # fishpedia
//!
//! Terminal catalog of marine species: browse, search, add, edit and
//! favorite entries, and ask a generative-text API for fun facts.

use fishpedia_client::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fishpedia_client::init_tracing();

    let config = ClientConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    fishpedia_client::run(config).await
}
