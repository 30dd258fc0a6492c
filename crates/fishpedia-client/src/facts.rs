//! Fun-fact fetcher.
//!
//! One outbound call to a generative-text API per request.  The fetcher
//! never returns an error: a missing credential, a transport failure, a bad
//! status or an unreadable body all come back as text the view can show.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use fishpedia_shared::constants::FACT_BULLET;

use crate::config::ClientConfig;

pub const MISSING_KEY_MESSAGE: &str =
    "Error: no API key configured. Set the GEMINI_API_KEY environment variable.";

const FAILURE_PREFIX: &str =
    "Could not fetch fun facts. Check the API key and network connection. Details:";

#[derive(Debug, Error)]
enum FactsError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FunFactFetcher {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl FunFactFetcher {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("FishPedia/", env!("CARGO_PKG_VERSION")))
            .timeout(config.fun_fact_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.fun_fact_base_url.trim_end_matches('/').to_string(),
            model: config.fun_fact_model.clone(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fun facts about `species`, or a readable explanation of why there
    /// are none.
    pub async fn fetch_facts(&self, species: &str) -> String {
        let Some(ref api_key) = self.api_key else {
            warn!("Fun facts requested without an API key");
            return MISSING_KEY_MESSAGE.to_string();
        };

        match self.generate(api_key, &prompt_for(species)).await {
            Ok(text) => {
                info!(species, chars = text.len(), "Fun facts received");
                text
            }
            Err(e) => {
                error!(species, error = %e, "Fun fact request failed");
                format!("{FAILURE_PREFIX} {e}")
            }
        }
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, FactsError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Requesting fun facts");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FactsError::Status { status, body });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or(FactsError::Malformed("no candidates"))?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(FactsError::Malformed("empty text"));
        }
        Ok(text)
    }
}

fn prompt_for(species: &str) -> String {
    format!(
        "Tell me three fun and interesting facts about {species}. \
         Answer as a simple list with each item on its own line, \
         starting with a bullet ({FACT_BULLET})."
    )
}

/// Split generated text into individual facts on the bullet character.
pub fn split_facts(text: &str) -> Vec<String> {
    text.split(FACT_BULLET)
        .map(str::trim)
        .filter(|fact| !fact.is_empty())
        .map(str::to_string)
        .collect()
}
