use serde::Serialize;

use fishpedia_shared::FishId;

use crate::error::CommandError;
use crate::facts::{split_facts, FunFactFetcher};
use crate::state::{lock, SharedState};

#[derive(Debug, Clone, Serialize)]
pub struct FunFacts {
    pub fish_id: FishId,
    /// Text as returned by the fetcher, including failure explanations.
    pub text: String,
    /// `text` split on the bullet character.
    pub items: Vec<String>,
}

/// Ask for fun facts about one fish.
///
/// Only an unknown id is an error; fetch failures arrive as text.  The
/// state lock is not held while the request is in flight.
pub async fn fetch_fun_facts(
    state: &SharedState,
    fetcher: &FunFactFetcher,
    id: &FishId,
) -> Result<FunFacts, CommandError> {
    let name = {
        let guard = lock(state)?;
        guard
            .catalog
            .get(id)
            .map(|f| f.name.clone())
            .ok_or_else(|| CommandError::NotFound(id.clone()))?
    };

    let text = fetcher.fetch_facts(&name).await;
    Ok(FunFacts {
        fish_id: id.clone(),
        items: split_facts(&text),
        text,
    })
}
