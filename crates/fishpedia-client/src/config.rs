//! Client configuration loaded from environment variables.
//!
//! Everything has a default; only the fun-fact credential has none, and
//! without it the fetcher answers with a fixed explanation instead of
//! calling out.

use std::time::Duration;

use fishpedia_shared::constants::{
    DEFAULT_FUN_FACT_BASE_URL, DEFAULT_FUN_FACT_MODEL, DEFAULT_FUN_FACT_TIMEOUT_SECS,
};

#[derive(Clone)]
pub struct ClientConfig {
    /// Credential for the generative-text API.
    /// Env: `GEMINI_API_KEY`, falling back to `API_KEY`
    /// Default: none
    pub api_key: Option<String>,

    /// Model used for fun facts.
    /// Env: `FUN_FACT_MODEL`
    /// Default: `gemini-2.5-flash`
    pub fun_fact_model: String,

    /// Base URL of the generative-text API.
    /// Env: `FUN_FACT_BASE_URL`
    pub fun_fact_base_url: String,

    /// Per-request timeout.
    /// Env: `FUN_FACT_TIMEOUT_SECS`
    /// Default: 30 seconds
    pub fun_fact_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            fun_fact_model: DEFAULT_FUN_FACT_MODEL.to_string(),
            fun_fact_base_url: DEFAULT_FUN_FACT_BASE_URL.to_string(),
            fun_fact_timeout: Duration::from_secs(DEFAULT_FUN_FACT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("fun_fact_model", &self.fun_fact_model)
            .field("fun_fact_base_url", &self.fun_fact_base_url)
            .field("fun_fact_timeout", &self.fun_fact_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty());

        if let Some(model) = lookup("FUN_FACT_MODEL").filter(|m| !m.is_empty()) {
            config.fun_fact_model = model;
        }

        if let Some(url) = lookup("FUN_FACT_BASE_URL").filter(|u| !u.is_empty()) {
            config.fun_fact_base_url = url;
        }

        if let Some(val) = lookup("FUN_FACT_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.fun_fact_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %val, "Invalid FUN_FACT_TIMEOUT_SECS, using default"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert!(config.api_key.is_none());
        assert_eq!(config.fun_fact_model, DEFAULT_FUN_FACT_MODEL);
        assert_eq!(
            config.fun_fact_timeout,
            Duration::from_secs(DEFAULT_FUN_FACT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_api_key_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[("API_KEY", "legacy")]));
        assert_eq!(config.api_key.as_deref(), Some("legacy"));

        let config = ClientConfig::from_lookup(lookup(&[
            ("API_KEY", "legacy"),
            ("GEMINI_API_KEY", "primary"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let config = ClientConfig::from_lookup(lookup(&[("FUN_FACT_TIMEOUT_SECS", "soon")]));
        assert_eq!(
            config.fun_fact_timeout,
            Duration::from_secs(DEFAULT_FUN_FACT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "s3cret")]));
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
