/// Application name
pub const APP_NAME: &str = "FishPedia";

/// Scheme prefix used to render process-local media handles
pub const LOCAL_LOCATOR_PREFIX: &str = "blob:fishpedia/";

/// Default generative model used for fun facts
pub const DEFAULT_FUN_FACT_MODEL: &str = "gemini-2.5-flash";

/// Default base URL of the generative-text API
pub const DEFAULT_FUN_FACT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout for a fun-fact call, in seconds
pub const DEFAULT_FUN_FACT_TIMEOUT_SECS: u64 = 30;

/// Bullet separating individual fun facts in generated text
pub const FACT_BULLET: char = '•';

/// Maximum size of a single authored photo or video (50 MiB)
pub const MAX_MEDIA_SIZE: usize = 50 * 1024 * 1024;
