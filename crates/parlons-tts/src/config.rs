//! Configuration for the ElevenLabs client.

use std::fmt;
use std::time::Duration;

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Model used when a request names none.
pub const DEFAULT_TTS_MODEL: &str = "eleven_v3";

/// Configuration for the ElevenLabs client.
///
/// # Example
///
/// ```
/// use parlons_tts::ElevenLabsConfig;
/// use std::time::Duration;
///
/// let config = ElevenLabsConfig::new("sk-...")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct ElevenLabsConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) default_model: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            user_agent: concat!("parlons/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            default_model: DEFAULT_TTS_MODEL.to_string(),
        }
    }
}

impl fmt::Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("base_url", &self.base_url)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("timeout", &self.timeout)
            .field("default_model", &self.default_model)
            .finish_non_exhaustive()
    }
}

impl ElevenLabsConfig {
    /// Configuration with the given credential and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Point the client at another API root (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}
