//! Environment variable credential resolution.
//!
//! Both external services are gated by environment-supplied API keys:
//! `GOOGLE_AI_API_KEY` for the inference service and `GOOGLE_MAPS_API_KEY`
//! for the places service. A missing key degrades the corresponding feature
//! rather than failing startup; the keys are wrapped in
//! [`secrecy::SecretString`] so they never appear in Debug output or logs.

use secrecy::SecretString;

/// Env var holding the generative-text service API key.
pub const GENAI_KEY_VAR: &str = "GOOGLE_AI_API_KEY";

/// Env var holding the places service API key.
pub const PLACES_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// API credentials for the two external services, as resolved from the
/// environment at startup.
pub struct ServiceCredentials {
    pub genai_api_key: Option<SecretString>,
    pub places_api_key: Option<SecretString>,
}

impl ServiceCredentials {
    /// Resolve credentials from the environment.
    ///
    /// Never fails: absent or non-unicode values resolve to `None`.
    pub fn from_env() -> Self {
        Self {
            genai_api_key: read_key(GENAI_KEY_VAR),
            places_api_key: read_key(PLACES_KEY_VAR),
        }
    }

    /// Whether the conversational turn feature is available.
    pub fn turns_available(&self) -> bool {
        self.genai_api_key.is_some()
    }

    /// Whether place search is available.
    pub fn search_available(&self) -> bool {
        self.places_api_key.is_some()
    }
}

fn read_key(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => {
            tracing::warn!(var, "Credential env var is set but empty; feature disabled");
            None
        }
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            // Exists but is not valid Unicode -- treat as absent, since
            // API keys must be valid strings.
            None
        }
    }
}
