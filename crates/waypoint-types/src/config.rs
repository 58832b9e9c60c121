//! Global configuration types for Waypoint.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! inference model, sampling, result capping, and the greeting seeded into
//! new sessions. All fields have sensible defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Waypoint service.
///
/// Loaded from `{data_dir}/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model identifier sent to the inference service.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for turn judgments.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum output tokens per judgment.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Hard cap on the number of places returned per search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Assistant greeting seeded into every new session.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f64 {
    0.4
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_max_results() -> usize {
    5
}

fn default_greeting() -> String {
    "Hello! I am your travel assistant. What kind of place are you looking for?".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_results: default_max_results(),
            greeting: default_greeting(),
        }
    }
}
