//! Global configuration for Threadly.
//!
//! Deserialized from `config.toml` in the data directory. Every field has a
//! default so a missing or partial file still yields a usable config.

use serde::{Deserialize, Serialize};

use crate::model::ModelId;

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model selected at session start.
    #[serde(default)]
    pub default_model: ModelId,

    /// Base URL of the Gemini OpenAI-compatible endpoint.
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Maximum tokens per completion response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for completions.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_model: ModelId::default(),
            gemini_base_url: default_gemini_base_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}
