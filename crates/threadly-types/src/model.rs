//! Model identifiers for the completion backend.
//!
//! The application exposes a fixed set of Gemini models; anything else is
//! rejected at the session boundary with `SessionError::InvalidModel`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed set of completion models a user may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "gemini-pro")]
    GeminiPro,
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
}

impl ModelId {
    /// Every selectable model, in menu order.
    pub const ALL: [ModelId; 3] = [
        ModelId::GeminiPro,
        ModelId::Gemini15Pro,
        ModelId::Gemini15Flash,
    ];

    /// The wire identifier sent to the completion API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::GeminiPro => "gemini-pro",
            ModelId::Gemini15Pro => "gemini-1.5-pro",
            ModelId::Gemini15Flash => "gemini-1.5-flash",
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::GeminiPro
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini-pro" => Ok(ModelId::GeminiPro),
            "gemini-1.5-pro" => Ok(ModelId::Gemini15Pro),
            "gemini-1.5-flash" => Ok(ModelId::Gemini15Flash),
            other => Err(format!("invalid model id: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_roundtrip() {
        for model in ModelId::ALL {
            let s = model.to_string();
            let parsed: ModelId = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_model_id_parse_is_case_insensitive() {
        let parsed: ModelId = "Gemini-Pro".parse().unwrap();
        assert_eq!(parsed, ModelId::GeminiPro);
    }

    #[test]
    fn test_model_id_rejects_unknown() {
        assert!("gpt-4".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_model_id_serde() {
        let json = serde_json::to_string(&ModelId::Gemini15Flash).unwrap();
        assert_eq!(json, "\"gemini-1.5-flash\"");
        let parsed: ModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ModelId::Gemini15Flash);
    }

    #[test]
    fn test_model_id_default() {
        assert_eq!(ModelId::default(), ModelId::GeminiPro);
    }
}
