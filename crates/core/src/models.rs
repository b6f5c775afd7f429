//! # Equinox Models
//!
//! The four debate agents and the chat-model configuration each one runs on.
//! All agents talk to Groq's OpenAI-compatible endpoint; only the model name
//! and the system prompt differ per agent.

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Default chat completions endpoint
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Environment variable holding the Groq API key
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Model used for agents without a dedicated entry
pub const FALLBACK_MODEL: &str = "llama-3.1-8b-instant";

/// Debate participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateAgent {
    /// Quality of life and health risk
    Actuary,
    /// Cost of living and budget
    Fiscal,
    /// Tax treaties and compliance
    Nexus,
    /// Mediator and consensus builder
    Refiner,
}

impl DebateAgent {
    /// Get all agents in speaking order
    pub fn all() -> [DebateAgent; 4] {
        [
            DebateAgent::Actuary,
            DebateAgent::Fiscal,
            DebateAgent::Nexus,
            DebateAgent::Refiner,
        ]
    }

    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            DebateAgent::Actuary => "actuary",
            DebateAgent::Fiscal => "fiscal",
            DebateAgent::Nexus => "nexus",
            DebateAgent::Refiner => "refiner",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            DebateAgent::Actuary => "The Actuary",
            DebateAgent::Fiscal => "Fiscal Ghost",
            DebateAgent::Nexus => "The Nexus",
            DebateAgent::Refiner => "The Refiner",
        }
    }

    /// Short name used in thinking traces
    pub fn trace_name(&self) -> &'static str {
        match self {
            DebateAgent::Actuary => "Actuary",
            DebateAgent::Fiscal => "Fiscal Ghost",
            DebateAgent::Nexus => "Nexus",
            DebateAgent::Refiner => "Refiner",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            DebateAgent::Actuary => "Quality of Life Analyst",
            DebateAgent::Fiscal => "Cost & Finance Optimizer",
            DebateAgent::Nexus => "Tax & Compliance Expert",
            DebateAgent::Refiner => "Mediator & Consensus Builder",
        }
    }

    /// Groq model this agent runs on unless overridden
    pub fn default_model(&self) -> &'static str {
        match self {
            DebateAgent::Actuary => "llama-3.3-70b-versatile",
            DebateAgent::Fiscal => "mixtral-8x7b-32768",
            DebateAgent::Nexus => "llama-3.3-70b-versatile",
            DebateAgent::Refiner => FALLBACK_MODEL,
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            DebateAgent::Actuary => ACTUARY_PROMPT,
            DebateAgent::Fiscal => FISCAL_PROMPT,
            DebateAgent::Nexus => NEXUS_PROMPT,
            DebateAgent::Refiner => REFINER_PROMPT,
        }
    }
}

impl std::str::FromStr for DebateAgent {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "actuary" => Ok(DebateAgent::Actuary),
            "fiscal" | "fiscal_ghost" => Ok(DebateAgent::Fiscal),
            "nexus" => Ok(DebateAgent::Nexus),
            "refiner" => Ok(DebateAgent::Refiner),
            other => Err(FlowError::UnknownAgent(other.to_string())),
        }
    }
}

impl std::fmt::Display for DebateAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Chat-model settings for one agent call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    /// Chat completions endpoint
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(FALLBACK_MODEL)
    }
}

impl ModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: GROQ_API_URL.to_string(),
            temperature: 0.7,
            max_tokens: 200,
        }
    }

    /// Default configuration for an agent
    pub fn for_agent(agent: DebateAgent) -> Self {
        Self::new(agent.default_model())
    }

    /// Set base URL (for self-hosted OpenAI-compatible endpoints)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

const ACTUARY_PROMPT: &str = include_str!("prompts/actuary.md");
const FISCAL_PROMPT: &str = include_str!("prompts/fiscal.md");
const NEXUS_PROMPT: &str = include_str!("prompts/nexus.md");
const REFINER_PROMPT: &str = include_str!("prompts/refiner.md");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models() {
        assert_eq!(DebateAgent::Actuary.default_model(), "llama-3.3-70b-versatile");
        assert_eq!(DebateAgent::Fiscal.default_model(), "mixtral-8x7b-32768");
        assert_eq!(DebateAgent::Refiner.default_model(), FALLBACK_MODEL);
    }

    #[test]
    fn test_parse_agent() {
        assert_eq!("Fiscal".parse::<DebateAgent>().unwrap(), DebateAgent::Fiscal);
        assert!(matches!(
            "oracle".parse::<DebateAgent>(),
            Err(FlowError::UnknownAgent(name)) if name == "oracle"
        ));
    }

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::for_agent(DebateAgent::Nexus);
        assert_eq!(config.base_url, GROQ_API_URL);
        assert_eq!(config.max_tokens, 200);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_system_prompts_name_their_agent() {
        assert!(DebateAgent::Actuary.system_prompt().contains("The Actuary"));
        assert!(DebateAgent::Refiner.system_prompt().contains("CONSENSUS ACHIEVED"));
    }

    #[test]
    fn test_agent_serializes_lowercase() {
        let json = serde_json::to_string(&DebateAgent::Nexus).unwrap();
        assert_eq!(json, "\"nexus\"");
    }
}
