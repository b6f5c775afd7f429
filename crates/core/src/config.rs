//! # Flow Configuration
//!
//! Optional overrides persisted to `.equinox/config.json`. Every field is
//! optional on disk; accessors fall back to the built-in defaults so a missing
//! or partial file behaves the same as an empty one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{DebateAgent, ModelConfig};

/// Default location of the persisted config, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".equinox/config.json";

/// Built-in defaults, exposed so the API can show them next to overrides
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDefaults {
    pub playback_speed: f64,
    pub reveal_delay_ms: u64,
    pub agent_latency_ms: u64,
    pub simulation_delay_ms: u64,
    pub use_live_agents: bool,
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            playback_speed: 1.0,
            reveal_delay_ms: 800,
            agent_latency_ms: 100,
            simulation_delay_ms: 3500,
            use_live_agents: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Divides every debate timeline offset (2.0 plays twice as fast)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_speed: Option<f64>,
    /// Delay between an agent becoming active and its message appearing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_delay_ms: Option<u64>,
    /// Simulated data-fetch latency for each analysis agent call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_latency_ms: Option<u64>,
    /// Simulated processing time before scenario results are returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_delay_ms: Option<u64>,
    /// Try the Groq-backed debate before the scripted one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_live_agents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groq_base_url: Option<String>,
    /// Per-agent model overrides (agent id -> model name)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub per_agent_models: HashMap<String, String>,
}

impl FlowConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path`; a missing or unreadable file yields the empty config
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Overlay every field set in `other`
    pub fn merge(&mut self, other: FlowConfig) {
        if other.playback_speed.is_some() {
            self.playback_speed = other.playback_speed;
        }
        if other.reveal_delay_ms.is_some() {
            self.reveal_delay_ms = other.reveal_delay_ms;
        }
        if other.agent_latency_ms.is_some() {
            self.agent_latency_ms = other.agent_latency_ms;
        }
        if other.simulation_delay_ms.is_some() {
            self.simulation_delay_ms = other.simulation_delay_ms;
        }
        if other.use_live_agents.is_some() {
            self.use_live_agents = other.use_live_agents;
        }
        if other.groq_base_url.is_some() {
            self.groq_base_url = other.groq_base_url;
        }
        for (k, v) in other.per_agent_models {
            self.per_agent_models.insert(k, v);
        }
    }

    /// Playback speed; non-positive or non-finite values fall back to 1.0
    pub fn playback_speed(&self) -> f64 {
        match self.playback_speed {
            Some(speed) if speed.is_finite() && speed > 0.0 => speed,
            _ => ConfigDefaults::default().playback_speed,
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(
            self.reveal_delay_ms
                .unwrap_or(ConfigDefaults::default().reveal_delay_ms),
        )
    }

    pub fn agent_latency(&self) -> Duration {
        Duration::from_millis(
            self.agent_latency_ms
                .unwrap_or(ConfigDefaults::default().agent_latency_ms),
        )
    }

    pub fn simulation_delay(&self) -> Duration {
        Duration::from_millis(
            self.simulation_delay_ms
                .unwrap_or(ConfigDefaults::default().simulation_delay_ms),
        )
    }

    pub fn use_live_agents(&self) -> bool {
        self.use_live_agents
            .unwrap_or(ConfigDefaults::default().use_live_agents)
    }

    /// Model config for an agent: per-agent override -> agent default
    pub fn model_for(&self, agent: DebateAgent) -> ModelConfig {
        let mut config = match self.per_agent_models.get(agent.id()) {
            Some(model) => ModelConfig::new(model.clone()),
            None => ModelConfig::for_agent(agent),
        };
        if let Some(url) = &self.groq_base_url {
            config = config.with_base_url(url.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = FlowConfig::default();
        assert_eq!(config.playback_speed(), 1.0);
        assert_eq!(config.reveal_delay(), Duration::from_millis(800));
        assert_eq!(config.simulation_delay(), Duration::from_millis(3500));
        assert!(config.use_live_agents());
    }

    #[test]
    fn test_invalid_speed_falls_back() {
        let config = FlowConfig {
            playback_speed: Some(0.0),
            ..Default::default()
        };
        assert_eq!(config.playback_speed(), 1.0);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut base = FlowConfig {
            reveal_delay_ms: Some(100),
            use_live_agents: Some(false),
            ..Default::default()
        };
        let mut models = HashMap::new();
        models.insert("fiscal".to_string(), "llama-3.1-8b-instant".to_string());
        base.merge(FlowConfig {
            playback_speed: Some(4.0),
            per_agent_models: models,
            ..Default::default()
        });

        assert_eq!(base.playback_speed, Some(4.0));
        assert_eq!(base.reveal_delay_ms, Some(100));
        assert_eq!(base.use_live_agents, Some(false));
        assert_eq!(base.model_for(DebateAgent::Fiscal).model, "llama-3.1-8b-instant");
        assert_eq!(
            base.model_for(DebateAgent::Actuary).model,
            "llama-3.3-70b-versatile"
        );
    }

    #[test]
    fn test_serialization_skips_unset() {
        let json = serde_json::to_string(&FlowConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("equinox-config-{}", std::process::id()));
        let path = dir.join("config.json");
        let config = FlowConfig {
            agent_latency_ms: Some(0),
            groq_base_url: Some("http://localhost:9999/v1/chat/completions".to_string()),
            ..Default::default()
        };

        config.save(&path).await.unwrap();
        let loaded = FlowConfig::load(&path).await;
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.model_for(DebateAgent::Nexus).base_url,
            "http://localhost:9999/v1/chat/completions"
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loaded = FlowConfig::load("/nonexistent/equinox/config.json").await;
        assert_eq!(loaded, FlowConfig::default());
    }
}
