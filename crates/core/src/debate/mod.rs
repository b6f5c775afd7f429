//! # Agent Debate
//!
//! A four-agent debate over where to live in a city. The scripted variant is
//! generated from per-city data and played back on a fixed timeline; the live
//! variant asks Groq-hosted models for each turn and falls back to the script
//! when no key is configured or a call fails.

pub mod live;
pub mod phase;
pub mod script;
pub mod sequencer;

pub use live::{analysis_prompt, GroqClient, LiveDebate, LiveTurn};
pub use phase::{ConsensusScore, DebatePhase};
pub use script::{
    city_data, city_rents, generate_scenario, live_solution, CityDebateData, RentLevels, DEBATE_CITIES,
    DEBATE_TOPICS,
};
pub use sequencer::{DebateCommand, DebateOutcome, DebateSequencer, PlaybackMode, Timeline};

use serde::{Deserialize, Serialize};

use crate::models::DebateAgent;

/// Rhetorical role of a debate message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Proposal,
    Objection,
    Mediation,
    Consensus,
    Insight,
    Rejection,
    Verification,
    Challenge,
}

impl MessageKind {
    /// Parse a wire name; unknown names map to `Insight`
    pub fn from_wire(s: &str) -> Self {
        match s {
            "proposal" => MessageKind::Proposal,
            "objection" => MessageKind::Objection,
            "mediation" => MessageKind::Mediation,
            "consensus" => MessageKind::Consensus,
            "rejection" => MessageKind::Rejection,
            "verification" => MessageKind::Verification,
            "challenge" => MessageKind::Challenge,
            _ => MessageKind::Insight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateMessage {
    pub id: String,
    pub agent: DebateAgent,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    /// Scheduled offset from the start of playback
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rejected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationStatus>,
}

impl DebateMessage {
    pub fn new(id: impl Into<String>, agent: DebateAgent, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agent,
            kind,
            content: content.into(),
            timestamp_ms: 0,
            citations: Vec::new(),
            rejected: false,
            verification: None,
        }
    }

    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn cite(mut self, citations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.citations = citations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_verification(mut self, status: VerificationStatus) -> Self {
        self.verification = Some(status);
        self
    }

    pub fn rejected(mut self) -> Self {
        self.rejected = true;
        self
    }

    pub fn is_verified(&self) -> bool {
        self.verification == Some(VerificationStatus::Verified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Analysis,
    Conflict,
    Resolution,
    Verification,
}

/// An agent's visible reasoning step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinkingTrace {
    pub id: String,
    /// Display name, not an agent id ("Fiscal Ghost", "System")
    pub agent: String,
    pub thought: String,
    pub timestamp_ms: u64,
    #[serde(rename = "type")]
    pub kind: TraceKind,
}

impl ThinkingTrace {
    pub fn new(
        id: impl Into<String>,
        agent: impl Into<String>,
        thought: impl Into<String>,
        timestamp_ms: u64,
        kind: TraceKind,
    ) -> Self {
        Self {
            id: id.into(),
            agent: agent.into(),
            thought: thought.into(),
            timestamp_ms,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionScores {
    pub quality: u32,
    pub budget: u32,
    pub tax_efficiency: u32,
    pub overall: u32,
}

impl Default for SolutionScores {
    fn default() -> Self {
        Self {
            quality: 88,
            budget: 94,
            tax_efficiency: 97,
            overall: 93,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentApproval {
    /// Display name of the approving agent
    pub agent: String,
    pub status: String,
    pub reason: String,
}

impl AgentApproval {
    pub fn approved(agent: DebateAgent, reason: impl Into<String>) -> Self {
        Self {
            agent: agent.display_name().to_string(),
            status: "approved".to_string(),
            reason: reason.into(),
        }
    }
}

/// The recommendation a debate converges on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSolution {
    /// Recommended neighbourhood
    pub recommendation: String,
    pub city: String,
    pub topic: String,
    pub currency: String,
    pub confidence: f64,
    pub scores: SolutionScores,
    /// Formatted amount in local currency
    pub monthly_cost: String,
    pub annual_savings: String,
    pub tax_benefit: String,
    pub agent_approvals: Vec<AgentApproval>,
    pub key_benefits: Vec<String>,
}

/// Everything needed to play one debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateScenario {
    pub city: String,
    pub topic: String,
    pub messages: Vec<DebateMessage>,
    pub traces: Vec<ThinkingTrace>,
    pub solution: FinalSolution,
}

/// Timeline for `city` and `topic`.
///
/// Uses the live debate when `client` is given and every round succeeds;
/// otherwise the scripted debate with `reveal_delay_ms` between activation
/// and reveal.
pub async fn prepare_timeline(
    city: &str,
    topic: &str,
    client: Option<&GroqClient>,
    reveal_delay_ms: u64,
) -> Timeline {
    if let Some(client) = client {
        match client.run_debate(city, topic).await {
            Ok(live) => return Timeline::live(city, topic, live.debate, live.models),
            Err(e) => tracing::warn!("Live debate failed, playing the script instead: {:#}", e),
        }
    }
    Timeline::scripted(generate_scenario(city, topic), reveal_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prepare_timeline_without_client_is_scripted() {
        let timeline = prepare_timeline("Dubai", "Tax optimization", None, 800).await;
        assert_eq!(timeline.mode, PlaybackMode::Scripted);
        assert_eq!(timeline.messages().len(), 10);
    }

    #[tokio::test]
    async fn test_prepare_timeline_falls_back_on_error() {
        let config = crate::config::FlowConfig {
            groq_base_url: Some("http://127.0.0.1:9/v1/chat/completions".to_string()),
            ..Default::default()
        };
        let client = GroqClient::new("k").with_config(&config);
        let timeline = prepare_timeline("Lisbon", "Tax optimization", Some(&client), 800).await;
        assert_eq!(timeline.mode, PlaybackMode::Scripted);
        assert_eq!(timeline.duration_ms(), 14_800);
    }

    #[test]
    fn test_message_serializes_wire_names() {
        let msg = DebateMessage::new("1", DebateAgent::Fiscal, MessageKind::Objection, "too pricey")
            .at(2000)
            .with_verification(VerificationStatus::Verified);
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["agent"], "fiscal");
        assert_eq!(json["type"], "objection");
        assert_eq!(json["verification"], "verified");
        assert!(json.get("citations").is_none());
        assert!(json.get("rejected").is_none());
    }

    #[test]
    fn test_unknown_wire_kind_is_insight() {
        assert_eq!(MessageKind::from_wire("consensus"), MessageKind::Consensus);
        assert_eq!(MessageKind::from_wire("musing"), MessageKind::Insight);
    }
}
