//! # Flow Events
//!
//! Progress events emitted by the simulator, the analysis agents and the
//! debate sequencer. The server fans these out over SSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of flow event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowEventKind {
    /// Scenario simulation started
    SimulationStarted,
    /// Scenario simulation finished
    SimulationCompleted,
    /// Simulation failed
    SimulationFailed,
    /// Analysis agent started working
    AgentStarted,
    /// Analysis agent completed successfully
    AgentCompleted,
    /// Analysis agent failed
    AgentFailed,
    // === Debate playback ===
    /// Debate playback started
    DebateStarted,
    /// A debate agent is composing its next message
    AgentActive,
    /// A thinking trace was appended
    TraceAdded,
    /// A debate message was revealed
    MessageAdded,
    /// Consensus score changed
    ConsensusUpdated,
    /// Final recommendation is available
    SolutionReady,
    /// Playback reached the end of the timeline
    DebateCompleted,
    /// Playback was stopped before the end
    DebateAborted,
}

/// An event in the flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    /// Unique event ID
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: FlowEventKind,
    /// Agent (or component) that produced this event
    pub agent: String,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl FlowEvent {
    /// Create a new event
    pub fn new(kind: FlowEventKind, agent: &str) -> Self {
        Self {
            id: event_id(),
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            data: None,
        }
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Time-ordered, process-unique event ID
fn event_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos();
    format!("{:x}-{:x}", nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = FlowEvent::new(FlowEventKind::AgentStarted, "actuary")
            .with_data(serde_json::json!({ "location": "Berlin" }));

        assert_eq!(event.agent, "actuary");
        assert_eq!(event.data.unwrap()["location"], "Berlin");
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = FlowEvent::new(FlowEventKind::TraceAdded, "refiner");
        let b = FlowEvent::new(FlowEventKind::TraceAdded, "refiner");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FlowEventKind::ConsensusUpdated).unwrap();
        assert_eq!(json, "\"consensus_updated\"");
    }
}
