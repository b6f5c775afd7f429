//! # Debate Phases
//!
//! Playback state machine and the consensus meter rules.

use serde::{Deserialize, Serialize};

use super::{DebateMessage, MessageKind};

/// Phase of a debate playback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// Nothing playing
    #[default]
    Idle,
    /// Timeline running
    Debating,
    /// Last message revealed
    Consensus,
    /// Stopped before the last message
    Aborted,
}

impl DebatePhase {
    /// Start playback
    pub fn start(&mut self) {
        *self = DebatePhase::Debating;
    }

    /// Last message revealed; only a running debate reaches consensus
    pub fn conclude(&mut self) {
        if *self == DebatePhase::Debating {
            *self = DebatePhase::Consensus;
        }
    }

    /// Stop playback; finished debates stay finished
    pub fn abort(&mut self) {
        if *self == DebatePhase::Debating {
            *self = DebatePhase::Aborted;
        }
    }

    /// Check if playback has ended
    pub fn is_finished(&self) -> bool {
        matches!(self, DebatePhase::Consensus | DebatePhase::Aborted)
    }
}

/// Consensus meter, 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsensusScore(u32);

impl ConsensusScore {
    pub const MAX: u32 = 100;

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Scripted playback: consensus +25 up to 100, verification +10 up to 75.
    ///
    /// The verification cap applies to the new value, so a verification after
    /// the meter passed 75 pulls it back to 75.
    pub fn on_scripted_message(&mut self, message: &DebateMessage) {
        if message.kind == MessageKind::Consensus {
            self.0 = (self.0 + 25).min(Self::MAX);
        } else if message.kind == MessageKind::Verification || message.is_verified() {
            self.0 = (self.0 + 10).min(75);
        }
    }

    /// Live playback: consensus jumps to 100, anything else +20 up to 80
    pub fn on_live_message(&mut self, kind: MessageKind) {
        if kind == MessageKind::Consensus {
            self.complete();
        } else {
            self.0 = (self.0 + 20).min(80);
        }
    }

    pub fn complete(&mut self) {
        self.0 = Self::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::{generate_scenario, VerificationStatus};
    use crate::models::DebateAgent;

    #[test]
    fn test_phase_transitions() {
        let mut phase = DebatePhase::default();
        assert_eq!(phase, DebatePhase::Idle);

        phase.conclude();
        assert_eq!(phase, DebatePhase::Idle);

        phase.start();
        phase.conclude();
        assert_eq!(phase, DebatePhase::Consensus);

        phase.abort();
        assert_eq!(phase, DebatePhase::Consensus);
        assert!(phase.is_finished());
    }

    #[test]
    fn test_scripted_score_progression() {
        let scenario = generate_scenario("Tokyo", "Healthcare quality");
        let mut score = ConsensusScore::default();
        let values: Vec<u32> = scenario
            .messages
            .iter()
            .map(|m| {
                score.on_scripted_message(m);
                score.value()
            })
            .collect();

        assert_eq!(values, vec![0, 0, 0, 10, 10, 10, 20, 45, 70, 95]);
    }

    #[test]
    fn test_verification_cap_pulls_back() {
        let mut score = ConsensusScore(90);
        let msg = DebateMessage::new("x", DebateAgent::Nexus, MessageKind::Insight, "")
            .with_verification(VerificationStatus::Verified);
        score.on_scripted_message(&msg);
        assert_eq!(score.value(), 75);
    }

    #[test]
    fn test_live_score() {
        let mut score = ConsensusScore::default();
        for _ in 0..5 {
            score.on_live_message(MessageKind::Insight);
        }
        assert_eq!(score.value(), 80);
        score.on_live_message(MessageKind::Consensus);
        assert_eq!(score.value(), 100);
    }
}
