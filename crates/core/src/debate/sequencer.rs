//! # Debate Sequencer
//!
//! Plays a debate as a timeline of traces, agent activations and message
//! reveals. Offsets are measured from the start of playback, so a slow step
//! never pushes later steps back. Playback can be aborted through a command
//! channel and reports progress over an event channel and a watch channel.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use super::live::LiveTurn;
use super::phase::{ConsensusScore, DebatePhase};
use super::script::live_solution;
use super::{
    DebateMessage, DebateScenario, FinalSolution, MessageKind, ThinkingTrace, TraceKind,
    VerificationStatus,
};
use crate::events::{FlowEvent, FlowEventKind};
use crate::models::DebateAgent;

const SOURCE: &str = "sequencer";

/// Gap between live turns, split into "thinking" and "typing"
const LIVE_THINK_MS: u64 = 1500;
const LIVE_TYPE_MS: u64 = 500;

/// Where the debate content came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    #[default]
    Scripted,
    Live,
}

/// Commands accepted while a debate is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateCommand {
    Abort,
}

#[derive(Debug, Clone)]
enum Step {
    Trace(ThinkingTrace),
    /// Agent starts composing message `idx`
    Activate(usize),
    /// Message `idx` becomes visible
    Reveal(usize),
}

/// A debate laid out in time, ready to play
#[derive(Debug, Clone)]
pub struct Timeline {
    pub city: String,
    pub topic: String,
    pub mode: PlaybackMode,
    messages: Vec<DebateMessage>,
    steps: Vec<(u64, Step)>,
    solution: FinalSolution,
    models: BTreeMap<String, String>,
}

impl Timeline {
    /// Traces at their own offsets; each message activates at its timestamp
    /// and is revealed `reveal_delay_ms` later.
    pub fn scripted(scenario: DebateScenario, reveal_delay_ms: u64) -> Self {
        let DebateScenario {
            city,
            topic,
            messages,
            traces,
            solution,
        } = scenario;

        let mut steps: Vec<(u64, Step)> = traces
            .into_iter()
            .map(|t| (t.timestamp_ms, Step::Trace(t)))
            .collect();
        steps.extend(
            messages
                .iter()
                .enumerate()
                .map(|(i, m)| (m.timestamp_ms, Step::Activate(i))),
        );
        steps.extend(
            messages
                .iter()
                .enumerate()
                .map(|(i, m)| (m.timestamp_ms + reveal_delay_ms, Step::Reveal(i))),
        );
        // Stable: equal offsets keep trace, activation, reveal order
        steps.sort_by_key(|(offset, _)| *offset);

        Self {
            city,
            topic,
            mode: PlaybackMode::Scripted,
            messages,
            steps,
            solution,
            models: BTreeMap::new(),
        }
    }

    /// Turn `i` activates at `i * 2s + 1.5s` with a "Processing with" trace
    /// and is revealed half a second later. Live traces carry no offset of
    /// their own.
    pub fn live(city: &str, topic: &str, turns: Vec<LiveTurn>, models: BTreeMap<String, String>) -> Self {
        let mut steps = vec![(
            0,
            Step::Trace(ThinkingTrace::new(
                "t1",
                "System",
                format!("✅ Connected! Using {} specialized AI models", models.len()),
                0,
                TraceKind::Analysis,
            )),
        )];
        let mut messages = Vec::with_capacity(turns.len());

        for (i, turn) in turns.into_iter().enumerate() {
            let slot = i as u64 * (LIVE_THINK_MS + LIVE_TYPE_MS);
            let active_at = slot + LIVE_THINK_MS;
            let consensus = turn.kind == MessageKind::Consensus;
            let model = models
                .get(turn.agent.id())
                .map(String::as_str)
                .unwrap_or("AI");

            steps.push((active_at, Step::Activate(i)));
            steps.push((
                active_at,
                Step::Trace(ThinkingTrace::new(
                    format!("t{}", i + 2),
                    capitalize(turn.agent.id()),
                    format!("Processing with {}...", model),
                    0,
                    if consensus {
                        TraceKind::Resolution
                    } else {
                        TraceKind::Analysis
                    },
                )),
            ));
            steps.push((active_at + LIVE_TYPE_MS, Step::Reveal(i)));

            let mut message = DebateMessage::new((i + 1).to_string(), turn.agent, turn.kind, turn.content).at(slot);
            if consensus {
                message = message.with_verification(VerificationStatus::Verified);
            }
            messages.push(message);
        }

        Self {
            city: city.to_string(),
            topic: topic.to_string(),
            mode: PlaybackMode::Live,
            messages,
            steps,
            solution: live_solution(city, topic),
            models,
        }
    }

    pub fn messages(&self) -> &[DebateMessage] {
        &self.messages
    }

    /// Offset of the last step at normal speed
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map(|(offset, _)| *offset).unwrap_or(0)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// State of a debate, updated after every step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebateOutcome {
    pub city: String,
    pub topic: String,
    pub mode: PlaybackMode,
    pub phase: DebatePhase,
    pub consensus_score: ConsensusScore,
    pub active_agent: Option<DebateAgent>,
    pub messages: Vec<DebateMessage>,
    pub traces: Vec<ThinkingTrace>,
    pub solution: Option<FinalSolution>,
    /// Agent id -> model, live debates only
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub models: BTreeMap<String, String>,
}

enum Wake {
    Deadline,
    Command(Option<DebateCommand>),
}

/// Plays timelines
pub struct DebateSequencer {
    speed: f64,
    event_tx: Option<mpsc::Sender<FlowEvent>>,
    command_rx: Option<mpsc::Receiver<DebateCommand>>,
    progress_tx: Option<watch::Sender<DebateOutcome>>,
}

impl Default for DebateSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateSequencer {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            event_tx: None,
            command_rx: None,
            progress_tx: None,
        }
    }

    /// Divide every offset by `speed`; non-positive values are ignored
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Set event channel for streaming events
    pub fn with_event_channel(mut self, tx: mpsc::Sender<FlowEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Accept commands (abort) during playback
    pub fn with_command_channel(mut self, rx: mpsc::Receiver<DebateCommand>) -> Self {
        self.command_rx = Some(rx);
        self
    }

    /// Publish a snapshot of the outcome after every step
    pub fn with_progress_channel(mut self, tx: watch::Sender<DebateOutcome>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    fn scaled(&self, offset_ms: u64) -> Duration {
        Duration::from_micros((offset_ms as f64 * 1000.0 / self.speed).round() as u64)
    }

    async fn emit(&self, event: FlowEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    fn publish(&self, outcome: &DebateOutcome) {
        if let Some(tx) = &self.progress_tx {
            tx.send_replace(outcome.clone());
        }
    }

    async fn emit_score(&self, before: ConsensusScore, outcome: &DebateOutcome) {
        if before != outcome.consensus_score {
            self.emit(
                FlowEvent::new(FlowEventKind::ConsensusUpdated, SOURCE)
                    .with_data(serde_json::json!({ "score": outcome.consensus_score.value() })),
            )
            .await;
        }
    }

    async fn publish_solution(&self, solution: &FinalSolution, outcome: &mut DebateOutcome) {
        outcome.solution = Some(solution.clone());
        self.emit(
            FlowEvent::new(FlowEventKind::SolutionReady, DebateAgent::Refiner.id())
                .with_data(serde_json::to_value(solution).unwrap_or_default()),
        )
        .await;
    }

    /// Sleep until `deadline`; true when an abort arrived first
    async fn wait_until(&mut self, deadline: Instant) -> bool {
        loop {
            let Some(rx) = self.command_rx.as_mut() else {
                tokio::time::sleep_until(deadline).await;
                return false;
            };

            let wake = tokio::select! {
                _ = tokio::time::sleep_until(deadline) => Wake::Deadline,
                cmd = rx.recv() => Wake::Command(cmd),
            };

            match wake {
                Wake::Deadline => return false,
                Wake::Command(Some(DebateCommand::Abort)) => return true,
                // Nobody can abort any more
                Wake::Command(None) => self.command_rx = None,
            }
        }
    }

    /// Play `timeline` to the end or until aborted
    #[tracing::instrument(skip(self, timeline), fields(city = %timeline.city, mode = ?timeline.mode))]
    pub async fn play(&mut self, timeline: Timeline) -> DebateOutcome {
        let Timeline {
            city,
            topic,
            mode,
            messages,
            steps,
            solution,
            models,
        } = timeline;
        let last = messages.len().checked_sub(1);

        let mut outcome = DebateOutcome {
            city,
            topic,
            mode,
            models,
            ..Default::default()
        };
        outcome.phase.start();

        self.emit(
            FlowEvent::new(FlowEventKind::DebateStarted, SOURCE).with_data(serde_json::json!({
                "city": outcome.city,
                "topic": outcome.topic,
                "mode": mode,
                "messages": messages.len(),
            })),
        )
        .await;
        self.publish(&outcome);

        let start = Instant::now();
        for (offset, step) in steps {
            if self.wait_until(start + self.scaled(offset)).await {
                outcome.phase.abort();
                outcome.active_agent = None;
                tracing::info!("Debate aborted after {} messages", outcome.messages.len());
                self.emit(
                    FlowEvent::new(FlowEventKind::DebateAborted, SOURCE).with_data(serde_json::json!({
                        "messages": outcome.messages.len(),
                        "score": outcome.consensus_score.value(),
                    })),
                )
                .await;
                self.publish(&outcome);
                return outcome;
            }

            match step {
                Step::Trace(trace) => {
                    self.emit(
                        FlowEvent::new(FlowEventKind::TraceAdded, &trace.agent)
                            .with_data(serde_json::to_value(&trace).unwrap_or_default()),
                    )
                    .await;
                    outcome.traces.push(trace);
                }
                Step::Activate(idx) => {
                    let Some(message) = messages.get(idx) else {
                        continue;
                    };
                    outcome.active_agent = Some(message.agent);
                    self.emit(
                        FlowEvent::new(FlowEventKind::AgentActive, message.agent.id())
                            .with_data(serde_json::json!({ "message_id": message.id })),
                    )
                    .await;

                    if mode == PlaybackMode::Scripted {
                        let before = outcome.consensus_score;
                        outcome.consensus_score.on_scripted_message(message);
                        self.emit_score(before, &outcome).await;
                    }
                }
                Step::Reveal(idx) => {
                    let Some(message) = messages.get(idx) else {
                        continue;
                    };
                    let is_last = Some(idx) == last;
                    let before = outcome.consensus_score;

                    outcome.active_agent = None;
                    self.emit(
                        FlowEvent::new(FlowEventKind::MessageAdded, message.agent.id())
                            .with_data(serde_json::to_value(message).unwrap_or_default()),
                    )
                    .await;
                    outcome.messages.push(message.clone());

                    match mode {
                        PlaybackMode::Scripted => {
                            if is_last && message.kind == MessageKind::Consensus {
                                outcome.consensus_score.complete();
                                self.publish_solution(&solution, &mut outcome).await;
                            }
                        }
                        PlaybackMode::Live => {
                            outcome.consensus_score.on_live_message(message.kind);
                            if message.kind == MessageKind::Consensus {
                                outcome.phase.conclude();
                                self.publish_solution(&solution, &mut outcome).await;
                            }
                        }
                    }
                    self.emit_score(before, &outcome).await;

                    if is_last {
                        outcome.phase.conclude();
                    }
                }
            }
            self.publish(&outcome);
        }

        outcome.phase.conclude();
        tracing::info!(
            "Debate finished with {} messages, consensus {}",
            outcome.messages.len(),
            outcome.consensus_score.value()
        );
        self.emit(
            FlowEvent::new(FlowEventKind::DebateCompleted, SOURCE).with_data(serde_json::json!({
                "messages": outcome.messages.len(),
                "score": outcome.consensus_score.value(),
                "phase": outcome.phase,
            })),
        )
        .await;
        self.publish(&outcome);
        outcome
    }
}
