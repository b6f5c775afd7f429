//! # Scenario Simulator
//!
//! Turns a salary and a list of target cities into per-city wealth scenarios.
//! The math is a plain multiplication against the city table; `run` adds the
//! processing delay and progress events a client renders while it waits.

pub mod report;
pub mod request;

pub use report::{
    best_scenario, ComplianceSummary, RiskAnalysis, Scenario, SimulationResult,
    TrustScoreSummary,
};
pub use request::SimulationRequest;

use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::cities::CityTable;
use crate::error::FlowError;
use crate::events::{FlowEvent, FlowEventKind};

const SOURCE: &str = "simulator";

/// The scenario builder
pub struct Simulator {
    table: CityTable,
    processing_delay: Duration,
    event_tx: Option<mpsc::Sender<FlowEvent>>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(CityTable::builtin())
    }
}

impl Simulator {
    pub fn new(table: CityTable) -> Self {
        Self {
            table,
            processing_delay: Duration::ZERO,
            event_tx: None,
        }
    }

    /// Set event channel for streaming events
    pub fn with_event_channel(mut self, tx: mpsc::Sender<FlowEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Wait this long before returning results from `run`
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Build the result synchronously, without delay or events
    pub fn build(&self, request: &SimulationRequest) -> Result<SimulationResult, FlowError> {
        let targets = request.validate()?;
        let salary = request.current_salary;

        let resolved: Vec<_> = targets.iter().map(|t| self.table.resolve(t)).collect();
        let scenarios: Vec<Scenario> = resolved.iter().map(|c| Scenario::build(c, salary)).collect();
        let recommendations = report::recommendations(&scenarios, &resolved[0], salary);

        Ok(SimulationResult {
            scenarios,
            risk_analysis: RiskAnalysis::default(),
            compliance_summary: ComplianceSummary::default(),
            recommendations,
            trust_score: TrustScoreSummary::default(),
        })
    }

    async fn emit(&self, event: FlowEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Run a simulation, emitting progress events
    #[tracing::instrument(skip(self, request), fields(targets = request.target_locations.len()))]
    pub async fn run(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        self.emit(
            FlowEvent::new(FlowEventKind::SimulationStarted, SOURCE).with_data(serde_json::json!({
                "target_locations": request.target_locations,
                "current_salary": request.current_salary,
            })),
        )
        .await;

        let result = match self.build(request) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Simulation rejected: {}", e);
                self.emit(
                    FlowEvent::new(FlowEventKind::SimulationFailed, SOURCE)
                        .with_data(serde_json::json!({ "error": e.to_string() })),
                )
                .await;
                return Err(e.into());
            }
        };

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        self.emit(
            FlowEvent::new(FlowEventKind::SimulationCompleted, SOURCE).with_data(serde_json::json!({
                "scenarios": result.scenarios.len(),
                "best": best_scenario(&result.scenarios).map(|s| s.location.clone()),
            })),
        )
        .await;

        tracing::info!("Simulated {} scenarios", result.scenarios.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_follow_request_order() {
        let sim = Simulator::default();
        let req = SimulationRequest::new(["Tokyo", " ", "Lisbon", "Atlantis"], 100_000.0);
        let result = sim.build(&req).unwrap();

        let locations: Vec<_> = result.scenarios.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(locations, vec!["Tokyo, Japan", "Lisbon, Portugal", "Atlantis"]);
        assert_eq!(result.recommendations.len(), 5);
        assert!(result.recommendations[0].starts_with("Lisbon, Portugal offers"));
        assert!(result.recommendations[1].starts_with("Tokyo, Japan has"));
    }

    #[test]
    fn test_build_rejects_empty_targets() {
        let sim = Simulator::default();
        let req = SimulationRequest::new(Vec::<String>::new(), 100_000.0);
        assert!(matches!(sim.build(&req), Err(FlowError::NoTargets)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_emits_events_after_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let sim = Simulator::default()
            .with_event_channel(tx)
            .with_processing_delay(Duration::from_millis(3500));

        let started = tokio::time::Instant::now();
        let result = sim
            .run(&SimulationRequest::new(["Berlin"], 80_000.0))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(3500));
        assert_eq!(result.scenarios.len(), 1);
        assert_eq!(rx.recv().await.unwrap().kind, FlowEventKind::SimulationStarted);
        let done = rx.recv().await.unwrap();
        assert_eq!(done.kind, FlowEventKind::SimulationCompleted);
        assert_eq!(done.data.unwrap()["best"], "Berlin, Germany");
    }

    #[tokio::test]
    async fn test_run_reports_failure() {
        let (tx, mut rx) = mpsc::channel(8);
        let sim = Simulator::default().with_event_channel(tx);

        let err = sim
            .run(&SimulationRequest::new(["Berlin"], -1.0))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::InvalidSalary(_))
        ));
        assert_eq!(rx.recv().await.unwrap().kind, FlowEventKind::SimulationStarted);
        assert_eq!(rx.recv().await.unwrap().kind, FlowEventKind::SimulationFailed);
    }
}
