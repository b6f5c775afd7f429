//! # Agent Orchestrator
//!
//! Runs the Actuary, Fiscal Ghost and Nexus concurrently over the same
//! context and folds their reports into per-city wealth projections.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use super::{
    Agent, ActuaryAgent, AgentContext, ComplianceReport, ExpenseReport, FiscalGhostAgent,
    LifeQualityReport, LocationMap, NexusAgent,
};
use crate::events::{FlowEvent, FlowEventKind};
use crate::format::thousands;

/// Assumed annual return on saved income
const INVESTMENT_RETURN: f64 = 1.05;
const PROJECTION_YEARS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub wealth: f64,
    pub city: String,
}

/// Aggregated outlook for one city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentScenario {
    pub location: String,
    pub year_1_wealth: f64,
    pub year_5_wealth: f64,
    pub risk_score: f64,
    pub quality_score: f64,
    pub net_annual_savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratedResult {
    pub scenarios: Vec<AgentScenario>,
    pub wealth_projection: LocationMap<Vec<ProjectionPoint>>,
    pub risk_analysis: LocationMap<LifeQualityReport>,
    pub expense_analysis: LocationMap<ExpenseReport>,
    pub compliance_summary: LocationMap<ComplianceReport>,
    pub recommendations: Vec<String>,
}

/// Linear five-year projection: wealth grows by `savings * 1.05` each year
pub fn project_wealth(city: &str, starting_wealth: f64, annual_savings: f64) -> Vec<ProjectionPoint> {
    let mut wealth = starting_wealth;
    (1..=PROJECTION_YEARS)
        .map(|year| {
            wealth += annual_savings * INVESTMENT_RETURN;
            ProjectionPoint {
                year,
                wealth,
                city: city.to_string(),
            }
        })
        .collect()
}

pub struct AgentOrchestrator {
    actuary: ActuaryAgent,
    fiscal_ghost: FiscalGhostAgent,
    nexus: NexusAgent,
    event_tx: Option<mpsc::Sender<FlowEvent>>,
}

impl Default for AgentOrchestrator {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl AgentOrchestrator {
    /// Create an orchestrator whose agents simulate `latency` per data fetch
    pub fn new(latency: Duration) -> Self {
        Self {
            actuary: ActuaryAgent::new(latency),
            fiscal_ghost: FiscalGhostAgent::new(latency),
            nexus: NexusAgent::new(latency),
            event_tx: None,
        }
    }

    /// Set event channel for streaming events
    pub fn with_event_channel(mut self, tx: mpsc::Sender<FlowEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    async fn emit(&self, event: FlowEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    async fn tracked<A: Agent>(&self, agent: &A, ctx: &AgentContext) -> Result<LocationMap<A::Report>> {
        self.emit(FlowEvent::new(FlowEventKind::AgentStarted, agent.id()))
            .await;

        match agent.analyze(ctx).await {
            Ok(report) => {
                self.emit(
                    FlowEvent::new(FlowEventKind::AgentCompleted, agent.id())
                        .with_data(serde_json::json!({ "locations": report.len() })),
                )
                .await;
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("Agent {} failed: {}", agent.id(), e);
                self.emit(
                    FlowEvent::new(FlowEventKind::AgentFailed, agent.id())
                        .with_data(serde_json::json!({ "error": e.to_string() })),
                )
                .await;
                Err(e.context(format!("{} analysis failed", agent.id())))
            }
        }
    }

    /// Run all three agents and aggregate
    #[tracing::instrument(skip(self, ctx), fields(targets = ctx.target_locations.len()))]
    pub async fn run(&self, ctx: &AgentContext) -> Result<OrchestratedResult> {
        let (risk, expenses, compliance) = tokio::join!(
            self.tracked(&self.actuary, ctx),
            self.tracked(&self.fiscal_ghost, ctx),
            self.tracked(&self.nexus, ctx),
        );
        let risk = risk?;
        let expenses = expenses?;
        let compliance = compliance?;

        let starting_wealth = ctx
            .financial_data
            .as_ref()
            .and_then(|d| d.current_wealth)
            .unwrap_or(0.0);

        let mut scenarios = Vec::with_capacity(ctx.target_locations.len());
        let mut projections = LocationMap::new();

        for location in &ctx.target_locations {
            let life = risk
                .get(location)
                .with_context(|| format!("No life quality report for {}", location))?;
            let spend = expenses
                .get(location)
                .with_context(|| format!("No expense report for {}", location))?;
            let tax = compliance
                .get(location)
                .with_context(|| format!("No compliance report for {}", location))?;

            let savings = tax.tax_analysis.net_after_all_taxes - spend.monthly_total() * 12.0;
            let projection = project_wealth(location, starting_wealth, savings);

            scenarios.push(AgentScenario {
                location: location.clone(),
                year_1_wealth: projection.first().map(|p| p.wealth).unwrap_or(starting_wealth),
                year_5_wealth: projection.last().map(|p| p.wealth).unwrap_or(starting_wealth),
                risk_score: life.composite_risk_score,
                quality_score: 1.0 - life.composite_risk_score,
                net_annual_savings: savings,
            });
            projections.insert(location.clone(), projection);
        }

        let recommendations = recommendations(&scenarios, &compliance);
        tracing::info!("Aggregated {} agent scenarios", scenarios.len());

        Ok(OrchestratedResult {
            scenarios,
            wealth_projection: projections,
            risk_analysis: risk,
            expense_analysis: expenses,
            compliance_summary: compliance,
            recommendations,
        })
    }
}

fn recommendations(
    scenarios: &[AgentScenario],
    compliance: &LocationMap<ComplianceReport>,
) -> Vec<String> {
    let Some(best) = scenarios.iter().reduce(|best, s| {
        if s.year_5_wealth > best.year_5_wealth {
            s
        } else {
            best
        }
    }) else {
        return Vec::new();
    };

    let mut lines = vec![
        format!(
            "Consider {} for optimal wealth growth (${} projected after 5 years)",
            best.location,
            thousands(best.year_5_wealth)
        ),
        format!(
            "Factor in {:.0}% composite health and safety risk in {}",
            best.risk_score * 100.0,
            best.location
        ),
    ];
    if let Some(report) = compliance.get(&best.location) {
        lines.push(format!(
            "Budget additional ${} for first-year compliance costs",
            thousands(report.compliance_costs.total_first_year)
        ));
    }
    lines
}
