//! # Analysis Agents
//!
//! Three specialists that each look at every target city from one angle:
//!
//! - **Actuary**: life quality and health risk
//! - **Fiscal Ghost**: replays the user's spending at local prices
//! - **Nexus**: tax treaties, compliance costs and a portable trust score
//!
//! The orchestrator runs them concurrently and folds their reports into a
//! five-year wealth projection.

pub mod actuary;
pub mod fiscal_ghost;
pub mod nexus;
pub mod orchestrator;

pub use actuary::{ActuaryAgent, LifeQualityReport};
pub use fiscal_ghost::{ExpenseReport, FiscalGhostAgent};
pub use nexus::{ComplianceReport, NexusAgent};
pub use orchestrator::{AgentOrchestrator, OrchestratedResult};

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::simulation::SimulationRequest;

/// Per-location analysis, keyed by the location string as submitted
pub type LocationMap<T> = BTreeMap<String, T>;

/// Optional bank-derived history; every field may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialData {
    /// Monthly spend per category
    #[serde(default)]
    pub spending_categories: BTreeMap<String, f64>,
    pub payment_history_score: Option<f64>,
    pub account_age_years: Option<f64>,
    pub debt_to_income_ratio: Option<f64>,
    pub current_wealth: Option<f64>,
}

/// Inputs shared by all three agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContext {
    pub current_location: String,
    pub target_locations: Vec<String>,
    pub salary: f64,
    pub currency: String,
    #[serde(default)]
    pub preferences: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub financial_data: Option<FinancialData>,
}

impl AgentContext {
    /// Context for a validated request; blank targets are dropped
    pub fn from_request(request: &SimulationRequest) -> Result<Self> {
        let target_locations = request.validate()?;
        Ok(Self {
            current_location: request.current_location.clone(),
            target_locations,
            salary: request.current_salary,
            currency: request.currency.clone(),
            preferences: request.lifestyle_preferences.clone(),
            financial_data: None,
        })
    }

    pub fn with_financial_data(mut self, data: FinancialData) -> Self {
        self.financial_data = Some(data);
        self
    }
}

/// One analysis specialist
#[async_trait]
pub trait Agent: Send + Sync {
    type Report: Serialize + DeserializeOwned + Send;

    /// Stable identifier used in events
    fn id(&self) -> &'static str;

    async fn analyze(&self, ctx: &AgentContext) -> Result<LocationMap<Self::Report>>;
}

/// Stand-in for an external data provider round trip
pub(crate) async fn fetch_delay(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_request_drops_blank_targets() {
        let request = SimulationRequest::new(["Berlin", "  "], 90_000.0).with_current_location("Austin");
        let ctx = AgentContext::from_request(&request).unwrap();
        assert_eq!(ctx.target_locations, vec!["Berlin"]);
        assert_eq!(ctx.current_location, "Austin");
        assert!(ctx.financial_data.is_none());
    }

    #[test]
    fn test_context_rejects_bad_salary() {
        let request = SimulationRequest::new(["Berlin"], 0.0);
        assert!(AgentContext::from_request(&request).is_err());
    }
}
