//! # Simulation API
//!
//! `POST /api/v1/simulate` runs the scenario builder; `/simulate/agents` runs
//! the three analysis agents over the same form.

use axum::{extract::State, routing::post, Json, Router};
use equinox_core::agents::{AgentContext, AgentOrchestrator, FinancialData, OrchestratedResult};
use equinox_core::simulation::{SimulationRequest, SimulationResult, Simulator};
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use super::{bridge_events, ApiError, ApiResponse, ErrorBody};
use crate::SharedState;

/// The relocation form
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SimulateRequest {
    #[serde(default)]
    pub current_location: String,
    pub target_locations: Vec<String>,
    pub current_salary: f64,
    /// Defaults to USD
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub lifestyle_preferences: HashMap<String, serde_json::Value>,
    /// Bank-derived history, used by the agent simulation only
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub financial_data: Option<FinancialData>,
}

impl SimulateRequest {
    fn to_request(&self) -> SimulationRequest {
        let mut request = SimulationRequest::new(self.target_locations.clone(), self.current_salary)
            .with_current_location(self.current_location.clone());
        if let Some(currency) = &self.currency {
            request.currency = currency.clone();
        }
        request.lifestyle_preferences = self.lifestyle_preferences.clone();
        request
    }
}

pub fn simulate_routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(simulate))
        .route("/agents", post(simulate_agents))
}

/// Build salary x multiplier scenarios for each target city
#[utoipa::path(
    post,
    path = "/api/v1/simulate",
    tag = "simulation",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Scenarios, mock risk/compliance summaries and recommendations"),
        (status = 400, description = "No targets or invalid salary", body = ErrorBody),
        (status = 500, description = "Simulation failed", body = ErrorBody)
    )
)]
pub async fn simulate(
    State(state): State<SharedState>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<ApiResponse<SimulationResult>>, ApiError> {
    let delay = state.config.read().await.simulation_delay();
    let simulator = Simulator::default()
        .with_processing_delay(delay)
        .with_event_channel(bridge_events(&state.event_tx));

    let result = simulator.run(&req.to_request()).await?;
    Ok(ApiResponse::success(result))
}

/// Run the Actuary, Fiscal Ghost and Nexus agents concurrently
#[utoipa::path(
    post,
    path = "/api/v1/simulate/agents",
    tag = "simulation",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Per-city agent reports and a five-year wealth projection"),
        (status = 400, description = "No targets or invalid salary", body = ErrorBody),
        (status = 500, description = "An agent failed", body = ErrorBody)
    )
)]
pub async fn simulate_agents(
    State(state): State<SharedState>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<ApiResponse<OrchestratedResult>>, ApiError> {
    let mut ctx = AgentContext::from_request(&req.to_request())?;
    if let Some(data) = req.financial_data {
        ctx = ctx.with_financial_data(data);
    }

    let latency = state.config.read().await.agent_latency();
    let orchestrator = AgentOrchestrator::new(latency).with_event_channel(bridge_events(&state.event_tx));

    let result = orchestrator.run(&ctx).await?;
    Ok(ApiResponse::success(result))
}
