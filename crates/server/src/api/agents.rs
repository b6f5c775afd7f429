//! # Agents API
//!
//! The `/api/agents` contract of the web client: `POST` asks one agent for
//! an analysis, `PUT` runs the full five-round debate. Without a Groq key
//! both answer with a mock marker instead of failing.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use equinox_core::debate::{GroqClient, LiveTurn};
use equinox_core::models::DebateAgent;
use equinox_core::FlowError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::SharedState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AgentAnalysisRequest {
    pub city: String,
    pub topic: String,
    /// actuary, fiscal, nexus or refiner
    pub agent: String,
    /// What the other agents said so far
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct AgentAnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DebateRunRequest {
    pub city: String,
    pub topic: String,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct DebateRunResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub debate: Option<Vec<LiveTurn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<BTreeMap<String, String>>,
}

pub fn agent_routes() -> Router<SharedState> {
    Router::new().route("/", post(analyze_agent).put(run_debate))
}

/// Groq client for the current key and config, if a key is set
async fn client(state: &SharedState) -> Result<GroqClient, FlowError> {
    let client = GroqClient::from_key(state.groq_api_key.clone())?;
    let config = state.config.read().await;
    Ok(client.with_config(&config))
}

/// Single-agent analysis
#[utoipa::path(
    post,
    path = "/api/agents",
    tag = "agents",
    request_body = AgentAnalysisRequest,
    responses(
        (status = 200, description = "Agent response, or a mock marker without an API key", body = AgentAnalysisResponse),
        (status = 400, description = "Unknown agent", body = AgentAnalysisResponse),
        (status = 500, description = "Groq call failed", body = AgentAnalysisResponse)
    )
)]
pub async fn analyze_agent(
    State(state): State<SharedState>,
    Json(req): Json<AgentAnalysisRequest>,
) -> (StatusCode, Json<AgentAnalysisResponse>) {
    let client = match client(&state).await {
        Ok(client) => client,
        Err(_) => {
            return (
                StatusCode::OK,
                Json(AgentAnalysisResponse {
                    success: true,
                    mock: Some(true),
                    message: Some("API key not configured - using mock responses".to_string()),
                    ..Default::default()
                }),
            )
        }
    };

    let failure = |status: StatusCode, error: String| {
        (
            status,
            Json(AgentAnalysisResponse {
                success: false,
                error: Some(error),
                ..Default::default()
            }),
        )
    };

    let agent: DebateAgent = match req.agent.parse() {
        Ok(agent) => agent,
        Err(e) => return failure(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match client
        .analyze(agent, &req.city, &req.topic, req.context.as_deref())
        .await
    {
        Ok(response) => (
            StatusCode::OK,
            Json(AgentAnalysisResponse {
                success: true,
                agent: Some(agent.id().to_string()),
                response: Some(response),
                model: Some(client.model_for(agent).model),
                ..Default::default()
            }),
        ),
        Err(e) => {
            tracing::error!("Agent API error: {:#}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Full five-round debate
#[utoipa::path(
    put,
    path = "/api/agents",
    tag = "agents",
    request_body = DebateRunRequest,
    responses(
        (status = 200, description = "Debate transcript, or success=false with mock=true without an API key", body = DebateRunResponse),
        (status = 500, description = "A debate round failed", body = DebateRunResponse)
    )
)]
pub async fn run_debate(
    State(state): State<SharedState>,
    Json(req): Json<DebateRunRequest>,
) -> (StatusCode, Json<DebateRunResponse>) {
    let client = match client(&state).await {
        Ok(client) => client,
        Err(e) => {
            return (
                StatusCode::OK,
                Json(DebateRunResponse {
                    success: false,
                    mock: Some(true),
                    error: Some(e.to_string()),
                    ..Default::default()
                }),
            )
        }
    };

    match client.run_debate(&req.city, &req.topic).await {
        Ok(live) => (
            StatusCode::OK,
            Json(DebateRunResponse {
                success: true,
                city: Some(live.city),
                topic: Some(live.topic),
                debate: Some(live.debate),
                models: Some(live.models),
                ..Default::default()
            }),
        ),
        Err(e) => {
            tracing::error!("Debate API error: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DebateRunResponse {
                    success: false,
                    error: Some(e.to_string()),
                    ..Default::default()
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_state, test_state_with};
    use equinox_core::config::FlowConfig;

    fn analysis(agent: &str) -> AgentAnalysisRequest {
        AgentAnalysisRequest {
            city: "Berlin".to_string(),
            topic: "Healthcare quality".to_string(),
            agent: agent.to_string(),
            context: None,
        }
    }

    fn unreachable_upstream() -> SharedState {
        let config = FlowConfig {
            groq_base_url: Some("http://127.0.0.1:9/v1/chat/completions".to_string()),
            ..Default::default()
        };
        test_state_with(config, Some("gsk_test".to_string()))
    }

    #[tokio::test]
    async fn test_analysis_without_key_is_mock() {
        let (status, Json(resp)) = analyze_agent(State(test_state()), Json(analysis("actuary"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);
        assert_eq!(resp.mock, Some(true));
        assert!(resp.response.is_none());
    }

    #[tokio::test]
    async fn test_debate_without_key_is_mock_failure() {
        let req = DebateRunRequest {
            city: "Tokyo".to_string(),
            topic: "Tax optimization".to_string(),
        };
        let (status, Json(resp)) = run_debate(State(test_state()), Json(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!resp.success);
        assert_eq!(resp.mock, Some(true));
        assert!(resp.error.unwrap().contains("GROQ_API_KEY"));
    }

    #[tokio::test]
    async fn test_unknown_agent_is_bad_request() {
        let (status, Json(resp)) = analyze_agent(State(unreachable_upstream()), Json(analysis("oracle"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let (status, Json(resp)) = analyze_agent(State(unreachable_upstream()), Json(analysis("nexus"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!resp.success);
        assert!(resp.error.is_some());
    }
}
