//! # Config API
//!
//! Read and patch the persisted flow configuration.

use axum::{extract::State, routing::get, Json, Router};
use equinox_core::config::{ConfigDefaults, FlowConfig};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::SharedState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    /// Overrides currently in effect
    #[schema(value_type = Object)]
    pub config: FlowConfig,
    #[schema(value_type = Object)]
    pub defaults: ConfigDefaults,
    /// Whether GROQ_API_KEY is set, so live debates are possible
    pub live_available: bool,
}

/// Fields to override; fields left out keep their current value
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct ConfigPatch(pub FlowConfig);

pub fn config_routes() -> Router<SharedState> {
    Router::new().route("/", get(get_config).patch(update_config))
}

async fn respond(state: &SharedState) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        config: state.config.read().await.clone(),
        defaults: ConfigDefaults::default(),
        live_available: state.groq_api_key.is_some(),
    })
}

/// Get current configuration
#[utoipa::path(
    get,
    path = "/api/v1/config",
    tag = "config",
    responses(
        (status = 200, description = "Current configuration and defaults", body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    respond(&state).await
}

/// Update configuration (partial merge)
#[utoipa::path(
    patch,
    path = "/api/v1/config",
    tag = "config",
    request_body = ConfigPatch,
    responses(
        (status = 200, description = "Updated configuration", body = ConfigResponse)
    )
)]
pub async fn update_config(
    State(state): State<SharedState>,
    Json(ConfigPatch(updates)): Json<ConfigPatch>,
) -> Json<ConfigResponse> {
    {
        let mut config = state.config.write().await;
        config.merge(updates);
        if let Err(e) = config.save(&state.config_path).await {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }
    respond(&state).await
}
