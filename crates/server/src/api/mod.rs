//! # HTTP API
//!
//! Route groups nested under `/api/v1`, plus the `/api/agents` contract used
//! by the original web client.

pub mod agents;
pub mod cities;
pub mod config;
pub mod debate;
pub mod simulate;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use equinox_core::{FlowError, FlowEvent};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use utoipa::ToSchema;

/// Successful envelope: `{ "status": "success", "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            data,
        })
    }
}

/// Error body: `{ "status": "error", "error": ... }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub status: String,
    pub error: String,
}

/// An error with the status code it should be reported under
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<anyhow::Error> for ApiError {
    /// Bad input maps to 400; anything else is logged and reported as 500
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<FlowError>() {
            Some(flow) if flow.is_client_error() => Self::bad_request(flow.to_string()),
            _ => {
                tracing::error!("Request failed: {:#}", err);
                Self::internal(format!("{:#}", err))
            }
        }
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        anyhow::Error::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error".to_string(),
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Per-run event channel bridged into the broadcast fan-out
pub fn bridge_events(broadcast_tx: &broadcast::Sender<FlowEvent>) -> mpsc::Sender<FlowEvent> {
    let (tx, mut rx) = mpsc::channel::<FlowEvent>(100);
    let broadcast_tx = broadcast_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            // No subscribers is fine
            let _ = broadcast_tx.send(event);
        }
    });
    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use equinox_core::FlowEventKind;

    #[test]
    fn test_client_errors_map_to_400() {
        let err: ApiError = FlowError::NoTargets.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "at least one target location is required");
    }

    #[test]
    fn test_runtime_errors_map_to_500() {
        let err: ApiError = FlowError::Llm("upstream down".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_bridge_forwards_to_subscribers() {
        let (broadcast_tx, mut sub) = broadcast::channel(8);
        let tx = bridge_events(&broadcast_tx);

        tx.send(FlowEvent::new(FlowEventKind::DebateStarted, "sequencer"))
            .await
            .unwrap();

        let event = sub.recv().await.unwrap();
        assert_eq!(event.kind, FlowEventKind::DebateStarted);
    }
}
