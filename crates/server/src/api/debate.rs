//! # Debate API
//!
//! Starts, stops and observes debate playback. One debate runs at a time;
//! starting a new one aborts the previous playback.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use equinox_core::debate::{
    prepare_timeline, DebateCommand, DebateOutcome, DebatePhase, DebateSequencer, GroqClient,
    DEBATE_CITIES, DEBATE_TOPICS,
};
use equinox_core::models::DebateAgent;
use equinox_core::FlowEvent;
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, time::Duration};
use tokio::sync::{broadcast, mpsc, mpsc::error::TrySendError, watch};
use utoipa::ToSchema;

use super::{bridge_events, ApiError, ErrorBody};
use crate::{DebateHandle, SharedState};

const HEARTBEAT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StartDebateRequest {
    pub city: String,
    /// Defaults to the first standard topic
    #[serde(default)]
    pub topic: Option<String>,
    /// Try the Groq-backed debate; defaults to the `use_live_agents` setting
    #[serde(default)]
    pub live: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StartDebateResponse {
    pub status: String,
    pub city: String,
    pub topic: String,
    /// Whether a live debate will be attempted before falling back
    pub live: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StopDebateResponse {
    /// "stopping" when a running debate was told to abort, otherwise "idle"
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DebateParticipant {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Model used in live debates
    pub model: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DebateCatalog {
    pub topics: Vec<String>,
    /// Cities with hand-written debate data; others reuse Tokyo's
    pub cities: Vec<String>,
    pub agents: Vec<DebateParticipant>,
}

pub fn debate_routes() -> Router<SharedState> {
    Router::new()
        .route("/start", post(start_debate))
        .route("/stop", post(stop_debate))
        .route("/status", get(debate_status))
        .route("/events", get(events))
        .route("/topics", get(list_topics))
}

/// Start a debate in the background
#[utoipa::path(
    post,
    path = "/api/v1/debate/start",
    tag = "debate",
    request_body = StartDebateRequest,
    responses(
        (status = 200, description = "Debate started", body = StartDebateResponse),
        (status = 400, description = "Missing city", body = ErrorBody)
    )
)]
pub async fn start_debate(
    State(state): State<SharedState>,
    Json(req): Json<StartDebateRequest>,
) -> Result<Json<StartDebateResponse>, ApiError> {
    let city = req.city.trim().to_string();
    if city.is_empty() {
        return Err(ApiError::bad_request("city is required"));
    }
    let topic = req
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEBATE_TOPICS[0])
        .to_string();

    let config = state.config.read().await.clone();
    let client = if req.live.unwrap_or_else(|| config.use_live_agents()) {
        GroqClient::from_key(state.groq_api_key.clone())
            .ok()
            .map(|client| client.with_config(&config))
    } else {
        None
    };
    let live = client.is_some();

    let (command_tx, mut command_rx) = mpsc::channel::<DebateCommand>(4);
    let (progress_tx, progress_rx) = watch::channel(DebateOutcome::default());
    let previous = state.debate.write().await.replace(DebateHandle {
        command_tx,
        progress: progress_rx,
    });
    if let Some(previous) = previous {
        request_abort(&previous.command_tx);
    }

    let event_tx = bridge_events(&state.event_tx);
    let reveal_delay_ms = u64::try_from(config.reveal_delay().as_millis()).unwrap_or(u64::MAX);
    let (task_city, task_topic) = (city.clone(), topic.clone());

    tokio::spawn(async move {
        let timeline = tokio::select! {
            timeline = prepare_timeline(&task_city, &task_topic, client.as_ref(), reveal_delay_ms) => timeline,
            Some(DebateCommand::Abort) = command_rx.recv() => {
                tracing::info!("Debate on {} aborted before playback", task_city);
                progress_tx.send_replace(DebateOutcome {
                    city: task_city.clone(),
                    topic: task_topic.clone(),
                    phase: DebatePhase::Aborted,
                    ..Default::default()
                });
                return;
            }
        };
        let outcome = DebateSequencer::new()
            .with_speed(config.playback_speed())
            .with_event_channel(event_tx)
            .with_command_channel(command_rx)
            .with_progress_channel(progress_tx)
            .play(timeline)
            .await;

        tracing::info!(
            "Debate on {} finished: {:?}, {} messages, consensus {}",
            outcome.city,
            outcome.phase,
            outcome.messages.len(),
            outcome.consensus_score.value()
        );
    });

    Ok(Json(StartDebateResponse {
        status: "started".to_string(),
        city,
        topic,
        live,
    }))
}

/// Queue an abort without waiting; a full channel already holds one.
/// False once the debate has dropped its receiver.
fn request_abort(command_tx: &mpsc::Sender<DebateCommand>) -> bool {
    match command_tx.try_send(DebateCommand::Abort) {
        Ok(()) | Err(TrySendError::Full(_)) => true,
        Err(TrySendError::Closed(_)) => false,
    }
}

/// Abort the running debate
#[utoipa::path(
    post,
    path = "/api/v1/debate/stop",
    tag = "debate",
    responses(
        (status = 200, description = "Abort requested, or nothing was running", body = StopDebateResponse)
    )
)]
pub async fn stop_debate(State(state): State<SharedState>) -> Json<StopDebateResponse> {
    let stopping = match state.debate.read().await.as_ref() {
        Some(handle) => !handle.progress.borrow().phase.is_finished() && request_abort(&handle.command_tx),
        None => false,
    };

    let status = if stopping { "stopping" } else { "idle" };
    Json(StopDebateResponse {
        status: status.to_string(),
    })
}

/// Snapshot of the current (or last) debate
#[utoipa::path(
    get,
    path = "/api/v1/debate/status",
    tag = "debate",
    responses(
        (status = 200, description = "Phase, consensus score, revealed messages and traces")
    )
)]
pub async fn debate_status(State(state): State<SharedState>) -> Json<DebateOutcome> {
    let slot = state.debate.read().await;
    let outcome = slot
        .as_ref()
        .map(|handle| handle.progress.borrow().clone())
        .unwrap_or_default();
    Json(outcome)
}

/// Standard topics, cities with dedicated debate data and the agents
#[utoipa::path(
    get,
    path = "/api/v1/debate/topics",
    tag = "debate",
    responses(
        (status = 200, description = "Debate catalog", body = DebateCatalog)
    )
)]
pub async fn list_topics(State(state): State<SharedState>) -> Json<DebateCatalog> {
    let config = state.config.read().await;
    let agents = DebateAgent::all()
        .into_iter()
        .map(|agent| DebateParticipant {
            id: agent.id().to_string(),
            name: agent.display_name().to_string(),
            role: agent.role().to_string(),
            model: config.model_for(agent).model,
        })
        .collect();

    Json(DebateCatalog {
        topics: DEBATE_TOPICS.iter().map(|t| t.to_string()).collect(),
        cities: DEBATE_CITIES.iter().map(|c| c.name.to_string()).collect(),
        agents,
    })
}

/// Flow events as SSE, with a heartbeat comment every 15 seconds of silence
fn event_stream(rx: broadcast::Receiver<FlowEvent>) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match tokio::time::timeout(HEARTBEAT, rx.recv()).await {
                Ok(Ok(event)) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    return Some((Ok(Event::default().data(json)), rx));
                }
                Ok(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                    tracing::warn!("SSE subscriber lagged, {} events dropped", skipped);
                }
                Ok(Err(broadcast::error::RecvError::Closed)) => return None,
                Err(_) => return Some((Ok(Event::default().comment("heartbeat")), rx)),
            }
        }
    })
}

/// SSE endpoint for real-time events
#[utoipa::path(
    get,
    path = "/api/v1/debate/events",
    tag = "debate",
    responses(
        (status = 200, description = "text/event-stream of flow events")
    )
)]
pub async fn events(State(state): State<SharedState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(event_stream(state.event_tx.subscribe())).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_state, test_state_with};
    use axum::http::StatusCode;
    use equinox_core::config::FlowConfig;
    use equinox_core::FlowEventKind;
    use futures::StreamExt;
    use tokio::net::TcpListener;

    fn request(city: &str) -> StartDebateRequest {
        StartDebateRequest {
            city: city.to_string(),
            topic: None,
            live: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_debate_runs_to_consensus() {
        let state = test_state();
        let Json(started) = start_debate(State(state.clone()), Json(request("Berlin")))
            .await
            .unwrap();
        assert_eq!(started.topic, DEBATE_TOPICS[0]);
        assert!(!started.live);

        tokio::time::sleep(Duration::from_secs(20)).await;

        let Json(outcome) = debate_status(State(state)).await;
        assert_eq!(outcome.phase, DebatePhase::Consensus);
        assert_eq!(outcome.messages.len(), 10);
        assert_eq!(outcome.consensus_score.value(), 100);
        assert!(outcome.solution.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_aborts_playback() {
        let state = test_state();
        start_debate(State(state.clone()), Json(request("Dubai")))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(4400)).await;
        let Json(stopped) = stop_debate(State(state.clone())).await;
        assert_eq!(stopped.status, "stopping");

        tokio::time::sleep(Duration::from_millis(100)).await;
        let Json(outcome) = debate_status(State(state.clone())).await;
        assert_eq!(outcome.phase, DebatePhase::Aborted);
        assert!(outcome.messages.len() < 10);
        assert!(outcome.solution.is_none());

        let Json(again) = stop_debate(State(state)).await;
        assert_eq!(again.status, "idle");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_debate_aborts_previous() {
        let state = test_state();
        let mut events = state.event_tx.subscribe();

        start_debate(State(state.clone()), Json(request("Berlin")))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(3000)).await;
        let first = state.debate.read().await.as_ref().unwrap().progress.clone();

        start_debate(State(state.clone()), Json(request("Dubai")))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert_eq!(first.borrow().phase, DebatePhase::Aborted);
        assert_eq!(first.borrow().city, "Berlin");
        let Json(current) = debate_status(State(state)).await;
        assert_eq!(current.phase, DebatePhase::Consensus);
        assert_eq!(current.city, "Dubai");

        let mut solutions = Vec::new();
        while let Ok(event) = events.try_recv() {
            if event.kind == FlowEventKind::SolutionReady {
                solutions.push(event);
            }
        }
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].data.as_ref().unwrap()["city"], "Dubai");
    }

    #[tokio::test]
    async fn test_stop_never_blocks_while_live_debate_prepares() {
        // Accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
        let config = FlowConfig {
            groq_base_url: Some(url),
            ..Default::default()
        };
        let state = test_state_with(config, Some("test-key".to_string()));

        let live = StartDebateRequest {
            live: Some(true),
            ..request("Tokyo")
        };
        let Json(started) = start_debate(State(state.clone()), Json(live)).await.unwrap();
        assert!(started.live);

        let Json(stopped) = stop_debate(State(state.clone())).await;
        assert_eq!(stopped.status, "stopping");
        for _ in 0..6 {
            tokio::time::timeout(Duration::from_secs(2), stop_debate(State(state.clone())))
                .await
                .expect("stop blocked");
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        let Json(aborted) = debate_status(State(state.clone())).await;
        assert_eq!(aborted.phase, DebatePhase::Aborted);
        assert_eq!(aborted.city, "Tokyo");

        let scripted = StartDebateRequest {
            live: Some(false),
            ..request("Berlin")
        };
        let restart = tokio::time::timeout(
            Duration::from_secs(2),
            start_debate(State(state.clone()), Json(scripted)),
        )
        .await
        .expect("start blocked");
        assert!(restart.is_ok());

        tokio::time::sleep(Duration::from_millis(200)).await;
        let Json(outcome) = debate_status(State(state)).await;
        assert_eq!(outcome.city, "Berlin");
        assert_eq!(outcome.phase, DebatePhase::Debating);
        drop(listener);
    }

    #[tokio::test]
    async fn test_status_before_any_debate() {
        let Json(outcome) = debate_status(State(test_state())).await;
        assert_eq!(outcome.phase, DebatePhase::Idle);
        assert!(outcome.messages.is_empty());
    }

    #[tokio::test]
    async fn test_blank_city_rejected() {
        let err = start_debate(State(test_state()), Json(request("  ")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_topics_catalog() {
        let Json(catalog) = list_topics(State(test_state())).await;
        assert_eq!(catalog.topics.len(), 8);
        assert_eq!(catalog.cities.len(), 5);
        assert_eq!(catalog.agents.len(), 4);
        assert_eq!(catalog.agents[1].name, "Fiscal Ghost");
        assert_eq!(catalog.agents[1].model, "mixtral-8x7b-32768");
    }

    #[tokio::test]
    async fn test_event_stream_ends_when_channel_closes() {
        let (tx, rx) = broadcast::channel(4);
        tx.send(FlowEvent::new(FlowEventKind::DebateStarted, "sequencer"))
            .unwrap();
        drop(tx);

        let items: Vec<_> = event_stream(rx).collect().await;
        assert_eq!(items.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_stream_heartbeat() {
        let (_tx, rx) = broadcast::channel::<FlowEvent>(4);
        let start = tokio::time::Instant::now();

        let mut stream = Box::pin(event_stream(rx));
        assert!(stream.next().await.is_some());
        assert!(start.elapsed() >= HEARTBEAT);
    }
}
