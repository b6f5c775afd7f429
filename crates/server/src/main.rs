//! Equinox Server
//!
//! Axum server exposing the scenario builder, the analysis agents and the
//! agent debate over HTTP, plus a CLI for running them without a server.

mod api;

use axum::{
    http::header,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use equinox_core::cities::CityTable;
use equinox_core::config::FlowConfig;
use equinox_core::debate::{
    prepare_timeline, DebateCommand, DebateMessage, DebateOutcome, DebateSequencer, GroqClient,
    DEBATE_TOPICS,
};
use equinox_core::models::GROQ_API_KEY_ENV;
use equinox_core::simulation::{SimulationRequest, Simulator};
use equinox_core::{FlowEvent, FlowEventKind};
use serde::Serialize;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::{
    net::TcpListener,
    sync::{broadcast, mpsc, watch, RwLock},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use utoipa::{OpenApi, ToSchema};

/// Control handle for the debate currently playing
pub struct DebateHandle {
    pub command_tx: mpsc::Sender<DebateCommand>,
    pub progress: watch::Receiver<DebateOutcome>,
}

/// Application state
pub struct AppState {
    pub event_tx: broadcast::Sender<FlowEvent>,
    pub config: RwLock<FlowConfig>,
    pub config_path: PathBuf,
    /// Enables live debates and the `/api/agents` contract
    pub groq_api_key: Option<String>,
    pub debate: RwLock<Option<DebateHandle>>,
}

impl AppState {
    pub fn new(config: FlowConfig, config_path: PathBuf, groq_api_key: Option<String>) -> Self {
        let (event_tx, _) = broadcast::channel::<FlowEvent>(256);
        Self {
            event_tx,
            config: RwLock::new(config),
            config_path,
            groq_api_key: groq_api_key.filter(|key| !key.trim().is_empty()),
            debate: RwLock::new(None),
        }
    }
}

pub type SharedState = Arc<AppState>;

#[derive(Parser, Clone)]
#[command(author, version, about = "Equinox Flow - Agentic Financial Digital Twin")]
struct Args {
    /// Config file (defaults to .equinox/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the Equinox server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
    /// Compare target cities for a salary (CLI mode, no server)
    Simulate {
        /// Annual salary
        #[arg(short, long)]
        salary: f64,
        /// Target city; repeat for several
        #[arg(short, long = "target", required = true)]
        targets: Vec<String>,
        /// Where the user lives now
        #[arg(long, default_value = "")]
        current: String,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play an agent debate in the terminal
    Debate {
        #[arg(short, long)]
        city: String,
        #[arg(short, long)]
        topic: Option<String>,
        /// Ask the Groq-hosted models instead of playing the script
        #[arg(long)]
        live: bool,
        /// Playback speed factor
        #[arg(long)]
        speed: Option<f64>,
    },
    /// List cities in the built-in table
    Cities {
        /// Case-insensitive name filter
        #[arg(short, long)]
        filter: Option<String>,
    },
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equinox Flow API",
        version = "1.0.0",
        description = "Relocation scenarios, analysis agents and agent debates"
    ),
    paths(
        health,
        api::cities::list_cities,
        api::cities::get_city,
        api::simulate::simulate,
        api::simulate::simulate_agents,
        api::agents::analyze_agent,
        api::agents::run_debate,
        api::debate::start_debate,
        api::debate::stop_debate,
        api::debate::debate_status,
        api::debate::list_topics,
        api::debate::events,
        api::config::get_config,
        api::config::update_config
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            api::ErrorBody,
            api::cities::CitySummary,
            api::cities::CityListResponse,
            api::cities::CityLookupResponse,
            api::simulate::SimulateRequest,
            api::agents::AgentAnalysisRequest,
            api::agents::AgentAnalysisResponse,
            api::agents::DebateRunRequest,
            api::agents::DebateRunResponse,
            api::debate::StartDebateRequest,
            api::debate::StartDebateResponse,
            api::debate::StopDebateResponse,
            api::debate::DebateParticipant,
            api::debate::DebateCatalog,
            api::config::ConfigPatch,
            api::config::ConfigResponse
        )
    ),
    tags(
        (name = "system", description = "Liveness"),
        (name = "cities", description = "City metrics table"),
        (name = "simulation", description = "Scenario builder and analysis agents"),
        (name = "agents", description = "Groq-backed agent calls"),
        (name = "debate", description = "Debate playback"),
        (name = "config", description = "Configuration management")
    )
)]
struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
struct RootResponse {
    message: String,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Equinox Flow - Agentic Financial Digital Twin".to_string(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

// === OpenAPI Handler ===

async fn serve_openapi() -> impl IntoResponse {
    let spec = ApiDoc::openapi().to_json().unwrap_or_default();
    ([(header::CONTENT_TYPE, "application/json")], spec)
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1/cities", api::cities::city_routes())
        .nest("/api/v1/simulate", api::simulate::simulate_routes())
        .nest("/api/v1/debate", api::debate::debate_routes())
        .nest("/api/v1/config", api::config::config_routes())
        .route("/api/v1/openapi.json", get(serve_openapi))
        // Route contract of the original web client
        .nest("/api/agents", api::agents::agent_routes())
        .with_state(state)
}

// === Server Entry ===

pub async fn run_server(port: u16, state: SharedState) -> anyhow::Result<()> {
    let app = router(state.clone());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Equinox server listening on http://{}", addr);
    tracing::info!("  Cities:     /api/v1/cities, /cities/:name");
    tracing::info!("  Simulation: /api/v1/simulate, /simulate/agents");
    tracing::info!("  Debate:     /api/v1/debate/start, /stop, /status, /events, /topics");
    tracing::info!("  Agents:     /api/agents (POST, PUT)");
    tracing::info!("  Config:     /api/v1/config (GET, PATCH)");
    tracing::info!("  Health:     /health");
    if state.groq_api_key.is_none() {
        tracing::warn!("{} not set, debates will play the scripted timeline", GROQ_API_KEY_ENV);
    }

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// === CLI Commands ===

async fn run_simulation(
    current: String,
    targets: Vec<String>,
    salary: f64,
    json: bool,
) -> anyhow::Result<()> {
    let request = SimulationRequest::new(targets, salary).with_current_location(current);
    let result = Simulator::default()
        .with_processing_delay(std::time::Duration::ZERO)
        .run(&request)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Scenarios for a salary of {}:", equinox_core::format::thousands(salary));
    for s in &result.scenarios {
        println!(
            "  {:<28} year 1 {:>12}  year 5 {:>12}  quality {:>3.0}%  tax {:>4.1}%  risk {}",
            s.location,
            equinox_core::format::thousands(s.year_1_wealth),
            equinox_core::format::thousands(s.year_5_wealth),
            s.quality_score * 100.0,
            s.tax_burden,
            s.risk_level.as_str()
        );
    }
    println!("\nRecommendations:");
    for line in &result.recommendations {
        println!("  - {}", line);
    }
    Ok(())
}

fn print_event(event: &FlowEvent) {
    let Some(data) = event.data.clone() else {
        return;
    };
    match event.kind {
        FlowEventKind::TraceAdded => {
            if let Some(thought) = data.get("thought").and_then(|t| t.as_str()) {
                println!("    ({}) {}", event.agent, thought);
            }
        }
        FlowEventKind::MessageAdded => {
            if let Ok(message) = serde_json::from_value::<DebateMessage>(data) {
                println!(
                    "\n[{}, {}] {:?}\n  {}",
                    message.agent.display_name(),
                    message.agent.role(),
                    message.kind,
                    message.content
                );
                if !message.citations.is_empty() {
                    println!("  Sources: {}", message.citations.join(", "));
                }
            }
        }
        _ => {}
    }
}

async fn run_debate(
    config: &FlowConfig,
    city: String,
    topic: Option<String>,
    live: bool,
    speed: Option<f64>,
) -> anyhow::Result<()> {
    let topic = topic.unwrap_or_else(|| DEBATE_TOPICS[0].to_string());
    let client = if live {
        match GroqClient::from_env() {
            Ok(client) => Some(client.with_config(config)),
            Err(e) => {
                tracing::warn!("{}, playing the scripted debate", e);
                None
            }
        }
    } else {
        None
    };

    let reveal_delay_ms = u64::try_from(config.reveal_delay().as_millis()).unwrap_or(u64::MAX);
    let timeline = prepare_timeline(&city, &topic, client.as_ref(), reveal_delay_ms).await;
    println!("Debate: {} in {} ({:?})", topic, city, timeline.mode);

    let (event_tx, mut event_rx) = mpsc::channel::<FlowEvent>(100);
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    let (command_tx, command_rx) = mpsc::channel::<DebateCommand>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = command_tx.send(DebateCommand::Abort).await;
        }
    });

    let outcome = DebateSequencer::new()
        .with_speed(speed.unwrap_or_else(|| config.playback_speed()))
        .with_event_channel(event_tx)
        .with_command_channel(command_rx)
        .play(timeline)
        .await;
    let _ = printer.await;

    println!(
        "\nPhase: {:?}, consensus {}%",
        outcome.phase,
        outcome.consensus_score.value()
    );
    if let Some(solution) = outcome.solution {
        println!(
            "Recommendation: {}, {} ({}% confidence)",
            solution.recommendation, solution.city, solution.confidence
        );
        println!(
            "  Monthly cost {}, annual savings {}, tax benefit {}",
            solution.monthly_cost, solution.annual_savings, solution.tax_benefit
        );
        for approval in &solution.agent_approvals {
            println!("  {} {}: {}", approval.agent, approval.status, approval.reason);
        }
    }
    Ok(())
}

fn list_cities(filter: Option<String>) {
    let table = CityTable::builtin();
    let entries = table.search(filter.as_deref().unwrap_or_default());
    for entry in &entries {
        let m = &entry.metrics;
        println!(
            "{:<28} x{:.2} / x{:.2}  quality {:>3.0}%  tax {:>4.1}%  {}",
            entry.name,
            m.wealth_multiplier_1,
            m.wealth_multiplier_5,
            m.quality_score * 100.0,
            m.tax_burden,
            m.risk_level.as_str()
        );
    }
    println!("{} of {} cities", entries.len(), table.len());
}

/// Configures the global tracing subscriber; `RUST_LOG` overrides `info`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    Registry::default().with(filter).with(fmt_layer).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(FlowConfig::default_path);
    let config = FlowConfig::load(&config_path).await;

    match args.command {
        Some(CliCommand::Simulate {
            salary,
            targets,
            current,
            json,
        }) => run_simulation(current, targets, salary, json).await,
        Some(CliCommand::Debate {
            city,
            topic,
            live,
            speed,
        }) => run_debate(&config, city, topic, live, speed).await,
        Some(CliCommand::Cities { filter }) => {
            list_cities(filter);
            Ok(())
        }
        Some(CliCommand::Serve { port }) => {
            let key = std::env::var(GROQ_API_KEY_ENV).ok();
            run_server(port, Arc::new(AppState::new(config, config_path, key))).await
        }
        None => {
            let key = std::env::var(GROQ_API_KEY_ENV).ok();
            run_server(8000, Arc::new(AppState::new(config, config_path, key))).await
        }
    }
}

/// State with instant simulations, for handler tests
#[cfg(test)]
pub(crate) fn test_state_with(mut config: FlowConfig, groq_api_key: Option<String>) -> SharedState {
    config.simulation_delay_ms.get_or_insert(0);
    config.agent_latency_ms.get_or_insert(0);
    let path = std::env::temp_dir()
        .join(format!("equinox-test-{}", std::process::id()))
        .join("config.json");
    Arc::new(AppState::new(config, path, groq_api_key))
}

#[cfg(test)]
pub(crate) fn test_state() -> SharedState {
    test_state_with(FlowConfig::default(), None)
}

/// Like `test_state`, persisting config changes to `path`
#[cfg(test)]
pub(crate) fn test_state_at(path: PathBuf) -> SharedState {
    let config = FlowConfig {
        simulation_delay_ms: Some(0),
        agent_latency_ms: Some(0),
        ..Default::default()
    };
    Arc::new(AppState::new(config, path, None))
}
