//! # Equinox Core
//!
//! The "Brain" of Equinox Flow - city data, the relocation scenario builder,
//! the analysis agents and the agent debate.
//!
//! ## Architecture
//!
//! - `cities/` - Static city metrics table and fuzzy lookup
//! - `simulation/` - Salary x multiplier scenarios and recommendations
//! - `agents/` - Actuary, Fiscal Ghost and Nexus analysis agents
//! - `debate/` - Scripted and Groq-backed debates, timeline playback
//! - `config` - Persisted playback and model overrides
//!
//! ## Usage
//!
//! ```rust,ignore
//! use equinox_core::simulation::{SimulationRequest, Simulator};
//!
//! let request = SimulationRequest::new(["Lisbon", "Tokyo"], 95_000.0);
//! let result = Simulator::default().run(&request).await?;
//! println!("{}", result.recommendations[0]);
//! ```

pub mod agents;
pub mod cities;
pub mod config;
pub mod debate;
pub mod error;
pub mod events;
pub mod format;
pub mod models;
pub mod simulation;

pub use error::FlowError;
pub use events::{FlowEvent, FlowEventKind};
