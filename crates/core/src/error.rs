//! # Flow Errors
//!
//! Domain errors surfaced to API callers. Orchestration code wraps these in
//! `anyhow` with context; handlers downcast to pick a status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Every requested target location was blank
    #[error("at least one target location is required")]
    NoTargets,

    #[error("salary must be a positive finite number, got {0}")]
    InvalidSalary(f64),

    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error("GROQ_API_KEY not configured. Add it to .env")]
    MissingApiKey,

    /// Upstream chat completion failed or returned an unusable body
    #[error("Groq API error: {0}")]
    Llm(String),
}

impl FlowError {
    /// Whether the caller supplied bad input (as opposed to a runtime failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FlowError::NoTargets | FlowError::InvalidSalary(_) | FlowError::UnknownAgent(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(FlowError::NoTargets.is_client_error());
        assert!(FlowError::InvalidSalary(-1.0).is_client_error());
        assert!(!FlowError::MissingApiKey.is_client_error());
        assert!(!FlowError::Llm("boom".into()).is_client_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FlowError::InvalidSalary(0.0).to_string(),
            "salary must be a positive finite number, got 0"
        );
    }
}
