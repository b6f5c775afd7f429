//! # Simulation Request
//!
//! The relocation form as submitted by a client.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::FlowError;

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub current_location: String,
    /// Cities to compare, in the order the user listed them
    pub target_locations: Vec<String>,
    /// Annual salary in `currency`
    pub current_salary: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub lifestyle_preferences: HashMap<String, serde_json::Value>,
}

impl SimulationRequest {
    pub fn new(targets: impl IntoIterator<Item = impl Into<String>>, salary: f64) -> Self {
        Self {
            current_location: String::new(),
            target_locations: targets.into_iter().map(Into::into).collect(),
            current_salary: salary,
            currency: default_currency(),
            lifestyle_preferences: HashMap::new(),
        }
    }

    pub fn with_current_location(mut self, location: impl Into<String>) -> Self {
        self.current_location = location.into();
        self
    }

    /// Check the salary and return the non-blank targets, trimmed
    pub fn validate(&self) -> Result<Vec<String>, FlowError> {
        if !self.current_salary.is_finite() || self.current_salary <= 0.0 {
            return Err(FlowError::InvalidSalary(self.current_salary));
        }

        let targets: Vec<String> = self
            .target_locations
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        if targets.is_empty() {
            return Err(FlowError::NoTargets);
        }
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_targets_are_dropped() {
        let req = SimulationRequest::new(["Berlin", "  ", "", " Tokyo "], 100_000.0);
        assert_eq!(req.validate().unwrap(), vec!["Berlin", "Tokyo"]);
    }

    #[test]
    fn test_all_blank_targets_rejected() {
        let req = SimulationRequest::new([" "], 100_000.0);
        assert!(matches!(req.validate(), Err(FlowError::NoTargets)));
    }

    #[test]
    fn test_invalid_salary_rejected() {
        for salary in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let req = SimulationRequest::new(["Berlin"], salary);
            assert!(matches!(req.validate(), Err(FlowError::InvalidSalary(_))));
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let req: SimulationRequest = serde_json::from_str(
            r#"{"target_locations": ["Lisbon"], "current_salary": 90000}"#,
        )
        .unwrap();
        assert_eq!(req.currency, "USD");
        assert!(req.current_location.is_empty());
        assert!(req.lifestyle_preferences.is_empty());
    }
}
