//! # City Metrics
//!
//! Static quality-of-life and financial figures attached to each city.

use serde::{Deserialize, Serialize};

/// Coarse relocation risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Per-city metrics used by the scenario builder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityMetrics {
    /// Year-one wealth as a multiple of current salary
    pub wealth_multiplier_1: f64,
    /// Year-five wealth as a multiple of current salary
    pub wealth_multiplier_5: f64,
    /// Composite risk (0-1, lower is better)
    pub risk_score: f64,
    /// Quality of life (0-1, higher is better)
    pub quality_score: f64,
    /// Cost of living increase in percent
    pub cost_increase: f64,
    /// Effective tax burden in percent
    pub tax_burden: f64,
    /// Annual hidden bureaucracy and compliance costs
    pub hidden_costs: f64,
    pub risk_level: RiskLevel,
}

impl CityMetrics {
    /// Conservative defaults for cities missing from the table
    pub const FALLBACK: CityMetrics = CityMetrics {
        wealth_multiplier_1: 0.70,
        wealth_multiplier_5: 1.25,
        risk_score: 0.30,
        quality_score: 0.75,
        cost_increase: 10.0,
        tax_burden: 30.0,
        hidden_costs: 8000.0,
        risk_level: RiskLevel::Medium,
    };
}

/// A table row: canonical name, alternate spellings and its metrics
#[derive(Debug, Clone, Copy)]
pub struct CityEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub metrics: CityMetrics,
}

impl CityEntry {
    /// Canonical name followed by aliases, in lookup order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        let aliases: &'static [&'static str] = self.aliases;
        std::iter::once(self.name).chain(aliases.iter().copied())
    }

    /// Whether `key` names this city exactly (case-insensitive)
    pub fn is_named(&self, key: &str) -> bool {
        self.keys().any(|k| k.eq_ignore_ascii_case(key.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_serializes_as_label() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
        assert_eq!(RiskLevel::High.as_str(), "High");
    }

    #[test]
    fn test_keys_start_with_canonical_name() {
        let entry = CityEntry {
            name: "Prague, Czech Republic",
            aliases: &["Prague"],
            metrics: CityMetrics::FALLBACK,
        };
        let keys: Vec<_> = entry.keys().collect();
        assert_eq!(keys, vec!["Prague, Czech Republic", "Prague"]);
        assert!(entry.is_named(" prague "));
        assert!(!entry.is_named("Brno"));
    }
}
