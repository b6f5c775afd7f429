//! # Simulation Report
//!
//! Per-city scenarios and the summary blocks returned alongside them.

use serde::{Deserialize, Serialize};

use crate::cities::{ResolvedCity, RiskLevel};
use crate::format::thousands;

/// Wealth trajectory for one target city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub location: String,
    pub year_1_wealth: f64,
    pub year_5_wealth: f64,
    pub risk_score: f64,
    pub quality_score: f64,
    pub cost_increase: f64,
    pub tax_burden: f64,
    pub hidden_costs: f64,
    pub risk_level: RiskLevel,
}

impl Scenario {
    /// Scale the city's multipliers by `salary`
    pub fn build(city: &ResolvedCity, salary: f64) -> Self {
        let m = &city.metrics;
        Self {
            location: city.key.clone(),
            year_1_wealth: salary * m.wealth_multiplier_1,
            year_5_wealth: salary * m.wealth_multiplier_5,
            risk_score: m.risk_score,
            quality_score: m.quality_score,
            cost_increase: m.cost_increase,
            tax_burden: m.tax_burden,
            hidden_costs: m.hidden_costs,
            risk_level: m.risk_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRisks {
    pub respiratory: u32,
    pub lifestyle: u32,
    pub healthcare_access: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRisks {
    pub currency_volatility: u32,
    pub tax_changes: u32,
    pub cost_inflation: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialRisks {
    pub language_barrier: u32,
    pub cultural_adaptation: u32,
    pub social_isolation: u32,
}

/// Risk percentages by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub health_risks: HealthRisks,
    pub financial_risks: FinancialRisks,
    pub social_risks: SocialRisks,
}

impl Default for RiskAnalysis {
    fn default() -> Self {
        Self {
            health_risks: HealthRisks {
                respiratory: 15,
                lifestyle: 8,
                healthcare_access: 5,
            },
            financial_risks: FinancialRisks {
                currency_volatility: 12,
                tax_changes: 8,
                cost_inflation: 18,
            },
            social_risks: SocialRisks {
                language_barrier: 25,
                cultural_adaptation: 15,
                social_isolation: 12,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub visa_complexity: String,
    pub tax_treaty_benefits: String,
    pub regulatory_timeline: String,
    pub total_compliance_cost: f64,
}

impl Default for ComplianceSummary {
    fn default() -> Self {
        Self {
            visa_complexity: "Medium".to_string(),
            tax_treaty_benefits: "15% relief on double taxation".to_string(),
            regulatory_timeline: "45-60 days".to_string(),
            total_compliance_cost: 18500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustComponents {
    pub payment_reliability: u32,
    pub financial_stability: u32,
    pub income_verification: u32,
    pub debt_management: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreSummary {
    pub score: f64,
    pub components: TrustComponents,
}

impl Default for TrustScoreSummary {
    fn default() -> Self {
        Self {
            score: 87.3,
            components: TrustComponents {
                payment_reliability: 92,
                financial_stability: 85,
                income_verification: 89,
                debt_management: 83,
            },
        }
    }
}

/// Everything a simulation run returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenarios: Vec<Scenario>,
    pub risk_analysis: RiskAnalysis,
    pub compliance_summary: ComplianceSummary,
    pub recommendations: Vec<String>,
    pub trust_score: TrustScoreSummary,
}

/// Scenario with the highest five-year wealth; earliest wins ties
pub fn best_scenario(scenarios: &[Scenario]) -> Option<&Scenario> {
    scenarios.iter().reduce(|best, current| {
        if current.year_5_wealth > best.year_5_wealth {
            current
        } else {
            best
        }
    })
}

/// Recommendation lines for a non-empty scenario list.
///
/// `primary` is the first target the user listed; its figures fall back to
/// fixed values when the city is not in the table.
pub fn recommendations(scenarios: &[Scenario], primary: &ResolvedCity, salary: f64) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);

    if let Some(best) = best_scenario(scenarios) {
        let growth = (best.year_5_wealth / salary - 1.0) * 100.0;
        lines.push(format!(
            "{} offers the best 5-year wealth trajectory with {:.0}% growth potential",
            best.location, growth
        ));
    }

    let (quality, hidden, tax) = if primary.known {
        (
            primary.metrics.quality_score * 100.0,
            primary.metrics.hidden_costs,
            primary.metrics.tax_burden,
        )
    } else {
        (88.0, 12800.0, 32.0)
    };

    lines.push(format!(
        "{} has a quality of life score of {:.0}%",
        primary.key, quality
    ));
    lines.push(format!(
        "Budget additional ${} annually for hidden bureaucracy and compliance costs",
        thousands(hidden)
    ));
    lines.push(format!(
        "Tax burden in {}: {}% - consider tax treaty benefits",
        primary.key, tax
    ));
    lines.push(
        "Social integration costs will add approximately $3,200/year to maintain lifestyle"
            .to_string(),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CityTable;

    fn scenario(location: &str, year_5_wealth: f64) -> Scenario {
        let mut s = Scenario::build(&CityTable::builtin().resolve(location), 100_000.0);
        s.year_5_wealth = year_5_wealth;
        s
    }

    #[test]
    fn test_scenario_multiplies_salary() {
        let city = CityTable::builtin().resolve("Berlin");
        let s = Scenario::build(&city, 100_000.0);
        assert_eq!(s.location, "Berlin, Germany");
        assert!((s.year_1_wealth - 92_000.0).abs() < 1e-6);
        assert!((s.year_5_wealth - 162_000.0).abs() < 1e-6);
        assert_eq!(s.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_best_scenario_first_wins_ties() {
        let scenarios = vec![scenario("Berlin", 10.0), scenario("Tokyo", 20.0), scenario("Lisbon", 20.0)];
        assert_eq!(best_scenario(&scenarios).unwrap().location, "Tokyo, Japan");
        assert!(best_scenario(&[]).is_none());
    }

    #[test]
    fn test_recommendations_for_known_primary() {
        let table = CityTable::builtin();
        let primary = table.resolve("Berlin");
        let scenarios = vec![Scenario::build(&primary, 100_000.0)];
        let lines = recommendations(&scenarios, &primary, 100_000.0);

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "Berlin, Germany offers the best 5-year wealth trajectory with 62% growth potential"
        );
        assert_eq!(lines[1], "Berlin, Germany has a quality of life score of 91%");
        assert_eq!(
            lines[2],
            "Budget additional $9,600 annually for hidden bureaucracy and compliance costs"
        );
        assert_eq!(
            lines[3],
            "Tax burden in Berlin, Germany: 38.2% - consider tax treaty benefits"
        );
    }

    #[test]
    fn test_recommendations_for_unknown_primary() {
        let primary = CityTable::builtin().resolve("Atlantis");
        let scenarios = vec![Scenario::build(&primary, 50_000.0)];
        let lines = recommendations(&scenarios, &primary, 50_000.0);

        assert_eq!(lines[0], "Atlantis offers the best 5-year wealth trajectory with 25% growth potential");
        assert_eq!(lines[1], "Atlantis has a quality of life score of 88%");
        assert!(lines[2].contains("$12,800"));
        assert_eq!(lines[3], "Tax burden in Atlantis: 32% - consider tax treaty benefits");
    }

    #[test]
    fn test_summary_defaults() {
        assert_eq!(RiskAnalysis::default().social_risks.language_barrier, 25);
        assert_eq!(ComplianceSummary::default().total_compliance_cost, 18500.0);
        assert_eq!(TrustScoreSummary::default().score, 87.3);
    }
}
