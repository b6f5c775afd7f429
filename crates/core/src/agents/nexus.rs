//! # The Nexus
//!
//! Tax and compliance view of a move: double taxation treaty relief, the
//! regulatory checklist for the target city, first-year compliance costs and
//! a portable trust score a landlord could verify.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use super::{fetch_delay, Agent, AgentContext, FinancialData, LocationMap};

const ORIGIN_TAX_RATE: f64 = 0.25;
const TARGET_TAX_RATE: f64 = 0.30;
/// Origin 12% plus target 15%
const SOCIAL_CONTRIBUTION_RATE: f64 = 0.27;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTreaty {
    pub treaty_exists: bool,
    pub relief_percentage: f64,
    pub exempt_categories: Vec<String>,
    pub withholding_rates: BTreeMap<String, f64>,
    pub tie_breaker_rules: String,
    pub treaty_year: u32,
}

impl Default for TaxTreaty {
    fn default() -> Self {
        Self {
            treaty_exists: true,
            relief_percentage: 0.15,
            exempt_categories: vec!["pension".to_string(), "royalties".to_string()],
            withholding_rates: [("dividends", 0.05), ("interest", 0.10), ("royalties", 0.08)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            tie_breaker_rules: "residence_based".to_string(),
            treaty_year: 2023,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAnalysis {
    pub origin_country_tax: f64,
    pub target_country_tax: f64,
    pub treaty_relief: f64,
    pub total_tax_burden: f64,
    /// Percent of salary
    pub effective_tax_rate: f64,
    pub social_security_origin: f64,
    pub social_security_target: f64,
    pub net_after_all_taxes: f64,
}

impl TaxAnalysis {
    pub fn compute(salary: f64, treaty: &TaxTreaty) -> Self {
        let origin = salary * ORIGIN_TAX_RATE;
        let target = salary * TARGET_TAX_RATE;
        let relief = origin.min(target) * treaty.relief_percentage;
        let total = origin + target - relief;
        let effective = if salary > 0.0 { total / salary * 100.0 } else { 0.0 };

        Self {
            origin_country_tax: origin,
            target_country_tax: target,
            treaty_relief: relief,
            total_tax_burden: total,
            effective_tax_rate: effective,
            social_security_origin: salary * 0.12,
            social_security_target: salary * 0.15,
            net_after_all_taxes: salary - total - salary * SOCIAL_CONTRIBUTION_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisaRequirements {
    #[serde(rename = "type")]
    pub kind: String,
    pub processing_time_days: u32,
    pub renewal_frequency_years: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankingRequirements {
    pub minimum_deposit: f64,
    pub documentation_needed: Vec<String>,
    pub processing_time_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRegistration {
    pub required: bool,
    pub deadline_days: u32,
    pub penalties_for_late: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInsurance {
    pub mandatory: bool,
    pub minimum_coverage: f64,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSecurity {
    pub contribution_rate: f64,
    pub employer_contribution: f64,
    pub benefits_eligibility_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryRequirements {
    pub visa_requirements: VisaRequirements,
    pub banking_requirements: BankingRequirements,
    pub tax_registration: TaxRegistration,
    pub health_insurance: HealthInsurance,
    pub social_security: SocialSecurity,
}

impl RegulatoryRequirements {
    pub fn for_salary(salary: f64) -> Self {
        Self {
            visa_requirements: VisaRequirements {
                kind: "work_visa".to_string(),
                processing_time_days: 45,
                renewal_frequency_years: 2,
                cost: 1200.0,
            },
            banking_requirements: BankingRequirements {
                minimum_deposit: 5000.0,
                documentation_needed: vec![
                    "apostilled_bank_statements".to_string(),
                    "employment_contract".to_string(),
                    "tax_returns".to_string(),
                ],
                processing_time_days: 14,
            },
            tax_registration: TaxRegistration {
                required: true,
                deadline_days: 30,
                penalties_for_late: salary * 0.05,
            },
            health_insurance: HealthInsurance {
                mandatory: true,
                minimum_coverage: 50000.0,
                monthly_cost: salary * 0.08 / 12.0,
            },
            social_security: SocialSecurity {
                contribution_rate: 0.15,
                employer_contribution: 0.20,
                benefits_eligibility_years: 5,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWealthProjection {
    pub year_1: f64,
    pub year_3: f64,
    pub year_5: f64,
    /// Percent above a 70%-of-salary baseline
    pub net_wealth_delta: f64,
}

impl NetWealthProjection {
    pub fn compute(tax: &TaxAnalysis, salary: f64) -> Self {
        let net = tax.net_after_all_taxes;
        let baseline = salary * 0.7;
        Self {
            year_1: net,
            year_3: net * 3.0 * 1.05,
            year_5: net * 5.0 * 1.08,
            net_wealth_delta: if baseline > 0.0 {
                (net - baseline) / baseline * 100.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCostBreakdown {
    pub visa_and_permits: f64,
    pub banking_setup: f64,
    pub legal_consultation: f64,
    pub document_translation: f64,
    pub ongoing_compliance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCosts {
    pub initial_setup_costs: f64,
    pub annual_compliance_costs: f64,
    pub total_first_year: f64,
    pub breakdown: ComplianceCostBreakdown,
}

impl ComplianceCosts {
    pub fn compute(reqs: &RegulatoryRequirements) -> Self {
        let breakdown = ComplianceCostBreakdown {
            visa_and_permits: reqs.visa_requirements.cost,
            banking_setup: 500.0,
            legal_consultation: 1200.0,
            document_translation: 400.0,
            ongoing_compliance: reqs.health_insurance.monthly_cost * 12.0
                + reqs.tax_registration.penalties_for_late,
        };
        let initial = breakdown.visa_and_permits
            + breakdown.banking_setup
            + breakdown.legal_consultation
            + breakdown.document_translation;

        Self {
            initial_setup_costs: initial,
            annual_compliance_costs: breakdown.ongoing_compliance,
            total_first_year: initial + breakdown.ongoing_compliance,
            breakdown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustComponents {
    pub payment_reliability: u32,
    pub financial_stability: u32,
    pub income_verification: u32,
    pub debt_management: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortableTrustScore {
    /// 0-100, one decimal
    pub trust_score: f64,
    pub certificate_hash: String,
    pub verification_url: String,
    pub components: TrustComponents,
    pub landlord_summary: String,
    /// ISO date one year from issue
    pub valid_until: String,
}

impl PortableTrustScore {
    pub fn generate(data: Option<&FinancialData>, salary: f64) -> Self {
        let base = match data {
            // Salary alone contributes at most 60%
            None => (salary / 100_000.0).min(1.0) * 0.6,
            Some(data) => {
                let payment = data.payment_history_score.unwrap_or(0.8);
                let account_age = data.account_age_years.unwrap_or(2.0) / 10.0;
                let debt = 1.0 - data.debt_to_income_ratio.unwrap_or(0.3);
                payment * 0.4 + account_age * 0.3 + debt * 0.3
            }
        };
        let score = (base * 1000.0).round() / 10.0;
        let hash = certificate_hash(data, salary);

        Self {
            trust_score: score,
            verification_url: format!("https://sovereignsim.ai/verify/{}", hash),
            certificate_hash: hash,
            components: TrustComponents {
                payment_reliability: 85,
                financial_stability: 78,
                income_verification: 92,
                debt_management: 88,
            },
            landlord_summary: format!(
                "Verified financial profile with {}% reliability score",
                score
            ),
            valid_until: (Utc::now() + ChronoDuration::days(365))
                .format("%Y-%m-%d")
                .to_string(),
        }
    }
}

/// 12 hex chars derived from the inputs; identical inputs give identical hashes
fn certificate_hash(data: Option<&FinancialData>, salary: f64) -> String {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    serde_json::to_string(&data)
        .unwrap_or_default()
        .hash(&mut hasher);
    salary.to_bits().hash(&mut hasher);
    format!("{:012x}", hasher.finish() & 0xffff_ffff_ffff)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub tax_analysis: TaxAnalysis,
    pub regulatory_requirements: RegulatoryRequirements,
    pub net_wealth_projection: NetWealthProjection,
    pub compliance_costs: ComplianceCosts,
    pub portable_trust_score: PortableTrustScore,
    pub double_taxation_relief: f64,
}

pub struct NexusAgent {
    latency: Duration,
}

impl Default for NexusAgent {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl NexusAgent {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn tax_treaty(&self, _origin: &str, _target: &str) -> TaxTreaty {
        fetch_delay(self.latency).await;
        TaxTreaty::default()
    }

    async fn tax_obligations(&self, salary: f64, treaty: &TaxTreaty) -> TaxAnalysis {
        fetch_delay(self.latency).await;
        TaxAnalysis::compute(salary, treaty)
    }

    async fn regulatory_requirements(&self, _location: &str, salary: f64) -> RegulatoryRequirements {
        fetch_delay(self.latency).await;
        RegulatoryRequirements::for_salary(salary)
    }
}

#[async_trait]
impl Agent for NexusAgent {
    type Report = ComplianceReport;

    fn id(&self) -> &'static str {
        "nexus"
    }

    async fn analyze(&self, ctx: &AgentContext) -> Result<LocationMap<ComplianceReport>> {
        let mut results = LocationMap::new();
        for location in &ctx.target_locations {
            let treaty = self.tax_treaty(&ctx.current_location, location).await;
            let tax = self.tax_obligations(ctx.salary, &treaty).await;
            let reqs = self.regulatory_requirements(location, ctx.salary).await;

            results.insert(
                location.clone(),
                ComplianceReport {
                    net_wealth_projection: NetWealthProjection::compute(&tax, ctx.salary),
                    compliance_costs: ComplianceCosts::compute(&reqs),
                    portable_trust_score: PortableTrustScore::generate(
                        ctx.financial_data.as_ref(),
                        ctx.salary,
                    ),
                    double_taxation_relief: treaty.relief_percentage,
                    tax_analysis: tax,
                    regulatory_requirements: reqs,
                },
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationRequest;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_tax_analysis() {
        let tax = TaxAnalysis::compute(100_000.0, &TaxTreaty::default());
        assert!(close(tax.treaty_relief, 3750.0));
        assert!(close(tax.total_tax_burden, 51_250.0));
        assert!(close(tax.effective_tax_rate, 51.25));
        assert!(close(tax.net_after_all_taxes, 21_750.0));
    }

    #[test]
    fn test_compliance_costs() {
        let costs = ComplianceCosts::compute(&RegulatoryRequirements::for_salary(120_000.0));
        assert!(close(costs.initial_setup_costs, 3300.0));
        // insurance 9600 + late penalty 6000
        assert!(close(costs.annual_compliance_costs, 15_600.0));
        assert!(close(costs.total_first_year, 18_900.0));
    }

    #[test]
    fn test_trust_score_from_salary() {
        let score = PortableTrustScore::generate(None, 50_000.0);
        assert!(close(score.trust_score, 30.0));
        assert_eq!(score.certificate_hash.len(), 12);
        assert!(score.verification_url.ends_with(&score.certificate_hash));
        assert_eq!(score.landlord_summary, "Verified financial profile with 30% reliability score");
    }

    #[test]
    fn test_trust_score_from_history() {
        let data = FinancialData {
            payment_history_score: Some(0.9),
            account_age_years: Some(5.0),
            ..Default::default()
        };
        let score = PortableTrustScore::generate(Some(&data), 80_000.0);
        // 0.36 + 0.15 + 0.21
        assert!(close(score.trust_score, 72.0));
        let again = PortableTrustScore::generate(Some(&data), 80_000.0);
        assert_eq!(score.certificate_hash, again.certificate_hash);
    }

    #[tokio::test]
    async fn test_analyze_per_location() {
        let ctx = AgentContext::from_request(&SimulationRequest::new(["Dubai", "Lisbon"], 100_000.0)).unwrap();
        let report = NexusAgent::new(Duration::ZERO).analyze(&ctx).await.unwrap();

        assert_eq!(report.len(), 2);
        let dubai = &report["Dubai"];
        assert!(close(dubai.double_taxation_relief, 0.15));
        assert!(close(dubai.net_wealth_projection.year_5, 21_750.0 * 5.0 * 1.08));
        assert_eq!(dubai.regulatory_requirements.visa_requirements.kind, "work_visa");
    }
}
