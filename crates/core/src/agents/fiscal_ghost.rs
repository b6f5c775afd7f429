//! # Fiscal Ghost
//!
//! Replays the user's monthly spending in each target city's local prices and
//! adds the one-off bureaucracy costs of moving there.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::{fetch_delay, Agent, AgentContext, FinancialData, LocationMap};

/// Monthly spend per category
pub type SpendingProfile = BTreeMap<String, f64>;

/// Profile used when no bank data is supplied
pub fn default_spending_profile() -> SpendingProfile {
    [
        ("housing", 1200.0),
        ("food_dining", 400.0),
        ("transportation", 200.0),
        ("entertainment", 300.0),
        ("healthcare", 150.0),
        ("shopping", 250.0),
        ("utilities", 100.0),
        ("coffee", 80.0),
        ("gym", 50.0),
        ("subscriptions", 75.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Local price indices relative to the user's current city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalPrices {
    pub housing_index: f64,
    pub food_index: f64,
    pub transportation_index: f64,
    pub entertainment_index: f64,
    pub healthcare_index: f64,
    pub coffee_price: f64,
    pub gym_membership: f64,
    pub utilities_index: f64,
}

impl Default for LocalPrices {
    fn default() -> Self {
        Self {
            housing_index: 1.2,
            food_index: 0.9,
            transportation_index: 1.1,
            entertainment_index: 1.0,
            healthcare_index: 0.8,
            coffee_price: 4.50,
            gym_membership: 60.0,
            utilities_index: 1.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenCosts {
    pub visa_fees: f64,
    pub apostille_costs: f64,
    pub translation_fees: f64,
    /// 2% of salary
    pub health_insurance_surcharge: f64,
    /// 15% of salary
    pub social_security_contributions: f64,
    pub banking_setup: f64,
    pub legal_consultation: f64,
}

impl HiddenCosts {
    pub fn for_salary(salary: f64) -> Self {
        Self {
            visa_fees: 500.0,
            apostille_costs: 200.0,
            translation_fees: 300.0,
            health_insurance_surcharge: salary * 0.02,
            social_security_contributions: salary * 0.15,
            banking_setup: 150.0,
            legal_consultation: 800.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.visa_fees
            + self.apostille_costs
            + self.translation_fees
            + self.health_insurance_surcharge
            + self.social_security_contributions
            + self.banking_setup
            + self.legal_consultation
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialCosts {
    pub craft_beers_monthly: f64,
    pub tennis_court_monthly: f64,
    pub monthly_flight_home: f64,
    pub social_dining: f64,
}

/// Cost of keeping up the current social life abroad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifestyleCost {
    pub monthly_social_cost: f64,
    pub breakdown: SocialCosts,
    pub social_friction_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub monthly_expenses: BTreeMap<String, f64>,
    pub hidden_costs: HiddenCosts,
    /// Percent change of the monthly total
    pub total_cost_increase: f64,
    pub purchasing_power: f64,
    pub lifestyle_maintenance_cost: LifestyleCost,
}

impl ExpenseReport {
    pub fn monthly_total(&self) -> f64 {
        self.monthly_expenses.values().sum()
    }
}

pub struct FiscalGhostAgent {
    latency: Duration,
}

impl Default for FiscalGhostAgent {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl FiscalGhostAgent {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn local_prices(&self, _location: &str) -> LocalPrices {
        fetch_delay(self.latency).await;
        LocalPrices::default()
    }

    async fn exchange_rate(&self, _from: &str, _to: &str) -> f64 {
        fetch_delay(self.latency).await;
        1.0
    }
}

fn spending_profile(data: Option<&FinancialData>) -> SpendingProfile {
    match data {
        Some(data) => data.spending_categories.clone(),
        None => default_spending_profile(),
    }
}

/// Project each category at local prices, converted by `exchange_rate`
pub fn replay_expenses(
    profile: &SpendingProfile,
    prices: &LocalPrices,
    exchange_rate: f64,
) -> BTreeMap<String, f64> {
    let spent = |category: &str| profile.get(category).copied().unwrap_or(0.0);

    let projected = [
        ("housing", spent("housing") * prices.housing_index),
        ("food_dining", spent("food_dining") * prices.food_index),
        ("transportation", spent("transportation") * prices.transportation_index),
        ("entertainment", spent("entertainment") * prices.entertainment_index),
        ("healthcare", spent("healthcare") * prices.healthcare_index),
        // Same number of cups at the local price
        ("coffee", spent("coffee") / 3.50 * prices.coffee_price),
        ("gym", prices.gym_membership),
    ];

    projected
        .into_iter()
        .map(|(k, v)| (k.to_string(), v * exchange_rate))
        .collect()
}

/// Percent change between the current and projected monthly totals
pub fn cost_delta(projected: &BTreeMap<String, f64>, current: &SpendingProfile) -> f64 {
    let projected_total: f64 = projected.values().sum();
    let current_total: f64 = current.values().sum();
    if current_total == 0.0 {
        return 0.0;
    }
    (projected_total - current_total) / current_total * 100.0
}

pub fn purchasing_power(salary: f64, expenses: &BTreeMap<String, f64>, exchange_rate: f64) -> f64 {
    if salary <= 0.0 {
        return 0.0;
    }
    let total: f64 = expenses.values().sum();
    (salary * exchange_rate - total) / salary
}

pub fn lifestyle_cost(profile: &SpendingProfile, prices: &LocalPrices) -> LifestyleCost {
    let breakdown = SocialCosts {
        // three beers a week
        craft_beers_monthly: 3.0 * 4.0 * 8.50 * prices.entertainment_index,
        // weekly court booking
        tennis_court_monthly: 4.0 * 25.0 * prices.entertainment_index,
        monthly_flight_home: 400.0,
        social_dining: profile.get("food_dining").copied().unwrap_or(0.0) * 0.6,
    };
    LifestyleCost {
        monthly_social_cost: breakdown.craft_beers_monthly
            + breakdown.tennis_court_monthly
            + breakdown.monthly_flight_home
            + breakdown.social_dining,
        breakdown,
        social_friction_factor: 1.2,
    }
}

#[async_trait]
impl Agent for FiscalGhostAgent {
    type Report = ExpenseReport;

    fn id(&self) -> &'static str {
        "fiscal_ghost"
    }

    async fn analyze(&self, ctx: &AgentContext) -> Result<LocationMap<ExpenseReport>> {
        let profile = spending_profile(ctx.financial_data.as_ref());
        let mut results = LocationMap::new();

        for location in &ctx.target_locations {
            let prices = self.local_prices(location).await;
            let rate = self.exchange_rate(&ctx.currency, location).await;
            let projected = replay_expenses(&profile, &prices, rate);

            results.insert(
                location.clone(),
                ExpenseReport {
                    hidden_costs: HiddenCosts::for_salary(ctx.salary),
                    total_cost_increase: cost_delta(&projected, &profile),
                    purchasing_power: purchasing_power(ctx.salary, &projected, rate),
                    lifestyle_maintenance_cost: lifestyle_cost(&profile, &prices),
                    monthly_expenses: projected,
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
    fn test_replay_default_profile() {
        let projected = replay_expenses(&default_spending_profile(), &LocalPrices::default(), 1.0);
        assert!(close(projected["housing"], 1440.0));
        assert!(close(projected["food_dining"], 360.0));
        assert!(close(projected["coffee"], 80.0 / 3.5 * 4.5));
        assert!(close(projected["gym"], 60.0));
        assert!(!projected.contains_key("shopping"));
    }

    #[test]
    fn test_cost_delta_handles_empty_profile() {
        let projected = replay_expenses(&SpendingProfile::new(), &LocalPrices::default(), 1.0);
        assert_eq!(cost_delta(&projected, &SpendingProfile::new()), 0.0);
    }

    #[test]
    fn test_purchasing_power_zero_salary() {
        assert_eq!(purchasing_power(0.0, &BTreeMap::new(), 1.0), 0.0);
    }

    #[test]
    fn test_lifestyle_cost() {
        let cost = lifestyle_cost(&default_spending_profile(), &LocalPrices::default());
        // 102 beers + 100 tennis + 400 flight + 240 dining
        assert!(close(cost.monthly_social_cost, 842.0));
        assert!(close(cost.social_friction_factor, 1.2));
    }

    #[tokio::test]
    async fn test_analyze_uses_supplied_spending() {
        let mut data = FinancialData::default();
        data.spending_categories.insert("housing".to_string(), 1000.0);
        let ctx = AgentContext::from_request(&SimulationRequest::new(["Berlin"], 60_000.0))
            .unwrap()
            .with_financial_data(data);

        let report = FiscalGhostAgent::new(Duration::ZERO).analyze(&ctx).await.unwrap();
        let berlin = &report["Berlin"];
        assert!(close(berlin.monthly_expenses["housing"], 1200.0));
        assert!(close(berlin.hidden_costs.social_security_contributions, 9000.0));
        assert!(close(berlin.hidden_costs.total(), 500.0 + 200.0 + 300.0 + 1200.0 + 9000.0 + 150.0 + 800.0));
    }
}
