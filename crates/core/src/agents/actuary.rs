//! # The Actuary
//!
//! Scores non-financial life quality: air, healthcare access and safety.
//! Provider data is mocked with fixed readings behind a simulated latency.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{fetch_delay, Agent, AgentContext, LocationMap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: f64,
    pub pm25: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareMetrics {
    pub wait_time_days: f64,
    pub quality_score: f64,
    pub cost_index: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyIndex {
    pub safety_score: f64,
    pub crime_rate: f64,
    pub political_stability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeQualityReport {
    pub air_quality_index: f64,
    pub healthcare_wait_time: f64,
    pub safety_index: f64,
    /// 0-1, lower is better
    pub composite_risk_score: f64,
    pub health_impact: String,
    pub lifestyle_impact: String,
}

pub struct ActuaryAgent {
    latency: Duration,
}

impl Default for ActuaryAgent {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl ActuaryAgent {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn air_quality(&self, _location: &str) -> AirQuality {
        fetch_delay(self.latency).await;
        AirQuality {
            aqi: 45.0,
            pm25: 12.0,
            status: "good".to_string(),
        }
    }

    async fn healthcare(&self, _location: &str) -> HealthcareMetrics {
        fetch_delay(self.latency).await;
        HealthcareMetrics {
            wait_time_days: 5.0,
            quality_score: 0.85,
            cost_index: 1.2,
        }
    }

    async fn safety(&self, _location: &str) -> SafetyIndex {
        fetch_delay(self.latency).await;
        SafetyIndex {
            safety_score: 0.82,
            crime_rate: 0.03,
            political_stability: 0.9,
        }
    }
}

/// Weighted risk: air 30%, healthcare wait 30%, safety 40%
pub fn composite_risk(air: &AirQuality, health: &HealthcareMetrics, safety: &SafetyIndex) -> f64 {
    let aqi_risk = (air.aqi / 100.0).min(1.0);
    let healthcare_risk = (health.wait_time_days / 30.0).min(1.0);
    let safety_risk = 1.0 - safety.safety_score;
    aqi_risk * 0.3 + healthcare_risk * 0.3 + safety_risk * 0.4
}

pub fn health_impact(aqi: f64) -> &'static str {
    if aqi > 100.0 {
        "High respiratory health risk due to poor air quality"
    } else if aqi > 50.0 {
        "Moderate health impact from air pollution"
    } else {
        "Minimal health risk from environmental factors"
    }
}

pub fn lifestyle_impact(safety_score: f64) -> &'static str {
    if safety_score < 0.6 {
        "Significant lifestyle restrictions due to safety concerns"
    } else if safety_score < 0.8 {
        "Some lifestyle adjustments needed for safety"
    } else {
        "Minimal impact on current lifestyle"
    }
}

#[async_trait]
impl Agent for ActuaryAgent {
    type Report = LifeQualityReport;

    fn id(&self) -> &'static str {
        "actuary"
    }

    async fn analyze(&self, ctx: &AgentContext) -> Result<LocationMap<LifeQualityReport>> {
        let mut results = LocationMap::new();
        for location in &ctx.target_locations {
            let air = self.air_quality(location).await;
            let health = self.healthcare(location).await;
            let safety = self.safety(location).await;

            results.insert(
                location.clone(),
                LifeQualityReport {
                    air_quality_index: air.aqi,
                    healthcare_wait_time: health.wait_time_days,
                    safety_index: safety.safety_score,
                    composite_risk_score: composite_risk(&air, &health, &safety),
                    health_impact: health_impact(air.aqi).to_string(),
                    lifestyle_impact: lifestyle_impact(safety.safety_score).to_string(),
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

    #[tokio::test]
    async fn test_mock_readings() {
        let agent = ActuaryAgent::new(Duration::ZERO);
        let ctx = AgentContext::from_request(&SimulationRequest::new(["Lisbon", "Dubai"], 1.0)).unwrap();
        let report = agent.analyze(&ctx).await.unwrap();

        assert_eq!(report.len(), 2);
        let lisbon = &report["Lisbon"];
        // 0.45 * 0.3 + (5/30) * 0.3 + 0.18 * 0.4
        assert!((lisbon.composite_risk_score - 0.257).abs() < 1e-9);
        assert_eq!(lisbon.health_impact, "Minimal health risk from environmental factors");
        assert_eq!(lisbon.lifestyle_impact, "Minimal impact on current lifestyle");
    }

    #[test]
    fn test_impact_thresholds() {
        assert!(health_impact(120.0).starts_with("High"));
        assert!(health_impact(75.0).starts_with("Moderate"));
        assert!(health_impact(50.0).starts_with("Minimal"));
        assert!(lifestyle_impact(0.5).starts_with("Significant"));
        assert!(lifestyle_impact(0.7).starts_with("Some"));
        assert!(lifestyle_impact(0.8).starts_with("Minimal"));
    }

    #[test]
    fn test_risk_is_capped() {
        let air = AirQuality { aqi: 400.0, pm25: 0.0, status: String::new() };
        let health = HealthcareMetrics { wait_time_days: 90.0, quality_score: 0.0, cost_index: 0.0 };
        let safety = SafetyIndex { safety_score: 0.0, crime_rate: 0.0, political_stability: 0.0 };
        assert!((composite_risk(&air, &health, &safety) - 1.0).abs() < 1e-9);
    }
}
