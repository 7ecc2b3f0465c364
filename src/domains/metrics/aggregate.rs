use crate::domains::child::types::DevelopmentalAge;
use crate::domains::settings::RiskThresholds;
use crate::errors::{DomainError, DomainResult};
use crate::types::{round_half_up, round_one_decimal, round_to_i64};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse child-level risk from the overall gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRisk {
    Low,
    Moderate,
    High,
}

impl OverallRisk {
    pub fn from_gap(gap_months: f64, thresholds: &RiskThresholds) -> Self {
        if gap_months <= thresholds.high_gap_months {
            OverallRisk::High
        } else if gap_months <= thresholds.moderate_gap_months {
            OverallRisk::Moderate
        } else {
            OverallRisk::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallRisk::Low => "Low",
            OverallRisk::Moderate => "Moderate",
            OverallRisk::High => "High",
        }
    }
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedStats {
    pub chronological_age_months: f64,
    /// Rounded mean of the per-domain developmental ages
    pub overall_developmental_age: f64,
    pub overall_gap: f64,
    /// Mean of the per-domain gaps before any rounding
    pub mean_gap: f64,
    pub overall_development_percentage: i64,
    pub areas_of_concern: usize,
    pub areas_on_track: usize,
    /// Domains more than three months away from their chronological age
    pub areas_beyond_three_months: usize,
    pub average_absolute_gap: i64,
    pub total_interventions: usize,
    pub risk_level: OverallRisk,
}

/// Consolidated statistics for one child.
///
/// Pure over its inputs: repeated calls with the same slice give identical output.
pub fn consolidated_stats(
    chronological_age_months: f64,
    ages: &[DevelopmentalAge],
    total_interventions: usize,
    thresholds: &RiskThresholds,
) -> DomainResult<ConsolidatedStats> {
    if !chronological_age_months.is_finite() || chronological_age_months <= 0.0 {
        return Err(DomainError::degenerate_age("chronological_age_months", chronological_age_months));
    }
    if ages.is_empty() {
        return Err(DomainError::empty_input("developmental ages"));
    }

    let n = ages.len() as f64;
    let overall_developmental_age = round_half_up(ages.iter().map(|a| a.developmental_age_months).sum::<f64>() / n);
    let overall_gap = overall_developmental_age - chronological_age_months;
    let mean_gap = round_one_decimal(ages.iter().map(|a| a.gap_months).sum::<f64>() / n);
    let average_absolute_gap = round_to_i64(ages.iter().map(|a| a.gap_months.abs()).sum::<f64>() / n);

    let stats = ConsolidatedStats {
        chronological_age_months,
        overall_developmental_age,
        overall_gap,
        mean_gap,
        overall_development_percentage: round_to_i64(overall_developmental_age / chronological_age_months * 100.0),
        areas_of_concern: ages.iter().filter(|a| a.status.is_concern()).count(),
        areas_on_track: ages.iter().filter(|a| a.status.is_on_track()).count(),
        areas_beyond_three_months: ages.iter().filter(|a| a.gap_months.abs() > 3.0).count(),
        average_absolute_gap,
        total_interventions,
        risk_level: OverallRisk::from_gap(overall_gap, thresholds),
    };
    log::debug!(
        "Consolidated stats: overall age {} gap {} risk {}",
        stats.overall_developmental_age,
        stats.overall_gap,
        stats.risk_level
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;
    use crate::domains::child::types::{DelayStatus, ReadinessImpact};
    use crate::types::DevelopmentalDomain;

    #[test]
    fn test_fixture_consolidated_stats() {
        let stats = consolidated_stats(36.0, &fixtures::developmental_ages(), 2, &RiskThresholds::default()).unwrap();
        assert_eq!(stats.overall_developmental_age, 31.0);
        assert_eq!(stats.overall_gap, -5.0);
        assert_eq!(stats.mean_gap, -4.8);
        assert_eq!(stats.overall_development_percentage, 86);
        assert_eq!(stats.areas_of_concern, 2);
        assert_eq!(stats.areas_on_track, 1);
        assert_eq!(stats.areas_beyond_three_months, 2);
        assert_eq!(stats.average_absolute_gap, 5);
        assert_eq!(stats.total_interventions, 2);
        assert_eq!(stats.risk_level, OverallRisk::Moderate);
    }

    #[test]
    fn test_mean_gap_example_is_moderate() {
        let thresholds = RiskThresholds::default();
        assert_eq!(OverallRisk::from_gap(-4.8, &thresholds), OverallRisk::Moderate);
        assert_eq!(OverallRisk::from_gap(-6.0, &thresholds), OverallRisk::High);
        assert_eq!(OverallRisk::from_gap(-3.0, &thresholds), OverallRisk::Moderate);
        assert_eq!(OverallRisk::from_gap(-2.9, &thresholds), OverallRisk::Low);
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let ages = fixtures::developmental_ages();
        let thresholds = RiskThresholds::default();
        let first = consolidated_stats(36.0, &ages, 2, &thresholds).unwrap();
        let second = consolidated_stats(36.0, &ages, 2, &thresholds).unwrap();
        assert_eq!(first, second);
        assert_eq!(ages, fixtures::developmental_ages());
    }

    #[test]
    fn test_empty_and_degenerate_inputs() {
        let thresholds = RiskThresholds::default();
        assert!(matches!(
            consolidated_stats(36.0, &[], 0, &thresholds),
            Err(DomainError::EmptyInput(_))
        ));
        assert!(matches!(
            consolidated_stats(0.0, &fixtures::developmental_ages(), 0, &thresholds),
            Err(DomainError::DegenerateAge { .. })
        ));
    }

    #[test]
    fn test_high_risk_when_far_behind() {
        let ages: Vec<DevelopmentalAge> = DevelopmentalDomain::ALL
            .iter()
            .map(|d| DevelopmentalAge::with_status(*d, 48.0, 38.0, DelayStatus::ModerateDelay, ReadinessImpact::High))
            .collect();
        let stats = consolidated_stats(48.0, &ages, 0, &RiskThresholds::default()).unwrap();
        assert_eq!(stats.overall_gap, -10.0);
        assert_eq!(stats.areas_of_concern, 5);
        assert_eq!(stats.risk_level, OverallRisk::High);
    }
}
