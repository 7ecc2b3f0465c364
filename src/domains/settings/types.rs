use crate::errors::{DomainResult, ServiceError, ServiceResult, ValidationError};
use crate::validation::{NestedValidator, Validate, ValidationBuilder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gap thresholds (months) for the coarse child-level risk classification.
/// A gap at or below `high_gap_months` is High, at or below `moderate_gap_months` Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high_gap_months: f64,
    pub moderate_gap_months: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_gap_months: -6.0,
            moderate_gap_months: -3.0,
        }
    }
}

/// Gap bands (months) used to classify a single domain's delay status.
///
/// - `gap >= advanced_min_gap` is advanced
/// - `gap >= on_track_min_gap` is on track
/// - `gap > mild_floor_gap` is a mild delay
/// - `gap > moderate_floor_gap` is a moderate delay
/// - anything lower is severe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayStatusBands {
    pub advanced_min_gap: f64,
    pub on_track_min_gap: f64,
    pub mild_floor_gap: f64,
    pub moderate_floor_gap: f64,
}

impl Default for DelayStatusBands {
    fn default() -> Self {
        Self {
            advanced_min_gap: 2.0,
            on_track_min_gap: -1.0,
            mild_floor_gap: -6.0,
            moderate_floor_gap: -12.0,
        }
    }
}

/// Checkpoint deltas for the three-point projection timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionCurve {
    pub midpoint_months: f64,
    pub midpoint_dq_gain: f64,
    pub midpoint_dq_loss: f64,
    pub midpoint_readiness_gain: f64,
    pub midpoint_readiness_loss: f64,
    pub horizon_readiness_loss: f64,
    pub readiness_floor: f64,
}

impl Default for ProjectionCurve {
    fn default() -> Self {
        Self {
            midpoint_months: 3.0,
            midpoint_dq_gain: 12.0,
            midpoint_dq_loss: 27.0,
            midpoint_readiness_gain: 8.0,
            midpoint_readiness_loss: 15.0,
            horizon_readiness_loss: 30.0,
            readiness_floor: 40.0,
        }
    }
}

/// Shape of the with/without programme comparison curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryCurve {
    pub start_age_months: u32,
    pub end_age_months: u32,
    pub step_months: u32,
    pub with_programme_base: f64,
    pub with_programme_gain: f64,
    pub natural_base: f64,
    pub natural_lag: f64,
}

impl Default for TrajectoryCurve {
    fn default() -> Self {
        Self {
            start_age_months: 24,
            end_age_months: 72,
            step_months: 3,
            with_programme_base: 0.95,
            with_programme_gain: 0.15,
            natural_base: 0.75,
            natural_lag: 0.08,
        }
    }
}

/// At-risk percentage bands for villages on the map view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VillageRiskBands {
    pub low_below_percent: f64,
    pub medium_below_percent: f64,
}

impl Default for VillageRiskBands {
    fn default() -> Self {
        Self {
            low_below_percent: 10.0,
            medium_below_percent: 20.0,
        }
    }
}

/// Every product constant used by the metrics, projection and export code.
///
/// The growth target and degradation points are programme assumptions, not
/// statistics fitted to data; hosts can override them at initialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// DQ points added to the current DQ to form the intervention target
    pub dq_growth_target: f64,
    pub projection_horizon_months: f64,
    /// DQ points lost over the horizon without intervention, scaled by developmental age / 100
    pub degradation_points: f64,
    pub school_readiness_target: f64,
    /// Readiness points gained per month of overall required growth
    pub readiness_growth_factor: f64,
    pub risk_thresholds: RiskThresholds,
    pub status_bands: DelayStatusBands,
    pub projection_curve: ProjectionCurve,
    pub trajectory: TrajectoryCurve,
    pub village_risk: VillageRiskBands,
    /// Referral journey needs strictly more delays than this
    pub referral_min_delay_count: u32,
    /// Below this readiness score the neuro-developmental report recommends the specialist track
    pub specialist_readiness_threshold: f64,
    pub report_validity_days: i64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            dq_growth_target: 25.0,
            projection_horizon_months: 6.0,
            degradation_points: 55.0,
            school_readiness_target: 85.0,
            readiness_growth_factor: 0.8,
            risk_thresholds: RiskThresholds::default(),
            status_bands: DelayStatusBands::default(),
            projection_curve: ProjectionCurve::default(),
            trajectory: TrajectoryCurve::default(),
            village_risk: VillageRiskBands::default(),
            referral_min_delay_count: 3,
            specialist_readiness_threshold: 70.0,
            report_validity_days: 90,
        }
    }
}

const ENV_GROWTH_TARGET: &str = "CARENGROW_DQ_GROWTH_TARGET";
const ENV_HORIZON: &str = "CARENGROW_PROJECTION_HORIZON_MONTHS";
const ENV_DEGRADATION: &str = "CARENGROW_DEGRADATION_POINTS";
const ENV_READINESS_TARGET: &str = "CARENGROW_SCHOOL_READINESS_TARGET";
const ENV_RISK_HIGH: &str = "CARENGROW_RISK_HIGH_GAP_MONTHS";
const ENV_RISK_MODERATE: &str = "CARENGROW_RISK_MODERATE_GAP_MONTHS";
const ENV_VALIDITY_DAYS: &str = "CARENGROW_REPORT_VALIDITY_DAYS";

impl MetricsConfig {
    /// Defaults overridden by `CARENGROW_*` environment variables (a `.env` file is honoured)
    pub fn from_env() -> ServiceResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unknown keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_override(&lookup, ENV_GROWTH_TARGET)? {
            config.dq_growth_target = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_HORIZON)? {
            config.projection_horizon_months = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_DEGRADATION)? {
            config.degradation_points = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_READINESS_TARGET)? {
            config.school_readiness_target = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_RISK_HIGH)? {
            config.risk_thresholds.high_gap_months = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_RISK_MODERATE)? {
            config.risk_thresholds.moderate_gap_months = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_VALIDITY_DAYS)? {
            config.report_validity_days = v;
        }

        config
            .validate()
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;
        log::debug!("Metrics configuration loaded: {:?}", config);
        Ok(config)
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> ServiceResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ServiceError::Configuration(format!("{} has an unparseable value '{}'", key, raw))),
    }
}

impl Validate for MetricsConfig {
    fn validate(&self) -> DomainResult<()> {
        let mut nested = NestedValidator::new();

        nested.check(
            ValidationBuilder::new("dq_growth_target", Some(self.dq_growth_target))
                .positive()
                .validate(),
        )?;
        nested.check(
            ValidationBuilder::new("projection_horizon_months", Some(self.projection_horizon_months))
                .positive()
                .validate(),
        )?;
        nested.check(
            ValidationBuilder::new("degradation_points", Some(self.degradation_points))
                .finite()
                .range(0.0, 100.0)
                .validate(),
        )?;
        nested.check(
            ValidationBuilder::new("school_readiness_target", Some(self.school_readiness_target))
                .range(0.0, 100.0)
                .validate(),
        )?;
        nested.check(
            ValidationBuilder::new("readiness_growth_factor", Some(self.readiness_growth_factor))
                .finite()
                .min(0.0)
                .validate(),
        )?;
        nested.check(
            ValidationBuilder::new("report_validity_days", Some(self.report_validity_days))
                .min(1)
                .validate(),
        )?;

        if self.risk_thresholds.high_gap_months > self.risk_thresholds.moderate_gap_months {
            nested.add_error(ValidationError::invalid_value(
                "risk_thresholds",
                "high_gap_months must not exceed moderate_gap_months",
            ));
        }

        let b = &self.status_bands;
        if !(b.advanced_min_gap > b.on_track_min_gap
            && b.on_track_min_gap > b.mild_floor_gap
            && b.mild_floor_gap > b.moderate_floor_gap)
        {
            nested.add_error(ValidationError::invalid_value(
                "status_bands",
                "bands must be strictly decreasing from advanced to moderate",
            ));
        }

        let c = &self.projection_curve;
        if c.midpoint_months <= 0.0 || c.midpoint_months >= self.projection_horizon_months {
            nested.add_error(ValidationError::range(
                "projection_curve.midpoint_months",
                0.0,
                self.projection_horizon_months,
            ));
        }

        let t = &self.trajectory;
        if t.step_months == 0 || t.start_age_months > t.end_age_months {
            nested.add_error(ValidationError::invalid_value(
                "trajectory",
                "step must be positive and start must not be after end",
            ));
        }

        let v = &self.village_risk;
        if v.low_below_percent > v.medium_below_percent {
            nested.add_error(ValidationError::invalid_value(
                "village_risk",
                "low band must not exceed medium band",
            ));
        }

        nested.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DomainError, ValidationError};
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = MetricsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dq_growth_target, 25.0);
        assert_eq!(config.degradation_points, 55.0);
        assert_eq!(config.school_readiness_target, 85.0);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_GROWTH_TARGET, "20"),
            (ENV_VALIDITY_DAYS, " 30 "),
        ]
        .into_iter()
        .collect();

        let config = MetricsConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.dq_growth_target, 20.0);
        assert_eq!(config.report_validity_days, 30);
        assert_eq!(config.projection_horizon_months, 6.0);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = MetricsConfig::from_lookup(|k| {
            (k == ENV_HORIZON).then(|| "six".to_string())
        });
        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn test_from_lookup_rejects_invalid_values() {
        let result = MetricsConfig::from_lookup(|k| {
            (k == ENV_GROWTH_TARGET).then(|| "0".to_string())
        });
        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn test_unordered_thresholds_fail_validation() {
        let mut config = MetricsConfig::default();
        config.risk_thresholds.high_gap_months = -1.0;
        match config.validate() {
            Err(DomainError::Validation(ValidationError::InvalidValue { field, .. })) => {
                assert_eq!(field, "risk_thresholds")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: MetricsConfig = serde_json::from_str(r#"{"dq_growth_target": 30}"#).unwrap();
        assert_eq!(config.dq_growth_target, 30.0);
        assert_eq!(config.risk_thresholds, RiskThresholds::default());
    }
}
