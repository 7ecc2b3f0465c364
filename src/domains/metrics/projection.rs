use crate::domains::child::types::{DelayStatus, DevelopmentalAge, ReadinessImpact};
use crate::domains::metrics::dq::dq_ratio;
use crate::domains::settings::MetricsConfig;
use crate::domains::touchpoint::catalog::InterventionCatalog;
use crate::domains::touchpoint::types::TouchpointIntervention;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::format::format_age_display;
use crate::types::{round_half_up, round_to_i64, DevelopmentalDomain};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn for_status(status: DelayStatus) -> Self {
        match status {
            DelayStatus::SevereDelay => Priority::High,
            DelayStatus::ModerateDelay => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedTouchpoint {
    #[serde(flatten)]
    pub intervention: TouchpointIntervention,
    pub required_sessions: u64,
    pub priority: Priority,
}

/// Six-month intervention target for one domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainTarget {
    pub domain: DevelopmentalDomain,
    pub current_dq: i64,
    pub target_dq: i64,
    pub current_developmental_age: f64,
    pub required_developmental_age: f64,
    pub required_growth: f64,
    pub projected_with_intervention: f64,
    pub projected_without_intervention: f64,
    pub risk_of_loss: f64,
    pub status: DelayStatus,
    pub school_readiness_impact: ReadinessImpact,
    /// Highest expected impact first
    pub recommended_touchpoints: Vec<RecommendedTouchpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallTargets {
    pub current_dq: i64,
    pub target_dq: i64,
    pub required_growth: f64,
    pub current_school_readiness: f64,
    pub target_school_readiness: f64,
    pub projected_school_readiness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionTargets {
    pub domain_targets: Vec<DomainTarget>,
    pub overall: OverallTargets,
}

/// Sessions of one intervention needed to cover `required_growth` months
pub fn required_sessions(required_growth: f64, expected_dq_impact: f64) -> DomainResult<u64> {
    if !expected_dq_impact.is_finite() || expected_dq_impact <= 0.0 {
        return Err(DomainError::Validation(ValidationError::invalid_value(
            "expected_dq_impact",
            "must be a positive number",
        )));
    }
    let sessions = (required_growth.max(0.0) / (expected_dq_impact * 100.0)).ceil();
    if !sessions.is_finite() || sessions >= u64::MAX as f64 {
        return Err(DomainError::Validation(ValidationError::invalid_value(
            "required_growth",
            &format!("needs more sessions than can be counted ({})", sessions),
        )));
    }
    Ok(sessions as u64)
}

/// Projects one domain over the configured horizon.
///
/// Target DQ adds the growth target to the unrounded current DQ. Without
/// intervention the child loses `degradation_points` DQ scaled by
/// developmental age / 100.
pub fn domain_target(
    age: &DevelopmentalAge,
    catalog: &InterventionCatalog,
    config: &MetricsConfig,
) -> DomainResult<DomainTarget> {
    let current_dev = age.developmental_age_months;
    let current_raw = dq_ratio(current_dev, age.chronological_age_months)?;
    let target_raw = current_raw + config.dq_growth_target;
    let future_chronological_age = age.chronological_age_months + config.projection_horizon_months;

    let required_developmental_age = round_half_up(target_raw / 100.0 * future_chronological_age);
    let required_growth = (required_developmental_age - current_dev).max(0.0);
    let projected_without_intervention = round_half_up(
        current_dev + config.projection_horizon_months - config.degradation_points * (current_dev / 100.0),
    );

    let priority = Priority::for_status(age.status);
    let recommended_touchpoints = catalog
        .for_domain(age.domain)?
        .into_iter()
        .map(|intervention| -> DomainResult<RecommendedTouchpoint> {
            Ok(RecommendedTouchpoint {
                required_sessions: required_sessions(required_growth, intervention.expected_dq_impact)?,
                intervention: intervention.clone(),
                priority,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(DomainTarget {
        domain: age.domain,
        current_dq: round_to_i64(current_raw),
        target_dq: round_to_i64(target_raw),
        current_developmental_age: current_dev,
        required_developmental_age,
        required_growth,
        projected_with_intervention: required_developmental_age,
        projected_without_intervention,
        risk_of_loss: round_half_up(current_dev - projected_without_intervention),
        status: age.status,
        school_readiness_impact: age.school_readiness_impact,
        recommended_touchpoints,
    })
}

fn mean_of(targets: &[DomainTarget], value: impl Fn(&DomainTarget) -> f64) -> f64 {
    targets.iter().map(value).sum::<f64>() / targets.len() as f64
}

/// Targets for every domain plus the child-level roll-up
pub fn intervention_targets(
    ages: &[DevelopmentalAge],
    school_readiness_score: f64,
    catalog: &InterventionCatalog,
    config: &MetricsConfig,
) -> DomainResult<InterventionTargets> {
    if ages.is_empty() {
        return Err(DomainError::empty_input("developmental ages"));
    }

    let domain_targets = ages
        .iter()
        .map(|age| domain_target(age, catalog, config))
        .collect::<DomainResult<Vec<_>>>()?;

    let overall_required_growth = round_half_up(mean_of(&domain_targets, |t| t.required_growth));

    let overall = OverallTargets {
        current_dq: round_to_i64(mean_of(&domain_targets, |t| t.current_dq as f64)),
        target_dq: round_to_i64(mean_of(&domain_targets, |t| t.target_dq as f64)),
        required_growth: overall_required_growth,
        current_school_readiness: school_readiness_score,
        target_school_readiness: config.school_readiness_target,
        projected_school_readiness: (school_readiness_score + overall_required_growth * config.readiness_growth_factor)
            .min(100.0),
    };
    log::debug!(
        "Intervention targets: DQ {} -> {}, readiness {} -> {}",
        overall.current_dq,
        overall.target_dq,
        overall.current_school_readiness,
        overall.projected_school_readiness
    );

    Ok(InterventionTargets { domain_targets, overall })
}

/// One checkpoint on the with/without intervention chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub month: f64,
    pub period: String,
    pub with_intervention: f64,
    pub without_intervention: f64,
    pub school_readiness_with_intervention: f64,
    pub school_readiness_without_intervention: f64,
}

/// Current, midpoint and horizon checkpoints for DQ and readiness
pub fn projection_timeline(
    current_age_months: f64,
    school_readiness_score: f64,
    overall: &OverallTargets,
    config: &MetricsConfig,
) -> Vec<ProjectionPoint> {
    let curve = &config.projection_curve;
    let current_dq = overall.current_dq as f64;

    vec![
        ProjectionPoint {
            month: current_age_months,
            period: "Current".to_string(),
            with_intervention: current_dq,
            without_intervention: current_dq,
            school_readiness_with_intervention: school_readiness_score,
            school_readiness_without_intervention: school_readiness_score,
        },
        ProjectionPoint {
            month: current_age_months + curve.midpoint_months,
            period: format!("{} Months", curve.midpoint_months),
            with_intervention: current_dq + curve.midpoint_dq_gain,
            without_intervention: current_dq - curve.midpoint_dq_loss,
            school_readiness_with_intervention: school_readiness_score + curve.midpoint_readiness_gain,
            school_readiness_without_intervention: school_readiness_score - curve.midpoint_readiness_loss,
        },
        ProjectionPoint {
            month: current_age_months + config.projection_horizon_months,
            period: format!("{} Months (Target)", config.projection_horizon_months),
            with_intervention: overall.target_dq as f64,
            without_intervention: current_dq - config.degradation_points,
            school_readiness_with_intervention: overall
                .projected_school_readiness
                .min(config.school_readiness_target),
            school_readiness_without_intervention: (school_readiness_score - curve.horizon_readiness_loss)
                .max(curve.readiness_floor),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub chronological_age: u32,
    pub age_label: String,
    pub with_programme: i64,
    pub without_intervention: i64,
    /// The child's mean developmental age scaled back linearly; only up to the current age
    pub actual_progress: Option<i64>,
}

/// With-programme and natural-lag curves across the early years
pub fn trajectory_comparison(
    current_age_months: f64,
    ages: &[DevelopmentalAge],
    config: &MetricsConfig,
) -> DomainResult<Vec<TrajectoryPoint>> {
    if !current_age_months.is_finite() || current_age_months <= 0.0 {
        return Err(DomainError::degenerate_age("current_age_months", current_age_months));
    }
    if ages.is_empty() {
        return Err(DomainError::empty_input("developmental ages"));
    }

    let t = &config.trajectory;
    let start = f64::from(t.start_age_months);
    let mean_dev = ages.iter().map(|a| a.developmental_age_months).sum::<f64>() / ages.len() as f64;

    let points = (t.start_age_months..=t.end_age_months)
        .step_by(t.step_months.max(1) as usize)
        .map(|age| {
            let a = f64::from(age);
            let with_programme = a.min(a * t.with_programme_base + (a - start) * t.with_programme_gain);
            let without = a * t.natural_base - (a - start) * t.natural_lag;
            let actual_progress = (a <= current_age_months).then(|| round_to_i64(mean_dev * (a / current_age_months)));

            TrajectoryPoint {
                chronological_age: age,
                age_label: format_age_display(age),
                with_programme: round_to_i64(with_programme),
                without_intervention: round_to_i64(without),
                actual_progress,
            }
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;
    use crate::domains::touchpoint::catalog::DEFAULT_CATALOG;

    fn target_for(domain: DevelopmentalDomain) -> DomainTarget {
        let ages = fixtures::developmental_ages();
        let age = ages.iter().find(|a| a.domain == domain).unwrap();
        domain_target(age, &DEFAULT_CATALOG, &MetricsConfig::default()).unwrap()
    }

    #[test]
    fn test_gross_motor_target() {
        let t = target_for(DevelopmentalDomain::GrossMotor);
        assert_eq!(t.current_dq, 94);
        assert_eq!(t.target_dq, 119);
        assert_eq!(t.required_developmental_age, 50.0);
        assert_eq!(t.required_growth, 16.0);
        assert_eq!(t.projected_with_intervention, 50.0);
        assert_eq!(t.projected_without_intervention, 21.0);
        assert_eq!(t.risk_of_loss, 13.0);

        let sessions: Vec<(&str, u64)> = t
            .recommended_touchpoints
            .iter()
            .map(|r| (r.intervention.name.as_str(), r.required_sessions))
            .collect();
        assert_eq!(
            sessions,
            vec![("Specialist Referral Services", 2), ("Comprehensive Developmental Screening", 4)]
        );
        assert!(t.recommended_touchpoints.iter().all(|r| r.priority == Priority::Low));
    }

    #[test]
    fn test_cognitive_target() {
        let t = target_for(DevelopmentalDomain::Cognitive);
        assert_eq!(t.current_dq, 92);
        assert_eq!(t.target_dq, 117);
        assert_eq!(t.required_developmental_age, 49.0);
        assert_eq!(t.projected_without_intervention, 21.0);
        assert_eq!(t.risk_of_loss, 12.0);
    }

    #[test]
    fn test_priority_follows_status() {
        let language = target_for(DevelopmentalDomain::LanguageCommunication);
        assert_eq!(language.recommended_touchpoints.len(), 5);
        assert!(language.recommended_touchpoints.iter().all(|r| r.priority == Priority::High));
        assert_eq!(language.recommended_touchpoints[0].intervention.expected_dq_impact, 0.15);

        let social = target_for(DevelopmentalDomain::SocialEmotional);
        assert!(social.recommended_touchpoints.iter().all(|r| r.priority == Priority::Medium));
    }

    #[test]
    fn test_target_dq_is_current_plus_growth_target() {
        let config = MetricsConfig::default();
        for age in fixtures::developmental_ages() {
            let raw = age.developmental_age_months / age.chronological_age_months * 100.0;
            let t = domain_target(&age, &DEFAULT_CATALOG, &config).unwrap();
            assert_eq!(t.target_dq, round_to_i64(raw + 25.0));
            assert!(t.required_growth >= 0.0);
        }
    }

    #[test]
    fn test_required_growth_never_negative() {
        // A tiny horizon lets rounding pull the required age below the current one
        let config = MetricsConfig {
            dq_growth_target: 0.01,
            projection_horizon_months: 0.01,
            ..MetricsConfig::default()
        };
        let age = DevelopmentalAge::with_status(
            DevelopmentalDomain::FineMotor,
            36.0,
            48.4,
            DelayStatus::Advanced,
            ReadinessImpact::Low,
        );
        let t = domain_target(&age, &DEFAULT_CATALOG, &config).unwrap();
        assert_eq!(t.required_developmental_age, 48.0);
        assert_eq!(t.required_growth, 0.0);
        assert!(t.recommended_touchpoints.iter().all(|r| r.required_sessions == 0));
    }

    #[test]
    fn test_catalog_miss_propagates() {
        let catalog = InterventionCatalog::new(vec![]).unwrap();
        let age = &fixtures::developmental_ages()[0];
        let err = domain_target(age, &catalog, &MetricsConfig::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_degenerate_age_propagates() {
        let age = DevelopmentalAge::with_status(
            DevelopmentalDomain::Cognitive,
            0.0,
            10.0,
            DelayStatus::Advanced,
            ReadinessImpact::Low,
        );
        assert!(matches!(
            domain_target(&age, &DEFAULT_CATALOG, &MetricsConfig::default()),
            Err(DomainError::DegenerateAge { .. })
        ));
    }

    #[test]
    fn test_required_sessions() {
        assert_eq!(required_sessions(16.0, 0.15).unwrap(), 2);
        assert_eq!(required_sessions(16.0, 0.05).unwrap(), 4);
        assert_eq!(required_sessions(0.0, 0.12).unwrap(), 0);
        assert!(required_sessions(10.0, 0.0).is_err());
    }

    #[test]
    fn test_required_sessions_do_not_saturate() {
        assert_eq!(required_sessions(1e12, 0.05).unwrap(), 200_000_000_000);
        assert!(required_sessions(f64::INFINITY, 0.05).is_err());
        assert!(required_sessions(1e30, 0.05).is_err());
    }

    #[test]
    fn test_overall_targets() {
        let targets = intervention_targets(
            &fixtures::developmental_ages(),
            74.0,
            &DEFAULT_CATALOG,
            &MetricsConfig::default(),
        )
        .unwrap();

        assert_eq!(targets.domain_targets.len(), 5);
        assert_eq!(targets.overall.current_dq, 87);
        assert_eq!(targets.overall.target_dq, 112);
        assert_eq!(targets.overall.target_school_readiness, 85.0);
        assert!(targets.overall.projected_school_readiness > 74.0);
        assert!(targets.overall.projected_school_readiness <= 100.0);
        assert_eq!(
            targets.overall.projected_school_readiness,
            74.0 + targets.overall.required_growth * 0.8
        );
    }

    #[test]
    fn test_projected_readiness_caps_at_100() {
        let targets = intervention_targets(
            &fixtures::developmental_ages(),
            99.0,
            &DEFAULT_CATALOG,
            &MetricsConfig::default(),
        )
        .unwrap();
        assert_eq!(targets.overall.projected_school_readiness, 100.0);
    }

    #[test]
    fn test_projection_timeline_checkpoints() {
        let config = MetricsConfig::default();
        let overall = OverallTargets {
            current_dq: 87,
            target_dq: 112,
            required_growth: 16.0,
            current_school_readiness: 74.0,
            target_school_readiness: 85.0,
            projected_school_readiness: 86.8,
        };
        let points = projection_timeline(36.0, 74.0, &overall, &config);
        assert_eq!(points.len(), 3);

        assert_eq!(points[0].period, "Current");
        assert_eq!(points[0].with_intervention, 87.0);

        assert_eq!(points[1].period, "3 Months");
        assert_eq!(points[1].month, 39.0);
        assert_eq!(points[1].with_intervention, 99.0);
        assert_eq!(points[1].without_intervention, 60.0);
        assert_eq!(points[1].school_readiness_with_intervention, 82.0);
        assert_eq!(points[1].school_readiness_without_intervention, 59.0);

        assert_eq!(points[2].period, "6 Months (Target)");
        assert_eq!(points[2].month, 42.0);
        assert_eq!(points[2].with_intervention, 112.0);
        assert_eq!(points[2].without_intervention, 32.0);
        assert_eq!(points[2].school_readiness_with_intervention, 85.0);
        assert_eq!(points[2].school_readiness_without_intervention, 44.0);
    }

    #[test]
    fn test_readiness_floor_applies() {
        let config = MetricsConfig::default();
        let overall = OverallTargets {
            current_dq: 60,
            target_dq: 85,
            required_growth: 10.0,
            current_school_readiness: 50.0,
            target_school_readiness: 85.0,
            projected_school_readiness: 58.0,
        };
        let points = projection_timeline(48.0, 50.0, &overall, &config);
        assert_eq!(points[2].school_readiness_without_intervention, 40.0);
        assert_eq!(points[2].school_readiness_with_intervention, 58.0);
    }

    #[test]
    fn test_trajectory_comparison() {
        let points =
            trajectory_comparison(36.0, &fixtures::developmental_ages(), &MetricsConfig::default()).unwrap();
        assert_eq!(points.len(), 17);

        let first = &points[0];
        assert_eq!(first.chronological_age, 24);
        assert_eq!(first.age_label, "2y");
        assert_eq!(first.with_programme, 23);
        assert_eq!(first.without_intervention, 18);
        assert_eq!(first.actual_progress, Some(21));

        let at_current = points.iter().find(|p| p.chronological_age == 36).unwrap();
        assert_eq!(at_current.with_programme, 36);
        assert_eq!(at_current.without_intervention, 26);
        assert_eq!(at_current.actual_progress, Some(31));

        let last = points.last().unwrap();
        assert_eq!(last.chronological_age, 72);
        assert_eq!(last.with_programme, 72);
        assert_eq!(last.without_intervention, 50);
        assert_eq!(last.actual_progress, None);
    }

    #[test]
    fn test_trajectory_rejects_bad_inputs() {
        let config = MetricsConfig::default();
        assert!(trajectory_comparison(0.0, &fixtures::developmental_ages(), &config).is_err());
        assert!(matches!(
            trajectory_comparison(36.0, &[], &config),
            Err(DomainError::EmptyInput(_))
        ));
    }
}
