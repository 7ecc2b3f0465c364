use crate::domains::child::repository::{ChildRecord, ChildRepository};
use crate::domains::child::types::{Child, DevelopmentalAge};
use crate::domains::metrics::aggregate::{consolidated_stats, ConsolidatedStats};
use crate::domains::metrics::correction::{
    delay_correction, developmental_age_progression, PeriodCorrection, ProgressionPoint,
};
use crate::domains::metrics::delta::{dq_changes, PeriodDqChanges};
use crate::domains::metrics::dq::{dq_series, DqPoint};
use crate::domains::metrics::projection::{
    intervention_targets, projection_timeline, trajectory_comparison, InterventionTargets, ProjectionPoint,
    TrajectoryPoint,
};
use crate::domains::metrics::readiness::{school_readiness_mapping, ReadinessMapping};
use crate::domains::referral::types::{is_eligible, journey_progress, JourneyProgress, ReferralJourneyStep};
use crate::domains::settings::MetricsConfig;
use crate::domains::touchpoint::catalog::InterventionCatalog;
use crate::domains::touchpoint::timeline::{summarize, TimelineSummary};
use crate::errors::ServiceResult;
use crate::types::DevelopmentalDomain;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferralSummary {
    pub steps: Vec<ReferralJourneyStep>,
    pub progress: Option<JourneyProgress>,
}

/// Everything the child profile shows, computed from one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildReport {
    pub child: Child,
    pub developmental_ages: Vec<DevelopmentalAge>,
    pub consolidated_stats: ConsolidatedStats,
    pub dq_series: Vec<DqPoint>,
    pub dq_changes: Vec<PeriodDqChanges>,
    pub progression: Vec<ProgressionPoint>,
    pub delay_correction: Vec<PeriodCorrection>,
    pub school_readiness: Vec<ReadinessMapping>,
    pub intervention_targets: InterventionTargets,
    pub projection: Vec<ProjectionPoint>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub timeline: TimelineSummary,
    /// Present only when the child qualifies for the referral journey
    pub referral: Option<ReferralSummary>,
    pub generated_at: DateTime<Utc>,
}

/// Developmental metrics over stored child records
pub trait DevelopmentService: Send + Sync {
    fn child_report(&self, child_id: &str) -> ServiceResult<ChildReport>;

    fn report_for_record(&self, record: &ChildRecord) -> ServiceResult<ChildReport>;

    fn dq_changes(&self, child_id: &str, domains: &[DevelopmentalDomain]) -> ServiceResult<Vec<PeriodDqChanges>>;

    fn intervention_targets(&self, child_id: &str) -> ServiceResult<InterventionTargets>;

    fn config(&self) -> &MetricsConfig;
}

pub struct DevelopmentServiceImpl {
    child_repo: Arc<dyn ChildRepository>,
    catalog: Arc<InterventionCatalog>,
    config: Arc<MetricsConfig>,
}

impl DevelopmentServiceImpl {
    pub fn new(
        child_repo: Arc<dyn ChildRepository>,
        catalog: Arc<InterventionCatalog>,
        config: Arc<MetricsConfig>,
    ) -> Self {
        Self {
            child_repo,
            catalog,
            config,
        }
    }

    fn referral_summary(&self, record: &ChildRecord) -> ServiceResult<Option<ReferralSummary>> {
        if !is_eligible(&record.child, &self.config) {
            return Ok(None);
        }
        let progress = if record.referral_steps.is_empty() {
            None
        } else {
            Some(journey_progress(&record.referral_steps)?)
        };
        Ok(Some(ReferralSummary {
            steps: record.referral_steps.clone(),
            progress,
        }))
    }
}

impl DevelopmentService for DevelopmentServiceImpl {
    fn child_report(&self, child_id: &str) -> ServiceResult<ChildReport> {
        let record = self.child_repo.find_by_id(child_id)?;
        self.report_for_record(&record)
    }

    fn report_for_record(&self, record: &ChildRecord) -> ServiceResult<ChildReport> {
        let child = &record.child;
        let age = child.age_months_f64();
        let config = self.config.as_ref();

        let stats = consolidated_stats(
            age,
            &record.developmental_ages,
            child.interventions.len(),
            &config.risk_thresholds,
        )?;
        let series = dq_series(&record.screenings)?;
        let changes = dq_changes(&series, &DevelopmentalDomain::ALL);
        let progression = developmental_age_progression(&record.screenings)?;
        let corrections = delay_correction(&progression);
        let targets = intervention_targets(
            &record.developmental_ages,
            child.school_readiness_score,
            &self.catalog,
            config,
        )?;
        let projection = projection_timeline(age, child.school_readiness_score, &targets.overall, config);
        let trajectory = trajectory_comparison(age, &record.developmental_ages, config)?;

        let report = ChildReport {
            child: child.clone(),
            developmental_ages: record.developmental_ages.clone(),
            consolidated_stats: stats,
            dq_series: series,
            dq_changes: changes,
            progression,
            delay_correction: corrections,
            school_readiness: school_readiness_mapping(&record.screenings),
            intervention_targets: targets,
            projection,
            trajectory,
            timeline: summarize(&record.timeline),
            referral: self.referral_summary(record)?,
            generated_at: Utc::now(),
        };

        log::info!(
            "Generated report for {} ({}): risk {}, DQ {} -> {}",
            child.name,
            child.id,
            report.consolidated_stats.risk_level,
            report.intervention_targets.overall.current_dq,
            report.intervention_targets.overall.target_dq
        );
        Ok(report)
    }

    fn dq_changes(&self, child_id: &str, domains: &[DevelopmentalDomain]) -> ServiceResult<Vec<PeriodDqChanges>> {
        let record = self.child_repo.find_by_id(child_id)?;
        let series = dq_series(&record.screenings)?;
        Ok(dq_changes(&series, domains))
    }

    fn intervention_targets(&self, child_id: &str) -> ServiceResult<InterventionTargets> {
        let record = self.child_repo.find_by_id(child_id)?;
        Ok(intervention_targets(
            &record.developmental_ages,
            record.child.school_readiness_score,
            &self.catalog,
            &self.config,
        )?)
    }

    fn config(&self) -> &MetricsConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;
    use crate::domains::child::repository::InMemoryChildRepository;
    use crate::domains::child::types::RiskLevel;
    use crate::domains::metrics::aggregate::OverallRisk;
    use crate::errors::{DomainError, NotFoundError, ServiceError};

    fn service() -> DevelopmentServiceImpl {
        let repo = InMemoryChildRepository::with_records(fixtures::all_records()).unwrap();
        DevelopmentServiceImpl::new(
            Arc::new(repo),
            Arc::new(InterventionCatalog::default()),
            Arc::new(MetricsConfig::default()),
        )
    }

    #[test]
    fn test_child_report_for_fixture() {
        let report = service().child_report(fixtures::SAMPLE_CHILD_ID).unwrap();

        assert_eq!(report.child.name, "Aadhya Sharma");
        assert_eq!(report.consolidated_stats.overall_gap, -5.0);
        assert_eq!(report.consolidated_stats.risk_level, OverallRisk::Moderate);
        assert_eq!(report.dq_series.len(), 2);
        assert_eq!(report.dq_changes.len(), 1);
        assert_eq!(report.progression.len(), 3);
        assert_eq!(report.delay_correction.len(), 2);
        assert_eq!(report.school_readiness.len(), 2);
        assert_eq!(report.intervention_targets.domain_targets.len(), 5);
        assert_eq!(report.projection.len(), 3);
        assert_eq!(report.trajectory.len(), 17);
        assert_eq!(report.timeline.total_events, 10);

        let referral = report.referral.expect("fixture child is eligible");
        assert_eq!(referral.steps.len(), 7);
        assert_eq!(referral.progress.map(|p| p.current_step), Some(Some(4)));
    }

    #[test]
    fn test_ineligible_child_has_no_referral_section() {
        let mut record = fixtures::aadhya_sharma();
        record.child.risk_level = RiskLevel::Moderate;
        let report = service().report_for_record(&record).unwrap();
        assert!(report.referral.is_none());
    }

    #[test]
    fn test_unknown_child() {
        let err = service().child_report("nobody").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::NotFound(NotFoundError::Child(_)))
        ));
    }

    #[test]
    fn test_dq_changes_for_selected_domains() {
        let changes = service()
            .dq_changes(fixtures::SAMPLE_CHILD_ID, &[DevelopmentalDomain::FineMotor])
            .unwrap();
        assert_eq!(changes.len(), 1);
        let fine = &changes[0].changes[&DevelopmentalDomain::FineMotor];
        assert_eq!((fine.previous, fine.current, fine.change), (91, 97, 6));
    }

    #[test]
    fn test_report_serializes_domain_keys_by_name() {
        let report = service().child_report(fixtures::SAMPLE_CHILD_ID).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dq_series"][1]["dq"]["Fine Motor Skills"], 97);
        assert_eq!(json["consolidated_stats"]["risk_level"], "Moderate");
        assert_eq!(json["intervention_targets"]["overall"]["target_school_readiness"], 85.0);
    }
}
