use crate::domains::cohort::fixtures;
use crate::domains::cohort::types::{
    high_risk_summary, improvement_summary, rank_high_risk, rank_improvements, regional_overview, village_risk,
    HighRiskRecord, HighRiskSummary, ImprovementRecord, ImprovementSummary, RankedHighRisk, RankedImprovement,
    RegionDelay, RegionalOverview, Village, VillageRisk,
};
use crate::domains::settings::MetricsConfig;
use crate::errors::{DomainResult, ServiceResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw cohort inputs for one programme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortData {
    pub improvements: Vec<ImprovementRecord>,
    pub high_risk: Vec<HighRiskRecord>,
    pub regions: Vec<RegionDelay>,
    pub villages: Vec<Village>,
}

impl CohortData {
    pub fn kuppam() -> Self {
        Self {
            improvements: fixtures::improvement_records(),
            high_risk: fixtures::high_risk_records(),
            regions: fixtures::regions(),
            villages: fixtures::villages(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortAnalytics {
    pub top_improvements: Vec<RankedImprovement>,
    pub improvement_summary: ImprovementSummary,
    pub high_risk: Vec<RankedHighRisk>,
    pub high_risk_summary: HighRiskSummary,
    pub regions: Vec<RegionDelay>,
    pub regional_overview: RegionalOverview,
    pub villages: Vec<VillageRisk>,
}

pub trait CohortService: Send + Sync {
    fn analytics(&self) -> ServiceResult<CohortAnalytics>;

    fn analytics_for(&self, data: &CohortData) -> ServiceResult<CohortAnalytics>;

    fn village_risks(&self) -> ServiceResult<Vec<VillageRisk>>;
}

pub struct CohortServiceImpl {
    data: Arc<CohortData>,
    config: Arc<MetricsConfig>,
}

impl CohortServiceImpl {
    pub fn new(data: Arc<CohortData>, config: Arc<MetricsConfig>) -> Self {
        Self { data, config }
    }

    fn rank_villages(&self, villages: &[Village]) -> DomainResult<Vec<VillageRisk>> {
        villages
            .iter()
            .map(|village| village_risk(village, &self.config.village_risk))
            .collect()
    }
}

impl CohortService for CohortServiceImpl {
    fn analytics(&self) -> ServiceResult<CohortAnalytics> {
        self.analytics_for(&self.data)
    }

    fn analytics_for(&self, data: &CohortData) -> ServiceResult<CohortAnalytics> {
        let top_improvements = rank_improvements(&data.improvements)?;
        let improvement_summary = improvement_summary(&top_improvements)?;
        let high_risk = rank_high_risk(&data.high_risk)?;
        let high_risk_summary = high_risk_summary(&high_risk)?;
        let regional_overview = regional_overview(&data.regions)?;
        let villages = self.rank_villages(&data.villages)?;

        log::info!(
            "Cohort analytics: {} improved, {} high-risk, best region {}, needs attention {}",
            top_improvements.len(),
            high_risk.len(),
            regional_overview.best_region.region,
            regional_overview.needs_attention.region
        );

        Ok(CohortAnalytics {
            top_improvements,
            improvement_summary,
            high_risk,
            high_risk_summary,
            regions: data.regions.clone(),
            regional_overview,
            villages,
        })
    }

    fn village_risks(&self) -> ServiceResult<Vec<VillageRisk>> {
        Ok(self.rank_villages(&self.data.villages)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::cohort::types::VillageRiskBand;
    use crate::errors::{DomainError, ServiceError};

    fn service() -> CohortServiceImpl {
        CohortServiceImpl::new(Arc::new(CohortData::kuppam()), Arc::new(MetricsConfig::default()))
    }

    #[test]
    fn test_kuppam_analytics() {
        let analytics = service().analytics().unwrap();
        assert_eq!(analytics.top_improvements[0].record.child.name, "Arjun Kumar");
        assert_eq!(analytics.improvement_summary.started_high_risk, 4);
        assert_eq!(analytics.high_risk[0].record.child.name, "Anil Kumar");
        assert_eq!(analytics.high_risk_summary.families_needing_support, 5);
        assert_eq!(analytics.regional_overview.best_region.region, "Kuppam East");
        assert_eq!(analytics.villages.len(), 9);
    }

    #[test]
    fn test_empty_cohort_is_rejected() {
        let err = service().analytics_for(&CohortData::default()).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::EmptyInput(_))));
    }

    #[test]
    fn test_village_bands_follow_config() {
        let mut config = MetricsConfig::default();
        config.village_risk.low_below_percent = 20.0;
        config.village_risk.medium_below_percent = 40.0;
        let service = CohortServiceImpl::new(Arc::new(CohortData::kuppam()), Arc::new(config));

        let risks = service.village_risks().unwrap();
        assert_eq!(risks[0].band, VillageRiskBand::Low);
        assert_eq!(risks[2].band, VillageRiskBand::High);
        assert_eq!(risks[3].band, VillageRiskBand::Medium);
    }

    #[test]
    fn test_analytics_serializes_flattened_children() {
        let analytics = service().analytics().unwrap();
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["top_improvements"][0]["id"], "C001");
        assert_eq!(json["top_improvements"][0]["risk_transition"]["from"], "high");
        assert_eq!(json["villages"][2]["band"], "high");
    }
}
