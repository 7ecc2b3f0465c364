use crate::domains::child::types::RiskLevel;
use crate::domains::settings::VillageRiskBands;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::types::{round_one_decimal, round_to_i64};
use crate::validation::{Validate, ValidationBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Domain scores from one cohort screening, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortScores {
    pub language: f64,
    pub motor: f64,
    pub social: f64,
    pub cognitive: f64,
    pub overall: f64,
}

impl Validate for CohortScores {
    fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("language", self.language),
            ("motor", self.motor),
            ("social", self.social),
            ("cognitive", self.cognitive),
            ("overall", self.overall),
        ] {
            ValidationBuilder::new(field, Some(value)).finite().range(0.0, 100.0).validate()?;
        }
        Ok(())
    }
}

/// Risk level before and after the second screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskTransition {
    pub from: RiskLevel,
    pub to: RiskLevel,
}

impl RiskTransition {
    pub fn new(from: RiskLevel, to: RiskLevel) -> Self {
        Self { from, to }
    }

    /// True when the first screening was High, including High → High
    pub fn started_high_risk(&self) -> bool {
        self.from == RiskLevel::High
    }
}

impl fmt::Display for RiskTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn title(level: RiskLevel) -> &'static str {
            match level {
                RiskLevel::Low => "Low",
                RiskLevel::Moderate => "Moderate",
                RiskLevel::High => "High",
            }
        }
        write!(f, "{} → {}", title(self.from), title(self.to))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortChild {
    pub id: String,
    pub name: String,
    pub age_years: u32,
    pub anganwadi: String,
    pub region: String,
}

/// A child screened twice, compared across both screenings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementRecord {
    #[serde(flatten)]
    pub child: CohortChild,
    pub first_screening: CohortScores,
    pub second_screening: CohortScores,
    pub interventions: Vec<String>,
    pub risk_transition: RiskTransition,
}

impl Validate for ImprovementRecord {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("id", Some(self.child.id.clone())).not_blank().validate()?;
        self.first_screening.validate()?;
        self.second_screening.validate()?;
        if self.first_screening.overall <= 0.0 {
            return Err(DomainError::Validation(ValidationError::invalid_value(
                "first_screening.overall",
                "must be greater than zero to measure improvement",
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedImprovement {
    pub rank: usize,
    #[serde(flatten)]
    pub record: ImprovementRecord,
    pub improvement: f64,
    pub improvement_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementSummary {
    pub average_improvement_percentage: i64,
    pub highest_improvement_percentage: f64,
    /// Children whose first screening was High risk, whatever the second showed
    pub started_high_risk: usize,
    pub regions_represented: usize,
}

/// Ranks children by percentage improvement, highest first.
///
/// Ties keep their input order.
pub fn rank_improvements(records: &[ImprovementRecord]) -> DomainResult<Vec<RankedImprovement>> {
    if records.is_empty() {
        return Err(DomainError::empty_input("improvement records"));
    }

    let mut ranked = records
        .iter()
        .map(|record| -> DomainResult<RankedImprovement> {
            record.validate()?;
            let improvement = record.second_screening.overall - record.first_screening.overall;
            Ok(RankedImprovement {
                rank: 0,
                record: record.clone(),
                improvement,
                improvement_percentage: round_one_decimal(improvement / record.first_screening.overall * 100.0),
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    ranked.sort_by(|a, b| b.improvement_percentage.total_cmp(&a.improvement_percentage));
    for (index, entry) in ranked.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    Ok(ranked)
}

pub fn improvement_summary(ranked: &[RankedImprovement]) -> DomainResult<ImprovementSummary> {
    let Some(top) = ranked.first() else {
        return Err(DomainError::empty_input("ranked improvements"));
    };
    let n = ranked.len() as f64;
    let regions: BTreeSet<&str> = ranked.iter().map(|r| r.record.child.region.as_str()).collect();

    Ok(ImprovementSummary {
        average_improvement_percentage: round_to_i64(
            ranked.iter().map(|r| r.improvement_percentage).sum::<f64>() / n,
        ),
        highest_improvement_percentage: top.improvement_percentage,
        started_high_risk: ranked.iter().filter(|r| r.record.risk_transition.started_high_risk()).count(),
        regions_represented: regions.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilySupport {
    Required,
    Essential,
    Intensive,
    Critical,
}

impl FamilySupport {
    pub fn is_high_need(&self) -> bool {
        matches!(self, FamilySupport::Critical | FamilySupport::Intensive)
    }
}

/// A child flagged at high risk by the second screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskRecord {
    #[serde(flatten)]
    pub child: CohortChild,
    pub latest_screening: CohortScores,
    pub risk_factors: Vec<String>,
    pub urgent_interventions: Vec<String>,
    pub family_support: FamilySupport,
    pub months_delayed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHighRisk {
    pub rank: usize,
    #[serde(flatten)]
    pub record: HighRiskRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskSummary {
    pub average_overall_score: i64,
    pub average_months_delayed: i64,
    pub total_urgent_interventions: usize,
    pub families_needing_support: usize,
}

/// Lowest latest overall score first
pub fn rank_high_risk(records: &[HighRiskRecord]) -> DomainResult<Vec<RankedHighRisk>> {
    if records.is_empty() {
        return Err(DomainError::empty_input("high-risk records"));
    }
    for record in records {
        record.latest_screening.validate()?;
    }

    let mut sorted: Vec<&HighRiskRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.latest_screening.overall.total_cmp(&b.latest_screening.overall));
    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedHighRisk {
            rank: index + 1,
            record: record.clone(),
        })
        .collect())
}

pub fn high_risk_summary(ranked: &[RankedHighRisk]) -> DomainResult<HighRiskSummary> {
    if ranked.is_empty() {
        return Err(DomainError::empty_input("ranked high-risk children"));
    }
    let n = ranked.len() as f64;
    Ok(HighRiskSummary {
        average_overall_score: round_to_i64(
            ranked.iter().map(|r| r.record.latest_screening.overall).sum::<f64>() / n,
        ),
        average_months_delayed: round_to_i64(
            ranked.iter().map(|r| r.record.months_delayed as f64).sum::<f64>() / n,
        ),
        total_urgent_interventions: ranked.iter().map(|r| r.record.urgent_interventions.len()).sum(),
        families_needing_support: ranked.iter().filter(|r| r.record.family_support.is_high_need()).count(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayCategory {
    pub count: u32,
    pub percentage: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayCategories {
    pub language: DelayCategory,
    pub motor: DelayCategory,
    pub social: DelayCategory,
    pub cognitive: DelayCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDelay {
    pub region: String,
    pub anganwadi_centers: u32,
    pub total_children: u32,
    pub delay_categories: DelayCategories,
    pub overall_delay_rate: f64,
    pub risk_level: Severity,
    pub primary_concerns: Vec<String>,
    pub intervention_success: f64,
    pub coordinator_effectiveness: f64,
}

impl RegionDelay {
    pub fn children_per_center(&self) -> Option<i64> {
        if self.anganwadi_centers == 0 {
            return None;
        }
        Some(round_to_i64(self.total_children as f64 / self.anganwadi_centers as f64))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalOverview {
    pub best_region: RegionDelay,
    pub needs_attention: RegionDelay,
}

/// Best region by intervention success and the one with the highest delay
/// rate. On ties the earlier region wins.
pub fn regional_overview(regions: &[RegionDelay]) -> DomainResult<RegionalOverview> {
    let Some(first) = regions.first() else {
        return Err(DomainError::empty_input("regions"));
    };

    let mut best = first;
    let mut worst = first;
    for region in &regions[1..] {
        if region.intervention_success > best.intervention_success {
            best = region;
        }
        if region.overall_delay_rate > worst.overall_delay_rate {
            worst = region;
        }
    }
    Ok(RegionalOverview {
        best_region: best.clone(),
        needs_attention: worst.clone(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VillageRiskBand {
    Low,
    Medium,
    High,
}

impl VillageRiskBand {
    pub fn label(&self) -> &'static str {
        match self {
            VillageRiskBand::Low => "Low Risk",
            VillageRiskBand::Medium => "Medium Risk",
            VillageRiskBand::High => "High Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Village {
    pub name: String,
    pub children_count: u32,
    pub at_risk_count: u32,
    pub screening_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VillageRisk {
    pub name: String,
    pub children_count: u32,
    pub at_risk_count: u32,
    pub at_risk_percentage: f64,
    pub band: VillageRiskBand,
}

pub fn village_risk(village: &Village, bands: &VillageRiskBands) -> DomainResult<VillageRisk> {
    if village.children_count == 0 {
        return Err(DomainError::Validation(ValidationError::invalid_value(
            "children_count",
            &format!("village {} has no children", village.name),
        )));
    }
    if village.at_risk_count > village.children_count {
        return Err(DomainError::Validation(ValidationError::invalid_value(
            "at_risk_count",
            "exceeds children_count",
        )));
    }

    let percentage = village.at_risk_count as f64 / village.children_count as f64 * 100.0;
    let band = if percentage < bands.low_below_percent {
        VillageRiskBand::Low
    } else if percentage < bands.medium_below_percent {
        VillageRiskBand::Medium
    } else {
        VillageRiskBand::High
    };

    Ok(VillageRisk {
        name: village.name.clone(),
        children_count: village.children_count,
        at_risk_count: village.at_risk_count,
        at_risk_percentage: round_one_decimal(percentage),
        band,
    })
}
