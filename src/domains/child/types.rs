use crate::domains::settings::DelayStatusBands;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::types::DevelopmentalDomain;
use crate::validation::{common, Validate, ValidationBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Programme status shown on the child card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildStatus {
    Normal,
    AtRisk,
    UnderIntervention,
}

impl ChildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildStatus::Normal => "normal",
            ChildStatus::AtRisk => "at-risk",
            ChildStatus::UnderIntervention => "under-intervention",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["low", "moderate", "high"]
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            _ => Err(DomainError::Validation(ValidationError::invalid_value(
                "risk_level",
                &format!("must be one of: {}", RiskLevel::all_variants().join(", ")),
            ))),
        }
    }
}

/// Per-domain delay classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelayStatus {
    Advanced,
    OnTrack,
    MildDelay,
    ModerateDelay,
    SevereDelay,
}

impl DelayStatus {
    /// Classify a gap (developmental minus chronological months)
    pub fn classify(gap_months: f64, bands: &DelayStatusBands) -> Self {
        if gap_months >= bands.advanced_min_gap {
            DelayStatus::Advanced
        } else if gap_months >= bands.on_track_min_gap {
            DelayStatus::OnTrack
        } else if gap_months > bands.mild_floor_gap {
            DelayStatus::MildDelay
        } else if gap_months > bands.moderate_floor_gap {
            DelayStatus::ModerateDelay
        } else {
            DelayStatus::SevereDelay
        }
    }

    pub fn is_concern(&self) -> bool {
        matches!(self, DelayStatus::SevereDelay | DelayStatus::ModerateDelay)
    }

    pub fn is_on_track(&self) -> bool {
        matches!(self, DelayStatus::OnTrack | DelayStatus::Advanced)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DelayStatus::Advanced => "advanced",
            DelayStatus::OnTrack => "on-track",
            DelayStatus::MildDelay => "mild-delay",
            DelayStatus::ModerateDelay => "moderate-delay",
            DelayStatus::SevereDelay => "severe-delay",
        }
    }
}

impl fmt::Display for DelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessImpact {
    High,
    Medium,
    Low,
}

impl ReadinessImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessImpact::High => "high",
            ReadinessImpact::Medium => "medium",
            ReadinessImpact::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnganwadiCenter {
    pub id: String,
    pub name: String,
    pub code: String,
    pub address: String,
    pub total_children: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnganwadiTeacher {
    pub name: String,
    pub id: String,
    pub phone: String,
    pub qualification: String,
    pub experience: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarengrowCoordinator {
    pub name: String,
    pub id: String,
    pub phone: String,
    pub email: String,
    pub centers_assigned: u32,
    pub total_children_under_care: u32,
}

/// Child entity with demographics, base scores and care team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age_years: u32,
    pub age_in_months: u32,
    pub gender: Gender,
    /// ISO `YYYY-MM-DD`
    pub date_of_birth: String,
    pub address: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub status: ChildStatus,
    pub last_screening: Option<String>,
    pub next_screening: Option<String>,
    pub risk_factors: Vec<String>,
    pub interventions: Vec<String>,
    pub school_readiness_score: f64,
    pub risk_level: RiskLevel,
    pub delay_count: u32,
    pub has_underlying_condition: bool,
    pub anganwadi_center: AnganwadiCenter,
    pub anganwadi_teacher: AnganwadiTeacher,
    pub carengrow_coordinator: CarengrowCoordinator,
}

impl Child {
    pub fn age_months_f64(&self) -> f64 {
        f64::from(self.age_in_months)
    }
}

impl Validate for Child {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("id", Some(self.id.clone()))
            .not_blank()
            .validate()?;
        common::validate_person_name(&self.name, "name")?;
        ValidationBuilder::new("age_in_months", Some(self.age_in_months))
            .min(1)
            .validate()?;
        common::validate_date_format(&self.date_of_birth, "date_of_birth")?;
        common::validate_score(self.school_readiness_score, "school_readiness_score")?;

        ValidationBuilder::new("parent_phone", Some(self.parent_phone.clone()))
            .phone()
            .validate()?;
        ValidationBuilder::new("anganwadi_teacher.phone", Some(self.anganwadi_teacher.phone.clone()))
            .phone()
            .validate()?;
        ValidationBuilder::new("carengrow_coordinator.phone", Some(self.carengrow_coordinator.phone.clone()))
            .phone()
            .validate()?;
        ValidationBuilder::new("carengrow_coordinator.email", Some(self.carengrow_coordinator.email.clone()))
            .email()
            .validate()?;

        for (field, date) in [("last_screening", &self.last_screening), ("next_screening", &self.next_screening)] {
            if let Some(d) = date {
                common::validate_date_format(d, field)?;
            }
        }

        Ok(())
    }
}

/// Developmental vs chronological age for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentalAge {
    pub domain: DevelopmentalDomain,
    pub chronological_age_months: f64,
    pub developmental_age_months: f64,
    pub gap_months: f64,
    pub status: DelayStatus,
    pub school_readiness_impact: ReadinessImpact,
}

impl DevelopmentalAge {
    /// Gap and status are derived from the two ages
    pub fn new(
        domain: DevelopmentalDomain,
        chronological_age_months: f64,
        developmental_age_months: f64,
        school_readiness_impact: ReadinessImpact,
        bands: &DelayStatusBands,
    ) -> Self {
        let gap_months = developmental_age_months - chronological_age_months;
        Self {
            domain,
            chronological_age_months,
            developmental_age_months,
            gap_months,
            status: DelayStatus::classify(gap_months, bands),
            school_readiness_impact,
        }
    }

    /// Keeps an assessor-assigned status instead of classifying the gap
    pub fn with_status(
        domain: DevelopmentalDomain,
        chronological_age_months: f64,
        developmental_age_months: f64,
        status: DelayStatus,
        school_readiness_impact: ReadinessImpact,
    ) -> Self {
        Self {
            domain,
            chronological_age_months,
            developmental_age_months,
            gap_months: developmental_age_months - chronological_age_months,
            status,
            school_readiness_impact,
        }
    }
}

impl Validate for DevelopmentalAge {
    fn validate(&self) -> DomainResult<()> {
        common::validate_age_months(self.chronological_age_months, "chronological_age_months")?;
        ValidationBuilder::new("developmental_age_months", Some(self.developmental_age_months))
            .finite()
            .min(0.0)
            .validate()?;

        let expected = self.developmental_age_months - self.chronological_age_months;
        if (self.gap_months - expected).abs() > 1e-9 {
            return Err(DomainError::Validation(ValidationError::invalid_value(
                "gap_months",
                &format!(
                    "{} does not equal developmental minus chronological age ({})",
                    self.gap_months, expected
                ),
            )));
        }
        Ok(())
    }
}
