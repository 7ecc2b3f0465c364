use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::types::round_one_decimal;
use crate::validation::{Validate, ValidationBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Pilot,
    Launching,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Pilot => "pilot",
            ProjectStatus::Launching => "launching",
        }
    }
}

/// A screening programme and its headline counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub status: ProjectStatus,
    pub launch_date: String,
    pub total_children: u64,
    pub screenings_completed: u64,
    pub risk_identified: u64,
    pub interventions_active: u64,
    pub anganwadi_centers: u32,
}

/// Headline counts plus derived rates (percent, one decimal).
/// A rate is `None` when its denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: ProjectStatus,
    pub total_children: u64,
    pub screenings_completed: u64,
    pub risk_identified: u64,
    pub interventions_active: u64,
    pub anganwadi_centers: u32,
    pub screening_rate: Option<f64>,
    pub at_risk_rate: Option<f64>,
    pub intervention_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeTotals {
    pub projects: usize,
    pub total_children: u64,
    pub anganwadi_centers: u32,
}

fn rate(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(round_one_decimal(numerator as f64 / denominator as f64 * 100.0))
}

impl Project {
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            status: self.status,
            total_children: self.total_children,
            screenings_completed: self.screenings_completed,
            risk_identified: self.risk_identified,
            interventions_active: self.interventions_active,
            anganwadi_centers: self.anganwadi_centers,
            screening_rate: rate(self.screenings_completed, self.total_children),
            at_risk_rate: rate(self.risk_identified, self.screenings_completed),
            intervention_rate: rate(self.interventions_active, self.risk_identified),
        }
    }
}

impl Validate for Project {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("id", Some(self.id.clone()))
            .not_blank()
            .validate()?;
        ValidationBuilder::new("name", Some(self.name.clone()))
            .not_blank()
            .max_length(100)
            .validate()?;

        let funnel = [
            ("screenings_completed", self.screenings_completed, "total_children", self.total_children),
            ("risk_identified", self.risk_identified, "screenings_completed", self.screenings_completed),
            ("interventions_active", self.interventions_active, "risk_identified", self.risk_identified),
        ];
        for (field, value, bound_name, bound) in funnel {
            if value > bound {
                return Err(DomainError::Validation(ValidationError::invalid_value(
                    field,
                    &format!("{} exceeds {} ({})", value, bound_name, bound),
                )));
            }
        }
        Ok(())
    }
}

pub fn programme_totals(projects: &[Project]) -> ProgrammeTotals {
    ProgrammeTotals {
        projects: projects.len(),
        total_children: projects.iter().map(|p| p.total_children).sum(),
        anganwadi_centers: projects.iter().map(|p| p.anganwadi_centers).sum(),
    }
}
