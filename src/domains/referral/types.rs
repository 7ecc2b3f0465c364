use crate::domains::child::types::{Child, RiskLevel};
use crate::domains::settings::MetricsConfig;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::types::round_to_i64;
use crate::validation::{Validate, ValidationBuilder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The referral pipeline always has this many stages
pub const REFERRAL_STEP_COUNT: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Completed,
    InProgress,
    Pending,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Completed => "completed",
            StepStatus::InProgress => "in-progress",
            StepStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralJourneyStep {
    pub step_number: u32,
    pub step_name: String,
    pub content: String,
    pub status: StepStatus,
    pub date: Option<NaiveDate>,
    pub updated_by: Option<String>,
}

impl Validate for ReferralJourneyStep {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("step_number", Some(self.step_number))
            .range(1, REFERRAL_STEP_COUNT)
            .validate()?;
        ValidationBuilder::new("step_name", Some(self.step_name.clone()))
            .not_blank()
            .validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyProgress {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// First in-progress step, otherwise the first pending one
    pub current_step: Option<u32>,
    /// Whole percent, rounded half-up like the dashboard
    pub completion_percentage: i64,
}

/// High risk, more than the configured number of delays, and an underlying condition
pub fn is_eligible(child: &Child, config: &MetricsConfig) -> bool {
    child.risk_level == RiskLevel::High
        && child.delay_count > config.referral_min_delay_count
        && child.has_underlying_condition
}

/// Steps must be exactly 1..=7, in order
pub fn validate_journey(steps: &[ReferralJourneyStep]) -> DomainResult<()> {
    if steps.len() != REFERRAL_STEP_COUNT as usize {
        return Err(DomainError::Validation(ValidationError::invalid_value(
            "referral_steps",
            &format!("expected {} steps, got {}", REFERRAL_STEP_COUNT, steps.len()),
        )));
    }
    for (index, step) in steps.iter().enumerate() {
        step.validate()?;
        let expected = index as u32 + 1;
        if step.step_number != expected {
            return Err(DomainError::Validation(ValidationError::invalid_value(
                "step_number",
                &format!("expected step {} at position {}, found {}", expected, index + 1, step.step_number),
            )));
        }
    }
    Ok(())
}

pub fn journey_progress(steps: &[ReferralJourneyStep]) -> DomainResult<JourneyProgress> {
    validate_journey(steps)?;

    let count = |status: StepStatus| steps.iter().filter(|s| s.status == status).count();
    let completed = count(StepStatus::Completed);

    let current_step = steps
        .iter()
        .find(|s| s.status == StepStatus::InProgress)
        .or_else(|| steps.iter().find(|s| s.status == StepStatus::Pending))
        .map(|s| s.step_number);

    Ok(JourneyProgress {
        completed,
        in_progress: count(StepStatus::InProgress),
        pending: count(StepStatus::Pending),
        current_step,
        completion_percentage: round_to_i64(completed as f64 / REFERRAL_STEP_COUNT as f64 * 100.0),
    })
}
