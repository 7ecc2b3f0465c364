use crate::errors::{DomainError, DomainResult, NotFoundError, ValidationError};
use crate::types::{DevelopmentalDomain, DomainMap};
use crate::validation::{common, NestedValidator, Validate, ValidationBuilder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Assessor's verdict for one domain at one screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreeningStatus {
    Normal,
    Concern,
    Delay,
    Scheduled,
}

impl ScreeningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreeningStatus::Normal => "normal",
            ScreeningStatus::Concern => "concern",
            ScreeningStatus::Delay => "delay",
            ScreeningStatus::Scheduled => "scheduled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub domain: DevelopmentalDomain,
    /// `None` until the screening has been carried out
    pub score: Option<f64>,
    pub max_score: f64,
    pub status: ScreeningStatus,
    pub recommendations: Vec<String>,
    pub school_readiness_contribution: f64,
}

impl ScreeningResult {
    pub fn scheduled(domain: DevelopmentalDomain) -> Self {
        Self {
            domain,
            score: None,
            max_score: 100.0,
            status: ScreeningStatus::Scheduled,
            recommendations: Vec::new(),
            school_readiness_contribution: 0.0,
        }
    }
}

impl Validate for ScreeningResult {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("max_score", Some(self.max_score))
            .positive()
            .validate()?;
        if let Some(score) = self.score {
            ValidationBuilder::new("score", Some(score))
                .finite()
                .range(0.0, self.max_score)
                .validate()?;
        }
        common::validate_percentage(self.school_readiness_contribution, "school_readiness_contribution")?;

        if self.status == ScreeningStatus::Scheduled && self.score.is_some() {
            return Err(DomainError::Validation(ValidationError::invalid_value(
                "score",
                "a scheduled result cannot carry a score",
            )));
        }
        Ok(())
    }
}

/// One screening visit with its per-domain ages and results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningEvent {
    pub screening_number: u32,
    pub date: NaiveDate,
    pub age_at_screening: f64,
    pub school_readiness_score: Option<f64>,
    pub report_generated: bool,
    pub developmental_ages: DomainMap<Option<f64>>,
    pub results: Vec<ScreeningResult>,
}

impl ScreeningEvent {
    /// Completed screenings are the ones with a generated report
    pub fn is_completed(&self) -> bool {
        self.report_generated
    }

    pub fn label(&self) -> String {
        format!("Screening {}", self.screening_number)
    }

    pub fn developmental_age(&self, domain: DevelopmentalDomain) -> Option<f64> {
        self.developmental_ages.get(&domain).copied().flatten()
    }

    pub fn result(&self, domain: DevelopmentalDomain) -> Option<&ScreeningResult> {
        self.results.iter().find(|r| r.domain == domain)
    }
}

impl Validate for ScreeningEvent {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("screening_number", Some(self.screening_number))
            .min(1)
            .validate()?;
        common::validate_age_months(self.age_at_screening, "age_at_screening")?;

        if let Some(score) = self.school_readiness_score {
            common::validate_score(score, "school_readiness_score")?;
        } else if self.report_generated {
            return Err(DomainError::Validation(ValidationError::required("school_readiness_score")));
        }

        let mut nested = NestedValidator::new();
        for (domain, age) in &self.developmental_ages {
            if let Some(age) = age {
                nested.check(
                    ValidationBuilder::new(&format!("developmental_ages.{}", domain.short_key()), Some(*age))
                        .finite()
                        .min(0.0)
                        .validate(),
                )?;
            }
        }

        let mut seen = HashSet::new();
        for result in &self.results {
            nested.check(result.validate())?;
            if !seen.insert(result.domain) {
                nested.add_error(ValidationError::invalid_value(
                    "results",
                    &format!("duplicate result for {}", result.domain),
                ));
            }
        }
        nested.validate()
    }
}

/// Completed screenings ordered by screening number
pub fn completed_screenings(screenings: &[ScreeningEvent]) -> Vec<&ScreeningEvent> {
    let mut completed: Vec<&ScreeningEvent> = screenings.iter().filter(|s| s.is_completed()).collect();
    completed.sort_by_key(|s| s.screening_number);
    completed
}

/// The first screening after the latest completed one, if any is scheduled
pub fn next_scheduled(screenings: &[ScreeningEvent]) -> Option<&ScreeningEvent> {
    screenings
        .iter()
        .filter(|s| !s.is_completed())
        .min_by_key(|s| s.screening_number)
}

pub fn find_screening(screenings: &[ScreeningEvent], number: u32) -> DomainResult<&ScreeningEvent> {
    screenings
        .iter()
        .find(|s| s.screening_number == number)
        .ok_or_else(|| NotFoundError::Screening { number }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;

    #[test]
    fn test_fixture_screenings_are_valid() {
        for screening in fixtures::screenings() {
            assert!(screening.validate().is_ok(), "screening {} invalid", screening.screening_number);
        }
    }

    #[test]
    fn test_completed_and_scheduled_split() {
        let screenings = fixtures::screenings();
        let completed = completed_screenings(&screenings);
        assert_eq!(completed.iter().map(|s| s.screening_number).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(next_scheduled(&screenings).map(|s| s.screening_number), Some(3));
    }

    #[test]
    fn test_developmental_age_lookup() {
        let screenings = fixtures::screenings();
        let second = find_screening(&screenings, 2).unwrap();
        assert_eq!(second.developmental_age(DevelopmentalDomain::LanguageCommunication), Some(24.0));
        let third = find_screening(&screenings, 3).unwrap();
        assert_eq!(third.developmental_age(DevelopmentalDomain::Cognitive), None);
    }

    #[test]
    fn test_missing_screening_is_not_found() {
        let screenings = fixtures::screenings();
        let err = find_screening(&screenings, 9).unwrap_err();
        assert_eq!(err, DomainError::NotFound(NotFoundError::Screening { number: 9 }));
    }

    #[test]
    fn test_completed_screening_requires_readiness_score() {
        let mut screening = fixtures::screenings().remove(0);
        screening.school_readiness_score = None;
        assert!(screening.validate().is_err());
    }

    #[test]
    fn test_duplicate_domain_results_rejected() {
        let mut screening = fixtures::screenings().remove(0);
        let dup = screening.results[0].clone();
        screening.results.push(dup);
        assert!(screening.validate().is_err());
    }
}
