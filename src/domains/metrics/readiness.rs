use crate::domains::child::types::{DevelopmentalAge, ReadinessImpact};
use crate::domains::screening::types::{completed_screenings, ScreeningEvent};
use crate::types::{DevelopmentalDomain, DomainMap};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainReadiness {
    pub score: Option<f64>,
    pub contribution: f64,
}

/// Overall readiness and each domain's share of it at one screening
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessMapping {
    pub screening_number: u32,
    pub screening: String,
    pub date: NaiveDate,
    pub age: f64,
    pub overall_school_readiness: Option<f64>,
    pub domains: DomainMap<DomainReadiness>,
}

pub fn school_readiness_mapping(screenings: &[ScreeningEvent]) -> Vec<ReadinessMapping> {
    completed_screenings(screenings)
        .into_iter()
        .map(|screening| ReadinessMapping {
            screening_number: screening.screening_number,
            screening: screening.label(),
            date: screening.date,
            age: screening.age_at_screening,
            overall_school_readiness: screening.school_readiness_score,
            domains: screening
                .results
                .iter()
                .map(|r| {
                    (
                        r.domain,
                        DomainReadiness {
                            score: r.score,
                            contribution: r.school_readiness_contribution,
                        },
                    )
                })
                .collect(),
        })
        .collect()
}

/// Domains whose delay weighs most on school entry
pub fn high_impact_domains(ages: &[DevelopmentalAge]) -> Vec<DevelopmentalDomain> {
    ages.iter()
        .filter(|a| a.school_readiness_impact == ReadinessImpact::High)
        .map(|a| a.domain)
        .collect()
}
