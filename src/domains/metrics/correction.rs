use crate::domains::screening::types::{completed_screenings, next_scheduled, ScreeningEvent};
use crate::errors::{DomainError, DomainResult};
use crate::types::{round_to_i64, DevelopmentalDomain, DomainMap};
use chrono::NaiveDate;
use serde::Serialize;

/// Developmental ages and gaps at one screening. Unmeasured domains hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionPoint {
    pub screening_number: u32,
    pub screening: String,
    pub date: NaiveDate,
    pub chronological_age: f64,
    pub developmental_ages: DomainMap<Option<f64>>,
    pub gaps: DomainMap<Option<f64>>,
}

impl ProgressionPoint {
    fn age(&self, domain: DevelopmentalDomain) -> Option<f64> {
        self.developmental_ages.get(&domain).copied().flatten()
    }

    fn gap(&self, domain: DevelopmentalDomain) -> Option<f64> {
        self.gaps.get(&domain).copied().flatten()
    }
}

/// Completed screenings followed by the next scheduled one, so the chart
/// shows where the following data point will land.
pub fn developmental_age_progression(screenings: &[ScreeningEvent]) -> DomainResult<Vec<ProgressionPoint>> {
    let mut points: Vec<&ScreeningEvent> = completed_screenings(screenings);
    if let Some(next) = next_scheduled(screenings) {
        let after_last = points.last().map_or(true, |last| next.screening_number > last.screening_number);
        if after_last {
            points.push(next);
        }
    }

    points
        .into_iter()
        .map(|screening| -> DomainResult<ProgressionPoint> {
            let chronological_age = screening.age_at_screening;
            if !chronological_age.is_finite() || chronological_age <= 0.0 {
                return Err(DomainError::degenerate_age("age_at_screening", chronological_age));
            }

            let mut developmental_ages = DomainMap::new();
            let mut gaps = DomainMap::new();
            for domain in DevelopmentalDomain::ALL {
                let age = screening.developmental_age(domain);
                developmental_ages.insert(domain, age);
                gaps.insert(domain, age.map(|a| a - chronological_age));
            }

            Ok(ProgressionPoint {
                screening_number: screening.screening_number,
                screening: screening.label(),
                date: screening.date,
                chronological_age,
                developmental_ages,
                gaps,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionTrend {
    Improving,
    Declining,
    Stable,
}

impl CorrectionTrend {
    pub fn from_rate(rate: f64) -> Self {
        if rate > 0.0 {
            CorrectionTrend::Improving
        } else if rate < 0.0 {
            CorrectionTrend::Declining
        } else {
            CorrectionTrend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainCorrection {
    pub previous_age: f64,
    pub current_age: f64,
    pub developmental_growth: f64,
    pub expected_growth: f64,
    /// Developmental growth beyond (or short of) chronological growth, in months
    pub correction_rate: f64,
    /// `correction_rate` as a percentage of the previous gap's magnitude.
    /// `None` when the previous gap was zero.
    pub correction_percentage: Option<i64>,
    pub trend: CorrectionTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCorrection {
    pub period: String,
    pub timespan: String,
    pub chronological_growth: f64,
    pub corrections: DomainMap<DomainCorrection>,
}

/// Delay correction for each adjacent pair of progression points.
/// Domains unmeasured at either end are skipped for that period.
pub fn delay_correction(progression: &[ProgressionPoint]) -> Vec<PeriodCorrection> {
    progression
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            let expected_growth = current.chronological_age - previous.chronological_age;

            let mut corrections = DomainMap::new();
            for domain in DevelopmentalDomain::ALL {
                let (Some(previous_age), Some(current_age)) = (previous.age(domain), current.age(domain)) else {
                    continue;
                };
                let developmental_growth = current_age - previous_age;
                let correction_rate = developmental_growth - expected_growth;
                let correction_percentage = previous
                    .gap(domain)
                    .filter(|gap| *gap != 0.0)
                    .map(|gap| round_to_i64(correction_rate / gap.abs() * 100.0));

                corrections.insert(
                    domain,
                    DomainCorrection {
                        previous_age,
                        current_age,
                        developmental_growth,
                        expected_growth,
                        correction_rate,
                        correction_percentage,
                        trend: CorrectionTrend::from_rate(correction_rate),
                    },
                );
            }

            PeriodCorrection {
                period: format!("{} → {}", previous.screening, current.screening),
                timespan: format!("{} to {}", previous.date, current.date),
                chronological_growth: expected_growth,
                corrections,
            }
        })
        .collect()
}
