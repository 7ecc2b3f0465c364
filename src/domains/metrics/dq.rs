use crate::domains::screening::types::{completed_screenings, ScreeningEvent};
use crate::errors::{DomainError, DomainResult};
use crate::types::{round_to_i64, DomainMap};
use chrono::NaiveDate;
use serde::Serialize;

/// Unrounded `developmental / chronological * 100`.
///
/// Zero, negative or non-finite chronological ages are rejected instead of
/// producing an infinite or NaN quotient.
pub fn dq_ratio(developmental_age_months: f64, chronological_age_months: f64) -> DomainResult<f64> {
    if !chronological_age_months.is_finite() || chronological_age_months <= 0.0 {
        return Err(DomainError::degenerate_age("chronological_age_months", chronological_age_months));
    }
    if !developmental_age_months.is_finite() || developmental_age_months < 0.0 {
        return Err(DomainError::degenerate_age("developmental_age_months", developmental_age_months));
    }
    Ok(developmental_age_months / chronological_age_months * 100.0)
}

/// Developmental Quotient, `round(developmental / chronological * 100)`
pub fn compute_dq(developmental_age_months: f64, chronological_age_months: f64) -> DomainResult<i64> {
    dq_ratio(developmental_age_months, chronological_age_months).map(round_to_i64)
}

/// Per-domain DQ at one completed screening
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DqPoint {
    pub screening_number: u32,
    pub screening: String,
    pub date: NaiveDate,
    pub age: f64,
    pub dq: DomainMap<i64>,
}

/// DQ for every completed screening. Domains without a measured age are left out.
pub fn dq_series(screenings: &[ScreeningEvent]) -> DomainResult<Vec<DqPoint>> {
    completed_screenings(screenings)
        .into_iter()
        .map(|screening| -> DomainResult<DqPoint> {
            let mut dq = DomainMap::new();
            for (domain, age) in &screening.developmental_ages {
                if let Some(age) = age {
                    dq.insert(*domain, compute_dq(*age, screening.age_at_screening)?);
                }
            }
            log::debug!("{}: DQ {:?}", screening.label(), dq);
            Ok(DqPoint {
                screening_number: screening.screening_number,
                screening: screening.label(),
                date: screening.date,
                age: screening.age_at_screening,
                dq,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;
    use crate::types::DevelopmentalDomain;

    #[test]
    fn test_compute_dq_example() {
        assert_eq!(compute_dq(34.0, 36.0).unwrap(), 94);
        assert_eq!(compute_dq(24.0, 36.0).unwrap(), 67);
        assert_eq!(compute_dq(36.0, 36.0).unwrap(), 100);
    }

    #[test]
    fn test_compute_dq_matches_formula() {
        for (dev, chron) in [(20.0, 33.0), (31.0, 33.0), (35.0, 36.0), (7.5, 12.0), (50.0, 40.0)] {
            let expected = ((dev / chron * 100.0) + 0.5_f64).floor() as i64;
            assert_eq!(compute_dq(dev, chron).unwrap(), expected);
        }
    }

    #[test]
    fn test_compute_dq_rejects_degenerate_age() {
        assert_eq!(
            compute_dq(34.0, 0.0),
            Err(DomainError::degenerate_age("chronological_age_months", 0.0))
        );
        assert!(compute_dq(34.0, -3.0).is_err());
        assert!(compute_dq(f64::NAN, 36.0).is_err());
    }

    #[test]
    fn test_dq_series_over_fixture_screenings() {
        let series = dq_series(&fixtures::screenings()).unwrap();
        assert_eq!(series.len(), 2);

        let first = &series[0];
        assert_eq!(first.screening, "Screening 1");
        assert_eq!(first.dq[&DevelopmentalDomain::GrossMotor], 94);
        assert_eq!(first.dq[&DevelopmentalDomain::LanguageCommunication], 61);

        let second = &series[1];
        assert_eq!(second.dq[&DevelopmentalDomain::FineMotor], 97);
        assert_eq!(second.dq[&DevelopmentalDomain::SocialEmotional], 83);
        assert_eq!(second.dq[&DevelopmentalDomain::Cognitive], 92);
    }

    #[test]
    fn test_dq_series_skips_missing_domains() {
        let mut screenings = fixtures::screenings();
        screenings[0]
            .developmental_ages
            .insert(DevelopmentalDomain::Cognitive, None);
        let series = dq_series(&screenings).unwrap();
        assert_eq!(series[0].dq.len(), 4);
        assert!(!series[0].dq.contains_key(&DevelopmentalDomain::Cognitive));
    }
}
