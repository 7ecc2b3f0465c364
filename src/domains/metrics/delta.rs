use crate::domains::metrics::dq::DqPoint;
use crate::domains::screening::types::ScreeningEvent;
use crate::types::{DevelopmentalDomain, DomainMap, Trend};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreChange {
    pub change: f64,
    pub trend: Trend,
}

/// Change from `previous` to `current`.
///
/// `None` on either side means the score is missing and no comparison is
/// made. A score of zero is a real score.
pub fn score_change(current: Option<f64>, previous: Option<f64>) -> Option<ScoreChange> {
    let (current, previous) = (current?, previous?);
    let change = current - previous;
    Some(ScoreChange {
        change,
        trend: Trend::from_change(change),
    })
}

/// Per-domain score changes between two screenings, skipping unscored domains
pub fn result_score_changes(previous: &ScreeningEvent, current: &ScreeningEvent) -> DomainMap<ScoreChange> {
    DevelopmentalDomain::ALL
        .iter()
        .filter_map(|domain| {
            let now = current.result(*domain).and_then(|r| r.score);
            let before = previous.result(*domain).and_then(|r| r.score);
            score_change(now, before).map(|c| (*domain, c))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainDqChange {
    pub previous: i64,
    pub current: i64,
    pub change: i64,
    pub trend: Trend,
}

/// DQ movement between two adjacent completed screenings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodDqChanges {
    pub period: String,
    pub timespan: String,
    pub age_band: String,
    pub changes: DomainMap<DomainDqChange>,
}

/// Adjacent-pair DQ changes for the selected domains.
/// A domain missing at either end of a period is left out of that period.
pub fn dq_changes(series: &[DqPoint], domains: &[DevelopmentalDomain]) -> Vec<PeriodDqChanges> {
    series
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            let changes = domains
                .iter()
                .filter_map(|domain| {
                    let before = *previous.dq.get(domain)?;
                    let now = *current.dq.get(domain)?;
                    let change = now - before;
                    Some((
                        *domain,
                        DomainDqChange {
                            previous: before,
                            current: now,
                            change,
                            trend: Trend::from_change(change as f64),
                        },
                    ))
                })
                .collect();

            PeriodDqChanges {
                period: format!("{} → {}", previous.screening, current.screening),
                timespan: format!("{} to {}", previous.date, current.date),
                age_band: format!("{}-{} months", previous.age, current.age),
                changes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;
    use crate::domains::metrics::dq::dq_series;
    use crate::domains::screening::types::find_screening;

    #[test]
    fn test_score_change_example() {
        let change = score_change(Some(78.0), Some(65.0)).unwrap();
        assert_eq!(change.change, 13.0);
        assert_eq!(change.trend, Trend::Improvement);
    }

    #[test]
    fn test_trend_follows_sign() {
        assert_eq!(score_change(Some(50.0), Some(60.0)).unwrap().trend, Trend::Decline);
        let stable = score_change(Some(42.0), Some(42.0)).unwrap();
        assert_eq!(stable.trend, Trend::Stable);
        assert_eq!(stable.change, 0.0);
    }

    #[test]
    fn test_missing_scores_give_no_comparison() {
        assert_eq!(score_change(None, Some(50.0)), None);
        assert_eq!(score_change(Some(50.0), None), None);
        assert_eq!(score_change(None, None), None);
    }

    #[test]
    fn test_zero_is_a_real_score() {
        let change = score_change(Some(12.0), Some(0.0)).unwrap();
        assert_eq!(change.change, 12.0);
        assert_eq!(change.trend, Trend::Improvement);

        let change = score_change(Some(0.0), Some(5.0)).unwrap();
        assert_eq!(change.trend, Trend::Decline);
    }

    #[test]
    fn test_result_score_changes_between_fixture_screenings() {
        let screenings = fixtures::screenings();
        let first = find_screening(&screenings, 1).unwrap();
        let second = find_screening(&screenings, 2).unwrap();
        let changes = result_score_changes(first, second);

        assert_eq!(changes.len(), 5);
        assert_eq!(changes[&DevelopmentalDomain::GrossMotor].change, 7.0);
        assert_eq!(changes[&DevelopmentalDomain::LanguageCommunication].change, 10.0);

        let third = find_screening(&screenings, 3).unwrap();
        assert!(result_score_changes(second, third).is_empty());
    }

    #[test]
    fn test_dq_changes_for_selected_domains() {
        let series = dq_series(&fixtures::screenings()).unwrap();
        let periods = dq_changes(
            &series,
            &[DevelopmentalDomain::LanguageCommunication, DevelopmentalDomain::SocialEmotional],
        );
        assert_eq!(periods.len(), 1);

        let period = &periods[0];
        assert_eq!(period.period, "Screening 1 → Screening 2");
        assert_eq!(period.timespan, "2024-04-15 to 2024-07-15");
        assert_eq!(period.age_band, "33-36 months");
        assert_eq!(period.changes.len(), 2);

        let language = &period.changes[&DevelopmentalDomain::LanguageCommunication];
        assert_eq!((language.previous, language.current, language.change), (61, 67, 6));
        assert_eq!(language.trend, Trend::Improvement);

        let social = &period.changes[&DevelopmentalDomain::SocialEmotional];
        assert_eq!((social.previous, social.current), (85, 83));
        assert_eq!(social.trend, Trend::Decline);
    }

    #[test]
    fn test_single_screening_has_no_periods() {
        let series = dq_series(&fixtures::screenings()[..1]).unwrap();
        assert!(dq_changes(&series, &DevelopmentalDomain::ALL).is_empty());
    }
}
