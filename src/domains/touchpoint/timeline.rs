use crate::domains::touchpoint::types::{EventStatus, TimelineEvent, TouchpointCategory};
use serde::Serialize;
use std::collections::BTreeMap;

/// Category counts and lifecycle split for a child's timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSummary {
    pub category_counts: BTreeMap<TouchpointCategory, usize>,
    pub total_events: usize,
    pub completed: usize,
    pub scheduled: usize,
}

/// Events ordered by the child's age at the event; ties keep input order
pub fn sorted_by_age(events: &[TimelineEvent]) -> Vec<TimelineEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.age_in_months.total_cmp(&b.age_in_months));
    sorted
}

/// Completed events first, then the ones still scheduled
pub fn partition_by_status(events: &[TimelineEvent]) -> (Vec<&TimelineEvent>, Vec<&TimelineEvent>) {
    let completed = events.iter().filter(|e| e.status == EventStatus::Completed).collect();
    let scheduled = events.iter().filter(|e| e.status == EventStatus::Scheduled).collect();
    (completed, scheduled)
}

pub fn summarize(events: &[TimelineEvent]) -> TimelineSummary {
    let mut category_counts: BTreeMap<TouchpointCategory, usize> =
        TouchpointCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for event in events {
        *category_counts.entry(event.touchpoint_category).or_insert(0) += 1;
    }

    let (completed, scheduled) = partition_by_status(events);
    TimelineSummary {
        category_counts,
        total_events: events.len(),
        completed: completed.len(),
        scheduled: scheduled.len(),
    }
}
