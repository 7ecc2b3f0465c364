//! Display helpers shared by the report builders and the debug binary.

use crate::types::Trend;

/// `36` -> `"3y"`, `30` -> `"2y 6m"`, `9` -> `"9m"`
pub fn format_age_display(months: u32) -> String {
    let years = months / 12;
    let remaining = months % 12;
    match (years, remaining) {
        (0, m) => format!("{}m", m),
        (y, 0) => format!("{}y", y),
        (y, m) => format!("{}y {}m", y, m),
    }
}

/// Signed gap in months, e.g. `"-12 months"` or `"+2 months"`
pub fn format_gap(gap_months: f64) -> String {
    let unit = if gap_months.abs() == 1.0 { "month" } else { "months" };
    if gap_months > 0.0 {
        format!("+{} {}", gap_months, unit)
    } else {
        format!("{} {}", gap_months, unit)
    }
}

/// Band used when colouring a school readiness score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessBand {
    Ready,
    Approaching,
    NeedsSupport,
}

impl ReadinessBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ReadinessBand::Ready
        } else if score >= 70.0 {
            ReadinessBand::Approaching
        } else {
            ReadinessBand::NeedsSupport
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessBand::Ready => "School ready",
            ReadinessBand::Approaching => "Approaching readiness",
            ReadinessBand::NeedsSupport => "Needs support",
        }
    }
}

pub fn trend_symbol(trend: Trend) -> &'static str {
    match trend {
        Trend::Improvement => "↑",
        Trend::Decline => "↓",
        Trend::Stable => "=",
    }
}
