use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{DomainError, ValidationError};

/// The five screening domains tracked for every child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DevelopmentalDomain {
    #[serde(rename = "Gross Motor Skills")]
    GrossMotor,
    #[serde(rename = "Fine Motor Skills")]
    FineMotor,
    #[serde(rename = "Language & Communication")]
    LanguageCommunication,
    #[serde(rename = "Social-Emotional")]
    SocialEmotional,
    #[serde(rename = "Cognitive Development")]
    Cognitive,
}

impl DevelopmentalDomain {
    pub const ALL: [DevelopmentalDomain; 5] = [
        DevelopmentalDomain::GrossMotor,
        DevelopmentalDomain::FineMotor,
        DevelopmentalDomain::LanguageCommunication,
        DevelopmentalDomain::SocialEmotional,
        DevelopmentalDomain::Cognitive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopmentalDomain::GrossMotor => "Gross Motor Skills",
            DevelopmentalDomain::FineMotor => "Fine Motor Skills",
            DevelopmentalDomain::LanguageCommunication => "Language & Communication",
            DevelopmentalDomain::SocialEmotional => "Social-Emotional",
            DevelopmentalDomain::Cognitive => "Cognitive Development",
        }
    }

    /// Short key used in CSV headers and cohort score tables
    pub fn short_key(&self) -> &'static str {
        match self {
            DevelopmentalDomain::GrossMotor => "gross_motor",
            DevelopmentalDomain::FineMotor => "fine_motor",
            DevelopmentalDomain::LanguageCommunication => "language",
            DevelopmentalDomain::SocialEmotional => "social",
            DevelopmentalDomain::Cognitive => "cognitive",
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        Self::ALL.iter().map(|d| d.as_str()).collect()
    }
}

impl fmt::Display for DevelopmentalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DevelopmentalDomain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle) || d.short_key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                DomainError::Validation(ValidationError::invalid_value(
                    "domain",
                    &format!("unknown developmental domain '{}'", s),
                ))
            })
    }
}

/// Per-domain values, ordered by domain
pub type DomainMap<T> = BTreeMap<DevelopmentalDomain, T>;

/// Direction of a score or DQ change between two screenings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improvement,
    Decline,
    Stable,
}

impl Trend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Trend::Improvement
        } else if change < 0.0 {
            Trend::Decline
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improvement => "improvement",
            Trend::Decline => "decline",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rounds half-up (towards positive infinity), the way the dashboard did.
/// `f64::round` rounds -2.5 to -3; this returns -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds half-up and narrows to an integer
pub fn round_to_i64(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Rounds to one decimal place, used for rates and percentages
pub fn round_one_decimal(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
