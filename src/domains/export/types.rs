use crate::domains::child::types::{Child, DevelopmentalAge};
use crate::domains::metrics::aggregate::ConsolidatedStats;
use crate::domains::referral::types::ReferralJourneyStep;
use crate::domains::screening::types::{ScreeningEvent, ScreeningResult};
use crate::domains::touchpoint::types::TimelineEvent;
use crate::types::DevelopmentalDomain;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Which report to generate for a child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportKind {
    CaseStudy,
    NeuroDevelopmental { screening: u32 },
    InterventionTargets,
}

impl ReportKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportKind::CaseStudy | ReportKind::NeuroDevelopmental { .. } => "json",
            ReportKind::InterventionTargets => "csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub child_id: String,
    #[serde(flatten)]
    pub kind: ReportKind,
    pub output_dir: PathBuf,
}

/// Describes a file written by an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub export_id: Uuid,
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: u64,
    /// Hex-encoded SHA-256 of the file contents
    pub sha256: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolReadinessFocus {
    pub current_score: f64,
    pub target_score: f64,
    pub key_areas: Vec<DevelopmentalAge>,
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyReport {
    pub child_info: Child,
    pub developmental_ages: Vec<DevelopmentalAge>,
    pub screening_results: Vec<ScreeningEvent>,
    pub consolidated_stats: ConsolidatedStats,
    pub timeline_events: Vec<TimelineEvent>,
    pub referral_journey: Option<Vec<ReferralJourneyStep>>,
    pub school_readiness_focus: SchoolReadinessFocus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildInfo {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub date_of_birth: String,
    pub parent_name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningDetails {
    pub screening_number: u32,
    pub date: NaiveDate,
    pub age_at_screening: f64,
    pub school_readiness_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuroDevelopmentalReport {
    pub child_info: ChildInfo,
    pub screening_details: ScreeningDetails,
    pub assessment_results: Vec<ScreeningResult>,
    pub carengrow_coordinator: String,
    pub anganwadi_center: String,
    pub anganwadi_teacher: String,
    pub overall_recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub report_generated: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

pub const OVERALL_RECOMMENDATIONS: [&str; 4] = [
    "Continue language stimulation activities at home",
    "Regular follow-up screening in 3 months",
    "Maintain consistent intervention schedule",
    "Monitor school readiness progress closely",
];

pub const SPECIALIST_NEXT_STEPS: [&str; 3] = [
    "Consider specialist referral",
    "Intensive intervention program",
    "Family support counseling",
];

pub const ROUTINE_NEXT_STEPS: [&str; 3] = [
    "Continue current interventions",
    "Regular monitoring",
    "School preparation activities",
];

/// Builds the readiness recommendation from the domains that weigh most
pub fn focus_recommendation(domains: &[DevelopmentalDomain]) -> String {
    match domains {
        [] => "Maintain current activities for continued school readiness".to_string(),
        [only] => format!("Focus on {} for optimal school readiness", only.as_str().to_lowercase()),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(|d| d.as_str().to_lowercase()).collect();
            format!(
                "Focus on {} and {} for optimal school readiness",
                head.join(", "),
                last.as_str().to_lowercase()
            )
        }
    }
}

/// Child names become file-name safe: every whitespace character turns into
/// an underscore, ASCII outside `[A-Za-z0-9_-]` is dropped and control
/// characters are dropped. Other Unicode (letters, combining marks) is kept.
pub fn sanitize_file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii() {
                (c.is_ascii_alphanumeric() || c == '-' || c == '_').then_some(c)
            } else if c.is_control() {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

/// File stem for a child: the sanitised name, or the sanitised id when the
/// name leaves nothing alphanumeric
pub fn child_file_stem(child_id: &str, child_name: &str) -> String {
    let stem = sanitize_file_stem(child_name);
    if stem.chars().any(char::is_alphanumeric) {
        return stem;
    }
    let id = sanitize_file_stem(child_id);
    if id.chars().any(char::is_alphanumeric) {
        id
    } else {
        "child".to_string()
    }
}

pub fn report_file_name(child_id: &str, child_name: &str, kind: &ReportKind, date: NaiveDate) -> String {
    let stem = child_file_stem(child_id, child_name);
    let date = date.format("%Y-%m-%d");
    match kind {
        ReportKind::CaseStudy => format!("{}_School_Readiness_Case_Study_{}.json", stem, date),
        ReportKind::NeuroDevelopmental { screening } => {
            format!("{}_Neuro_Developmental_Report_Screening_{}_{}.json", stem, screening, date)
        }
        ReportKind::InterventionTargets => format!("{}_Intervention_Targets_{}.csv", stem, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Aadhya Sharma"), "Aadhya_Sharma");
        assert_eq!(sanitize_file_stem("Sai  Krishna Reddy"), "Sai__Krishna_Reddy");
        assert_eq!(sanitize_file_stem("Anu/../Rao"), "AnuRao");
        assert_eq!(sanitize_file_stem("Mary-Jane\tO'Neil"), "Mary-Jane_ONeil");
        assert_eq!(sanitize_file_stem("Zoë Ångström"), "Zoë_Ångström");
        assert_eq!(sanitize_file_stem("ఆద్య శర్మ"), "ఆద్య_శర్మ");
    }

    #[test]
    fn test_telugu_names_give_distinct_file_names() {
        let date = day(2024, 7, 15);
        let first = report_file_name("KUP-1", "ఆద్య శర్మ", &ReportKind::CaseStudy, date);
        let second = report_file_name("KUP-2", "లక్ష్మి రెడ్డి", &ReportKind::CaseStudy, date);
        assert_ne!(first, second);
        assert_eq!(first, "ఆద్య_శర్మ_School_Readiness_Case_Study_2024-07-15.json");
    }

    #[test]
    fn test_empty_stem_falls_back_to_child_id() {
        assert_eq!(child_file_stem("KUP-AWC012-0045", "?? !!"), "KUP-AWC012-0045");
        assert_eq!(child_file_stem("///", "..."), "child");
    }

    #[test]
    fn test_report_file_names() {
        let date = day(2024, 7, 15);
        assert_eq!(
            report_file_name("KUP-1", "Aadhya Sharma", &ReportKind::CaseStudy, date),
            "Aadhya_Sharma_School_Readiness_Case_Study_2024-07-15.json"
        );
        assert_eq!(
            report_file_name("KUP-1", "Aadhya Sharma", &ReportKind::NeuroDevelopmental { screening: 2 }, date),
            "Aadhya_Sharma_Neuro_Developmental_Report_Screening_2_2024-07-15.json"
        );
        assert_eq!(
            report_file_name("KUP-1", "Aadhya Sharma", &ReportKind::InterventionTargets, date),
            "Aadhya_Sharma_Intervention_Targets_2024-07-15.csv"
        );
    }

    #[test]
    fn test_report_kind_json_shape() {
        let kind: ReportKind = serde_json::from_str(r#"{"kind":"neuro_developmental","screening":1}"#).unwrap();
        assert_eq!(kind, ReportKind::NeuroDevelopmental { screening: 1 });
        assert_eq!(kind.extension(), "json");

        let request: ExportRequest =
            serde_json::from_str(r#"{"child_id":"x","kind":"case_study","output_dir":"/tmp"}"#).unwrap();
        assert_eq!(request.kind, ReportKind::CaseStudy);
    }

    #[test]
    fn test_focus_recommendation() {
        use DevelopmentalDomain::*;
        assert_eq!(
            focus_recommendation(&[LanguageCommunication, SocialEmotional]),
            "Focus on language & communication and social-emotional for optimal school readiness"
        );
        assert_eq!(
            focus_recommendation(&[Cognitive]),
            "Focus on cognitive development for optimal school readiness"
        );
    }
}
