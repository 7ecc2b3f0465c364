use crate::domains::child::repository::{ChildRecord, ChildRepository};
use crate::domains::child::types::ReadinessImpact;
use crate::domains::export::csv_record::to_csv_bytes;
use crate::domains::export::types::{
    focus_recommendation, report_file_name, CaseStudyReport, ChildInfo, ExportMetadata, ExportRequest,
    NeuroDevelopmentalReport, ReportKind, SchoolReadinessFocus, ScreeningDetails, OVERALL_RECOMMENDATIONS,
    ROUTINE_NEXT_STEPS, SPECIALIST_NEXT_STEPS,
};
use crate::domains::metrics::aggregate::consolidated_stats;
use crate::domains::metrics::service::DevelopmentService;
use crate::domains::referral::types::is_eligible;
use crate::domains::screening::types::find_screening;
use crate::errors::{DomainError, NotFoundError, ServiceError, ServiceResult};
use chrono::{Duration, NaiveDate, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

const MAX_NAME_ATTEMPTS: u32 = 100;

/// `name.ext` on the first attempt, then `name_2.ext`, `name_3.ext`, ...
fn numbered_file_name(file_name: &str, attempt: u32) -> String {
    if attempt <= 1 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}_{}.{}", stem, attempt, ext),
        None => format!("{}_{}", file_name, attempt),
    }
}

/// Creates a file that did not exist before. Existing exports are never overwritten.
fn create_unique(dir: &Path, file_name: &str) -> ServiceResult<(String, PathBuf, fs::File)> {
    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let candidate = numbered_file_name(file_name, attempt);
        let path = dir.join(&candidate);
        match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((candidate, path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("{} already exists", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(ServiceError::Export(format!(
        "no free file name for {} in {}",
        file_name,
        dir.display()
    )))
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds child reports and writes them to disk
pub trait ExportService: Send + Sync {
    fn case_study(&self, child_id: &str) -> ServiceResult<CaseStudyReport>;

    fn neuro_developmental_report(&self, child_id: &str, screening: u32) -> ServiceResult<NeuroDevelopmentalReport>;

    fn export_child_report(&self, request: &ExportRequest) -> ServiceResult<ExportMetadata>;
}

pub struct ExportServiceImpl {
    child_repo: Arc<dyn ChildRepository>,
    development: Arc<dyn DevelopmentService>,
}

impl ExportServiceImpl {
    pub fn new(child_repo: Arc<dyn ChildRepository>, development: Arc<dyn DevelopmentService>) -> Self {
        Self {
            child_repo,
            development,
        }
    }

    fn build_case_study(&self, record: &ChildRecord) -> ServiceResult<CaseStudyReport> {
        let config = self.development.config();
        let child = &record.child;
        let stats = consolidated_stats(
            child.age_months_f64(),
            &record.developmental_ages,
            child.interventions.len(),
            &config.risk_thresholds,
        )?;

        let key_areas: Vec<_> = record
            .developmental_ages
            .iter()
            .filter(|a| a.school_readiness_impact == ReadinessImpact::High)
            .cloned()
            .collect();
        let focus_domains: Vec<_> = key_areas
            .iter()
            .filter(|a| a.status.is_concern())
            .map(|a| a.domain)
            .collect();

        let referral_journey = if is_eligible(child, config) {
            Some(record.referral_steps.clone())
        } else {
            None
        };

        Ok(CaseStudyReport {
            child_info: child.clone(),
            developmental_ages: record.developmental_ages.clone(),
            screening_results: record.screenings.clone(),
            consolidated_stats: stats,
            timeline_events: record.timeline.clone(),
            referral_journey,
            school_readiness_focus: SchoolReadinessFocus {
                current_score: child.school_readiness_score,
                target_score: config.school_readiness_target,
                key_areas,
                recommendations: focus_recommendation(&focus_domains),
            },
            timestamp: Utc::now(),
        })
    }

    fn build_neuro_report(&self, record: &ChildRecord, number: u32) -> ServiceResult<NeuroDevelopmentalReport> {
        let config = self.development.config();
        let child = &record.child;
        let screening = match find_screening(&record.screenings, number) {
            Ok(screening) if screening.report_generated => screening,
            Ok(_) | Err(DomainError::NotFound(NotFoundError::Screening { .. })) => {
                return Err(NotFoundError::ScreeningReport { number }.into());
            }
            Err(e) => return Err(e.into()),
        };

        let needs_specialist = screening
            .school_readiness_score
            .map_or(false, |score| score < config.specialist_readiness_threshold);
        let next_steps = if needs_specialist {
            to_strings(&SPECIALIST_NEXT_STEPS)
        } else {
            to_strings(&ROUTINE_NEXT_STEPS)
        };

        let generated = Utc::now();
        Ok(NeuroDevelopmentalReport {
            child_info: ChildInfo {
                name: child.name.clone(),
                age: format!("{} years ({} months)", child.age_years, screening.age_at_screening),
                gender: child.gender.as_str().to_string(),
                date_of_birth: child.date_of_birth.clone(),
                parent_name: child.parent_name.clone(),
                address: child.address.clone(),
            },
            screening_details: ScreeningDetails {
                screening_number: screening.screening_number,
                date: screening.date,
                age_at_screening: screening.age_at_screening,
                school_readiness_score: screening.school_readiness_score,
            },
            assessment_results: screening.results.clone(),
            carengrow_coordinator: child.carengrow_coordinator.name.clone(),
            anganwadi_center: child.anganwadi_center.name.clone(),
            anganwadi_teacher: child.anganwadi_teacher.name.clone(),
            overall_recommendations: to_strings(&OVERALL_RECOMMENDATIONS),
            next_steps,
            report_generated: generated,
            valid_until: generated + Duration::days(config.report_validity_days),
        })
    }

    fn write_file(&self, dir: &Path, file_name: String, contents: &[u8]) -> ServiceResult<ExportMetadata> {
        fs::create_dir_all(dir)?;
        let (file_name, path, mut file) = create_unique(dir, &file_name)?;
        file.write_all(contents)?;
        file.sync_all()?;

        let metadata = ExportMetadata {
            export_id: Uuid::new_v4(),
            file_name,
            path,
            bytes: contents.len() as u64,
            sha256: hex::encode(Sha256::digest(contents)),
            generated_at: Utc::now(),
        };
        log::info!(
            "Exported {} ({} bytes, sha256 {})",
            metadata.path.display(),
            metadata.bytes,
            metadata.sha256
        );
        Ok(metadata)
    }
}

impl ExportService for ExportServiceImpl {
    fn case_study(&self, child_id: &str) -> ServiceResult<CaseStudyReport> {
        let record = self.child_repo.find_by_id(child_id)?;
        self.build_case_study(&record)
    }

    fn neuro_developmental_report(&self, child_id: &str, screening: u32) -> ServiceResult<NeuroDevelopmentalReport> {
        let record = self.child_repo.find_by_id(child_id)?;
        self.build_neuro_report(&record, screening)
    }

    fn export_child_report(&self, request: &ExportRequest) -> ServiceResult<ExportMetadata> {
        if request.output_dir.as_os_str().is_empty() {
            return Err(ServiceError::Export("output directory is required".to_string()));
        }
        let record = self.child_repo.find_by_id(&request.child_id)?;
        let today: NaiveDate = Utc::now().date_naive();

        let (file_name, contents) = match request.kind {
            ReportKind::CaseStudy => {
                let report = self.build_case_study(&record)?;
                (
                    report_file_name(&record.child.id, &record.child.name, &request.kind, today),
                    serde_json::to_vec_pretty(&report)?,
                )
            }
            ReportKind::NeuroDevelopmental { screening } => {
                let report = self.build_neuro_report(&record, screening)?;
                (
                    report_file_name(&record.child.id, &record.child.name, &request.kind, report.screening_details.date),
                    serde_json::to_vec_pretty(&report)?,
                )
            }
            ReportKind::InterventionTargets => {
                let targets = self.development.intervention_targets(&request.child_id)?;
                (
                    report_file_name(&record.child.id, &record.child.name, &request.kind, today),
                    to_csv_bytes(&targets.domain_targets)?,
                )
            }
        };

        self.write_file(&request.output_dir, file_name, &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;
    use crate::domains::child::repository::InMemoryChildRepository;
    use crate::domains::child::types::RiskLevel;
    use crate::domains::metrics::service::DevelopmentServiceImpl;
    use crate::domains::settings::MetricsConfig;
    use crate::domains::touchpoint::catalog::InterventionCatalog;
    use tempfile::TempDir;

    fn service_with(records: Vec<ChildRecord>) -> ExportServiceImpl {
        let repo: Arc<dyn ChildRepository> = Arc::new(InMemoryChildRepository::with_records(records).unwrap());
        let development = Arc::new(DevelopmentServiceImpl::new(
            repo.clone(),
            Arc::new(InterventionCatalog::default()),
            Arc::new(MetricsConfig::default()),
        ));
        ExportServiceImpl::new(repo, development)
    }

    fn service() -> ExportServiceImpl {
        service_with(fixtures::all_records())
    }

    fn request(kind: ReportKind, dir: &TempDir) -> ExportRequest {
        ExportRequest {
            child_id: fixtures::SAMPLE_CHILD_ID.to_string(),
            kind,
            output_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn test_case_study_includes_referral_for_eligible_child() {
        let report = service().case_study(fixtures::SAMPLE_CHILD_ID).unwrap();
        assert_eq!(report.referral_journey.as_ref().map(Vec::len), Some(7));
        assert_eq!(report.school_readiness_focus.target_score, 85.0);
        assert_eq!(report.school_readiness_focus.key_areas.len(), 4);
        assert_eq!(report.consolidated_stats.overall_gap, -5.0);
    }

    #[test]
    fn test_case_study_omits_referral_when_not_eligible() {
        let mut record = fixtures::aadhya_sharma();
        record.child.delay_count = 1;
        let report = service_with(vec![record]).case_study(fixtures::SAMPLE_CHILD_ID).unwrap();
        assert!(report.referral_journey.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["referral_journey"].is_null());
    }

    #[test]
    fn test_neuro_report_next_steps_follow_readiness() {
        let service = service();

        let first = service.neuro_developmental_report(fixtures::SAMPLE_CHILD_ID, 1).unwrap();
        assert_eq!(first.screening_details.school_readiness_score, Some(65.0));
        assert_eq!(first.next_steps[0], "Consider specialist referral");
        assert_eq!(first.child_info.age, "3 years (33 months)");
        assert_eq!(first.child_info.gender, "Female");

        let second = service.neuro_developmental_report(fixtures::SAMPLE_CHILD_ID, 2).unwrap();
        assert_eq!(second.next_steps[0], "Continue current interventions");
        assert_eq!(second.valid_until - second.report_generated, Duration::days(90));
        assert_eq!(second.assessment_results.len(), 5);
    }

    #[test]
    fn test_neuro_report_requires_generated_screening() {
        let service = service();
        for number in [3, 9] {
            let err = service
                .neuro_developmental_report(fixtures::SAMPLE_CHILD_ID, number)
                .unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Domain(DomainError::NotFound(NotFoundError::ScreeningReport { number: n })) if n == number
            ));
        }
    }

    #[test]
    fn test_export_neuro_report_writes_file() {
        let dir = TempDir::new().unwrap();
        let metadata = service()
            .export_child_report(&request(ReportKind::NeuroDevelopmental { screening: 2 }, &dir))
            .unwrap();

        assert_eq!(
            metadata.file_name,
            "Aadhya_Sharma_Neuro_Developmental_Report_Screening_2_2024-07-15.json"
        );
        let written = fs::read(&metadata.path).unwrap();
        assert_eq!(written.len() as u64, metadata.bytes);
        assert_eq!(metadata.sha256, hex::encode(Sha256::digest(&written)));

        let json: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(json["screening_details"]["screening_number"], 2);
        assert_eq!(json["anganwadi_teacher"], fixtures::sample_child().anganwadi_teacher.name);
    }

    #[test]
    fn test_export_case_study_uses_today() {
        let dir = TempDir::new().unwrap();
        let metadata = service().export_child_report(&request(ReportKind::CaseStudy, &dir)).unwrap();
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(metadata.file_name.starts_with("Aadhya_Sharma_School_Readiness_Case_Study_"));
        assert!(metadata.file_name.ends_with(&format!("{}.json", today)));
        assert!(metadata.path.exists());
    }

    #[test]
    fn test_export_intervention_targets_csv() {
        let dir = TempDir::new().unwrap();
        let metadata = service()
            .export_child_report(&request(ReportKind::InterventionTargets, &dir))
            .unwrap();
        assert!(metadata.file_name.ends_with(".csv"));

        let text = fs::read_to_string(&metadata.path).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("Language & Communication"));
    }

    #[test]
    fn test_export_unknown_child() {
        let dir = TempDir::new().unwrap();
        let mut req = request(ReportKind::CaseStudy, &dir);
        req.child_id = "missing".to_string();
        let err = service().export_child_report(&req).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::NotFound(NotFoundError::Child(_)))
        ));
    }

    #[test]
    fn test_export_failure_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let err = service()
            .export_child_report(&request(ReportKind::NeuroDevelopmental { screening: 3 }, &dir))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    fn renamed(id: &str, name: &str) -> ChildRecord {
        let mut record = fixtures::aadhya_sharma();
        record.child.id = id.to_string();
        record.child.name = name.to_string();
        record
    }

    #[test]
    fn test_telugu_named_children_export_to_separate_files() {
        let dir = TempDir::new().unwrap();
        let service = service_with(vec![renamed("KUP-1", "ఆద్య శర్మ"), renamed("KUP-2", "లక్ష్మి రెడ్డి")]);

        let mut first = request(ReportKind::CaseStudy, &dir);
        first.child_id = "KUP-1".to_string();
        let mut second = request(ReportKind::CaseStudy, &dir);
        second.child_id = "KUP-2".to_string();

        let a = service.export_child_report(&first).unwrap();
        let b = service.export_child_report(&second).unwrap();
        assert_ne!(a.path, b.path);
        assert!(a.file_name.starts_with("ఆద్య_శర్మ_"));
        assert!(b.file_name.starts_with("లక్ష్మి_రెడ్డి_"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_repeat_export_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let service = service();
        let req = request(ReportKind::NeuroDevelopmental { screening: 2 }, &dir);

        let first = service.export_child_report(&req).unwrap();
        fs::write(&first.path, b"kept").unwrap();
        let second = service.export_child_report(&req).unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(
            second.file_name,
            "Aadhya_Sharma_Neuro_Developmental_Report_Screening_2_2024-07-15_2.json"
        );
        assert_eq!(fs::read(&first.path).unwrap(), b"kept");
    }

    #[test]
    fn test_numbered_file_name() {
        assert_eq!(numbered_file_name("a_b.csv", 1), "a_b.csv");
        assert_eq!(numbered_file_name("a_b.csv", 3), "a_b_3.csv");
        assert_eq!(numbered_file_name("report", 2), "report_2");
    }

    #[test]
    fn test_ineligible_by_risk_level() {
        let mut record = fixtures::aadhya_sharma();
        record.child.risk_level = RiskLevel::Low;
        let report = service_with(vec![record]).case_study(fixtures::SAMPLE_CHILD_ID).unwrap();
        assert!(report.referral_journey.is_none());
    }
}
