// =========================================================================
// SCREENING METRICS – FFI BINDINGS
// All payloads and results are JSON strings. Results must be released
// with free_string().
// =========================================================================
use crate::domains::cohort::service::CohortData;
use crate::domains::export::types::ExportRequest;
use crate::domains::metrics::{delta, dq};
use crate::domains::project::types::{programme_totals, ProgrammeTotals, ProjectSummary};
use crate::ffi::error::FFIError;
use crate::ffi::{ensure_ptr, handle_status_result, parse_payload, write_json_result};
use crate::globals;
use crate::types::DevelopmentalDomain;

use serde::{Deserialize, Serialize};
use std::os::raw::{c_char, c_int};

/// Payload { "child_id": "..." }
#[unsafe(no_mangle)]
pub unsafe extern "C" fn child_report(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        #[derive(Deserialize)] struct P { child_id: String }
        let p: P = parse_payload(payload_json)?;
        let svc = globals::get_development_service()?;
        let report = svc.child_report(&p.child_id).map_err(FFIError::from_service_error)?;
        write_json_result(&report, result)
    })
}

/// Payload { "child_id": "...", "domains": ["Language & Communication", ...] }
/// An absent domain list means every domain.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn child_dq_changes(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        #[derive(Deserialize)] struct P { child_id: String, domains: Option<Vec<DevelopmentalDomain>> }
        let p: P = parse_payload(payload_json)?;
        let domains = p.domains.unwrap_or_else(|| DevelopmentalDomain::ALL.to_vec());
        let svc = globals::get_development_service()?;
        let changes = svc.dq_changes(&p.child_id, &domains).map_err(FFIError::from_service_error)?;
        write_json_result(&changes, result)
    })
}

/// Payload { "child_id": "..." }
#[unsafe(no_mangle)]
pub unsafe extern "C" fn child_intervention_targets(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        #[derive(Deserialize)] struct P { child_id: String }
        let p: P = parse_payload(payload_json)?;
        let svc = globals::get_development_service()?;
        let targets = svc.intervention_targets(&p.child_id).map_err(FFIError::from_service_error)?;
        write_json_result(&targets, result)
    })
}

/// Payload { "developmental_age_months": 40, "chronological_age_months": 43 }
/// Result { "dq": 93 }
#[unsafe(no_mangle)]
pub unsafe extern "C" fn compute_dq(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        #[derive(Deserialize)] struct P { developmental_age_months: f64, chronological_age_months: f64 }
        #[derive(Serialize)] struct R { dq: i64 }
        let p: P = parse_payload(payload_json)?;
        let dq = dq::compute_dq(p.developmental_age_months, p.chronological_age_months)?;
        write_json_result(&R { dq }, result)
    })
}

/// Payload { "current": 72, "previous": 65 }; either side may be null.
/// Result is the change object, or `null` when a side is missing.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn score_change(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        #[derive(Deserialize)] struct P { current: Option<f64>, previous: Option<f64> }
        let p: P = parse_payload(payload_json)?;
        write_json_result(&delta::score_change(p.current, p.previous), result)
    })
}

/// Payload is an ExportRequest:
/// { "child_id": "...", "kind": "neuro_developmental", "screening": 2, "output_dir": "/path" }
/// Result is the ExportMetadata of the written file.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn export_child_report(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        let request: ExportRequest = parse_payload(payload_json)?;
        let svc = globals::get_export_service()?;
        let metadata = svc.export_child_report(&request).map_err(FFIError::from_service_error)?;
        write_json_result(&metadata, result)
    })
}

/// Payload { "data": CohortData } or {} for the bundled cohort
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cohort_analytics(payload_json: *const c_char, result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        #[derive(Deserialize)] struct P { #[serde(default)] data: Option<CohortData> }
        let p: P = parse_payload(payload_json)?;
        let svc = globals::get_cohort_service()?;
        let analytics = match p.data {
            Some(data) => svc.analytics_for(&data),
            None => svc.analytics(),
        }
        .map_err(FFIError::from_service_error)?;
        write_json_result(&analytics, result)
    })
}

#[derive(Debug, Serialize)]
struct ProjectOverview {
    projects: Vec<ProjectSummary>,
    totals: ProgrammeTotals,
}

/// No payload. Result { "projects": [ProjectSummary], "totals": ProgrammeTotals }
#[unsafe(no_mangle)]
pub unsafe extern "C" fn project_summaries(result: *mut *mut c_char) -> c_int {
    handle_status_result(|| unsafe {
        ensure_ptr!(result);
        let repo = globals::get_project_repo()?;
        let projects = repo.find_all()?;
        let overview = ProjectOverview {
            projects: projects.iter().map(|p| p.summary()).collect(),
            totals: programme_totals(&projects),
        };
        write_json_result(&overview, result)
    })
}
