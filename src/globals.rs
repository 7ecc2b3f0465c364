use crate::domains::child::fixtures as child_fixtures;
use crate::domains::child::repository::{ChildRecord, ChildRepository, InMemoryChildRepository};
use crate::domains::cohort::service::{CohortData, CohortService, CohortServiceImpl};
use crate::domains::export::service::{ExportService, ExportServiceImpl};
use crate::domains::metrics::service::{DevelopmentService, DevelopmentServiceImpl};
use crate::domains::project::repository::{seed_projects, InMemoryProjectRepository, ProjectRepository};
use crate::domains::project::types::Project;
use crate::domains::settings::MetricsConfig;
use crate::domains::touchpoint::catalog::InterventionCatalog;
use crate::errors::{ServiceError, ServiceResult};
use crate::validation::Validate;
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// Global state definitions
lazy_static! {
    static ref INIT_MUTEX: Mutex<()> = Mutex::new(());
    static ref INITIALIZED: AtomicBool = AtomicBool::new(false);

    static ref CONFIG: Mutex<Option<Arc<MetricsConfig>>> = Mutex::new(None);
    static ref CHILD_REPO: Mutex<Option<Arc<dyn ChildRepository>>> = Mutex::new(None);
    static ref PROJECT_REPO: Mutex<Option<Arc<dyn ProjectRepository>>> = Mutex::new(None);
    static ref DEVELOPMENT_SERVICE: Mutex<Option<Arc<dyn DevelopmentService>>> = Mutex::new(None);
    static ref COHORT_SERVICE: Mutex<Option<Arc<dyn CohortService>>> = Mutex::new(None);
    static ref EXPORT_SERVICE: Mutex<Option<Arc<dyn ExportService>>> = Mutex::new(None);
}

/// Seed data handed to the registry at start-up
pub struct RegistryData {
    pub children: Vec<ChildRecord>,
    pub projects: Vec<Project>,
    pub cohort: CohortData,
    pub catalog: InterventionCatalog,
}

impl Default for RegistryData {
    fn default() -> Self {
        Self {
            children: child_fixtures::all_records(),
            projects: seed_projects(),
            cohort: CohortData::kuppam(),
            catalog: InterventionCatalog::default(),
        }
    }
}

fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        #[cfg(debug_assertions)]
        std::env::set_var("RUST_LOG", "debug");
        #[cfg(not(debug_assertions))]
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = env_logger::try_init();
}

fn store<T: ?Sized>(slot: &Mutex<Option<Arc<T>>>, name: &str, value: Arc<T>) -> ServiceResult<()> {
    let mut guard = slot
        .lock()
        .map_err(|_| ServiceError::Internal(format!("{} lock poisoned", name)))?;
    *guard = Some(value);
    Ok(())
}

fn load<T: ?Sized>(slot: &Mutex<Option<Arc<T>>>, name: &str) -> ServiceResult<Arc<T>> {
    slot.lock()
        .map_err(|_| ServiceError::Internal(format!("{} lock poisoned", name)))?
        .clone()
        .ok_or(ServiceError::NotInitialized)
}

/// Initializes the registry with the bundled programme data
pub fn initialize(config: MetricsConfig) -> ServiceResult<()> {
    initialize_with(config, RegistryData::default())
}

/// Initializes (or re-initializes) every service from `data`
pub fn initialize_with(config: MetricsConfig, data: RegistryData) -> ServiceResult<()> {
    init_logging();

    let _guard = INIT_MUTEX
        .lock()
        .map_err(|_| ServiceError::Internal("INIT_MUTEX lock poisoned".to_string()))?;

    log::info!("Starting carengrow core initialization");
    config
        .validate()
        .map_err(|e| ServiceError::Configuration(e.to_string()))?;
    log::debug!(
        "Config: growth target {} over {} months, readiness target {}",
        config.dq_growth_target,
        config.projection_horizon_months,
        config.school_readiness_target
    );

    let config = Arc::new(config);
    let child_repo: Arc<dyn ChildRepository> = Arc::new(InMemoryChildRepository::with_records(data.children)?);
    let project_repo: Arc<dyn ProjectRepository> = Arc::new(InMemoryProjectRepository::with_projects(data.projects)?);
    let development: Arc<dyn DevelopmentService> = Arc::new(DevelopmentServiceImpl::new(
        child_repo.clone(),
        Arc::new(data.catalog),
        config.clone(),
    ));
    let cohort: Arc<dyn CohortService> = Arc::new(CohortServiceImpl::new(Arc::new(data.cohort), config.clone()));
    let export: Arc<dyn ExportService> = Arc::new(ExportServiceImpl::new(child_repo.clone(), development.clone()));

    log::debug!("Loaded {} children", child_repo.count()?);

    store(&CONFIG, "CONFIG", config)?;
    store(&CHILD_REPO, "CHILD_REPO", child_repo)?;
    store(&PROJECT_REPO, "PROJECT_REPO", project_repo)?;
    store(&DEVELOPMENT_SERVICE, "DEVELOPMENT_SERVICE", development)?;
    store(&COHORT_SERVICE, "COHORT_SERVICE", cohort)?;
    store(&EXPORT_SERVICE, "EXPORT_SERVICE", export)?;

    INITIALIZED.store(true, Ordering::SeqCst);
    log::info!("Carengrow core initialized");
    Ok(())
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

pub fn get_config() -> ServiceResult<Arc<MetricsConfig>> {
    load(&CONFIG, "CONFIG")
}

pub fn get_child_repo() -> ServiceResult<Arc<dyn ChildRepository>> {
    load(&CHILD_REPO, "CHILD_REPO")
}

pub fn get_project_repo() -> ServiceResult<Arc<dyn ProjectRepository>> {
    load(&PROJECT_REPO, "PROJECT_REPO")
}

pub fn get_development_service() -> ServiceResult<Arc<dyn DevelopmentService>> {
    load(&DEVELOPMENT_SERVICE, "DEVELOPMENT_SERVICE")
}

pub fn get_cohort_service() -> ServiceResult<Arc<dyn CohortService>> {
    load(&COHORT_SERVICE, "COHORT_SERVICE")
}

pub fn get_export_service() -> ServiceResult<Arc<dyn ExportService>> {
    load(&EXPORT_SERVICE, "EXPORT_SERVICE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_empty_slot_is_not_initialized() {
        let slot: Mutex<Option<Arc<MetricsConfig>>> = Mutex::new(None);
        assert!(matches!(load(&slot, "TEST"), Err(ServiceError::NotInitialized)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = MetricsConfig::default();
        config.projection_horizon_months = 0.0;
        let err = initialize(config).unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn test_initialize_wires_services() {
        initialize(MetricsConfig::default()).unwrap();
        assert!(is_initialized());

        let report = get_development_service()
            .unwrap()
            .child_report(child_fixtures::SAMPLE_CHILD_ID)
            .unwrap();
        assert_eq!(report.child.id, child_fixtures::SAMPLE_CHILD_ID);
        assert_eq!(get_project_repo().unwrap().find_all().unwrap().len(), 3);
        assert!(get_cohort_service().unwrap().analytics().is_ok());
    }
}
