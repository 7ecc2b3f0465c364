//! Developmental screening metrics for the CarEnGrow programme: DQ and
//! delay analytics per child, cohort dashboards, project summaries and
//! report export, exposed to host apps over a JSON C interface.

// Public modules
pub mod domains;
pub mod errors;
pub mod ffi;
pub mod format;
pub mod globals;
pub mod types;
pub mod validation;

use domains::settings::MetricsConfig;

/// Initializes the library with configuration read from the environment.
/// Must be called before any service is requested from `globals`.
pub fn initialize() -> errors::ServiceResult<()> {
    globals::initialize(MetricsConfig::from_env()?)
}
