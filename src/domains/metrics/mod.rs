pub mod aggregate;
pub mod correction;
pub mod delta;
pub mod dq;
pub mod projection;
pub mod readiness;
pub mod service;

pub use aggregate::{consolidated_stats, ConsolidatedStats, OverallRisk};
pub use correction::{delay_correction, developmental_age_progression, CorrectionTrend, PeriodCorrection};
pub use delta::{dq_changes, score_change, ScoreChange};
pub use dq::{compute_dq, dq_series, DqPoint};
pub use projection::{
    intervention_targets, projection_timeline, trajectory_comparison, DomainTarget, InterventionTargets, Priority,
};
pub use readiness::school_readiness_mapping;
pub use service::{ChildReport, DevelopmentService, DevelopmentServiceImpl};
