pub mod types;

pub use types::{DelayStatusBands, MetricsConfig, ProjectionCurve, RiskThresholds, TrajectoryCurve, VillageRiskBands};
