pub mod fixtures;
pub mod service;
pub mod types;

pub use service::{CohortAnalytics, CohortData, CohortService, CohortServiceImpl};
pub use types::{
    high_risk_summary, improvement_summary, rank_high_risk, rank_improvements, regional_overview, village_risk,
    VillageRiskBand,
};
