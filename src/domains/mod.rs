pub mod child;
pub mod cohort;
pub mod export;
pub mod metrics;
pub mod project;
pub mod referral;
pub mod screening;
pub mod settings;
pub mod touchpoint;

pub use child::types::{Child, DevelopmentalAge};
pub use metrics::service::{ChildReport, DevelopmentService};
