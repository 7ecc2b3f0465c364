pub mod fixtures;
pub mod repository;
pub mod types;

pub use repository::{ChildRecord, ChildRepository, InMemoryChildRepository};
pub use types::{
    AnganwadiCenter, AnganwadiTeacher, CarengrowCoordinator, Child, ChildStatus, DelayStatus, DevelopmentalAge,
    Gender, ReadinessImpact, RiskLevel,
};
