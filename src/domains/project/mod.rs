pub mod repository;
pub mod types;

pub use repository::{seed_projects, InMemoryProjectRepository, ProjectRepository};
pub use types::{programme_totals, ProgrammeTotals, Project, ProjectStatus, ProjectSummary};
