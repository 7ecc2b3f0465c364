use crate::domains::project::types::{Project, ProjectStatus};
use crate::errors::{DomainError, DomainResult, NotFoundError};
use crate::validation::Validate;
use std::sync::RwLock;

pub trait ProjectRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> DomainResult<Project>;

    /// Projects in registration order
    fn find_all(&self) -> DomainResult<Vec<Project>>;
}

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding the three programme projects
    pub fn seeded() -> Self {
        Self {
            projects: RwLock::new(seed_projects()),
        }
    }

    pub fn with_projects(projects: Vec<Project>) -> DomainResult<Self> {
        let repo = Self::new();
        for project in projects {
            repo.insert(project)?;
        }
        Ok(repo)
    }

    pub fn insert(&self, project: Project) -> DomainResult<()> {
        project.validate()?;
        let mut projects = self
            .projects
            .write()
            .map_err(|_| DomainError::Internal("project repository lock poisoned".to_string()))?;
        projects.retain(|p| p.id != project.id);
        projects.push(project);
        Ok(())
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn find_by_id(&self, id: &str) -> DomainResult<Project> {
        let projects = self
            .projects
            .read()
            .map_err(|_| DomainError::Internal("project repository lock poisoned".to_string()))?;
        projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| NotFoundError::Project(id.to_string()).into())
    }

    fn find_all(&self) -> DomainResult<Vec<Project>> {
        let projects = self
            .projects
            .read()
            .map_err(|_| DomainError::Internal("project repository lock poisoned".to_string()))?;
        Ok(projects.clone())
    }
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "kuppam-pilot".to_string(),
            name: "Kuppam Pilot".to_string(),
            description: "Initial pilot program testing Carengrow methodologies and establishing baseline metrics \
                          for early childhood development screening."
                .to_string(),
            location: "Kuppam Town & Surrounding Villages".to_string(),
            status: ProjectStatus::Pilot,
            launch_date: "Jan 2024".to_string(),
            total_children: 847,
            screenings_completed: 789,
            risk_identified: 84,
            interventions_active: 67,
            anganwadi_centers: 5,
        },
        Project {
            id: "kuppam-constituency".to_string(),
            name: "Kuppam Constituency".to_string(),
            description: "Full-scale implementation across the entire Kuppam constituency, serving as the primary \
                          operational hub with comprehensive coverage."
                .to_string(),
            location: "Entire Kuppam Assembly Constituency".to_string(),
            status: ProjectStatus::Active,
            launch_date: "Mar 2024".to_string(),
            total_children: 20247,
            screenings_completed: 18432,
            risk_identified: 1847,
            interventions_active: 1523,
            anganwadi_centers: 45,
        },
        Project {
            id: "tirupati".to_string(),
            name: "Tirupati".to_string(),
            description: "New expansion project extending Carengrow's reach to urban and semi-urban areas around \
                          the city of Tirupati."
                .to_string(),
            location: "Tirupati Municipal Corporation Area".to_string(),
            status: ProjectStatus::Launching,
            launch_date: "Sep 2024".to_string(),
            total_children: 12456,
            screenings_completed: 10934,
            risk_identified: 1127,
            interventions_active: 892,
            anganwadi_centers: 28,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_projects() {
        let repo = InMemoryProjectRepository::seeded();
        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|p| p.validate().is_ok()));
        assert_eq!(repo.find_by_id("tirupati").unwrap().anganwadi_centers, 28);
    }

    #[test]
    fn test_unknown_project() {
        let repo = InMemoryProjectRepository::seeded();
        assert!(repo.find_by_id("chennai").unwrap_err().is_not_found());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let repo = InMemoryProjectRepository::seeded();
        let mut pilot = repo.find_by_id("kuppam-pilot").unwrap();
        pilot.total_children = 900;
        repo.insert(pilot).unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 3);
        assert_eq!(repo.find_by_id("kuppam-pilot").unwrap().total_children, 900);
    }
}
