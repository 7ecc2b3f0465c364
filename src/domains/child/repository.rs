use crate::domains::child::types::{Child, DevelopmentalAge};
use crate::domains::referral::types::{validate_journey, ReferralJourneyStep};
use crate::domains::screening::types::ScreeningEvent;
use crate::domains::touchpoint::types::TimelineEvent;
use crate::errors::{DomainError, DomainResult, NotFoundError, ValidationError};
use crate::validation::{NestedValidator, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Everything the dashboard knows about one child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub child: Child,
    pub developmental_ages: Vec<DevelopmentalAge>,
    pub screenings: Vec<ScreeningEvent>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    /// Empty when the child has not entered the referral pipeline
    #[serde(default)]
    pub referral_steps: Vec<ReferralJourneyStep>,
}

impl Validate for ChildRecord {
    fn validate(&self) -> DomainResult<()> {
        self.child.validate()?;

        let mut nested = NestedValidator::new();
        let mut seen = HashSet::new();
        for age in &self.developmental_ages {
            nested.check(age.validate())?;
            if !seen.insert(age.domain) {
                nested.add_error(ValidationError::invalid_value(
                    "developmental_ages",
                    &format!("duplicate record for {}", age.domain),
                ));
            }
        }

        let mut numbers = HashSet::new();
        for screening in &self.screenings {
            nested.check(screening.validate())?;
            if !numbers.insert(screening.screening_number) {
                nested.add_error(ValidationError::invalid_value(
                    "screenings",
                    &format!("duplicate screening #{}", screening.screening_number),
                ));
            }
        }

        for event in &self.timeline {
            nested.check(event.validate())?;
        }
        if !self.referral_steps.is_empty() {
            nested.check(validate_journey(&self.referral_steps))?;
        }

        nested.validate()
    }
}

/// Read access to child records
pub trait ChildRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> DomainResult<ChildRecord>;

    fn find_all(&self) -> DomainResult<Vec<Child>>;

    fn count(&self) -> DomainResult<usize>;
}

/// Process-local store seeded from fixtures or host-supplied JSON
#[derive(Default)]
pub struct InMemoryChildRepository {
    records: RwLock<HashMap<String, ChildRecord>>,
}

impl InMemoryChildRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a record, replacing any record with the same id
    pub fn insert(&self, record: ChildRecord) -> DomainResult<()> {
        record.validate()?;
        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::Internal("child repository lock poisoned".to_string()))?;
        log::debug!("Storing child record {}", record.child.id);
        records.insert(record.child.id.clone(), record);
        Ok(())
    }

    pub fn with_records(records: Vec<ChildRecord>) -> DomainResult<Self> {
        let repo = Self::new();
        for record in records {
            repo.insert(record)?;
        }
        Ok(repo)
    }
}

impl ChildRepository for InMemoryChildRepository {
    fn find_by_id(&self, id: &str) -> DomainResult<ChildRecord> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::Internal("child repository lock poisoned".to_string()))?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| NotFoundError::Child(id.to_string()).into())
    }

    fn find_all(&self) -> DomainResult<Vec<Child>> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::Internal("child repository lock poisoned".to_string()))?;
        let mut children: Vec<Child> = records.values().map(|r| r.child.clone()).collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn count(&self) -> DomainResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::Internal("child repository lock poisoned".to_string()))?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::child::fixtures;

    #[test]
    fn test_insert_and_find() {
        let repo = InMemoryChildRepository::new();
        let record = fixtures::aadhya_sharma();
        let id = record.child.id.clone();
        repo.insert(record.clone()).unwrap();

        assert_eq!(repo.find_by_id(&id).unwrap(), record);
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.find_all().unwrap()[0].name, "Aadhya Sharma");
    }

    #[test]
    fn test_unknown_child_is_not_found() {
        let repo = InMemoryChildRepository::new();
        let err = repo.find_by_id("missing").unwrap_err();
        assert_eq!(err, DomainError::NotFound(NotFoundError::Child("missing".to_string())));
    }

    #[test]
    fn test_insert_rejects_invalid_record() {
        let repo = InMemoryChildRepository::new();
        let mut record = fixtures::aadhya_sharma();
        record.developmental_ages[0].chronological_age_months = 0.0;
        record.developmental_ages[0].gap_months = record.developmental_ages[0].developmental_age_months;
        assert!(repo.insert(record).is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_domains_rejected() {
        let mut record = fixtures::aadhya_sharma();
        let dup = record.developmental_ages[0].clone();
        record.developmental_ages.push(dup);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = fixtures::aadhya_sharma();
        let json = serde_json::to_string(&record).unwrap();
        let back: ChildRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
