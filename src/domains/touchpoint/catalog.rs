use crate::domains::touchpoint::types::{TouchpointCategory, TouchpointIntervention};
use crate::errors::{DomainResult, NotFoundError};
use crate::types::DevelopmentalDomain;
use crate::validation::{NestedValidator, Validate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Read-only lookup table of intervention types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionCatalog {
    entries: Vec<TouchpointIntervention>,
}

/// The programme's standard catalog
pub static DEFAULT_CATALOG: Lazy<InterventionCatalog> = Lazy::new(|| InterventionCatalog {
    entries: default_entries(),
});

impl InterventionCatalog {
    /// Builds a catalog, rejecting entries that fail validation
    pub fn new(entries: Vec<TouchpointIntervention>) -> DomainResult<Self> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn entries(&self) -> &[TouchpointIntervention] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries targeting `domain`, highest expected impact first.
    /// Equal impacts keep catalog order.
    pub fn for_domain(&self, domain: DevelopmentalDomain) -> DomainResult<Vec<&TouchpointIntervention>> {
        let mut matches: Vec<&TouchpointIntervention> = self.entries.iter().filter(|e| e.targets(domain)).collect();
        if matches.is_empty() {
            return Err(NotFoundError::Interventions {
                domain: domain.as_str().to_string(),
            }
            .into());
        }
        matches.sort_by(|a, b| b.expected_dq_impact.total_cmp(&a.expected_dq_impact));
        Ok(matches)
    }
}

impl Validate for InterventionCatalog {
    fn validate(&self) -> DomainResult<()> {
        let mut nested = NestedValidator::new();
        for entry in &self.entries {
            nested.check(entry.validate())?;
        }
        nested.validate()
    }
}

impl Default for InterventionCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

fn entry(
    category: TouchpointCategory,
    name: &str,
    description: &str,
    frequency: &str,
    duration: &str,
    expected_dq_impact: f64,
    target_domains: &[DevelopmentalDomain],
) -> TouchpointIntervention {
    TouchpointIntervention {
        category,
        name: name.to_string(),
        description: description.to_string(),
        frequency: frequency.to_string(),
        duration: duration.to_string(),
        expected_dq_impact,
        target_domains: target_domains.to_vec(),
    }
}

fn default_entries() -> Vec<TouchpointIntervention> {
    use DevelopmentalDomain::*;

    vec![
        entry(
            TouchpointCategory::ScreeningAssessment,
            "Comprehensive Developmental Screening",
            "Regular assessment and monitoring of developmental milestones",
            "Every 3 months",
            "60 minutes",
            0.05,
            &DevelopmentalDomain::ALL,
        ),
        entry(
            TouchpointCategory::WorkshopsAwareness,
            "Parent Education Workshops",
            "Group sessions for parents on child development and home activities",
            "Bi-weekly",
            "90 minutes",
            0.08,
            &[LanguageCommunication, SocialEmotional, Cognitive],
        ),
        entry(
            TouchpointCategory::HomeVisits,
            "Individualized Home Interventions",
            "One-on-one support at home with child and family",
            "Weekly",
            "45 minutes",
            0.12,
            &[LanguageCommunication, SocialEmotional, FineMotor],
        ),
        entry(
            TouchpointCategory::DigitalWhatsapp,
            "Digital Learning Support",
            "Daily activities and guidance through WhatsApp platform",
            "Daily",
            "10 minutes",
            0.06,
            &[LanguageCommunication, Cognitive],
        ),
        entry(
            TouchpointCategory::Referral,
            "Specialist Referral Services",
            "Professional therapy and medical intervention",
            "As needed",
            "60 minutes",
            0.15,
            &[LanguageCommunication, GrossMotor, SocialEmotional],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_default_catalog_is_valid() {
        assert_eq!(DEFAULT_CATALOG.len(), 5);
        assert!(DEFAULT_CATALOG.validate().is_ok());
    }

    #[test]
    fn test_for_domain_ranks_by_impact() {
        let ranked = DEFAULT_CATALOG.for_domain(DevelopmentalDomain::LanguageCommunication).unwrap();
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Specialist Referral Services",
                "Individualized Home Interventions",
                "Parent Education Workshops",
                "Digital Learning Support",
                "Comprehensive Developmental Screening",
            ]
        );

        let gross = DEFAULT_CATALOG.for_domain(DevelopmentalDomain::GrossMotor).unwrap();
        assert_eq!(gross.len(), 2);
        assert_eq!(gross[0].expected_dq_impact, 0.15);
    }

    #[test]
    fn test_for_domain_miss_is_not_found() {
        let catalog = InterventionCatalog::new(vec![entry(
            TouchpointCategory::DigitalWhatsapp,
            "Rhymes",
            "",
            "Daily",
            "5 minutes",
            0.02,
            &[DevelopmentalDomain::LanguageCommunication],
        )])
        .unwrap();

        let err = catalog.for_domain(DevelopmentalDomain::GrossMotor).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            DomainError::NotFound(NotFoundError::Interventions {
                domain: "Gross Motor Skills".to_string()
            })
        );
    }

    #[test]
    fn test_new_rejects_invalid_entries() {
        let result = InterventionCatalog::new(vec![entry(
            TouchpointCategory::HomeVisits,
            "Broken",
            "",
            "Weekly",
            "45 minutes",
            -0.1,
            &[DevelopmentalDomain::FineMotor],
        )]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
