use crate::errors::{DomainResult, ValidationError};
use crate::types::DevelopmentalDomain;
use crate::validation::{Validate, ValidationBuilder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Programme interaction categories used for timeline grouping and the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TouchpointCategory {
    ScreeningAssessment,
    WorkshopsAwareness,
    HomeVisits,
    Referral,
    DigitalWhatsapp,
}

impl TouchpointCategory {
    pub const ALL: [TouchpointCategory; 5] = [
        TouchpointCategory::ScreeningAssessment,
        TouchpointCategory::WorkshopsAwareness,
        TouchpointCategory::HomeVisits,
        TouchpointCategory::Referral,
        TouchpointCategory::DigitalWhatsapp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TouchpointCategory::ScreeningAssessment => "screening-assessment",
            TouchpointCategory::WorkshopsAwareness => "workshops-awareness",
            TouchpointCategory::HomeVisits => "home-visits",
            TouchpointCategory::Referral => "referral",
            TouchpointCategory::DigitalWhatsapp => "digital-whatsapp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TouchpointCategory::ScreeningAssessment => "Screening & Assessment",
            TouchpointCategory::WorkshopsAwareness => "Workshops & Awareness",
            TouchpointCategory::HomeVisits => "Home Visits",
            TouchpointCategory::Referral => "Referral",
            TouchpointCategory::DigitalWhatsapp => "Digital (WhatsApp)",
        }
    }
}

impl fmt::Display for TouchpointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "birth")]
    Birth,
    #[serde(rename = "first-assessment")]
    FirstAssessment,
    #[serde(rename = "screening")]
    Screening,
    #[serde(rename = "intervention")]
    Intervention,
    #[serde(rename = "workshop")]
    Workshop,
    #[serde(rename = "whatsapp")]
    Whatsapp,
    #[serde(rename = "home_visit")]
    HomeVisit,
    #[serde(rename = "referral")]
    Referral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Completed,
    Scheduled,
    CurrentAge,
}

/// A dated touchpoint on the child's developmental timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub age_in_months: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub touchpoint_category: TouchpointCategory,
    pub title: String,
    pub description: Option<String>,
    pub outcome: Option<String>,
    pub status: EventStatus,
    pub coordinator: Option<String>,
}

impl Validate for TimelineEvent {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("title", Some(self.title.clone()))
            .not_blank()
            .validate()?;
        ValidationBuilder::new("age_in_months", Some(self.age_in_months))
            .finite()
            .min(0.0)
            .validate()
    }
}

/// Catalog entry: one kind of intervention and its expected effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchpointIntervention {
    pub category: TouchpointCategory,
    pub name: String,
    pub description: String,
    pub frequency: String,
    pub duration: String,
    /// Fractional DQ gain per session (0.05 is five DQ points)
    pub expected_dq_impact: f64,
    pub target_domains: Vec<DevelopmentalDomain>,
}

impl TouchpointIntervention {
    pub fn targets(&self, domain: DevelopmentalDomain) -> bool {
        self.target_domains.contains(&domain)
    }
}

impl Validate for TouchpointIntervention {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("name", Some(self.name.clone()))
            .not_blank()
            .validate()?;
        // Session estimates divide by this
        ValidationBuilder::new("expected_dq_impact", Some(self.expected_dq_impact))
            .positive()
            .max(1.0)
            .validate()?;
        if self.target_domains.is_empty() {
            return Err(ValidationError::required("target_domains").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&TouchpointCategory::DigitalWhatsapp).unwrap(),
            "\"digital-whatsapp\""
        );
        assert_eq!(serde_json::to_string(&EventType::HomeVisit).unwrap(), "\"home_visit\"");
        assert_eq!(serde_json::to_string(&EventStatus::CurrentAge).unwrap(), "\"current-age\"");
    }

    #[test]
    fn test_zero_impact_intervention_rejected() {
        let entry = TouchpointIntervention {
            category: TouchpointCategory::HomeVisits,
            name: "Idle Visit".to_string(),
            description: String::new(),
            frequency: "Weekly".to_string(),
            duration: "10 minutes".to_string(),
            expected_dq_impact: 0.0,
            target_domains: vec![DevelopmentalDomain::Cognitive],
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_intervention_without_domains_rejected() {
        let entry = TouchpointIntervention {
            category: TouchpointCategory::Referral,
            name: "Unscoped".to_string(),
            description: String::new(),
            frequency: "As needed".to_string(),
            duration: "60 minutes".to_string(),
            expected_dq_impact: 0.1,
            target_domains: vec![],
        };
        assert!(entry.validate().is_err());
    }
}
