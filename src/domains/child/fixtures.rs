//! Seed data for the Kuppam pilot dashboard and for tests.

use crate::domains::child::repository::ChildRecord;
use crate::domains::child::types::*;
use crate::domains::referral::types::{ReferralJourneyStep, StepStatus};
use crate::domains::screening::types::{ScreeningEvent, ScreeningResult, ScreeningStatus};
use crate::domains::touchpoint::types::{EventStatus, EventType, TimelineEvent, TouchpointCategory};
use crate::types::{DevelopmentalDomain, DomainMap};
use chrono::NaiveDate;

pub const SAMPLE_CHILD_ID: &str = "KUP-AWC012-0045";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_child() -> Child {
    Child {
        id: SAMPLE_CHILD_ID.to_string(),
        name: "Aadhya Sharma".to_string(),
        age_years: 3,
        age_in_months: 36,
        gender: Gender::Female,
        date_of_birth: "2021-05-15".to_string(),
        address: "Village: Kuppam, Mandal: Kuppam, District: Chittoor".to_string(),
        parent_name: "Priya Sharma".to_string(),
        parent_phone: "+91 9876543210".to_string(),
        status: ChildStatus::AtRisk,
        last_screening: Some("2024-07-15".to_string()),
        next_screening: Some("2024-09-15".to_string()),
        risk_factors: strings(&["Speech Development Delay", "Social Interaction"]),
        interventions: strings(&["Speech Therapy", "Parent Training"]),
        school_readiness_score: 74.0,
        risk_level: RiskLevel::High,
        delay_count: 4,
        has_underlying_condition: true,
        anganwadi_center: AnganwadiCenter {
            id: "AWC-KUP-012".to_string(),
            name: "Kuppam Town Anganwadi Center 12".to_string(),
            code: "AWC012".to_string(),
            address: "Ward 7, Kuppam Town, Kuppam Mandal".to_string(),
            total_children: 78,
        },
        anganwadi_teacher: AnganwadiTeacher {
            name: "Sunitha Reddy".to_string(),
            id: "AWT-2018-045".to_string(),
            phone: "+91 9876501234".to_string(),
            qualification: "B.Ed, Early Childhood Care & Education".to_string(),
            experience: "6 years".to_string(),
        },
        carengrow_coordinator: CarengrowCoordinator {
            name: "Dr. Meera Devi".to_string(),
            id: "CG-COORD-003".to_string(),
            phone: "+91 9876512345".to_string(),
            email: "meera.devi@carengrow.org".to_string(),
            centers_assigned: 4,
            total_children_under_care: 285,
        },
    }
}

/// Latest per-domain assessment at 36 months, with the assessor's statuses
pub fn developmental_ages() -> Vec<DevelopmentalAge> {
    use DevelopmentalDomain::*;

    [
        (GrossMotor, 34.0, DelayStatus::MildDelay, ReadinessImpact::Medium),
        (FineMotor, 35.0, DelayStatus::OnTrack, ReadinessImpact::High),
        (LanguageCommunication, 24.0, DelayStatus::SevereDelay, ReadinessImpact::High),
        (SocialEmotional, 30.0, DelayStatus::ModerateDelay, ReadinessImpact::High),
        (Cognitive, 33.0, DelayStatus::MildDelay, ReadinessImpact::High),
    ]
    .into_iter()
    .map(|(domain, dev, status, impact)| DevelopmentalAge::with_status(domain, 36.0, dev, status, impact))
    .collect()
}

fn result(
    domain: DevelopmentalDomain,
    score: f64,
    status: ScreeningStatus,
    recommendations: &[&str],
    contribution: f64,
) -> ScreeningResult {
    ScreeningResult {
        domain,
        score: Some(score),
        max_score: 100.0,
        status,
        recommendations: strings(recommendations),
        school_readiness_contribution: contribution,
    }
}

fn ages(values: [Option<f64>; 5]) -> DomainMap<Option<f64>> {
    DevelopmentalDomain::ALL.iter().copied().zip(values).collect()
}

pub fn screenings() -> Vec<ScreeningEvent> {
    use DevelopmentalDomain::*;
    use ScreeningStatus::*;

    vec![
        ScreeningEvent {
            screening_number: 1,
            date: date(2024, 4, 15),
            age_at_screening: 33.0,
            school_readiness_score: Some(65.0),
            report_generated: true,
            developmental_ages: ages([Some(31.0), Some(30.0), Some(20.0), Some(28.0), Some(30.0)]),
            results: vec![
                result(GrossMotor, 78.0, Concern, &["Increase physical activity", "Outdoor play time", "Practice balancing and coordination"], 15.0),
                result(FineMotor, 72.0, Concern, &["Finger exercises", "Drawing activities", "Cutting with child-safe scissors"], 18.0),
                result(LanguageCommunication, 35.0, Delay, &["Speech therapy referral", "Parent coaching on language stimulation", "Daily reading sessions"], 25.0),
                result(SocialEmotional, 58.0, Concern, &["Structured social interactions", "Emotional regulation activities", "Group play sessions"], 20.0),
                result(Cognitive, 75.0, Normal, &["Continue age-appropriate learning activities", "Problem-solving games"], 22.0),
            ],
        },
        ScreeningEvent {
            screening_number: 2,
            date: date(2024, 7, 15),
            age_at_screening: 36.0,
            school_readiness_score: Some(74.0),
            report_generated: true,
            developmental_ages: ages([Some(34.0), Some(35.0), Some(24.0), Some(30.0), Some(33.0)]),
            results: vec![
                result(GrossMotor, 85.0, Normal, &["Continue regular physical play", "Encourage outdoor activities"], 20.0),
                result(FineMotor, 78.0, Normal, &["Practice drawing and coloring", "Play with building blocks"], 19.0),
                result(LanguageCommunication, 45.0, Delay, &["Continue speech therapy", "Daily reading sessions", "Encourage verbal communication"], 20.0),
                result(SocialEmotional, 65.0, Concern, &["Structured play dates", "Group activities", "Parent coaching"], 15.0),
                result(Cognitive, 82.0, Normal, &["Puzzle games", "Educational activities", "Story telling"], 20.0),
            ],
        },
        ScreeningEvent {
            screening_number: 3,
            date: date(2024, 9, 15),
            age_at_screening: 39.0,
            school_readiness_score: None,
            report_generated: false,
            developmental_ages: ages([None; 5]),
            results: DevelopmentalDomain::ALL.iter().map(|d| ScreeningResult::scheduled(*d)).collect(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn event(
    age_in_months: f64,
    on: NaiveDate,
    event_type: EventType,
    touchpoint_category: TouchpointCategory,
    title: &str,
    description: &str,
    outcome: Option<&str>,
    status: EventStatus,
    coordinator: Option<&str>,
) -> TimelineEvent {
    TimelineEvent {
        age_in_months,
        date: on,
        event_type,
        touchpoint_category,
        title: title.to_string(),
        description: Some(description.to_string()),
        outcome: outcome.map(str::to_string),
        status,
        coordinator: coordinator.map(str::to_string),
    }
}

pub fn timeline() -> Vec<TimelineEvent> {
    use EventStatus::*;
    use EventType::*;
    use TouchpointCategory::*;

    vec![
        event(0.0, date(2021, 5, 15), Birth, ScreeningAssessment, "Birth", "Birth of Aadhya Sharma", None, Completed, None),
        event(30.0, date(2024, 1, 15), FirstAssessment, ScreeningAssessment, "First Developmental Assessment",
            "Initial comprehensive developmental screening", Some("Early detection of potential delays"), Completed, Some("Dr. Rajesh Kumar")),
        event(33.0, date(2024, 4, 15), Screening, ScreeningAssessment, "Developmental Screening #1",
            "Comprehensive assessment covering all developmental domains",
            Some("Identified speech and language delays requiring intervention"), Completed, Some("Dr. Rajesh Kumar")),
        event(33.5, date(2024, 4, 20), Whatsapp, DigitalWhatsapp, "Initial Parent Guidance",
            "Sent home-based activities for language stimulation",
            Some("Parent engaged and started implementing activities"), Completed, None),
        event(34.0, date(2024, 5, 15), Workshop, WorkshopsAwareness, "Parent Workshop: Language Development",
            "Group workshop on early language stimulation techniques",
            Some("Parent learned new strategies and connected with other families"), Completed, Some("Ms. Anjali Reddy")),
        event(34.5, date(2024, 6, 2), HomeVisit, HomeVisits, "Home Environment Assessment",
            "Evaluation of home learning environment and implementation support",
            Some("Provided additional resources and guidance to family"), Completed, Some("Ms. Meera Devi")),
        event(35.0, date(2024, 6, 15), Intervention, HomeVisits, "Speech Therapy Initiation",
            "Started individual speech therapy sessions",
            Some("Child showed initial engagement with therapy activities"), Completed, Some("Ms. Lakshmi Prasad")),
        event(36.0, date(2024, 7, 15), Screening, ScreeningAssessment, "Developmental Screening #2",
            "Follow-up assessment to track progress",
            Some("Improvements in gross motor skills, continued speech delays"), Completed, Some("Dr. Rajesh Kumar")),
        event(36.2, date(2024, 8, 20), EventType::Referral, TouchpointCategory::Referral, "Specialist Referral Initiation",
            "Referral to specialist center for comprehensive assessment",
            Some("Referral journey commenced with multidisciplinary team"), Completed, Some("Dr. Meera Devi")),
        event(39.0, date(2024, 9, 15), Screening, ScreeningAssessment, "Developmental Screening #3",
            "Scheduled follow-up assessment", None, Scheduled, Some("Dr. Rajesh Kumar")),
    ]
}

fn step(number: u32, name: &str, content: &str, status: StepStatus, on: NaiveDate, updated_by: &str) -> ReferralJourneyStep {
    ReferralJourneyStep {
        step_number: number,
        step_name: name.to_string(),
        content: content.to_string(),
        status,
        date: Some(on),
        updated_by: Some(updated_by.to_string()),
    }
}

pub fn referral_steps() -> Vec<ReferralJourneyStep> {
    use StepStatus::*;

    const COORDINATOR: &str = "Dr. Meera Devi (Carengrow Coordinator)";
    const NEUROLOGIST: &str = "Dr. Sandeep Kumar (Pediatric Neurologist)";

    vec![
        step(1, "Reason for Referral",
            "Motor delay, Language & Communication delay, Social-Emotional delay, Cognitive Development concerns",
            Completed, date(2024, 8, 20), COORDINATOR),
        step(2, "Clinical Findings",
            "Global Developmental Delay (GDD), predominantly affecting motor and communication domains, with intact basic cognition. \
             No seizures or significant perinatal insults documented. Mild hypotonia observed during assessment.",
            Completed, date(2024, 8, 22), "Dr. Rajesh Kumar (Developmental Pediatrician)"),
        step(3, "Diagnosis",
            "Global Developmental Delay with mixed motor-communication profile. Possible underlying neurodevelopmental condition \
             requiring further evaluation. Rule out genetic/metabolic etiology.",
            Completed, date(2024, 8, 25), NEUROLOGIST),
        step(4, "Tests Advised",
            "EEG to rule out subclinical seizures, Brain MRI to assess structural abnormalities, Genetic consultation for chromosomal \
             analysis, Hearing assessment (BERA), Thyroid function tests",
            InProgress, date(2024, 8, 25), NEUROLOGIST),
        step(5, "Treatment Plan",
            "Intensive Physiotherapy (3x/week), Occupational therapy (2x/week), Speech-Language therapy (daily), Early intervention \
             program enrollment, Family counseling and support",
            InProgress, date(2024, 8, 26), "Multidisciplinary Team"),
        step(6, "Prescription",
            "No medications prescribed at present. Focus on non-pharmacological interventions. Review after diagnostic test results. \
             Vitamin D supplementation (400 IU daily) for general health.",
            Completed, date(2024, 8, 26), NEUROLOGIST),
        step(7, "Referral Team",
            "Dr. Sandeep Kumar (Pediatric Neurologist - Lead), Dr. Sreelatha Reddy (Child Psychiatrist), Dr. Pradeep Singh \
             (Physiotherapist), Ms. Anjali Sharma (Speech-Language Pathologist), Ms. Lakshmi Prasad (Occupational Therapist)",
            Completed, date(2024, 8, 20), COORDINATOR),
    ]
}

pub fn aadhya_sharma() -> ChildRecord {
    ChildRecord {
        child: sample_child(),
        developmental_ages: developmental_ages(),
        screenings: screenings(),
        timeline: timeline(),
        referral_steps: referral_steps(),
    }
}

/// All seeded child records
pub fn all_records() -> Vec<ChildRecord> {
    vec![aadhya_sharma()]
}
