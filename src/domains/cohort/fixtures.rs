//! Cohort data from the Kuppam programme dashboards.

use crate::domains::child::types::RiskLevel::{self, High, Low, Moderate};
use crate::domains::cohort::types::{
    CohortChild, CohortScores, DelayCategories, DelayCategory, FamilySupport, HighRiskRecord, ImprovementRecord,
    RegionDelay, RiskTransition, Severity, Village,
};

fn child(id: &str, name: &str, age_years: u32, anganwadi: &str, region: &str) -> CohortChild {
    CohortChild {
        id: id.to_string(),
        name: name.to_string(),
        age_years,
        anganwadi: anganwadi.to_string(),
        region: region.to_string(),
    }
}

fn scores(language: f64, motor: f64, social: f64, cognitive: f64, overall: f64) -> CohortScores {
    CohortScores {
        language,
        motor,
        social,
        cognitive,
        overall,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn improved(
    child: CohortChild,
    first: CohortScores,
    second: CohortScores,
    interventions: &[&str],
    from: RiskLevel,
    to: RiskLevel,
) -> ImprovementRecord {
    ImprovementRecord {
        child,
        first_screening: first,
        second_screening: second,
        interventions: strings(interventions),
        risk_transition: RiskTransition::new(from, to),
    }
}

pub fn improvement_records() -> Vec<ImprovementRecord> {
    vec![
        improved(
            child("C001", "Arjun Kumar", 4, "AWC-KUP-001", "Kuppam North"),
            scores(32.0, 68.0, 45.0, 71.0, 54.0),
            scores(78.0, 85.0, 79.0, 88.0, 82.5),
            &["Speech Therapy", "Social Skills", "Parent Training"],
            High,
            Low,
        ),
        improved(
            child("C002", "Kavya Reddy", 3, "AWC-KUP-007", "Kuppam Central"),
            scores(45.0, 58.0, 42.0, 65.0, 52.5),
            scores(72.0, 81.0, 69.0, 84.0, 76.5),
            &["Motor Skills", "Language Support"],
            Moderate,
            Low,
        ),
        improved(
            child("C003", "Ravi Sharma", 5, "AWC-KUP-015", "Kuppam South"),
            scores(38.0, 72.0, 51.0, 59.0, 55.0),
            scores(69.0, 89.0, 76.0, 82.0, 79.0),
            &["Comprehensive Program", "Family Support"],
            High,
            Low,
        ),
        improved(
            child("C004", "Meera Patel", 4, "AWC-KUP-003", "Kuppam East"),
            scores(48.0, 63.0, 41.0, 67.0, 54.75),
            scores(75.0, 84.0, 71.0, 86.0, 79.0),
            &["Social Skills", "Cognitive Training"],
            Moderate,
            Low,
        ),
        improved(
            child("C005", "Arun Naidu", 3, "AWC-KUP-012", "Kuppam Central"),
            scores(35.0, 61.0, 49.0, 58.0, 50.75),
            scores(68.0, 79.0, 74.0, 81.0, 75.5),
            &["Intensive Support", "Parent Workshops"],
            High,
            Moderate,
        ),
        improved(
            child("C006", "Divya Krishna", 4, "AWC-KUP-009", "Kuppam West"),
            scores(42.0, 59.0, 46.0, 62.0, 52.25),
            scores(71.0, 83.0, 72.0, 85.0, 77.75),
            &["Multi-domain Support"],
            Moderate,
            Low,
        ),
        improved(
            child("C007", "Kiran Rao", 5, "AWC-KUP-018", "Kuppam South"),
            scores(51.0, 65.0, 44.0, 69.0, 57.25),
            scores(78.0, 88.0, 73.0, 91.0, 82.5),
            &["Advanced Support", "Peer Learning"],
            Moderate,
            Low,
        ),
        improved(
            child("C008", "Priya Menon", 3, "AWC-KUP-005", "Kuppam North"),
            scores(39.0, 67.0, 43.0, 64.0, 53.25),
            scores(72.0, 86.0, 69.0, 84.0, 77.75),
            &["Language Focus", "Social Development"],
            High,
            Low,
        ),
        improved(
            child("C009", "Vikram Gupta", 4, "AWC-KUP-011", "Kuppam Central"),
            scores(44.0, 56.0, 47.0, 61.0, 52.0),
            scores(74.0, 82.0, 71.0, 83.0, 77.5),
            &["Holistic Approach", "Community Support"],
            Moderate,
            Low,
        ),
        improved(
            child("C010", "Ananya Singh", 5, "AWC-KUP-020", "Kuppam East"),
            scores(47.0, 62.0, 45.0, 66.0, 55.0),
            scores(76.0, 87.0, 74.0, 89.0, 81.5),
            &["Excellence Program", "Family Engagement"],
            Moderate,
            Low,
        ),
    ]
}

fn high_risk(
    child: CohortChild,
    latest: CohortScores,
    risk_factors: &[&str],
    urgent_interventions: &[&str],
    family_support: FamilySupport,
    months_delayed: u32,
) -> HighRiskRecord {
    HighRiskRecord {
        child,
        latest_screening: latest,
        risk_factors: strings(risk_factors),
        urgent_interventions: strings(urgent_interventions),
        family_support,
        months_delayed,
    }
}

pub fn high_risk_records() -> Vec<HighRiskRecord> {
    use FamilySupport::*;
    vec![
        high_risk(
            child("C101", "Rohit Kumar", 4, "AWC-KUP-014", "Kuppam South"),
            scores(28.0, 42.0, 35.0, 39.0, 36.0),
            &["Severe Language Delay", "Motor Development Issues", "Social Withdrawal"],
            &["Immediate Speech Therapy", "Occupational Therapy", "Psychological Assessment"],
            Required,
            15,
        ),
        high_risk(
            child("C102", "Sita Devi", 3, "AWC-KUP-008", "Kuppam West"),
            scores(31.0, 38.0, 29.0, 41.0, 34.75),
            &["Communication Barriers", "Fine Motor Delays", "Attention Issues"],
            &["Language Therapy", "Motor Skills Training", "Behavioral Support"],
            Critical,
            12,
        ),
        high_risk(
            child("C103", "Raj Patel", 5, "AWC-KUP-017", "Kuppam East"),
            scores(25.0, 45.0, 32.0, 37.0, 34.75),
            &["Severe Developmental Delays", "Learning Disabilities", "Social Isolation"],
            &["Comprehensive Assessment", "Special Education", "Family Counseling"],
            Intensive,
            18,
        ),
        high_risk(
            child("C104", "Lakshmi Rao", 4, "AWC-KUP-002", "Kuppam North"),
            scores(33.0, 41.0, 28.0, 35.0, 34.25),
            &["Multiple Developmental Delays", "Behavioral Challenges", "Family Stress"],
            &["Multi-disciplinary Support", "Home-based Therapy", "Parent Training"],
            Essential,
            14,
        ),
        high_risk(
            child("C105", "Krishna Murthy", 3, "AWC-KUP-013", "Kuppam Central"),
            scores(29.0, 39.0, 31.0, 38.0, 34.25),
            &["Speech Impediments", "Gross Motor Issues", "Cognitive Concerns"],
            &["Speech Pathology", "Physical Therapy", "Cognitive Training"],
            Required,
            13,
        ),
        high_risk(
            child("C106", "Geetha Naidu", 4, "AWC-KUP-006", "Kuppam West"),
            scores(27.0, 43.0, 30.0, 36.0, 34.0),
            &["Developmental Regression", "Social Withdrawal", "Learning Challenges"],
            &["Immediate Assessment", "Therapeutic Intervention", "Educational Support"],
            Critical,
            16,
        ),
        high_risk(
            child("C107", "Anil Kumar", 5, "AWC-KUP-019", "Kuppam South"),
            scores(32.0, 40.0, 27.0, 34.0, 33.25),
            &["Complex Developmental Needs", "Behavioral Issues", "Academic Struggles"],
            &["Special Education Assessment", "Behavioral Therapy", "Academic Support"],
            Intensive,
            19,
        ),
        high_risk(
            child("C108", "Radha Krishna", 3, "AWC-KUP-010", "Kuppam Central"),
            scores(30.0, 37.0, 33.0, 39.0, 34.75),
            &["Language Barriers", "Motor Coordination", "Social Skills"],
            &["Language Development", "Motor Training", "Social Integration"],
            Required,
            11,
        ),
        high_risk(
            child("C109", "Suma Reddy", 4, "AWC-KUP-016", "Kuppam East"),
            scores(26.0, 44.0, 29.0, 37.0, 34.0),
            &["Severe Communication Delays", "Motor Planning Issues", "Attention Deficits"],
            &["Communication Therapy", "Motor Skills", "Attention Training"],
            Essential,
            17,
        ),
        high_risk(
            child("C110", "Gopal Sharma", 5, "AWC-KUP-004", "Kuppam North"),
            scores(24.0, 46.0, 31.0, 33.0, 33.5),
            &["Global Developmental Delay", "Multiple Risk Factors", "Complex Needs"],
            &["Comprehensive Care Plan", "Multi-disciplinary Team", "Intensive Support"],
            Critical,
            20,
        ),
    ]
}

fn category(count: u32, percentage: f64, severity: Severity) -> DelayCategory {
    DelayCategory {
        count,
        percentage,
        severity,
    }
}

#[allow(clippy::too_many_arguments)]
fn region(
    name: &str,
    anganwadi_centers: u32,
    total_children: u32,
    delay_categories: DelayCategories,
    overall_delay_rate: f64,
    risk_level: Severity,
    primary_concerns: &[&str],
    intervention_success: f64,
    coordinator_effectiveness: f64,
) -> RegionDelay {
    RegionDelay {
        region: name.to_string(),
        anganwadi_centers,
        total_children,
        delay_categories,
        overall_delay_rate,
        risk_level,
        primary_concerns: strings(primary_concerns),
        intervention_success,
        coordinator_effectiveness,
    }
}

pub fn regions() -> Vec<RegionDelay> {
    use Severity::{High, Low, Moderate};
    vec![
        region(
            "Kuppam North",
            8,
            624,
            DelayCategories {
                language: category(89, 14.3, Moderate),
                motor: category(62, 9.9, Low),
                social: category(71, 11.4, Moderate),
                cognitive: category(45, 7.2, Low),
            },
            10.7,
            Moderate,
            &["Language Development", "Social Skills"],
            73.2,
            85.1,
        ),
        region(
            "Kuppam Central",
            12,
            932,
            DelayCategories {
                language: category(158, 16.9, High),
                motor: category(103, 11.1, Moderate),
                social: category(128, 13.7, High),
                cognitive: category(84, 9.0, Moderate),
            },
            12.7,
            High,
            &["Language Development", "Social-Emotional"],
            68.8,
            78.3,
        ),
        region(
            "Kuppam South",
            10,
            780,
            DelayCategories {
                language: category(109, 14.0, Moderate),
                motor: category(94, 12.1, Moderate),
                social: category(87, 11.2, Moderate),
                cognitive: category(62, 8.0, Low),
            },
            11.3,
            Moderate,
            &["Motor Skills", "Language Development"],
            71.5,
            82.7,
        ),
        region(
            "Kuppam East",
            9,
            702,
            DelayCategories {
                language: category(91, 13.0, Moderate),
                motor: category(77, 11.0, Moderate),
                social: category(84, 12.0, Moderate),
                cognitive: category(56, 8.0, Low),
            },
            11.0,
            Moderate,
            &["Balanced Development Concerns"],
            75.1,
            86.2,
        ),
        region(
            "Kuppam West",
            6,
            468,
            DelayCategories {
                language: category(84, 17.9, High),
                motor: category(52, 11.1, Moderate),
                social: category(61, 13.0, High),
                cognitive: category(42, 9.0, Moderate),
            },
            12.8,
            High,
            &["Language Barriers", "Social Integration"],
            66.7,
            75.8,
        ),
    ]
}

pub fn villages() -> Vec<Village> {
    [
        ("Kuppam Town", 45, 8, 95.0),
        ("Ramakuppam", 32, 5, 88.0),
        ("Shantipuram", 28, 12, 75.0),
        ("Gudipalle", 38, 15, 70.0),
        ("Vepuvaripalle", 29, 3, 92.0),
        ("Baireddipalle", 25, 9, 80.0),
        ("Pudumaraka", 41, 7, 85.0),
        ("Kempenahalli", 33, 11, 77.0),
        ("Krishnagiri", 29, 6, 83.0),
    ]
    .into_iter()
    .map(|(name, children_count, at_risk_count, screening_rate)| Village {
        name: name.to_string(),
        children_count,
        at_risk_count,
        screening_rate,
    })
    .collect()
}
