use crate::domains::metrics::projection::DomainTarget;
use crate::domains::project::types::ProjectSummary;
use serde::Serialize;

/// Strips characters that break spreadsheet imports
pub fn sanitize_cell(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\u{2028}' | '\u{2029}' => None,
            '\u{00A0}' => Some(' '),
            '\r' | '\n' => Some(' '),
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trait for types that can be exported to CSV
pub trait CsvRecord: Serialize {
    fn headers() -> Vec<&'static str>;

    fn to_csv(&self) -> Vec<String>;
}

pub fn csv_value_to_string<T: std::fmt::Display>(value: &T) -> String {
    sanitize_cell(&value.to_string())
}

pub fn csv_optional_to_string<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| csv_value_to_string(v)).unwrap_or_default()
}

impl CsvRecord for DomainTarget {
    fn headers() -> Vec<&'static str> {
        vec![
            "domain",
            "status",
            "school_readiness_impact",
            "current_dq",
            "target_dq",
            "current_developmental_age",
            "required_developmental_age",
            "required_growth",
            "projected_with_intervention",
            "projected_without_intervention",
            "risk_of_loss",
            "recommended_touchpoints",
        ]
    }

    fn to_csv(&self) -> Vec<String> {
        let touchpoints: Vec<String> = self
            .recommended_touchpoints
            .iter()
            .map(|t| format!("{} ({} sessions, {} priority)", t.intervention.name, t.required_sessions, t.priority.as_str()))
            .collect();

        vec![
            csv_value_to_string(&self.domain),
            csv_value_to_string(&self.status),
            self.school_readiness_impact.as_str().to_string(),
            self.current_dq.to_string(),
            self.target_dq.to_string(),
            self.current_developmental_age.to_string(),
            self.required_developmental_age.to_string(),
            self.required_growth.to_string(),
            self.projected_with_intervention.to_string(),
            self.projected_without_intervention.to_string(),
            self.risk_of_loss.to_string(),
            sanitize_cell(&touchpoints.join("; ")),
        ]
    }
}

impl CsvRecord for ProjectSummary {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "name",
            "location",
            "status",
            "total_children",
            "screenings_completed",
            "risk_identified",
            "interventions_active",
            "anganwadi_centers",
            "screening_rate",
            "at_risk_rate",
            "intervention_rate",
        ]
    }

    fn to_csv(&self) -> Vec<String> {
        vec![
            csv_value_to_string(&self.id),
            csv_value_to_string(&self.name),
            csv_value_to_string(&self.location),
            self.status.as_str().to_string(),
            self.total_children.to_string(),
            self.screenings_completed.to_string(),
            self.risk_identified.to_string(),
            self.interventions_active.to_string(),
            self.anganwadi_centers.to_string(),
            csv_optional_to_string(&self.screening_rate),
            csv_optional_to_string(&self.at_risk_rate),
            csv_optional_to_string(&self.intervention_rate),
        ]
    }
}

/// Renders records as CSV bytes with a header row
pub fn to_csv_bytes<T: CsvRecord>(records: &[T]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(T::headers())?;
    for record in records {
        wtr.write_record(record.to_csv())?;
    }
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}
