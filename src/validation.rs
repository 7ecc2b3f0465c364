use crate::errors::{DomainError, DomainResult, ValidationError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// A trait that entities should implement for validation.
pub trait Validate {
    /// Validates the entity and returns an error if validation fails.
    fn validate(&self) -> DomainResult<()>;
}

// Common regex patterns
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap())
}

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(r"^\+?[0-9]{8,15}$").unwrap())
}

/// Struct for configuring validations in a fluent style
#[derive(Default)]
pub struct ValidationBuilder<T> {
    field_name: String,
    value: Option<T>,
    errors: Vec<ValidationError>,
}

/// Collects errors from several builders or hand-written checks
#[derive(Default)]
pub struct NestedValidator {
    errors: Vec<ValidationError>,
}

impl NestedValidator {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Folds a finished check into this validator, keeping only validation failures
    pub fn check(&mut self, result: DomainResult<()>) -> DomainResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(DomainError::Validation(err)) => {
                self.errors.push(err);
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn validate(self) -> DomainResult<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(DomainError::Validation(first)),
        }
    }
}

/// Generic validation implementations
impl<T> ValidationBuilder<T> {
    pub fn new(field_name: &str, value: Option<T>) -> Self {
        Self {
            field_name: field_name.to_string(),
            value,
            errors: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self
    where T: Default + PartialEq {
        if self.value.is_none() || self.value == Some(T::default()) {
            self.errors.push(ValidationError::required(&self.field_name));
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> DomainResult<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            // Return the first error for simplicity
            Some(first) => Err(DomainError::Validation(first)),
        }
    }
}

/// String-specific validations
impl ValidationBuilder<String> {
    pub fn not_blank(mut self) -> Self {
        if let Some(value) = &self.value {
            if value.trim().is_empty() {
                self.errors.push(ValidationError::required(&self.field_name));
            }
        }
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        if let Some(value) = &self.value {
            if value.chars().count() < min {
                self.errors.push(ValidationError::min_length(&self.field_name, min));
            }
        }
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        if let Some(value) = &self.value {
            if value.chars().count() > max {
                self.errors.push(ValidationError::max_length(&self.field_name, max));
            }
        }
        self
    }

    pub fn matches_pattern(mut self, pattern: &Regex, message: &str) -> Self {
        if let Some(value) = &self.value {
            if !pattern.is_match(value) {
                self.errors.push(ValidationError::format(&self.field_name, message));
            }
        }
        self
    }

    pub fn email(self) -> Self {
        self.matches_pattern(email_regex(), "must be a valid email address")
    }

    /// Phone numbers are stored with spaces for display ("+91 98765 43210")
    pub fn phone(mut self) -> Self {
        if let Some(value) = &self.value {
            let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            if !phone_regex().is_match(&compact) {
                self.errors.push(ValidationError::format(&self.field_name, "must be a valid phone number"));
            }
        }
        self
    }

    pub fn iso_date(mut self) -> Self {
        if let Some(value) = &self.value {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                self.errors.push(ValidationError::format(&self.field_name, "must be in the format YYYY-MM-DD"));
            }
        }
        self
    }
}

/// Numeric validations
impl<T> ValidationBuilder<T>
where T: PartialOrd + Clone + std::fmt::Display
{
    pub fn min(mut self, min: T) -> Self {
        if let Some(value) = &self.value {
            if value < &min {
                self.errors.push(ValidationError::min(&self.field_name, min));
            }
        }
        self
    }

    pub fn max(mut self, max: T) -> Self {
        if let Some(value) = &self.value {
            if value > &max {
                self.errors.push(ValidationError::max(&self.field_name, max));
            }
        }
        self
    }

    pub fn range(mut self, min: T, max: T) -> Self {
        if let Some(value) = &self.value {
            if value < &min || value > &max {
                self.errors.push(ValidationError::range(
                    &self.field_name,
                    min.to_string(),
                    max.to_string()
                ));
            }
        }
        self
    }
}

/// f64-specific validations
impl ValidationBuilder<f64> {
    pub fn positive(mut self) -> Self {
        if let Some(value) = &self.value {
            if !value.is_finite() || *value <= 0.0 {
                self.errors.push(ValidationError::invalid_value(&self.field_name, "must be a positive number"));
            }
        }
        self
    }

    pub fn finite(mut self) -> Self {
        if let Some(value) = &self.value {
            if !value.is_finite() {
                self.errors.push(ValidationError::invalid_value(&self.field_name, "must be a finite number"));
            }
        }
        self
    }
}

/// Frequently repeated checks for screening records
pub mod common {
    use super::*;

    /// Ages in months feed every ratio in the metrics layer, so zero is rejected
    pub fn validate_age_months(value: f64, field_name: &str) -> DomainResult<()> {
        ValidationBuilder::new(field_name, Some(value))
            .positive()
            .validate()
    }

    pub fn validate_score(value: f64, field_name: &str) -> DomainResult<()> {
        ValidationBuilder::new(field_name, Some(value))
            .finite()
            .range(0.0, 100.0)
            .validate()
    }

    pub fn validate_percentage(value: f64, field_name: &str) -> DomainResult<()> {
        validate_score(value, field_name)
    }

    pub fn validate_date_format(date_str: &str, field_name: &str) -> DomainResult<()> {
        ValidationBuilder::new(field_name, Some(date_str.to_string()))
            .iso_date()
            .validate()
    }

    pub fn validate_person_name(name: &str, field_name: &str) -> DomainResult<()> {
        ValidationBuilder::new(field_name, Some(name.to_string()))
            .not_blank()
            .max_length(120)
            .validate()
    }
}
