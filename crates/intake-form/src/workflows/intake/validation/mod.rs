mod aggregate;
mod patterns;
mod rules;

pub use aggregate::validate_aggregate;
pub use patterns::parse_date;
pub use rules::{
    validate_education, validate_experience, validate_personal_info, validate_reference,
    validate_skill,
};

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::domain::{Education, Experience, PersonalInfo, Reference, Skill};

/// Reference point for rules that depend on the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-to-message mapping produced by a failed validation pass.
///
/// Each field carries at most one message; the first rule a field violates wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field was already rejected.
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        if !self.contains(field) {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Entity-level validation returning the normalized value or its field errors.
pub trait Validate: Sized {
    fn validate(&self, context: &ValidationContext) -> Result<Self, FieldErrors>;
}

impl Validate for PersonalInfo {
    fn validate(&self, context: &ValidationContext) -> Result<Self, FieldErrors> {
        validate_personal_info(self, context)
    }
}

impl Validate for Experience {
    fn validate(&self, context: &ValidationContext) -> Result<Self, FieldErrors> {
        validate_experience(self, context)
    }
}

impl Validate for Education {
    fn validate(&self, context: &ValidationContext) -> Result<Self, FieldErrors> {
        validate_education(self, context)
    }
}

impl Validate for Skill {
    fn validate(&self, context: &ValidationContext) -> Result<Self, FieldErrors> {
        validate_skill(self, context)
    }
}

impl Validate for Reference {
    fn validate(&self, context: &ValidationContext) -> Result<Self, FieldErrors> {
        validate_reference(self, context)
    }
}
