use std::collections::BTreeMap;

use email_address::EmailAddress;
use url::Url;

/// Field-keyed validation failures, ready to serialize into the error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.0
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Input payloads that can be checked before hitting the repository.
pub trait ValidateInput {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn require(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{field} is required"));
    }
}

pub fn max_len(errors: &mut ValidationErrors, field: &str, value: &str, limit: usize) {
    if value.chars().count() > limit {
        errors.add(field, format!("{field} must be at most {limit} characters"));
    }
}

pub fn optional_max_len(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    limit: usize,
) {
    if let Some(value) = value {
        max_len(errors, field, value, limit);
    }
}

pub fn valid_url(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.trim().is_empty() && Url::parse(value).is_err() {
            errors.add(field, format!("{field} must be a valid URL"));
        }
    }
}

pub fn valid_email(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !value.trim().is_empty() && !EmailAddress::is_valid(value) {
        errors.add(field, format!("{field} must be a valid email address"));
    }
}
