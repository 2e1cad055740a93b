use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{AttributeValue, Attributes};
use crate::schema::{CategorySchema, FieldDefinition, FieldKind};

/// A reason a listing cannot be submitted yet. The message is user-facing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please enter a description")]
    MissingDescription,
    #[error("Please enter a valid price")]
    InvalidPrice,
    #[error("Please select at least one country")]
    NoCountry,
    #[error("Please enter your name")]
    MissingSellerName,
    #[error("Please provide at least one contact method")]
    NoContactMethod,
    #[error("Please fill in: {label}")]
    MissingField { name: String, label: String },
    #[error("{label}: {reason}")]
    InvalidField {
        name: String,
        label: String,
        reason: String,
    },
}

impl Violation {
    fn missing(field: &FieldDefinition) -> Self {
        Violation::MissingField {
            name: field.name.to_string(),
            label: field.label.to_string(),
        }
    }

    fn invalid(field: &FieldDefinition, reason: impl Into<String>) -> Self {
        Violation::InvalidField {
            name: field.name.to_string(),
            label: field.label.to_string(),
            reason: reason.into(),
        }
    }
}

/// Check the attribute map against a schema.
///
/// All required fields are checked before any value is checked against its
/// constraints, so a missing required field is always what gets reported
/// first.
pub fn check_attributes(schema: &CategorySchema, attributes: &Attributes) -> Vec<Violation> {
    let mut violations: Vec<Violation> = schema
        .required_fields()
        .filter(|field| attributes.get(field.name).map_or(true, AttributeValue::is_empty))
        .map(Violation::missing)
        .collect();

    for field in schema.fields {
        if let Some(value) = attributes.get(field.name).filter(|value| !value.is_empty()) {
            if let Err(reason) = check_value(field, value) {
                violations.push(Violation::invalid(field, reason));
            }
        }
    }

    violations
}

fn check_value(field: &FieldDefinition, value: &AttributeValue) -> Result<(), String> {
    match field.kind {
        FieldKind::Number => {
            let n = value
                .as_number()
                .ok_or_else(|| "must be a number".to_string())?;
            if let Some(min) = field.constraints.min.filter(|min| n < *min) {
                return Err(format!("must be at least {min}"));
            }
            if let Some(max) = field.constraints.max.filter(|max| n > *max) {
                return Err(format!("must be at most {max}"));
            }
            Ok(())
        }
        FieldKind::SingleChoice => match value.as_text() {
            Some(choice) if field.constraints.has_option(choice) => Ok(()),
            _ => Err("is not one of the available options".to_string()),
        },
        FieldKind::MultiChoice => match value {
            AttributeValue::Lines(choices) => match choices
                .iter()
                .find(|choice| !field.constraints.has_option(choice))
            {
                Some(unknown) => Err(format!("'{unknown}' is not one of the available options")),
                None => Ok(()),
            },
            _ => Err("expects a list of options".to_string()),
        },
        FieldKind::Date => match value.as_text() {
            Some(text) if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() => Ok(()),
            _ => Err("must be a date (YYYY-MM-DD)".to_string()),
        },
        FieldKind::Boolean => match value {
            AttributeValue::Flag(_) => Ok(()),
            _ => Err("must be yes or no".to_string()),
        },
        FieldKind::LongText if field.one_per_line => match value {
            AttributeValue::Lines(_) | AttributeValue::Text(_) => Ok(()),
            _ => Err("must be text".to_string()),
        },
        FieldKind::ShortText | FieldKind::LongText => match value {
            AttributeValue::Text(_) => Ok(()),
            _ => Err("must be text".to_string()),
        },
    }
}
