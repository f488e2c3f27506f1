//! Checks submitted values against field definitions.

use crate::dictionary::{FieldType, FormComponent, FormElementField};
use crate::translate;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| parse_date(value).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// Parse a number accepting either `.` or `,` as the decimal separator
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .parse::<f64>()
        .ok()
        .or_else(|| value.replace(',', ".").parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

pub struct FieldValidator;

impl FieldValidator {
    /// Error message for `value`, or `None` when it is acceptable
    pub fn validate(field: &FormElementField, value: Option<&str>) -> Option<String> {
        let label = translate::key(field.label_or_name());
        let value = value.map(str::trim).unwrap_or_default();

        if value.is_empty() {
            return field
                .is_required
                .then(|| translate::key_with("{0} field is required", &[&label]));
        }

        if field.data_type.is_sized() && field.size > 0 && value.chars().count() > field.size {
            return Some(translate::key_with(
                "{0} field cannot contain more than {1} characters",
                &[&label, &field.size],
            ));
        }

        match field.data_type {
            FieldType::Int if value.parse::<i64>().is_err() => {
                return Some(translate::key_with("{0} field has an invalid number", &[&label]));
            }
            FieldType::Float if parse_number(value).is_none() => {
                return Some(translate::key_with("{0} field has an invalid number", &[&label]));
            }
            FieldType::Date if parse_date(value).is_none() => {
                return Some(translate::key_with("{0} field has an invalid date", &[&label]));
            }
            FieldType::DateTime if parse_date_time(value).is_none() => {
                return Some(translate::key_with("{0} field has an invalid date", &[&label]));
            }
            _ => {}
        }

        if field.component == FormComponent::Hour && NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            return Some(translate::key_with("{0} field has an invalid time", &[&label]));
        }

        if field.component == FormComponent::Email && !email_regex().is_match(value) {
            return Some(translate::key_with("{0} field has an invalid email", &[&label]));
        }

        if let Some(number) = parse_number(value).filter(|_| field.data_type.is_numeric()) {
            if field.min_value.is_some_and(|min| number < min) {
                return Some(translate::key_with(
                    "{0} field must be greater than or equal to {1}",
                    &[&label, &field.min_value.unwrap_or_default()],
                ));
            }
            if field.max_value.is_some_and(|max| number > max) {
                return Some(translate::key_with(
                    "{0} field must be less than or equal to {1}",
                    &[&label, &field.max_value.unwrap_or_default()],
                ));
            }
        }

        None
    }
}
