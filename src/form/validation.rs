//! Field validation rules for the add-user form
//!
//! Rules are stateless and scoped to one field so the same check backs both
//! live validation of a touched field and the batch check on step advance.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::draft::{DraftForm, Field};

/// Letters, whitespace, apostrophes and hyphens
fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern is valid"))
}

/// `local@domain.tld`, no whitespace
fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

fn digits_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"))
}

/// Check one field, returning the message to show beneath it
pub fn validate(field: Field, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(format!("{} is required", field.key()));
    }

    let len = value.chars().count();
    let message = match field {
        Field::Name => {
            if len < 2 {
                Some("Name is too short")
            } else if len > 50 {
                Some("Name is too long")
            } else if !name_pattern().is_match(value) {
                Some("Invalid name format")
            } else {
                None
            }
        }
        Field::Email => {
            if !email_pattern().is_match(value) {
                Some("Invalid email")
            } else if len > 100 {
                Some("Email is too long")
            } else {
                None
            }
        }
        Field::Street => {
            if len < 5 {
                Some("Street address is too short")
            } else if len > 100 {
                Some("Street address is too long")
            } else {
                None
            }
        }
        Field::City => {
            if len < 2 {
                Some("City name is too short")
            } else if len > 50 {
                Some("City name is too long")
            } else if !name_pattern().is_match(value) {
                Some("Invalid city name")
            } else {
                None
            }
        }
        // No length bound on zip codes
        Field::Zip => (!digits_pattern().is_match(value)).then_some("ZIP must be numbers only"),
    };

    message.map(str::to_string)
}

/// Validate a set of fields against the draft, keeping only failures
pub fn validate_fields(draft: &DraftForm, fields: &[Field]) -> BTreeMap<Field, String> {
    fields
        .iter()
        .filter_map(|field| validate(*field, draft.get(*field)).map(|msg| (*field, msg)))
        .collect()
}
