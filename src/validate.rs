use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::player::{Field, FormValues};

pub const TEXT_MIN: usize = 2;
pub const TEXT_MAX: usize = 60;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Length is enforced separately; this constrains allowed characters.
        Regex::new(r"^[A-Za-z .'-]+$").expect("name pattern compiles")
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"))
}

/// First failing rule wins: required, then pattern, then length bounds.
pub fn field_error(field: Field, value: &str) -> Option<String> {
    let value = value.trim();
    match field {
        Field::PlayerName => free_text_error(value, "Name"),
        Field::PlayerCity => free_text_error(value, "Player City"),
        Field::Phone => {
            if value.is_empty() {
                return Some("Phone is required".to_string());
            }
            if !phone_regex().is_match(value) {
                return Some("Phone must be exactly 10 digits".to_string());
            }
            None
        }
        Field::PlayedIn | Field::PlayerType | Field::LastPlayedFor => {
            choice_error(value, field.label(), field.options())
        }
    }
}

pub fn validate_form(form: &FormValues) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();
    for field in Field::ALL {
        if let Some(message) = field_error(field, form.value(field)) {
            errors.insert(field, message);
        }
    }
    errors
}

fn free_text_error(value: &str, noun: &str) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{noun} is required"));
    }
    if !name_regex().is_match(value) {
        return Some(format!(
            "{noun} may only contain letters, spaces, apostrophes, hyphens, or dots"
        ));
    }
    let length = value.chars().count();
    if length < TEXT_MIN {
        return Some(format!("{noun} must be at least {TEXT_MIN} characters"));
    }
    if length > TEXT_MAX {
        return Some(format!("{noun} must be at most {TEXT_MAX} characters"));
    }
    None
}

fn choice_error(value: &str, noun: &str, options: &[&str]) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{noun} is required"));
    }
    if !options.contains(&value) {
        return Some(format!("{noun} must be one of the listed options"));
    }
    None
}
