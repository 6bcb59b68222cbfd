// src/forms.rs
//
// Client-side checks shared by the add/edit forms and the hospital wizard.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Field name -> message. Empty means the form passed.
pub type FormErrors = BTreeMap<&'static str, String>;

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Records `message` under `field` when `value` is blank.
pub fn require(errors: &mut FormErrors, field: &'static str, value: &str, message: &str) {
    if is_blank(value) {
        errors.insert(field, message.to_string());
    }
}
