//! Field rules for contact-form submissions.
//!
//! This is the authoritative copy of the rules; any client-side checks are a
//! convenience layer over it.

use super::submission::ContactRequest;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Field name to human-readable message. Empty means the record is acceptable.
pub type ValidationErrors = BTreeMap<String, String>;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÿ ,.'-]+$").unwrap());

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());

/// Checks every field of `request` and collects one message per failing field.
///
/// Text values are trimmed before matching, so surrounding whitespace never
/// decides the outcome.
pub fn validate(request: &ContactRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    check_pattern(
        &mut errors,
        "name",
        request.name.as_deref(),
        &NAME_RE,
        "Invalid name",
    );
    check_pattern(
        &mut errors,
        "email",
        request.email.as_deref(),
        &EMAIL_RE,
        "Invalid email",
    );
    check_pattern(
        &mut errors,
        "subject",
        request.subject.as_deref(),
        &SUBJECT_RE,
        "Letters only",
    );

    match request.message.as_deref().map(str::trim) {
        None | Some("") => add_error(&mut errors, "message", "Message is required"),
        Some(message) if message.contains(['<', '>']) => {
            add_error(&mut errors, "message", "HTML tags not allowed")
        }
        Some(_) => {}
    }

    if request.consent != Some(true) {
        add_error(&mut errors, "consent", "Consent is required");
    }

    errors
}

fn check_pattern(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    pattern: &Regex,
    message: &str,
) {
    match value.map(str::trim) {
        None | Some("") => add_error(errors, field, &format!("{} is required", capitalize(field))),
        Some(value) if !pattern.is_match(value) => add_error(errors, field, message),
        Some(_) => {}
    }
}

fn add_error(errors: &mut ValidationErrors, field: &str, message: &str) {
    errors.insert(field.to_string(), message.to_string());
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
