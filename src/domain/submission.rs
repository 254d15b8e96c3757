use super::validation::{ValidationErrors, validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact-form payload as it arrives on the wire.
///
/// Every field is optional so that an absent field is reported by the
/// validator rather than rejected by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub consent: Option<bool>,
}

/// A submission that passed validation but has not been stored yet.
///
/// Only obtainable through `TryFrom<ContactRequest>`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl TryFrom<ContactRequest> for NewSubmission {
    type Error = ValidationErrors;

    fn try_from(request: ContactRequest) -> Result<Self, Self::Error> {
        let errors = validate(&request);
        if !errors.is_empty() {
            return Err(errors);
        }

        let trimmed = |value: Option<String>| value.unwrap_or_default().trim().to_string();
        Ok(Self {
            name: trimmed(request.name),
            email: trimmed(request.email),
            subject: trimmed(request.subject),
            message: trimmed(request.message),
        })
    }
}

/// A stored contact-form entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    // Records written before this field existed were only accepted with consent.
    #[serde(default = "consent_given")]
    pub consent: bool,
    pub timestamp: DateTime<Utc>,
}

fn consent_given() -> bool {
    true
}

impl Submission {
    /// Stamps a validated entry with the time it was appended.
    pub fn stamp(entry: NewSubmission, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: entry.name,
            email: entry.email,
            subject: entry.subject,
            message: entry.message,
            consent: true,
            timestamp,
        }
    }
}
