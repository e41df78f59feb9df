//! Contact record, status enum and field rules.
//!
//! # Invariants
//! - `id == None` means the contact has never been persisted.
//! - Rules in this module are the only definition of a valid contact; the
//!   binder applies them per field and the repository re-checks them.

use crate::model::company::Company;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a persisted contact.
pub type ContactId = Uuid;

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*$").expect("valid email regex")
});

/// Sales pipeline state of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    ImportedLead,
    NotContacted,
    Contacted,
    Customer,
    ClosedLost,
}

impl ContactStatus {
    /// Every status, in the order the form offers them.
    pub const ALL: [ContactStatus; 5] = [
        ContactStatus::ImportedLead,
        ContactStatus::NotContacted,
        ContactStatus::Contacted,
        ContactStatus::Customer,
        ContactStatus::ClosedLost,
    ];

    /// Storage and command-line key.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::ImportedLead => "imported_lead",
            Self::NotContacted => "not_contacted",
            Self::Contacted => "contacted",
            Self::Customer => "customer",
            Self::ClosedLost => "closed_lost",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_key() == value)
    }

    /// Human-readable label shown in the grid.
    pub fn label(self) -> &'static str {
        match self {
            Self::ImportedLead => "Imported lead",
            Self::NotContacted => "Not contacted",
            Self::Contacted => "Contacted",
            Self::Customer => "Customer",
            Self::ClosedLost => "Closed (lost)",
        }
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Person record listed in the grid and edited by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Assigned by the repository on first save.
    pub id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<Company>,
    pub status: Option<ContactStatus>,
}

impl Contact {
    /// Creates an empty, transient contact.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Checks every field rule and returns the first violation.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        check_text(ContactField::FirstName, &self.first_name)?;
        check_text(ContactField::LastName, &self.last_name)?;
        check_text(ContactField::Email, &self.email)?;
        check_present(ContactField::Company, self.company.as_ref())?;
        check_present(ContactField::Status, self.status.as_ref())?;
        Ok(())
    }
}

/// Editable contact attribute, as bound by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Company,
    Status,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Company,
        ContactField::Status,
    ];

    /// Column header / form caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Status => "Status",
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Status => "status",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_key() == value)
    }
}

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    pub field: ContactField,
    pub message: String,
}

impl ContactValidationError {
    fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_key(), self.message)
    }
}

impl Error for ContactValidationError {}

/// Applies the text rule of `field` to an already trimmed value.
///
/// `Company` and `Status` have no text form and always pass here.
pub fn check_text(field: ContactField, value: &str) -> Result<(), ContactValidationError> {
    let max_chars = match field {
        ContactField::FirstName | ContactField::LastName => NAME_MAX_CHARS,
        ContactField::Email => EMAIL_MAX_CHARS,
        ContactField::Company | ContactField::Status => return Ok(()),
    };

    if value.trim().is_empty() {
        return Err(ContactValidationError::new(field, "must not be empty"));
    }
    if value.chars().count() > max_chars {
        return Err(ContactValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    if field == ContactField::Email && !EMAIL_RE.is_match(value) {
        return Err(ContactValidationError::new(
            field,
            "must be a well-formed email address",
        ));
    }
    Ok(())
}

/// Rule for the required choice fields.
pub fn check_present<T>(
    field: ContactField,
    value: Option<&T>,
) -> Result<(), ContactValidationError> {
    match value {
        Some(_) => Ok(()),
        None => Err(ContactValidationError::new(field, "must be selected")),
    }
}

/// Case folding used for name fragment search.
pub fn search_key(value: &str) -> String {
    value.to_lowercase()
}

/// Generates the identifier given to a contact on first save.
pub fn new_contact_id() -> ContactId {
    Uuid::new_v4()
}
