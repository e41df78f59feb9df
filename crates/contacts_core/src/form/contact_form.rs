//! Contact edit form widget state.

use crate::model::company::{Company, CompanyId};
use crate::model::contact::{ContactField, ContactStatus, ContactValidationError};

/// One user edit of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    FirstName(String),
    LastName(String),
    Email(String),
    /// `None` clears the choice.
    Company(Option<CompanyId>),
    Status(Option<ContactStatus>),
}

impl FieldEdit {
    pub fn field(&self) -> ContactField {
        match self {
            Self::FirstName(_) => ContactField::FirstName,
            Self::LastName(_) => ContactField::LastName,
            Self::Email(_) => ContactField::Email,
            Self::Company(_) => ContactField::Company,
            Self::Status(_) => ContactField::Status,
        }
    }
}

/// Editable contact fields plus the choices offered for company and status.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) company: Option<Company>,
    pub(crate) status: Option<ContactStatus>,
    companies: Vec<Company>,
    errors: Vec<ContactValidationError>,
}

impl ContactForm {
    /// Creates an empty form offering `companies` as company choices.
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            companies,
            ..Self::default()
        }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn statuses(&self) -> &'static [ContactStatus] {
        &ContactStatus::ALL
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    pub fn status(&self) -> Option<ContactStatus> {
        self.status
    }

    /// Display text of a field, empty when unset.
    pub fn display_value(&self, field: ContactField) -> String {
        match field {
            ContactField::FirstName => self.first_name.clone(),
            ContactField::LastName => self.last_name.clone(),
            ContactField::Email => self.email.clone(),
            ContactField::Company => self
                .company
                .as_ref()
                .map(|company| company.name.clone())
                .unwrap_or_default(),
            ContactField::Status => self
                .status
                .map(|status| status.label().to_string())
                .unwrap_or_default(),
        }
    }

    /// Applies one edit and clears the stale error of that field.
    ///
    /// Returns `false` (leaving the form untouched) when a company id is not
    /// among the offered choices.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        let field = edit.field();
        match edit {
            FieldEdit::FirstName(value) => self.first_name = value,
            FieldEdit::LastName(value) => self.last_name = value,
            FieldEdit::Email(value) => self.email = value,
            FieldEdit::Company(None) => self.company = None,
            FieldEdit::Company(Some(id)) => {
                let Some(company) = self.companies.iter().find(|company| company.id == id) else {
                    return false;
                };
                self.company = Some(company.clone());
            }
            FieldEdit::Status(status) => self.status = status,
        }
        self.errors.retain(|error| error.field != field);
        true
    }

    /// Messages of the last failed write.
    pub fn errors(&self) -> &[ContactValidationError] {
        &self.errors
    }

    pub fn error_for(&self, field: ContactField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Whether every field is unset.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.email.is_empty()
            && self.company.is_none()
            && self.status.is_none()
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<ContactValidationError>) {
        self.errors = errors;
    }
}
