//! Field binder between [`ContactForm`] and [`Contact`].
//!
//! Each binding names a form field, the contact attribute it maps to and the
//! rule that guards it. `read` copies attributes into the form; `write`
//! validates every field and produces an updated contact only when all pass.

use crate::form::contact_form::ContactForm;
use crate::model::contact::{
    check_present, check_text, Contact, ContactField, ContactValidationError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// All rule violations found by one [`ContactBinder::write`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ContactValidationError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ContactValidationError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<ContactField> {
        self.errors.iter().map(|error| error.field).collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "contact validation failed: {}", messages.join("; "))
    }
}

impl Error for ValidationErrors {}

/// Binds a [`ContactForm`] to contact attributes.
#[derive(Debug, Clone, Default)]
pub struct ContactBinder {
    form: ContactForm,
}

impl ContactBinder {
    pub fn new(form: ContactForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Loads `contact` into the form, or resets every field for `None`.
    ///
    /// Field errors from an earlier write are discarded either way.
    pub fn read(&mut self, contact: Option<&Contact>) {
        let form = &mut self.form;
        match contact {
            Some(contact) => {
                form.first_name = contact.first_name.clone();
                form.last_name = contact.last_name.clone();
                form.email = contact.email.clone();
                form.company = contact.company.clone();
                form.status = contact.status;
            }
            None => {
                form.first_name.clear();
                form.last_name.clear();
                form.email.clear();
                form.company = None;
                form.status = None;
            }
        }
        form.set_errors(Vec::new());
    }

    /// Validates the form and writes its values into a copy of `target`.
    ///
    /// On failure the form keeps the user's input and records one message
    /// per failing field; `target` is never modified.
    pub fn write(&mut self, target: &Contact) -> Result<Contact, ValidationErrors> {
        let errors = ContactField::ALL
            .into_iter()
            .filter_map(|field| self.check_field(field).err())
            .collect::<Vec<_>>();

        if !errors.is_empty() {
            self.form.set_errors(errors.clone());
            return Err(ValidationErrors { errors });
        }

        self.form.set_errors(Vec::new());
        let form = &self.form;
        Ok(Contact {
            id: target.id,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            company: form.company.clone(),
            status: form.status,
        })
    }

    fn check_field(&self, field: ContactField) -> Result<(), ContactValidationError> {
        let form = &self.form;
        match field {
            ContactField::FirstName => check_text(field, form.first_name.trim()),
            ContactField::LastName => check_text(field, form.last_name.trim()),
            ContactField::Email => check_text(field, form.email.trim()),
            ContactField::Company => check_present(field, form.company.as_ref()),
            ContactField::Status => check_present(field, form.status.as_ref()),
        }
    }
}
