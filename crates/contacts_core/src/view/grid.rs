//! Tabular contact listing with single selection.

use crate::model::contact::{Contact, ContactField, ContactId};

/// Grid of contacts with one column per [`ContactField`].
#[derive(Debug, Clone)]
pub struct ContactGrid {
    columns: Vec<ContactField>,
    rows: Vec<Contact>,
    selected: Option<ContactId>,
}

impl ContactGrid {
    pub fn new() -> Self {
        Self {
            columns: ContactField::ALL.to_vec(),
            rows: Vec::new(),
            selected: None,
        }
    }

    pub fn columns(&self) -> &[ContactField] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.label()).collect()
    }

    /// Cell text of `contact` in `column`.
    pub fn cell(contact: &Contact, column: ContactField) -> String {
        match column {
            ContactField::FirstName => contact.first_name.clone(),
            ContactField::LastName => contact.last_name.clone(),
            ContactField::Email => contact.email.clone(),
            ContactField::Company => contact
                .company
                .as_ref()
                .map(|company| company.name.clone())
                .unwrap_or_default(),
            ContactField::Status => contact
                .status
                .map(|status| status.label().to_string())
                .unwrap_or_default(),
        }
    }

    /// Cell texts of one row, in column order.
    pub fn render_row(&self, contact: &Contact) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| Self::cell(contact, *column))
            .collect()
    }

    /// Replaces the displayed rows.
    ///
    /// The highlighted row is kept only if it is still present.
    pub fn set_items(&mut self, rows: Vec<Contact>) {
        self.rows = rows;
        if let Some(id) = self.selected {
            if self.find(id).is_none() {
                self.selected = None;
            }
        }
    }

    pub fn rows(&self) -> &[Contact] {
        &self.rows
    }

    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.rows.iter().find(|row| row.id == Some(id))
    }

    /// Highlights the row with `id` and returns it.
    ///
    /// An id that is not displayed clears the highlight and returns `None`.
    pub fn select(&mut self, id: Option<ContactId>) -> Option<&Contact> {
        self.selected = id.filter(|id| self.find(*id).is_some());
        self.selected.and_then(|id| self.find(id))
    }

    pub fn selected(&self) -> Option<ContactId> {
        self.selected
    }

    pub fn deselect_all(&mut self) {
        self.selected = None;
    }
}

impl Default for ContactGrid {
    fn default() -> Self {
        Self::new()
    }
}
