//! Named UI events accepted by [`crate::view::main_view::MainView::handle`].

use crate::form::contact_form::FieldEdit;
use crate::model::contact::ContactId;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A keystroke in the filter field; committed once typing pauses.
    FilterTyped { text: String, at: Instant },
    /// Clock tick letting a pending filter value settle.
    Tick(Instant),
    /// Filter value committed right away (Enter or focus loss).
    FilterCommitted(String),
    /// Grid row selected (`Some`) or selection cleared (`None`).
    SelectionChanged(Option<ContactId>),
    AddContact,
    FieldEdited(FieldEdit),
    Save,
    Delete,
    Close,
}

impl ViewEvent {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FilterTyped { .. } => "filter_typed",
            Self::Tick(_) => "tick",
            Self::FilterCommitted(_) => "filter_committed",
            Self::SelectionChanged(_) => "selection_changed",
            Self::AddContact => "add_contact",
            Self::FieldEdited(_) => "field_edited",
            Self::Save => "save",
            Self::Delete => "delete",
            Self::Close => "close",
        }
    }
}
