//! Main view orchestration.
//!
//! # Responsibility
//! - Drive repository queries from the filter and list refreshes.
//! - Move the selected contact into the form and form results into storage.
//!
//! # Invariants
//! - Clearing the selection always clears the form.
//! - Saving with no selection starts a new contact before the form is
//!   written, so a failed save leaves the view in `Selection::Editing`.
//! - A failed save performs no repository call and keeps the user's input.
//! - Repository errors propagate out of [`MainView::handle`] unchanged.

use crate::form::binder::ContactBinder;
use crate::form::contact_form::{ContactForm, FieldEdit};
use crate::model::company::Company;
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoResult;
use crate::view::event::ViewEvent;
use crate::view::filter::{LazyFilter, DEFAULT_FILTER_TIMEOUT};
use crate::view::grid::ContactGrid;
use crate::view::notification::{
    Notification, NotificationKind, CONTACT_DELETED, CONTACT_STORED,
    DEFAULT_NOTIFICATION_DURATION, INVALID_CONTACT,
};
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::time::Duration;

/// Contact currently loaded into the form, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Editing(Contact),
}

impl Selection {
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Empty => None,
            Self::Editing(contact) => Some(contact),
        }
    }
}

/// Which repository query produced the current grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPath {
    FindAll,
    FindByNameFragment,
}

impl QueryPath {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FindAll => "find_all",
            Self::FindByNameFragment => "find_by_name_fragment",
        }
    }
}

/// Tunables of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub filter_timeout: Duration,
    pub notification_duration: Duration,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            filter_timeout: DEFAULT_FILTER_TIMEOUT,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}

/// Filter field, contact grid and edit form over one repository.
pub struct MainView<R: ContactRepository> {
    repo: R,
    filter: LazyFilter,
    grid: ContactGrid,
    binder: ContactBinder,
    selection: Selection,
    notifications: VecDeque<Notification>,
    notification_duration: Duration,
    last_query_path: Option<QueryPath>,
}

impl<R: ContactRepository> MainView<R> {
    /// Builds the view and loads the unfiltered list.
    ///
    /// `companies` become the company choices of the edit form.
    pub fn new(repo: R, companies: Vec<Company>, options: ViewOptions) -> RepoResult<Self> {
        let mut view = Self {
            repo,
            filter: LazyFilter::new(options.filter_timeout),
            grid: ContactGrid::new(),
            binder: ContactBinder::new(ContactForm::new(companies)),
            selection: Selection::Empty,
            notifications: VecDeque::new(),
            notification_duration: options.notification_duration,
            last_query_path: None,
        };
        view.update_list()?;
        Ok(view)
    }

    /// Dispatches one UI event to its handler.
    pub fn handle(&mut self, event: ViewEvent) -> RepoResult<()> {
        debug!("event=view_event module=view name={}", event.name());
        match event {
            ViewEvent::FilterTyped { text, at } => {
                self.filter.input(text, at);
                Ok(())
            }
            ViewEvent::Tick(now) => {
                if self.filter.poll(now) {
                    self.update_list()?;
                }
                Ok(())
            }
            ViewEvent::FilterCommitted(text) => {
                if self.filter.commit(text) {
                    self.update_list()?;
                }
                Ok(())
            }
            ViewEvent::SelectionChanged(id) => {
                self.select(id);
                Ok(())
            }
            ViewEvent::AddContact => {
                self.add_contact();
                Ok(())
            }
            ViewEvent::FieldEdited(edit) => {
                self.edit_field(edit);
                Ok(())
            }
            ViewEvent::Save => self.save(),
            ViewEvent::Delete => self.delete(),
            ViewEvent::Close => {
                self.clear_form();
                Ok(())
            }
        }
    }

    /// Re-queries the repository using the committed filter value.
    ///
    /// A blank filter lists every contact; anything else is passed as typed
    /// to the name fragment search.
    pub fn update_list(&mut self) -> RepoResult<()> {
        let filter_value = self.filter.value();
        let (path, rows) = if filter_value.trim().is_empty() {
            (QueryPath::FindAll, self.repo.find_all()?)
        } else {
            (
                QueryPath::FindByNameFragment,
                self.repo.find_by_name_fragment(filter_value)?,
            )
        };

        info!(
            "event=update_list module=view status=ok path={} rows={}",
            path.as_str(),
            rows.len()
        );
        self.grid.set_items(rows);
        self.last_query_path = Some(path);
        Ok(())
    }

    pub fn grid(&self) -> &ContactGrid {
        &self.grid
    }

    pub fn form(&self) -> &ContactForm {
        self.binder.form()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter(&self) -> &LazyFilter {
        &self.filter
    }

    pub fn last_query_path(&self) -> Option<QueryPath> {
        self.last_query_path
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Drains queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn select(&mut self, id: Option<ContactId>) {
        match self.grid.select(id).cloned() {
            Some(contact) => self.populate_form(Some(contact)),
            None => self.clear_form(),
        }
    }

    fn add_contact(&mut self) {
        self.grid.deselect_all();
        self.populate_form(Some(Contact::new()));
    }

    fn edit_field(&mut self, edit: FieldEdit) {
        let field = edit.field();
        if !self.binder.form_mut().apply(edit) {
            warn!(
                "event=field_edit module=view status=rejected field={} reason=unknown_choice",
                field.as_key()
            );
        }
    }

    fn save(&mut self) -> RepoResult<()> {
        if self.selection == Selection::Empty {
            self.selection = Selection::Editing(Contact::new());
        }
        let target = self.selection.contact().cloned().unwrap_or_default();

        let contact = match self.binder.write(&target) {
            Ok(contact) => contact,
            Err(errors) => {
                let fields = errors
                    .fields()
                    .iter()
                    .map(|field| field.as_key())
                    .collect::<Vec<_>>();
                warn!(
                    "event=contact_save module=view status=invalid fields={}",
                    fields.join(",")
                );
                self.notify(INVALID_CONTACT, NotificationKind::Error);
                return Ok(());
            }
        };

        let op = if contact.is_persisted() { "update" } else { "insert" };
        self.repo.save(&contact)?;
        self.update_list()?;
        self.clear_form();
        info!("event=contact_save module=view status=ok op={op}");
        self.notify(CONTACT_STORED, NotificationKind::Success);
        Ok(())
    }

    fn delete(&mut self) -> RepoResult<()> {
        let Selection::Editing(contact) = &self.selection else {
            return Ok(());
        };
        // Unsaved drafts go through the same path; the repository ignores them.
        let contact = contact.clone();
        self.repo.delete(&contact)?;
        self.update_list()?;
        self.clear_form();
        info!("event=contact_delete module=view status=ok");
        self.notify(CONTACT_DELETED, NotificationKind::Success);
        Ok(())
    }

    fn clear_form(&mut self) {
        self.grid.deselect_all();
        self.populate_form(None);
    }

    fn populate_form(&mut self, contact: Option<Contact>) {
        self.binder.read(contact.as_ref());
        self.selection = match contact {
            Some(contact) => Selection::Editing(contact),
            None => Selection::Empty,
        };
    }

    fn notify(&mut self, message: &'static str, kind: NotificationKind) {
        self.notifications.push_back(Notification {
            message,
            kind,
            duration: self.notification_duration,
        });
    }
}
