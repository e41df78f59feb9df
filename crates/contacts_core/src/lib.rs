//! Core of the contacts application: a filterable contact list bound to an
//! edit form over a SQLite repository.
//! Front ends feed [`ViewEvent`]s into [`MainView`] and render its state.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use form::binder::{ContactBinder, ValidationErrors};
pub use form::contact_form::{ContactForm, FieldEdit};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::company::{Company, CompanyId};
pub use model::contact::{Contact, ContactField, ContactId, ContactStatus, ContactValidationError};
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::seed_demo_data;
pub use view::event::ViewEvent;
pub use view::grid::ContactGrid;
pub use view::main_view::{MainView, QueryPath, Selection, ViewOptions};
pub use view::notification::{Notification, NotificationKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
