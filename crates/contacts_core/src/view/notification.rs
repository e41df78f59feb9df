//! Transient user-facing messages.

use std::time::Duration;

pub const CONTACT_DELETED: &str = "Contact deleted.";
pub const CONTACT_STORED: &str = "Contact details stored.";
pub const INVALID_CONTACT: &str = "Please enter a valid contact details.";

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message shown for `duration`, then dismissed by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: &'static str,
    pub kind: NotificationKind,
    pub duration: Duration,
}
