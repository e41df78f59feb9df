//! Lazy filter field: the value is committed after a pause in typing.

use std::time::{Duration, Instant};

pub const DEFAULT_FILTER_TIMEOUT: Duration = Duration::from_millis(400);

/// Filter text field in lazy value-change mode.
#[derive(Debug, Clone)]
pub struct LazyFilter {
    timeout: Duration,
    draft: String,
    committed: String,
    last_input_at: Option<Instant>,
}

impl LazyFilter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            draft: String::new(),
            committed: String::new(),
            last_input_at: None,
        }
    }

    /// Records a keystroke. Nothing is committed yet.
    pub fn input(&mut self, text: impl Into<String>, at: Instant) {
        self.draft = text.into();
        self.last_input_at = Some(at);
    }

    /// Commits the draft when `timeout` has elapsed since the last keystroke.
    ///
    /// Returns `true` only when the committed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_input_at {
            Some(at) if now.saturating_duration_since(at) >= self.timeout => {
                self.last_input_at = None;
                self.commit_draft()
            }
            _ => false,
        }
    }

    /// Commits `text` immediately. Returns `true` when the value changed.
    pub fn commit(&mut self, text: impl Into<String>) -> bool {
        self.draft = text.into();
        self.last_input_at = None;
        self.commit_draft()
    }

    /// The value queries are based on.
    pub fn value(&self) -> &str {
        &self.committed
    }

    /// The text currently in the field, committed or not.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_pending(&self) -> bool {
        self.last_input_at.is_some()
    }

    fn commit_draft(&mut self) -> bool {
        if self.draft == self.committed {
            return false;
        }
        self.committed = self.draft.clone();
        true
    }
}

impl Default for LazyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_TIMEOUT)
    }
}
