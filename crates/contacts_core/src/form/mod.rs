//! Edit form state and the binder moving values between form and contact.
//!
//! # Responsibility
//! - Hold the editable field values and their last validation messages.
//! - Map every form field to one contact attribute with one rule set.
//!
//! # Invariants
//! - `ContactBinder::write` never returns a partially written contact.

pub mod binder;
pub mod contact_form;
