//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record edited by the main view.
//! - Define the company reference and the closed status enum.
//! - Own the per-field rule set shared by the binder and the repository.
//!
//! # Invariants
//! - A contact identifier is assigned once, on first save, and never changes.

pub mod company;
pub mod contact;
