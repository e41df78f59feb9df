//! Main contact view: filter, grid, edit form and their event handlers.
//!
//! # Responsibility
//! - Turn discrete UI events into repository queries and mutations.
//! - Own the selection state and keep grid, form and selection consistent.
//!
//! # Invariants
//! - Events are handled one at a time, each to completion.
//! - The view is the only owner of the current selection.

pub mod event;
pub mod filter;
pub mod grid;
pub mod main_view;
pub mod notification;
