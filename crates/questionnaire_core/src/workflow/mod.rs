//! Questionnaire-taking workflow components.
//!
//! # Responsibility
//! - Orchestrate store calls into the card, widget and lifecycle use-cases.
//! - Keep host/UI layers decoupled from storage details.
//!
//! # Invariants
//! - An answer write is never issued while its parent return id is
//!   unresolved; the write is deferred and replayed after creation.
//! - Components surface persistence failures as toasts and leave local
//!   state unchanged; the user retries by repeating the action.

pub mod answer_widget;
pub mod card;
pub mod return_lifecycle;
pub mod view;
