//! Interactive console over the project store.
//!
//! # Responsibility
//! - Run the menu loop and dispatch to the five store operations.
//! - Coerce prompt text into typed values.
//! - Track the currently selected project for the session.
//!
//! # Invariants
//! - Malformed input and store errors never end the session.
//! - The current selection always mirrors committed store state.

pub mod controller;
pub mod input;
