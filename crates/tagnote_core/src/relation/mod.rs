//! Note/tag relational derivations.
//!
//! # Responsibility
//! - Join raw notes with the tag collection into display-ready notes.
//! - Narrow joined notes by title text and selected tags.
//!
//! # Invariants
//! - Derivations are pure: same inputs, same output, no store access.
//! - Dangling tag references are dropped, never reported.

pub mod filter;
pub mod join;
