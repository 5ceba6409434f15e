//! Note/tag domain model.
//!
//! # Responsibility
//! - Define the persisted records (`RawNote`, `Tag`) and the derived view
//!   (`Note`).
//! - Keep the JSON shape of persisted records stable.
//!
//! # Invariants
//! - Notes reference tags by id only; tag objects are resolved at read time.
//! - `Note` is never persisted.

pub mod note;
pub mod tag;
