//! Repository layer over the key-value store.
//!
//! # Responsibility
//! - Map the note and tag collections onto their fixed store keys.
//! - Isolate serialization details from service orchestration.
//!
//! # Invariants
//! - Loads never fail; absent or unreadable collections load as empty.
//! - Saves replace the whole collection in one store write.

pub mod collection_repo;
