//! Core domain logic for tagnote.
//! This crate is the single source of truth for note/tag invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod relation;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{CoreConfig, DbLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteData, NoteId, RawNote};
pub use model::tag::{Tag, TagId};
pub use relation::filter::{filter_notes, NoteFilter};
pub use relation::join::list_notes_with_tags;
pub use repo::collection_repo::{
    CollectionRepository, StoreCollectionRepository, NOTES_KEY, TAGS_KEY,
};
pub use service::note_service::{MutationOutcome, NoteService, ServiceError, ServiceResult};
pub use store::{
    read_json, write_json, KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
