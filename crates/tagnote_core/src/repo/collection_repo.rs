//! Collection repository contracts and store-backed implementation.
//!
//! # Responsibility
//! - Load/save the `NOTES` and `TAGS` collections as whole JSON arrays.
//!
//! # Invariants
//! - Collection order is preserved byte-for-byte across save/load.
//! - The two collections are independent; saving one never touches the other.

use crate::model::note::RawNote;
use crate::model::tag::Tag;
use crate::store::{read_json, write_json, KvStore, StoreResult};

/// Store key for the raw note collection.
pub const NOTES_KEY: &str = "NOTES";
/// Store key for the tag collection.
pub const TAGS_KEY: &str = "TAGS";

/// Repository interface for whole-collection persistence.
pub trait CollectionRepository {
    /// Loads raw notes, defaulting to empty.
    fn load_notes(&self) -> Vec<RawNote>;
    /// Loads tags, defaulting to empty.
    fn load_tags(&self) -> Vec<Tag>;
    /// Replaces the persisted raw note collection.
    fn save_notes(&mut self, notes: &[RawNote]) -> StoreResult<()>;
    /// Replaces the persisted tag collection.
    fn save_tags(&mut self, tags: &[Tag]) -> StoreResult<()>;
}

/// `CollectionRepository` backed by any `KvStore`.
pub struct StoreCollectionRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> StoreCollectionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KvStore> CollectionRepository for StoreCollectionRepository<S> {
    fn load_notes(&self) -> Vec<RawNote> {
        read_json(&self.store, NOTES_KEY, Vec::new())
    }

    fn load_tags(&self) -> Vec<Tag> {
        read_json(&self.store, TAGS_KEY, Vec::new())
    }

    fn save_notes(&mut self, notes: &[RawNote]) -> StoreResult<()> {
        write_json(&mut self.store, NOTES_KEY, notes)
    }

    fn save_tags(&mut self, tags: &[Tag]) -> StoreResult<()> {
        write_json(&mut self.store, TAGS_KEY, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionRepository, StoreCollectionRepository, NOTES_KEY, TAGS_KEY};
    use crate::model::tag::Tag;
    use crate::store::{KvStore, MemoryKvStore};

    #[test]
    fn saving_tags_leaves_notes_key_untouched() {
        let mut repo = StoreCollectionRepository::new(MemoryKvStore::new());
        repo.save_tags(&[Tag::with_id("t1", "work")]).unwrap();

        let store = repo.into_inner();
        assert_eq!(
            store.read_raw(TAGS_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"t1","label":"work"}]"#)
        );
        assert_eq!(store.read_raw(NOTES_KEY).unwrap(), None);
    }

    #[test]
    fn unreadable_notes_load_as_empty() {
        let mut store = MemoryKvStore::new();
        store.write_raw(NOTES_KEY, "[{\"id\":").unwrap();
        let repo = StoreCollectionRepository::new(store);
        assert!(repo.load_notes().is_empty());
    }
}
