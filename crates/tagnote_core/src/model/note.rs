//! Note records: persisted `RawNote`, derived `Note` and `NoteData` input.
//!
//! # Invariants
//! - `RawNote::tag_ids` serializes as `tagIds`.
//! - Duplicated ids in `tag_ids` are tolerated and carry no meaning.

use crate::model::tag::{Tag, TagId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable note identifier.
pub type NoteId = String;

/// Persisted note record referencing tags only by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    pub tag_ids: Vec<TagId>,
}

impl RawNote {
    /// Builds a new record with a generated id from form input.
    pub fn from_data(data: &NoteData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title.clone(),
            markdown: data.markdown.clone(),
            tag_ids: data.tag_ids(),
        }
    }

    /// Returns a copy with content and tag references replaced by `data`.
    ///
    /// Identity is kept.
    pub fn replaced_with(&self, data: &NoteData) -> Self {
        Self {
            id: self.id.clone(),
            title: data.title.clone(),
            markdown: data.markdown.clone(),
            tag_ids: data.tag_ids(),
        }
    }

    /// Returns whether `tag_id` is referenced by this note.
    pub fn references(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|id| id == tag_id)
    }
}

/// Display-ready note with resolved tag objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

/// Form input for note create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteData {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

impl NoteData {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            tags,
        }
    }

    /// Tag references in input order.
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteData, RawNote};
    use crate::model::tag::Tag;

    #[test]
    fn raw_note_serializes_tag_ids_in_camel_case() {
        let note = RawNote {
            id: "n1".to_string(),
            title: "A".to_string(),
            markdown: "x".to_string(),
            tag_ids: vec!["t1".to_string()],
        };
        let value = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(
            value,
            serde_json::json!({"id": "n1", "title": "A", "markdown": "x", "tagIds": ["t1"]})
        );
    }

    #[test]
    fn replaced_with_keeps_identity() {
        let original = RawNote::from_data(&NoteData::new("A", "x", vec![]));
        let replaced =
            original.replaced_with(&NoteData::new("B", "y", vec![Tag::with_id("t1", "work")]));
        assert_eq!(replaced.id, original.id);
        assert_eq!(replaced.title, "B");
        assert_eq!(replaced.tag_ids, vec!["t1".to_string()]);
    }
}
