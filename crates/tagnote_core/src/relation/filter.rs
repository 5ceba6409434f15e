//! Note list filtering by title text and selected tags.

use crate::model::note::Note;
use crate::model::tag::TagId;

/// Filter criteria for the note list.
///
/// The default value matches every note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against the note title.
    pub title: String,
    /// Every listed tag id must be present among the note's resolved tags.
    pub tag_ids: Vec<TagId>,
}

impl NoteFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tag_ids.is_empty()
    }

    /// Returns whether `note` satisfies both criteria.
    pub fn matches(&self, note: &Note) -> bool {
        let title_ok = self.title.is_empty()
            || note
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        let tags_ok = self
            .tag_ids
            .iter()
            .all(|wanted| note.tags.iter().any(|tag| &tag.id == wanted));
        title_ok && tags_ok
    }
}

/// Returns the notes matching `filter`, in input order.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}
