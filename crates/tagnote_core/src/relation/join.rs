//! Raw note to view-model join.

use crate::model::note::{Note, RawNote};
use crate::model::tag::Tag;

/// Resolves each raw note's `tag_ids` against the full tag collection.
///
/// Output order follows `raw_notes`. Each note's `tags` keeps the order of the
/// `tags` collection and contains every tag whose id the note references.
/// Ids with no matching tag are skipped.
pub fn list_notes_with_tags(raw_notes: &[RawNote], tags: &[Tag]) -> Vec<Note> {
    raw_notes
        .iter()
        .map(|raw| resolve_note(raw, tags))
        .collect()
}

/// Resolves a single raw note. See [`list_notes_with_tags`].
pub fn resolve_note(raw: &RawNote, tags: &[Tag]) -> Note {
    Note {
        id: raw.id.clone(),
        title: raw.title.clone(),
        markdown: raw.markdown.clone(),
        tags: tags
            .iter()
            .filter(|tag| raw.references(&tag.id))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::list_notes_with_tags;
    use crate::model::note::RawNote;
    use crate::model::tag::Tag;

    fn raw(id: &str, tag_ids: &[&str]) -> RawNote {
        RawNote {
            id: id.to_string(),
            title: format!("title {id}"),
            markdown: String::new(),
            tag_ids: tag_ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn tags_follow_collection_order_not_reference_order() {
        let tags = vec![Tag::with_id("a", "alpha"), Tag::with_id("b", "beta")];
        let notes = list_notes_with_tags(&[raw("n1", &["b", "a"])], &tags);
        let labels: Vec<_> = notes[0].tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["alpha", "beta"]);
    }

    #[test]
    fn dangling_and_duplicate_ids_are_tolerated() {
        let tags = vec![Tag::with_id("a", "alpha")];
        let notes = list_notes_with_tags(&[raw("n1", &["a", "a", "gone"])], &tags);
        assert_eq!(notes[0].tags, vec![Tag::with_id("a", "alpha")]);
    }

    #[test]
    fn output_order_matches_input_order() {
        let notes = list_notes_with_tags(&[raw("n2", &[]), raw("n1", &[])], &[]);
        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n2", "n1"]);
    }

    #[test]
    fn empty_inputs_yield_empty_output() {
        assert!(list_notes_with_tags(&[], &[Tag::with_id("a", "alpha")]).is_empty());
    }
}
