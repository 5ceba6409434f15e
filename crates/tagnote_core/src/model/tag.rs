//! Tag record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable tag identifier.
///
/// Ids are opaque strings so records written by other clients of the same
/// layout load unchanged.
pub type TagId = String;

/// Label entity referenced by zero or more notes.
///
/// Identity is `id`; `label` is freely editable and need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
}

impl Tag {
    /// Creates a tag with a freshly generated id.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), label)
    }

    /// Creates a tag with a caller-provided id.
    pub fn with_id(id: impl Into<TagId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
