//! Core data structures for the memo application.
//!
//! This module contains the persisted entity types: folders, notes, and
//! the checklist items nested inside notes.
use serde::{Deserialize, Serialize};

use crate::now_stamp;

/// A named grouping container for notes.
///
/// Folder id 1 is the non-deletable default folder created on first run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier, assigned monotonically
    pub id: u64,
    /// Display name, stored trimmed
    pub name: String,
    /// When the folder was created (ISO-8601, second precision)
    pub created_at: String,
}

impl Folder {
    /// Creates a new folder with the given id and (trimmed) name
    pub fn new(id: u64, name: &str) -> Self {
        Folder {
            id,
            name: name.trim().to_string(),
            created_at: now_stamp(),
        }
    }
}

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note
    pub id: u64,
    /// Id of the owning folder; always references an existing folder
    pub folder_id: u64,
    /// Note title
    pub title: String,
    /// Note body text
    pub body: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Whether the note is pinned to the top of listings
    pub pinned: bool,
    /// When the note was created
    pub created_at: String,
    /// Last modification time
    pub updated_at: String,
    /// Checklist items attached to the note
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Note {
    /// Creates a new note in the given folder.
    ///
    /// The title is trimmed and falls back to a placeholder when empty;
    /// tags are trimmed and empty entries dropped. Both timestamps are
    /// stamped with the current time.
    pub fn new(id: u64, folder_id: u64, title: &str, body: &str, tags: Vec<String>) -> Self {
        let now = now_stamp();

        Note {
            id,
            folder_id,
            title: normalize_title(title),
            body: body.to_string(),
            tags: normalize_tags(tags),
            pinned: false,
            created_at: now.clone(),
            updated_at: now,
            checklist: Vec::new(),
        }
    }
}

/// A sub-task belonging to exactly one note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Identifier, unique within the owning note's checklist only
    pub id: u64,
    /// Item text, stored trimmed
    pub text: String,
    /// Whether the item has been checked off
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(id: u64, text: &str) -> Self {
        ChecklistItem {
            id,
            text: text.trim().to_string(),
            checked: false,
        }
    }
}

/// Placeholder used when a note is created or migrated without a title
pub const UNTITLED: &str = "Untitled";

/// Trims a title, substituting the placeholder when nothing remains
pub(crate) fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trims tags and drops empty entries; duplicates and order are preserved
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
