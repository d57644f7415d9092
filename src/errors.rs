//! Error types for the memo application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during folder, note, checklist, and bookmark operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the memo application.
#[derive(Error, Debug)]
pub enum MemoError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Referenced folder does not exist.
    #[error("Folder not found: {id}")]
    FolderNotFound { id: u64 },

    /// Referenced note does not exist.
    #[error("Note not found: {id}")]
    NoteNotFound { id: u64 },

    /// Referenced checklist item does not exist on the note.
    #[error("Checklist item not found: {item_id} (note {note_id})")]
    ChecklistItemNotFound { note_id: u64, item_id: u64 },

    /// Referenced bookmark does not exist.
    #[error("Bookmark not found: {name}")]
    BookmarkNotFound { name: String },

    /// Attempt to delete the protected default folder.
    #[error("The default folder cannot be deleted")]
    ProtectedFolder,

    /// Bookmark fields failed validation.
    #[error("Invalid bookmark: {message}")]
    InvalidBookmark { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {}", .path.display())]
    DirectoryError { path: PathBuf },
}

impl MemoError {
    /// True for failures the command layer reports to the user and
    /// continues from, as opposed to persistence-level errors that
    /// propagate to the process exit path.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            MemoError::FolderNotFound { .. }
                | MemoError::NoteNotFound { .. }
                | MemoError::ChecklistItemNotFound { .. }
                | MemoError::BookmarkNotFound { .. }
                | MemoError::ProtectedFolder
                | MemoError::InvalidBookmark { .. }
        )
    }
}
