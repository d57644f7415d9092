//! Shared types for the memo application.
//!
//! This module contains the crate-wide Result alias, the CLI command
//! tree, and the option structs consumed by the note store.
use clap::Subcommand;

use crate::MemoError;

/// A specialized Result type for memo operations.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Filters applied by `NoteStore::list_notes`, in this order: folder
/// match, pinned-only, exact tag membership, case-insensitive substring
/// match against title or body.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Only notes in this folder
    pub folder_id: Option<u64>,
    /// Only pinned notes
    pub pinned_only: bool,
    /// Only notes carrying this exact tag
    pub tag: Option<String>,
    /// Case-insensitive substring matched against title or body
    pub query: Option<String>,
}

/// Field updates applied by `NoteStore::edit_note`.
///
/// Each `Some` field replaces the stored value, except that a title that
/// is empty after trimming is ignored rather than clearing the field.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub folder_id: Option<u64>,
    pub tags: Option<Vec<String>>,
}

/// Available subcommands for the memo application
#[derive(Subcommand)]
pub enum Commands {
    /// Folder operations (list, add, rename, delete)
    #[clap(subcommand)]
    Folder(FolderCommand),

    /// Note operations (new, edit, view, delete, list, pin, unpin)
    #[clap(subcommand)]
    Note(NoteCommand),

    /// Checklist operations on a note (add, check, uncheck, remove)
    #[clap(subcommand)]
    Checklist(ChecklistCommand),

    /// Bookmark operations (list, add, remove, open)
    #[clap(subcommand)]
    Bookmark(BookmarkCommand),
}

#[derive(Subcommand)]
pub enum FolderCommand {
    /// List folders with their note counts
    List,

    /// Create a new folder
    Add {
        /// Name of the folder
        name: String,
    },

    /// Rename an existing folder
    Rename {
        /// Id of the folder to rename
        id: u64,

        /// New name for the folder
        name: String,
    },

    /// Delete a folder and every note inside it
    Delete {
        /// Id of the folder to delete
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum NoteCommand {
    /// Create a new note
    New {
        /// Id of the folder to create the note in
        folder: u64,

        /// Title of the note
        title: String,

        /// Body text of the note
        #[clap(short, long, default_value = "")]
        body: String,

        /// Tags to associate with the note (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// Edit an existing note
    Edit {
        /// Id of the note to edit
        id: u64,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body text for the note
        #[clap(short, long)]
        body: Option<String>,

        /// Move the note to this folder
        #[clap(short, long)]
        folder: Option<u64>,

        /// Replace the note's tags (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// View a note by id
    View {
        /// Id of the note to view
        id: u64,
    },

    /// Delete a note by id
    Delete {
        /// Id of the note to delete
        id: u64,
    },

    /// List notes with optional filtering
    List {
        /// Filter notes by folder id
        #[clap(short, long)]
        folder: Option<u64>,

        /// Only show pinned notes
        #[clap(short, long)]
        pinned: bool,

        /// Filter notes by exact tag
        #[clap(short, long)]
        tag: Option<String>,

        /// Case-insensitive substring to match in title or body
        #[clap(short, long)]
        search: Option<String>,
    },

    /// Pin a note to the top of listings
    Pin {
        /// Id of the note to pin
        id: u64,
    },

    /// Unpin a note
    Unpin {
        /// Id of the note to unpin
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum ChecklistCommand {
    /// Add a checklist item to a note
    Add {
        /// Id of the note
        note: u64,

        /// Text of the checklist item
        text: String,
    },

    /// Check off a checklist item
    Check {
        /// Id of the note
        note: u64,

        /// Id of the checklist item
        item: u64,
    },

    /// Uncheck a checklist item
    Uncheck {
        /// Id of the note
        note: u64,

        /// Id of the checklist item
        item: u64,
    },

    /// Remove a checklist item from a note
    Remove {
        /// Id of the note
        note: u64,

        /// Id of the checklist item
        item: u64,
    },
}

#[derive(Subcommand)]
pub enum BookmarkCommand {
    /// List stored bookmarks
    List,

    /// Add a bookmark
    Add {
        /// Display name of the bookmark
        name: String,

        /// URL to open
        url: String,

        /// Short description
        #[clap(short, long, default_value = "")]
        desc: String,
    },

    /// Remove a bookmark by name
    Remove {
        /// Name of the bookmark to remove
        name: String,
    },

    /// Open a bookmark in the system browser
    Open {
        /// Name of the bookmark to open
        name: String,
    },
}
