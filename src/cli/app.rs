//! CLI module for the memo application
//!
//! This module handles the command-line interface for interacting with
//! the note and bookmark stores. It is a thin adapter: every subcommand
//! maps to one store operation, and the only logic here is rendering.
use log::debug;

use crate::{
    parse_tags, BookmarkCommand, BookmarkStore, ChecklistCommand, Commands, Config, FolderCommand,
    Note, NoteCommand, NoteFilter, NoteStore, NoteUpdate, Result,
};

/// CLI application handler - processes CLI commands and interfaces with
/// the stores
pub struct App {
    /// The note storage backend
    store: NoteStore,

    /// Application configuration
    config: Config,
}

impl App {
    /// Create a new CLI application with the given storage backend and config
    pub fn new(store: NoteStore, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the CLI application with the given command.
    ///
    /// Rejections (missing ids, the protected folder) are reported to
    /// the user and swallowed; persistence failures propagate.
    pub fn run(&mut self, command: Option<Commands>) -> Result<()> {
        let outcome = match command {
            None => self.print_overview(),
            Some(Commands::Folder(command)) => self.handle_folder(command),
            Some(Commands::Note(command)) => self.handle_note(command),
            Some(Commands::Checklist(command)) => self.handle_checklist(command),
            Some(Commands::Bookmark(command)) => self.handle_bookmark(command),
        };

        match outcome {
            Err(e) if e.is_rejection() => {
                debug!("Command rejected: {}", e);
                println!("{}", e);
                Ok(())
            }
            other => other,
        }
    }

    /// Default screen: folders with note counts, then the most recent notes
    fn print_overview(&self) -> Result<()> {
        println!("Folders:");
        for folder in self.store.folders() {
            println!(
                "  [{}] {} ({})",
                folder.id,
                folder.name,
                self.store.note_count(folder.id)
            );
        }

        let recent = self.store.list_notes(&NoteFilter::default());
        if !recent.is_empty() {
            println!("\nRecent notes:");
            for note in recent.iter().take(10) {
                println!("  {}", self.note_line(note));
            }
        }
        Ok(())
    }

    fn handle_folder(&mut self, command: FolderCommand) -> Result<()> {
        match command {
            FolderCommand::List => {
                for folder in self.store.folders() {
                    println!(
                        "[{}] {} ({})",
                        folder.id,
                        folder.name,
                        self.store.note_count(folder.id)
                    );
                }
            }

            FolderCommand::Add { name } => {
                let folder = self.store.add_folder(&name)?;
                println!("Created folder [{}] {}", folder.id, folder.name);
            }

            FolderCommand::Rename { id, name } => {
                let folder = self.store.rename_folder(id, &name)?;
                println!("Renamed folder [{}] to {}", folder.id, folder.name);
            }

            FolderCommand::Delete { id } => {
                self.store.delete_folder(id)?;
                println!("Deleted folder [{}]", id);
            }
        }

        Ok(())
    }

    fn handle_note(&mut self, command: NoteCommand) -> Result<()> {
        match command {
            NoteCommand::New {
                folder,
                title,
                body,
                tags,
            } => {
                let note = self
                    .store
                    .create_note(folder, &title, &body, parse_tags(tags))?;
                println!("Created note [{}] in folder {}", note.id, note.folder_id);
            }

            NoteCommand::Edit {
                id,
                title,
                body,
                folder,
                tags,
            } => {
                let update = NoteUpdate {
                    title,
                    body,
                    folder_id: folder,
                    tags: tags.map(|t| parse_tags(Some(t))),
                };
                let note = self.store.edit_note(id, update)?;
                println!("Updated note [{}]", note.id);
            }

            NoteCommand::View { id } => {
                let note = self.store.note(id)?;
                Self::display_note(note);
            }

            NoteCommand::Delete { id } => {
                self.store.delete_note(id)?;
                println!("Deleted note [{}]", id);
            }

            NoteCommand::List {
                folder,
                pinned,
                tag,
                search,
            } => {
                let notes = self.store.list_notes(&NoteFilter {
                    folder_id: folder,
                    pinned_only: pinned,
                    tag,
                    query: search,
                });
                self.display_notes(&notes);
            }

            NoteCommand::Pin { id } => {
                let note = self.store.set_pinned(id, true)?;
                println!("Pinned note [{}] {}", note.id, note.title);
            }

            NoteCommand::Unpin { id } => {
                let note = self.store.set_pinned(id, false)?;
                println!("Unpinned note [{}] {}", note.id, note.title);
            }
        }

        Ok(())
    }

    fn handle_checklist(&mut self, command: ChecklistCommand) -> Result<()> {
        match command {
            ChecklistCommand::Add { note, text } => {
                let item = self.store.add_checklist_item(note, &text)?;
                println!("Added checklist item ({})", item.id);
            }

            ChecklistCommand::Check { note, item } => {
                let item = self.store.set_checklist_item(note, item, true)?;
                println!("Checked item ({}) {}", item.id, item.text);
            }

            ChecklistCommand::Uncheck { note, item } => {
                let item = self.store.set_checklist_item(note, item, false)?;
                println!("Unchecked item ({}) {}", item.id, item.text);
            }

            ChecklistCommand::Remove { note, item } => {
                self.store.remove_checklist_item(note, item)?;
                println!("Removed checklist item ({})", item);
            }
        }

        Ok(())
    }

    fn handle_bookmark(&mut self, command: BookmarkCommand) -> Result<()> {
        let mut bookmarks = BookmarkStore::load(&self.config.bookmarks_file)?;

        match command {
            BookmarkCommand::List => {
                for bookmark in bookmarks.bookmarks() {
                    if bookmark.desc.is_empty() {
                        println!(
                            "{}  {}",
                            console::style(&bookmark.name).bold(),
                            bookmark.url
                        );
                    } else {
                        println!(
                            "{}  {}  ({})",
                            console::style(&bookmark.name).bold(),
                            bookmark.url,
                            bookmark.desc
                        );
                    }
                }
            }

            BookmarkCommand::Add { name, url, desc } => {
                let bookmark = bookmarks.add(&name, &url, &desc)?;
                println!("Added bookmark {} -> {}", bookmark.name, bookmark.url);
            }

            BookmarkCommand::Remove { name } => {
                bookmarks.remove(&name)?;
                println!("Removed bookmark {}", name);
            }

            BookmarkCommand::Open { name } => {
                let bookmark = bookmarks.open(&name)?;
                println!("Opening {} ...", bookmark.url);
            }
        }

        Ok(())
    }

    /// One-line listing form of a note
    fn note_line(&self, note: &Note) -> String {
        let marker = if note.pinned { "* " } else { "" };
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            format!(
                " {}",
                console::style(
                    note.tags
                        .iter()
                        .map(|tag| format!("#{}", tag))
                        .collect::<Vec<_>>()
                        .join(" ")
                )
                .cyan()
            )
        };

        format!(
            "[{}] {}{}{} (folder:{} updated:{})",
            note.id,
            marker,
            console::style(&note.title).bold(),
            tags,
            note.folder_id,
            note.updated_at
        )
    }

    /// Display notes in text format
    fn display_notes(&self, notes: &[Note]) {
        if notes.is_empty() {
            println!("No notes found matching the criteria.");
            return;
        }

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            // Add separator between notes (except before the first)
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            println!("{}", self.note_line(note));

            let preview = Self::body_preview(&note.body, 100);
            if !preview.is_empty() {
                println!("    {}", preview);
            }
        }

        println!(
            "\nFound {} note{}",
            notes.len(),
            if notes.len() == 1 { "" } else { "s" }
        );
    }

    /// Full view of a single note
    fn display_note(note: &Note) {
        let marker = if note.pinned { "* " } else { "" };
        println!(
            "[{}] {}{}",
            note.id,
            marker,
            console::style(&note.title).bold()
        );

        if !note.tags.is_empty() {
            let tags = note
                .tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ");
            println!("Tags: {}", console::style(tags).cyan());
        }

        println!("Folder: {}", note.folder_id);
        println!("Created: {}  Updated: {}", note.created_at, note.updated_at);

        if !note.checklist.is_empty() {
            println!("Checklist:");
            for item in &note.checklist {
                let mark = if item.checked { "[x]" } else { "[ ]" };
                println!("  ({}) {} {}", item.id, mark, item.text);
            }
        }

        if !note.body.is_empty() {
            println!("\n{}", note.body);
        }
    }

    /// Generate a body preview for brief listings
    fn body_preview(body: &str, max_len: usize) -> String {
        // Get first non-empty line
        let first_line = body
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("");

        if first_line.chars().count() <= max_len {
            first_line.to_string()
        } else {
            let cut: String = first_line.chars().take(max_len).collect();
            format!("{}...", cut)
        }
    }
}
