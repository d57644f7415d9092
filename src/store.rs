//! The note store: folders, notes, and checklists over one JSON file.
//!
//! The whole store is loaded once per process and rewritten in full
//! after every mutating operation. Loading never propagates a parse
//! error: the file is parsed against the current document schema first,
//! then against the legacy flat task list, and failing both it is backed
//! up and the store reinitialized.
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{
    now_stamp, truncate_chars, ChecklistItem, Folder, MemoError, Note, NoteFilter, NoteUpdate,
    Result, UNTITLED,
};

/// Current schema version of the persisted document
pub const DATA_VERSION: u32 = 2;

/// Id of the protected default folder, created on first run
pub const DEFAULT_FOLDER_ID: u64 = 1;

const DEFAULT_FOLDER_NAME: &str = "Quick Notes";

/// Migrated legacy tasks keep at most this many characters as their title
const MIGRATED_TITLE_CHARS: usize = 20;

/// On-disk shape of the current schema
#[derive(Deserialize)]
struct Document {
    #[serde(default = "initial_version")]
    version: u32,
    #[serde(default)]
    folders: Vec<Folder>,
    #[serde(default)]
    notes: Vec<Note>,
}

/// Borrowing counterpart of `Document` used when serializing
#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    folders: &'a [Folder],
    notes: &'a [Note],
}

fn initial_version() -> u32 {
    1
}

/// One entry of the predecessor flat-task-list format. The mandatory
/// `task_id` key is what identifies the legacy shape.
#[derive(Deserialize)]
struct LegacyTask {
    task_id: u64,
    #[serde(default)]
    text: String,
    created_at: Option<String>,
}

/// Manages folders, notes, and their checklists, persisting everything
/// to a single JSON document.
pub struct NoteStore {
    /// Path of the backing JSON document
    path: PathBuf,

    /// Schema version the document was stamped with
    version: u32,

    /// Folders in stored order
    folders: Vec<Folder>,

    /// Notes in stored order
    notes: Vec<Note>,
}

impl NoteStore {
    /// Loads the store from `path`, falling back to reinitialization on
    /// any parse failure.
    ///
    /// An absent file yields a fresh store holding only the default
    /// folder. A legacy flat task list is migrated into notes in the
    /// default folder. Anything else unreadable is renamed to a `.bak`
    /// sibling before the fresh store is persisted.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading note store from {}", path.display());

        if !path.exists() {
            debug!("No data file found, initializing a fresh store");
            let store = Self::fresh(path);
            store.save()?;
            return Ok(store);
        }

        let text = fs::read_to_string(path)?;

        match serde_json::from_str::<Document>(&text) {
            Ok(doc) => Self::from_document(path, doc),
            Err(_) => match serde_json::from_str::<Vec<LegacyTask>>(&text) {
                Ok(tasks) => {
                    info!("Recognized legacy task list ({} tasks), migrating", tasks.len());
                    let mut store = Self::fresh(path);
                    store.migrate_tasks(tasks);
                    store.save()?;
                    Ok(store)
                }
                Err(e) => {
                    warn!(
                        "Data file {} is corrupt or unrecognized ({}), backing it up",
                        path.display(),
                        e
                    );
                    back_up(path);
                    let store = Self::fresh(path);
                    store.save()?;
                    Ok(store)
                }
            },
        }
    }

    /// Serializes the full in-memory state back to the data file.
    ///
    /// The document is written to a temporary file in the same directory
    /// and atomically renamed over the target, so a crash mid-write
    /// never leaves a truncated document behind.
    pub fn save(&self) -> Result<()> {
        trace!("Saving note store to {}", self.path.display());

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(&DocumentRef {
            version: self.version,
            folders: &self.folders,
            notes: &self.notes,
        })?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(&self.path)
            .map_err(|e| MemoError::Io(e.error))?;

        trace!("Note store saved");
        Ok(())
    }

    fn fresh(path: &Path) -> Self {
        NoteStore {
            path: path.to_path_buf(),
            version: DATA_VERSION,
            folders: vec![Folder::new(DEFAULT_FOLDER_ID, DEFAULT_FOLDER_NAME)],
            notes: Vec::new(),
        }
    }

    fn from_document(path: &Path, doc: Document) -> Result<Self> {
        debug!(
            "Parsed document: version {}, {} folders, {} notes",
            doc.version,
            doc.folders.len(),
            doc.notes.len()
        );

        let mut store = NoteStore {
            path: path.to_path_buf(),
            version: doc.version,
            folders: doc.folders,
            notes: doc.notes,
        };

        let mut dirty = false;

        if store.version < DATA_VERSION {
            info!(
                "Upgrading data file from version {} to {}",
                store.version, DATA_VERSION
            );
            store.version = DATA_VERSION;
            dirty = true;
        }

        if !store.folders.iter().any(|f| f.id == DEFAULT_FOLDER_ID) {
            warn!("Default folder missing from data file, restoring it");
            store
                .folders
                .insert(0, Folder::new(DEFAULT_FOLDER_ID, DEFAULT_FOLDER_NAME));
            dirty = true;
        }

        if dirty {
            store.save()?;
        }

        Ok(store)
    }

    fn migrate_tasks(&mut self, tasks: Vec<LegacyTask>) {
        let now = now_stamp();

        for task in tasks {
            debug!("Migrating legacy task {}", task.task_id);

            let text = task.text.trim().to_string();
            let title = {
                let prefix = truncate_chars(&text, MIGRATED_TITLE_CHARS);
                if prefix.is_empty() {
                    UNTITLED.to_string()
                } else {
                    prefix.to_string()
                }
            };

            self.notes.push(Note {
                id: next_id(self.notes.iter().map(|n| n.id)),
                folder_id: DEFAULT_FOLDER_ID,
                title,
                body: text,
                tags: Vec::new(),
                pinned: false,
                created_at: task.created_at.unwrap_or_else(|| now.clone()),
                updated_at: now.clone(),
                checklist: Vec::new(),
            });
        }
    }

    // ------------- folders -------------

    /// Returns folders in their stored order.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Number of notes currently in the given folder.
    pub fn note_count(&self, folder_id: u64) -> usize {
        self.notes.iter().filter(|n| n.folder_id == folder_id).count()
    }

    /// Creates a new folder and persists the store.
    pub fn add_folder(&mut self, name: &str) -> Result<Folder> {
        let folder = Folder::new(next_id(self.folders.iter().map(|f| f.id)), name);
        info!("Adding folder {} ({})", folder.id, folder.name);

        self.folders.push(folder.clone());
        self.save()?;
        Ok(folder)
    }

    /// Renames an existing folder and persists the store.
    pub fn rename_folder(&mut self, id: u64, new_name: &str) -> Result<Folder> {
        let renamed = {
            let folder = self
                .folders
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or(MemoError::FolderNotFound { id })?;
            folder.name = new_name.trim().to_string();
            folder.clone()
        };

        info!("Renamed folder {} to {}", id, renamed.name);
        self.save()?;
        Ok(renamed)
    }

    /// Deletes a folder together with every note inside it.
    ///
    /// The default folder is protected and can never be deleted.
    pub fn delete_folder(&mut self, id: u64) -> Result<()> {
        if id == DEFAULT_FOLDER_ID {
            return Err(MemoError::ProtectedFolder);
        }
        if !self.folders.iter().any(|f| f.id == id) {
            return Err(MemoError::FolderNotFound { id });
        }

        let notes_before = self.notes.len();
        self.notes.retain(|n| n.folder_id != id);
        self.folders.retain(|f| f.id != id);

        info!(
            "Deleted folder {} and {} notes in it",
            id,
            notes_before - self.notes.len()
        );
        self.save()
    }

    // ------------- notes -------------

    /// Creates a new note in the given folder and persists the store.
    pub fn create_note(
        &mut self,
        folder_id: u64,
        title: &str,
        body: &str,
        tags: Vec<String>,
    ) -> Result<Note> {
        if !self.folders.iter().any(|f| f.id == folder_id) {
            return Err(MemoError::FolderNotFound { id: folder_id });
        }

        let note = Note::new(
            next_id(self.notes.iter().map(|n| n.id)),
            folder_id,
            title,
            body,
            tags,
        );
        info!("Creating note {} in folder {}", note.id, folder_id);

        self.notes.push(note.clone());
        self.save()?;
        Ok(note)
    }

    /// Applies the provided field updates to a note.
    ///
    /// A title that is empty after trimming is ignored rather than
    /// clearing the field; a target folder must exist. `updated_at` is
    /// refreshed unconditionally.
    pub fn edit_note(&mut self, id: u64, update: NoteUpdate) -> Result<Note> {
        if let Some(folder_id) = update.folder_id {
            if !self.folders.iter().any(|f| f.id == folder_id) {
                return Err(MemoError::FolderNotFound { id: folder_id });
            }
        }

        let edited = {
            let note = self
                .notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or(MemoError::NoteNotFound { id })?;

            if let Some(title) = update.title {
                let title = title.trim();
                if !title.is_empty() {
                    note.title = title.to_string();
                }
            }
            if let Some(body) = update.body {
                note.body = body;
            }
            if let Some(folder_id) = update.folder_id {
                note.folder_id = folder_id;
            }
            if let Some(tags) = update.tags {
                note.tags = crate::note::normalize_tags(tags);
            }
            note.updated_at = now_stamp();
            note.clone()
        };

        debug!("Edited note {}", id);
        self.save()?;
        Ok(edited)
    }

    /// Deletes a note and persists the store.
    pub fn delete_note(&mut self, id: u64) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(MemoError::NoteNotFound { id });
        }

        info!("Deleted note {}", id);
        self.save()
    }

    /// Returns a note read-only.
    pub fn note(&self, id: u64) -> Result<&Note> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .ok_or(MemoError::NoteNotFound { id })
    }

    /// Pins or unpins a note, refreshing its `updated_at`.
    pub fn set_pinned(&mut self, id: u64, pinned: bool) -> Result<Note> {
        let pinned_note = {
            let note = self
                .notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or(MemoError::NoteNotFound { id })?;
            note.pinned = pinned;
            note.updated_at = now_stamp();
            note.clone()
        };

        debug!("Set pinned={} on note {}", pinned, id);
        self.save()?;
        Ok(pinned_note)
    }

    /// Lists notes matching the filter, sorted for display.
    ///
    /// Filters apply in order: folder match, pinned-only, exact tag
    /// membership, case-insensitive substring against title or body.
    /// Pinned notes always precede unpinned notes; within each partition
    /// the most recently updated note comes first.
    pub fn list_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        let query = filter.query.as_ref().map(|q| q.to_lowercase());

        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|n| filter.folder_id.is_none_or(|id| n.folder_id == id))
            .filter(|n| !filter.pinned_only || n.pinned)
            .filter(|n| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|tag| n.tags.iter().any(|t| t == tag))
            })
            .filter(|n| {
                query.as_ref().is_none_or(|q| {
                    n.title.to_lowercase().contains(q.as_str())
                        || n.body.to_lowercase().contains(q.as_str())
                })
            })
            .cloned()
            .collect();

        notes.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        notes
    }

    // ------------- checklists -------------

    /// Appends a checklist item to a note; item ids are scoped to the
    /// owning note's checklist.
    pub fn add_checklist_item(&mut self, note_id: u64, text: &str) -> Result<ChecklistItem> {
        let item = {
            let note = self
                .notes
                .iter_mut()
                .find(|n| n.id == note_id)
                .ok_or(MemoError::NoteNotFound { id: note_id })?;

            let item = ChecklistItem::new(next_id(note.checklist.iter().map(|i| i.id)), text);
            note.checklist.push(item.clone());
            note.updated_at = now_stamp();
            item
        };

        debug!("Added checklist item {} to note {}", item.id, note_id);
        self.save()?;
        Ok(item)
    }

    /// Checks or unchecks a checklist item.
    pub fn set_checklist_item(
        &mut self,
        note_id: u64,
        item_id: u64,
        checked: bool,
    ) -> Result<ChecklistItem> {
        let item = {
            let note = self
                .notes
                .iter_mut()
                .find(|n| n.id == note_id)
                .ok_or(MemoError::NoteNotFound { id: note_id })?;

            let item = note
                .checklist
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or(MemoError::ChecklistItemNotFound { note_id, item_id })?;
            item.checked = checked;
            let item = item.clone();
            note.updated_at = now_stamp();
            item
        };

        debug!(
            "Set checked={} on item {} of note {}",
            checked, item_id, note_id
        );
        self.save()?;
        Ok(item)
    }

    /// Removes a checklist item from a note.
    pub fn remove_checklist_item(&mut self, note_id: u64, item_id: u64) -> Result<()> {
        {
            let note = self
                .notes
                .iter_mut()
                .find(|n| n.id == note_id)
                .ok_or(MemoError::NoteNotFound { id: note_id })?;

            let position = note
                .checklist
                .iter()
                .position(|i| i.id == item_id)
                .ok_or(MemoError::ChecklistItemNotFound { note_id, item_id })?;
            note.checklist.remove(position);
            note.updated_at = now_stamp();
        }

        debug!("Removed checklist item {} from note {}", item_id, note_id);
        self.save()
    }
}

/// Next identifier within a scope: one past the largest id in use.
fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

/// Renames an unreadable data file to a `.bak` sibling. The rename is
/// best-effort; the reset proceeds either way.
fn back_up(path: &Path) {
    let mut backup = path.as_os_str().to_os_string();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    match fs::rename(path, &backup) {
        Ok(_) => info!("Backed up unreadable data file to {}", backup.display()),
        Err(e) => warn!(
            "Failed to back up unreadable data file {}: {}",
            path.display(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, NoteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::load(&dir.path().join("memo_data.json")).unwrap();
        (dir, store)
    }

    fn raw_note(id: u64, folder_id: u64, pinned: bool, updated_at: &str) -> Note {
        Note {
            id,
            folder_id,
            title: format!("note {id}"),
            body: String::new(),
            tags: Vec::new(),
            pinned,
            created_at: updated_at.to_string(),
            updated_at: updated_at.to_string(),
            checklist: Vec::new(),
        }
    }

    #[test]
    fn fresh_store_has_only_the_default_folder() {
        let (_dir, store) = test_store();

        assert_eq!(store.folders().len(), 1);
        assert_eq!(store.folders()[0].id, DEFAULT_FOLDER_ID);
        assert_eq!(store.folders()[0].name, "Quick Notes");
        assert!(store.notes.is_empty());
    }

    #[test]
    fn create_pin_and_list_scenario() {
        let (_dir, mut store) = test_store();

        let note = store
            .create_note(1, "Meeting", "10am", vec!["work".to_string()])
            .unwrap();
        assert_eq!(note.id, 1);
        assert_eq!(note.folder_id, 1);
        assert_eq!(note.tags, vec!["work"]);
        assert!(!note.pinned);

        store.set_pinned(1, true).unwrap();
        store.create_note(1, "Later", "second note", Vec::new()).unwrap();

        let listed = store.list_notes(&NoteFilter::default());
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 1);
        assert!(listed[0].pinned);
    }

    #[test]
    fn notes_always_reference_existing_folders() {
        let (_dir, mut store) = test_store();

        let work = store.add_folder("Work").unwrap();
        store.create_note(1, "a", "", Vec::new()).unwrap();
        store.create_note(work.id, "b", "", Vec::new()).unwrap();
        store
            .edit_note(
                1,
                NoteUpdate {
                    folder_id: Some(work.id),
                    ..Default::default()
                },
            )
            .unwrap();
        store.delete_folder(work.id).unwrap();

        for note in &store.notes {
            assert!(store.folders.iter().any(|f| f.id == note.folder_id));
        }
    }

    #[test]
    fn folder_delete_cascades_to_exactly_its_notes() {
        let (_dir, mut store) = test_store();

        let work = store.add_folder("Work").unwrap();
        let kept = store.create_note(1, "keep", "", Vec::new()).unwrap();
        store.create_note(work.id, "gone", "", Vec::new()).unwrap();
        store.create_note(work.id, "also gone", "", Vec::new()).unwrap();

        store.delete_folder(work.id).unwrap();

        assert_eq!(store.notes.len(), 1);
        assert_eq!(store.notes[0].id, kept.id);
        assert!(!store.folders.iter().any(|f| f.id == work.id));
    }

    #[test]
    fn default_folder_cannot_be_deleted() {
        let (_dir, mut store) = test_store();

        let err = store.delete_folder(DEFAULT_FOLDER_ID).unwrap_err();
        assert!(matches!(err, MemoError::ProtectedFolder));
        assert!(store.folders.iter().any(|f| f.id == DEFAULT_FOLDER_ID));
    }

    #[test]
    fn rename_of_missing_folder_leaves_state_and_file_untouched() {
        let (dir, mut store) = test_store();
        let path = dir.path().join("memo_data.json");
        let before = fs::read_to_string(&path).unwrap();

        let err = store.rename_folder(99, "x").unwrap_err();
        assert!(matches!(err, MemoError::FolderNotFound { id: 99 }));
        assert_eq!(store.folders()[0].name, "Quick Notes");
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn listing_keeps_pinned_first_and_updated_at_non_increasing() {
        let (_dir, mut store) = test_store();
        store.notes = vec![
            raw_note(1, 1, false, "2024-03-01T10:00:00"),
            raw_note(2, 1, true, "2024-01-01T10:00:00"),
            raw_note(3, 1, false, "2024-05-01T10:00:00"),
            raw_note(4, 1, true, "2024-02-01T10:00:00"),
        ];

        let listed = store.list_notes(&NoteFilter::default());

        let ids: Vec<u64> = listed.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);

        let mut seen_unpinned = false;
        for pair in listed.windows(2) {
            if !pair[0].pinned {
                seen_unpinned = true;
            }
            assert!(!(seen_unpinned && pair[1].pinned));
            if pair[0].pinned == pair[1].pinned {
                assert!(pair[0].updated_at >= pair[1].updated_at);
            }
        }
    }

    #[test]
    fn filters_apply_folder_pin_tag_and_query() {
        let (_dir, mut store) = test_store();

        let work = store.add_folder("Work").unwrap();
        store
            .create_note(1, "Groceries", "buy milk", vec!["home".to_string()])
            .unwrap();
        let meeting = store
            .create_note(work.id, "Meeting", "Agenda: roadmap", vec!["work".to_string()])
            .unwrap();
        store.set_pinned(meeting.id, true).unwrap();

        let in_work = store.list_notes(&NoteFilter {
            folder_id: Some(work.id),
            ..Default::default()
        });
        assert_eq!(in_work.len(), 1);
        assert_eq!(in_work[0].id, meeting.id);

        let pinned = store.list_notes(&NoteFilter {
            pinned_only: true,
            ..Default::default()
        });
        assert_eq!(pinned.len(), 1);

        let tagged = store.list_notes(&NoteFilter {
            tag: Some("home".to_string()),
            ..Default::default()
        });
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].title, "Groceries");

        // substring match is case-insensitive against title or body
        let queried = store.list_notes(&NoteFilter {
            query: Some("ROADMAP".to_string()),
            ..Default::default()
        });
        assert_eq!(queried.len(), 1);
        assert_eq!(queried[0].id, meeting.id);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo_data.json");

        let mut store = NoteStore::load(&path).unwrap();
        let work = store.add_folder("Work").unwrap();
        store
            .create_note(work.id, "Meeting", "10am", vec!["work".to_string()])
            .unwrap();
        store.add_checklist_item(1, "Prepare slides").unwrap();
        store.set_pinned(1, true).unwrap();

        let reloaded = NoteStore::load(&path).unwrap();
        assert_eq!(reloaded.version, DATA_VERSION);
        assert_eq!(reloaded.folders, store.folders);
        assert_eq!(reloaded.notes, store.notes);
    }

    #[test]
    fn checklist_scenario() {
        let (_dir, mut store) = test_store();
        store.create_note(1, "Meeting", "", Vec::new()).unwrap();

        let item = store.add_checklist_item(1, "Prepare slides").unwrap();
        assert_eq!(item.id, 1);
        assert!(!item.checked);

        let item = store.set_checklist_item(1, 1, true).unwrap();
        assert!(item.checked);

        let err = store.remove_checklist_item(1, 2).unwrap_err();
        assert!(matches!(
            err,
            MemoError::ChecklistItemNotFound {
                note_id: 1,
                item_id: 2
            }
        ));

        let err = store.add_checklist_item(42, "x").unwrap_err();
        assert!(matches!(err, MemoError::NoteNotFound { id: 42 }));
    }

    #[test]
    fn checklist_ids_are_scoped_per_note() {
        let (_dir, mut store) = test_store();
        store.create_note(1, "a", "", Vec::new()).unwrap();
        store.create_note(1, "b", "", Vec::new()).unwrap();

        store.add_checklist_item(1, "one").unwrap();
        store.add_checklist_item(1, "two").unwrap();
        let other = store.add_checklist_item(2, "first of note 2").unwrap();

        assert_eq!(other.id, 1);

        store.remove_checklist_item(1, 1).unwrap();
        let replacement = store.add_checklist_item(1, "three").unwrap();
        assert_eq!(replacement.id, 3);
    }

    #[test]
    fn legacy_task_list_is_migrated_into_the_default_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo_data.json");
        fs::write(
            &path,
            r#"[{"task_id":1,"text":"Buy milk","created_at":"2023-01-01T00:00:00"}]"#,
        )
        .unwrap();

        let store = NoteStore::load(&path).unwrap();

        assert_eq!(store.folders().len(), 1);
        assert_eq!(store.folders()[0].id, DEFAULT_FOLDER_ID);
        assert_eq!(store.notes.len(), 1);

        let note = &store.notes[0];
        assert_eq!(note.id, 1);
        assert_eq!(note.folder_id, DEFAULT_FOLDER_ID);
        assert_eq!(note.title, "Buy milk");
        assert_eq!(note.body, "Buy milk");
        assert!(note.tags.is_empty());
        assert_eq!(note.created_at, "2023-01-01T00:00:00");

        // migrated data is persisted under the current schema
        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], DATA_VERSION);
    }

    #[test]
    fn long_legacy_task_text_becomes_a_truncated_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo_data.json");
        fs::write(
            &path,
            r#"[{"task_id":7,"text":"This task text is far longer than twenty characters"}]"#,
        )
        .unwrap();

        let store = NoteStore::load(&path).unwrap();
        let note = &store.notes[0];
        assert_eq!(note.title, "This task text is fa");
        assert_eq!(note.body, "This task text is far longer than twenty characters");
    }

    #[test]
    fn empty_legacy_list_initializes_a_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo_data.json");
        fs::write(&path, "[]").unwrap();

        let store = NoteStore::load(&path).unwrap();
        assert_eq!(store.folders().len(), 1);
        assert!(store.notes.is_empty());
    }

    #[test]
    fn corrupt_data_file_is_backed_up_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo_data.json");
        fs::write(&path, "{definitely not json").unwrap();

        let store = NoteStore::load(&path).unwrap();
        assert_eq!(store.folders().len(), 1);

        let backup = dir.path().join("memo_data.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{definitely not json");

        // the data file itself was rewritten as a valid fresh document
        let text = fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }

    #[test]
    fn older_document_version_is_stamped_and_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo_data.json");
        fs::write(
            &path,
            r#"{"version":1,"folders":[{"id":1,"name":"Quick Notes","created_at":"2023-01-01T00:00:00"}],"notes":[]}"#,
        )
        .unwrap();

        let store = NoteStore::load(&path).unwrap();
        assert_eq!(store.version, DATA_VERSION);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], DATA_VERSION);
    }

    #[test]
    fn empty_title_gets_a_placeholder_and_edits_cannot_clear_it() {
        let (_dir, mut store) = test_store();

        let note = store.create_note(1, "   ", "", Vec::new()).unwrap();
        assert_eq!(note.title, UNTITLED);

        store
            .edit_note(
                note.id,
                NoteUpdate {
                    title: Some("Plans".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let note = store
            .edit_note(
                note.id,
                NoteUpdate {
                    title: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(note.title, "Plans");
    }

    #[test]
    fn edit_into_missing_folder_is_rejected_before_mutation() {
        let (_dir, mut store) = test_store();
        let note = store.create_note(1, "a", "body", Vec::new()).unwrap();

        let err = store
            .edit_note(
                note.id,
                NoteUpdate {
                    body: Some("changed".to_string()),
                    folder_id: Some(99),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, MemoError::FolderNotFound { id: 99 }));
        assert_eq!(store.note(note.id).unwrap().body, "body");
    }

    #[test]
    fn view_and_delete_of_missing_notes_fail_not_found() {
        let (_dir, mut store) = test_store();

        assert!(matches!(
            store.note(5).unwrap_err(),
            MemoError::NoteNotFound { id: 5 }
        ));
        assert!(matches!(
            store.delete_note(5).unwrap_err(),
            MemoError::NoteNotFound { id: 5 }
        ));
    }

    #[test]
    fn note_ids_are_not_reused_after_deletion() {
        let (_dir, mut store) = test_store();

        store.create_note(1, "a", "", Vec::new()).unwrap();
        let second = store.create_note(1, "b", "", Vec::new()).unwrap();
        store.delete_note(1).unwrap();

        let third = store.create_note(1, "c", "", Vec::new()).unwrap();
        assert_eq!(third.id, second.id + 1);
    }
}
