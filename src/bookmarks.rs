//! The bookmark launcher's data store.
//!
//! Bookmarks live in their own JSON file as a bare array of records and
//! follow the same persistence policy as the note store: load once,
//! rewrite the whole file after every mutation, repair unreadable data
//! by backing it up and starting over. A missing or empty file is
//! seeded with a small default set.
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{MemoError, Result};

/// Seeded into a fresh bookmark file so the list starts non-empty
const DEFAULT_BOOKMARKS: &[(&str, &str, &str)] = &[
    ("Google", "https://www.google.com", "Web search"),
    ("GitHub", "https://www.github.com", "Code hosting"),
    ("Wikipedia", "https://www.wikipedia.org", "Encyclopedia"),
];

/// A named URL with an optional description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub desc: String,
}

/// Manages the list of bookmarks backed by a JSON file.
pub struct BookmarkStore {
    path: PathBuf,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Loads the bookmark list, seeding defaults when the file is absent
    /// or empty and repairing it when unreadable.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading bookmarks from {}", path.display());

        if !path.exists() {
            debug!("No bookmark file found, seeding defaults");
            let store = Self::seeded(path);
            store.save()?;
            return Ok(store);
        }

        let text = fs::read_to_string(path)?;
        match serde_json::from_str::<Vec<Bookmark>>(&text) {
            Ok(bookmarks) if bookmarks.is_empty() => {
                debug!("Bookmark file is empty, seeding defaults");
                let store = Self::seeded(path);
                store.save()?;
                Ok(store)
            }
            Ok(bookmarks) => Ok(BookmarkStore {
                path: path.to_path_buf(),
                bookmarks,
            }),
            Err(e) => {
                warn!(
                    "Bookmark file {} is unreadable ({}), backing it up",
                    path.display(),
                    e
                );
                let mut backup = path.as_os_str().to_os_string();
                backup.push(".bak");
                if let Err(e) = fs::rename(path, PathBuf::from(backup)) {
                    warn!("Failed to back up bookmark file: {}", e);
                }
                let store = Self::seeded(path);
                store.save()?;
                Ok(store)
            }
        }
    }

    fn seeded(path: &Path) -> Self {
        BookmarkStore {
            path: path.to_path_buf(),
            bookmarks: DEFAULT_BOOKMARKS
                .iter()
                .map(|(name, url, desc)| Bookmark {
                    name: name.to_string(),
                    url: url.to_string(),
                    desc: desc.to_string(),
                })
                .collect(),
        }
    }

    /// Rewrites the bookmark file, atomically.
    pub fn save(&self) -> Result<()> {
        trace!("Saving bookmarks to {}", self.path.display());

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(&self.bookmarks)?;
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(&self.path)
            .map_err(|e| MemoError::Io(e.error))?;
        Ok(())
    }

    /// Returns bookmarks in their stored order.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Adds a bookmark; name and URL must be non-empty after trimming.
    pub fn add(&mut self, name: &str, url: &str, desc: &str) -> Result<Bookmark> {
        let bookmark = Bookmark {
            name: name.trim().to_string(),
            url: url.trim().to_string(),
            desc: desc.trim().to_string(),
        };
        if bookmark.name.is_empty() || bookmark.url.is_empty() {
            return Err(MemoError::InvalidBookmark {
                message: "name and URL are required".to_string(),
            });
        }

        info!("Adding bookmark {} -> {}", bookmark.name, bookmark.url);
        self.bookmarks.push(bookmark.clone());
        self.save()?;
        Ok(bookmark)
    }

    /// Removes every bookmark with the given name.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.name != name);
        if self.bookmarks.len() == before {
            return Err(MemoError::BookmarkNotFound {
                name: name.to_string(),
            });
        }

        info!("Removed bookmark {}", name);
        self.save()
    }

    /// Opens the named bookmark in the system browser.
    pub fn open(&self, name: &str) -> Result<&Bookmark> {
        let bookmark = self
            .bookmarks
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| MemoError::BookmarkNotFound {
                name: name.to_string(),
            })?;

        info!("Opening {} in the browser", bookmark.url);
        open::that(&bookmark.url)?;
        Ok(bookmark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, BookmarkStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::load(&dir.path().join("sites.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn first_load_seeds_defaults_and_persists_them() {
        let (dir, store) = test_store();

        assert_eq!(store.bookmarks().len(), DEFAULT_BOOKMARKS.len());
        assert_eq!(store.bookmarks()[0].name, "Google");

        let text = fs::read_to_string(dir.path().join("sites.json")).unwrap();
        let on_disk: Vec<Bookmark> = serde_json::from_str(&text).unwrap();
        assert_eq!(on_disk, store.bookmarks());
    }

    #[test]
    fn add_and_remove_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.json");

        let mut store = BookmarkStore::load(&path).unwrap();
        store.add(" Docs ", " https://docs.rs ", "crate docs").unwrap();
        store.remove("Google").unwrap();

        let reloaded = BookmarkStore::load(&path).unwrap();
        assert!(reloaded.bookmarks().iter().any(|b| b.name == "Docs"));
        assert!(!reloaded.bookmarks().iter().any(|b| b.name == "Google"));

        // added fields were trimmed before storage
        let docs = reloaded
            .bookmarks()
            .iter()
            .find(|b| b.name == "Docs")
            .unwrap();
        assert_eq!(docs.url, "https://docs.rs");
    }

    #[test]
    fn removing_an_unknown_name_fails_not_found() {
        let (_dir, mut store) = test_store();

        let err = store.remove("nope").unwrap_err();
        assert!(matches!(err, MemoError::BookmarkNotFound { .. }));
    }

    #[test]
    fn blank_name_or_url_is_rejected() {
        let (_dir, mut store) = test_store();

        assert!(matches!(
            store.add("  ", "https://example.com", "").unwrap_err(),
            MemoError::InvalidBookmark { .. }
        ));
        assert!(matches!(
            store.add("Example", "   ", "").unwrap_err(),
            MemoError::InvalidBookmark { .. }
        ));
    }

    #[test]
    fn unreadable_bookmark_file_is_backed_up_and_reseeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.json");
        fs::write(&path, "not json at all").unwrap();

        let store = BookmarkStore::load(&path).unwrap();
        assert_eq!(store.bookmarks().len(), DEFAULT_BOOKMARKS.len());
        assert!(dir.path().join("sites.json.bak").exists());
    }
}
