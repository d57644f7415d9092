use std::{fs, path::PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{MemoError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// File holding the notes document
    pub data_file: PathBuf,

    /// File holding the bookmark list
    pub bookmarks_file: PathBuf,

    /// Sibling file receiving process-level failure reports
    pub crash_log: PathBuf,
}

impl Config {
    /// Resolves the configuration, creating the data directory if needed.
    ///
    /// When no directory is given, the platform data directory for the
    /// application is used.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match data_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "memo")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| MemoError::DirectoryError {
                    path: PathBuf::from("~"),
                })?,
        };

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|_| MemoError::DirectoryError { path: dir.clone() })?;
        }

        Ok(Config {
            data_file: dir.join("memo_data.json"),
            bookmarks_file: dir.join("sites.json"),
            crash_log: dir.join("memo_error.log"),
        })
    }
}
