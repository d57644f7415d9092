use std::{backtrace::Backtrace, fs::OpenOptions, io::Write, path::Path};

use chrono::Local;
use log::warn;

use crate::MemoError;

/// Format for persisted timestamps: ISO-8601, second precision, local time
const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Returns the current local time as a second-precision ISO-8601 string.
///
/// All persisted timestamps use this format; within a pin partition,
/// listing order is the lexicographic order of these strings.
pub fn now_stamp() -> String {
    Local::now().format(TIMESTAMP_FMT).to_string()
}

// Helper method for parsing tags
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Returns at most `max_chars` characters of `text`, cut on a character
/// boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Appends a process-level failure to the crash log before the
/// user-facing notice is shown. Logging must never mask the original
/// failure, so write errors are only warned about.
pub fn log_crash(path: &Path, error: &MemoError) {
    let entry = format!(
        "{}\nUnhandled error:\n{}\n{}\n{}\n",
        now_stamp(),
        error,
        Backtrace::force_capture(),
        "-".repeat(60)
    );

    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(entry.as_bytes()));

    if let Err(e) = result {
        warn!("Failed to write crash log {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_drops_empty() {
        let tags = parse_tags(Some(" work, , home ,urgent".to_string()));
        assert_eq!(tags, vec!["work", "home", "urgent"]);
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("Buy milk", 20), "Buy milk");
        assert_eq!(truncate_chars("abcdefghij", 4), "abcd");
        assert_eq!(truncate_chars("héllo wörld", 6), "héllo ");
    }

    #[test]
    fn now_stamp_has_second_precision() {
        let stamp = now_stamp();
        // YYYY-MM-DDTHH:MM:SS
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[10..11], "T");
    }
}
