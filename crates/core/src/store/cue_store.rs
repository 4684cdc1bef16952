//! Cue list persistence.
//!
//! The cue document is a single JSON file, by default
//! `bfg_oscsender_cues.json` in the user's documents folder, so cue files
//! written by earlier versions of the tool are picked up from the same place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cue::cue::{Cue, CueList};
use crate::cue::cue_manager::CueRow;

/// Well-known cue document file name.
pub const CUE_FILE_NAME: &str = "bfg_oscsender_cues.json";

pub struct CueStore {
    path: PathBuf,
}

/// Result of a save: either the document was written, or every row had an
/// empty message and nothing was persisted.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    NothingToSave,
}

impl CueStore {
    /// Creates a store for the given path, or the well-known document in the
    /// user's documents folder when no path is provided.
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(|| {
            dirs::document_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CUE_FILE_NAME)
        });
        CueStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the rows to disk, keeping only rows with a non-whitespace
    /// message and renumbering them densely from 1 in their original order.
    ///
    /// The document is written to a temporary file and renamed into place so
    /// a failed save never corrupts the previous document.
    pub fn save(
        &self,
        ip_address: &str,
        port: &str,
        rows: &[CueRow],
    ) -> Result<SaveOutcome, StoreError> {
        let cues: Vec<Cue> = rows
            .iter()
            .filter(|row| !row.message.trim().is_empty())
            .enumerate()
            .map(|(index, row)| Cue {
                id: index as u32 + 1,
                title: row.title.clone(),
                message: row.message.clone(),
            })
            .collect();

        if cues.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }

        let list = CueList {
            ip_address: ip_address.to_string(),
            port: port.to_string(),
            cues,
        };
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(map_io_error)?;
        fs::rename(&tmp_path, &self.path).map_err(map_io_error)?;

        log::info!(
            "Saved {} cues to {}",
            list.cues.len(),
            self.path.display()
        );
        Ok(SaveOutcome::Saved(self.path.clone()))
    }

    /// Loads the persisted document.
    ///
    /// A missing document is the expected first-run condition and is reported
    /// as [`StoreError::NotFound`], distinct from a document that exists but
    /// does not parse.
    pub fn load(&self) -> Result<CueList, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(map_io_error(e)),
        };

        let list: CueList = serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        log::info!(
            "Loaded {} cues from {}",
            list.cues.len(),
            self.path.display()
        );
        Ok(list)
    }
}

fn map_io_error(e: io::Error) -> StoreError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => StoreError::AccessDenied(e.to_string()),
        _ => StoreError::Io(e.to_string()),
    }
}

/// Persistence error types
#[derive(Debug)]
pub enum StoreError {
    NotFound(PathBuf),
    AccessDenied(String),
    Io(String),
    Corrupt(String),
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(path) => {
                write!(f, "No saved cues found at {}", path.display())
            }
            StoreError::AccessDenied(msg) => {
                write!(f, "Access to the cue file is denied: {}", msg)
            }
            StoreError::Io(msg) => write!(f, "Failed to read or write the cue file: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "The cue file is not valid: {}", msg),
            StoreError::Serialize(msg) => write!(f, "Failed to serialize the cue list: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn row(title: &str, message: &str) -> CueRow {
        CueRow {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("cues.json")));

        let rows = [row("Go", "/show/go 1 2"), row("", "/cue/2 \"hello world\"")];
        let outcome = store.save("127.0.0.1", "9000", &rows).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(store.path().to_path_buf()));

        let list = store.load().unwrap();
        assert_eq!(list.ip_address, "127.0.0.1");
        assert_eq!(list.port, "9000");
        assert_eq!(list.cues.len(), 2);
        assert_eq!(list.cues[0].id, 1);
        assert_eq!(list.cues[0].title, "Go");
        assert_eq!(list.cues[1].id, 2);
        assert_eq!(list.cues[1].message, "/cue/2 \"hello world\"");
    }

    #[test]
    fn empty_and_whitespace_rows_are_dropped_and_ids_renumbered() {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("cues.json")));

        let rows = [
            row("blank", ""),
            row("first", "/a"),
            row("spaces", "   \t"),
            row("second", "/b"),
        ];
        store.save("127.0.0.1", "9000", &rows).unwrap();

        let list = store.load().unwrap();
        assert_eq!(list.cues.len(), 2);
        assert_eq!(list.cues[0].id, 1);
        assert_eq!(list.cues[0].message, "/a");
        assert_eq!(list.cues[1].id, 2);
        assert_eq!(list.cues[1].message, "/b");
    }

    #[test]
    fn all_empty_rows_is_nothing_to_save_and_writes_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("cues.json")));

        let rows = [row("a", ""), row("b", "  ")];
        let outcome = store.save("127.0.0.1", "9000", &rows).unwrap();
        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert!(!store.path().exists());
    }

    #[test]
    fn loading_a_missing_document_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("missing.json")));

        match store.load() {
            Err(StoreError::NotFound(path)) => assert_eq!(path, store.path()),
            other => panic!("expected NotFound, got {:?}", other.map(|l| l.cues.len())),
        }
    }

    #[test]
    fn loading_an_invalid_document_is_corrupt_not_a_crash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cues.json");
        fs::write(&path, "not json at all").unwrap();

        let store = CueStore::new(Some(path));
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn wrong_shape_is_corrupt_too() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cues.json");
        fs::write(&path, r#"{"IPAddress": "127.0.0.1"}"#).unwrap();

        let store = CueStore::new(Some(path));
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn saving_over_an_existing_document_replaces_it() {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("cues.json")));

        store.save("127.0.0.1", "9000", &[row("a", "/a")]).unwrap();
        store.save("10.0.0.1", "8000", &[row("b", "/b")]).unwrap();

        let list = store.load().unwrap();
        assert_eq!(list.ip_address, "10.0.0.1");
        assert_eq!(list.cues.len(), 1);
        assert_eq!(list.cues[0].message, "/b");
    }

    #[test]
    fn no_temporary_file_is_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = CueStore::new(Some(temp_dir.path().join("cues.json")));
        store.save("127.0.0.1", "9000", &[row("a", "/a")]).unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("cues.json")]);
    }
}
