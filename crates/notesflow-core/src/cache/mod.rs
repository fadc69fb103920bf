//! Local note cache.
//!
//! A single named slot holding the last known note collection. Every write
//! replaces the whole snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::error::Result;
use crate::models::{decode_notes, Note};

/// Key of the slot holding the note collection
pub const NOTES_CACHE_KEY: &str = "notesflow-notes";

/// Persistent snapshot of the note collection
pub trait LocalCache: Send + Sync {
    /// Read the last snapshot; `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<Vec<Note>>>;

    /// Replace the stored snapshot
    fn save(&self, notes: &[Note]) -> Result<()>;
}

/// Cache slot stored as a JSON file in a directory
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Cache using the default key under `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, NOTES_CACHE_KEY)
    }

    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalCache for FileCache {
    fn load(&self) -> Result<Option<Vec<Note>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let entries: Vec<Value> = serde_json::from_str(&raw)?;
        Ok(Some(decode_notes(entries)))
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string(notes)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

/// In-memory cache slot for tests and ephemeral clients
#[derive(Debug, Default)]
pub struct MemoryCache {
    slot: Mutex<Option<Vec<Note>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-seeded with a snapshot
    #[must_use]
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            slot: Mutex::new(Some(notes)),
        }
    }

    /// Current snapshot, if any
    pub fn snapshot(&self) -> Option<Vec<Note>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LocalCache for MemoryCache {
    fn load(&self) -> Result<Option<Vec<Note>>> {
        Ok(self.snapshot())
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(notes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteDraft;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_cache_missing_slot_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn file_cache_persists_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested"));

        let mut pinned = Note::provisional(NoteDraft::new("Pinned", ""));
        pinned.is_pinned = true;
        let notes = vec![pinned, Note::provisional(NoteDraft::new("", "body only"))];

        cache.save(&notes).unwrap();
        assert!(cache.path().ends_with("nested/notesflow-notes.json"));
        assert_eq!(cache.load().unwrap(), Some(notes));
    }

    #[test]
    fn file_cache_rejects_corrupted_slot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        std::fs::write(cache.path(), "{not json").unwrap();
        assert!(cache.load().is_err());
    }

    #[test]
    fn file_cache_normalizes_legacy_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::with_key(dir.path(), "legacy");
        std::fs::write(
            cache.path(),
            r#"[{"id":"old","title":"t","content":"c","color":"blue","createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}]"#,
        )
        .unwrap();

        let notes = cache.load().unwrap().unwrap();
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].is_pinned);
    }

    #[test]
    fn file_cache_drops_only_unreadable_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        std::fs::write(
            cache.path(),
            r#"[{"id":"good","title":"kept"},{"title":"missing id"}]"#,
        )
        .unwrap();

        let notes = cache.load().unwrap().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "kept");
    }

    #[test]
    fn memory_cache_replaces_snapshot() {
        let cache = MemoryCache::new();
        assert!(cache.load().unwrap().is_none());

        cache
            .save(&[Note::provisional(NoteDraft::new("a", ""))])
            .unwrap();
        cache.save(&[]).unwrap();
        assert_eq!(cache.snapshot(), Some(Vec::new()));
    }
}
