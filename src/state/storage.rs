use rusqlite::{Connection, OptionalExtension, Result as SqlResult};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::data::GalleryEntry;
use super::gallery::MAX_PERSISTED_ENTRIES;

/// Key the gallery snapshot is stored under. The version suffix is the only
/// schema marker: a future format change picks a new key and leaves the old
/// one behind.
const GALLERY_KEY: &str = "gallery_v2";

/// Failures crossing the persistence boundary. Callers log these and carry
/// on; the in-memory gallery stays the source of truth for the session.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The Storage adapter manages the SQLite snapshot database.
/// It holds a single key-value table; the gallery lives under one namespaced
/// key as a JSON array, mirroring how a browser would keep it in localStorage.
pub struct Storage {
    conn: Connection,
    db_path: PathBuf,
}

impl Storage {
    /// Create a new Storage instance and initialize the database.
    ///
    /// The database file is created in the user's data directory:
    /// - Linux: ~/.local/share/art-studio/art_studio.db
    /// - macOS: ~/Library/Application Support/art-studio/art_studio.db
    /// - Windows: %APPDATA%\art-studio\art_studio.db
    pub fn new() -> SqlResult<Self> {
        Self::open_at(&Self::default_db_path())
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(db_path: &Path) -> SqlResult<Self> {
        if let Some(parent) = db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("⚠️  Could not create data directory: {e}");
            }
        }

        let conn = Connection::open(db_path)?;

        let storage = Storage {
            conn,
            db_path: db_path.to_path_buf(),
        };
        storage.init_schema()?;

        println!("📁 Storage initialized at: {}", storage.db_path.display());

        Ok(storage)
    }

    /// Where the database lives when no explicit path is given.
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("art-studio");
        path.push("art_studio.db");
        path
    }

    /// Initialize the database schema.
    /// A single key-value table is all the persistence this app needs.
    fn init_schema(&self) -> SqlResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Persist a gallery snapshot under the gallery key.
    ///
    /// At most `MAX_PERSISTED_ENTRIES` entries are serialized, newest first;
    /// anything beyond that is dropped without comment. Errors bubble up so
    /// the caller can log them, but persistence is best-effort by contract.
    pub fn save_gallery(&self, snapshot: &[&GalleryEntry]) -> Result<(), StorageError> {
        let bounded = &snapshot[..snapshot.len().min(MAX_PERSISTED_ENTRIES)];
        let json = serde_json::to_string(bounded)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO storage (key, value) VALUES (?1, ?2)",
            rusqlite::params![GALLERY_KEY, json],
        )?;

        Ok(())
    }

    /// Load the persisted gallery snapshot.
    ///
    /// Missing, corrupt or unreadable data yields an empty sequence rather
    /// than an error; a broken snapshot must never take the app down.
    pub fn load_gallery(&self) -> VecDeque<GalleryEntry> {
        let stored: Option<String> = match self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                [GALLERY_KEY],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(value) => value,
            Err(e) => {
                eprintln!("⚠️  Could not read gallery snapshot: {e}");
                return VecDeque::new();
            }
        };

        let Some(json) = stored else {
            return VecDeque::new();
        };

        match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("⚠️  Discarding corrupt gallery snapshot: {e}");
                VecDeque::new()
            }
        }
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::gallery::Gallery;

    fn entry(id: u64, prompt: &str) -> GalleryEntry {
        GalleryEntry {
            id,
            url: format!("https://example.invalid/prompt/{id}"),
            prompt: prompt.to_string(),
            enhanced_prompt: format!("{prompt}, masterpiece"),
            style: "Anime".to_string(),
            aspect_ratio: "16:9".to_string(),
            timestamp: "2026-08-07T12:00:00+00:00".to_string(),
        }
    }

    fn open_temp() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = Storage::open_at(&dir.path().join("test.db")).expect("open storage");
        (dir, storage)
    }

    #[test]
    fn test_fresh_storage_loads_empty() {
        let (_dir, storage) = open_temp();
        assert!(storage.load_gallery().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_entries_and_order() {
        let (_dir, storage) = open_temp();

        let mut gallery = Gallery::new();
        gallery.add(entry(1, "a cat"));
        gallery.add(entry(2, "a dog"));

        storage.save_gallery(&gallery.persisted()).expect("save");

        let loaded = storage.load_gallery();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], *gallery.get(2).unwrap());
        assert_eq!(loaded[1], *gallery.get(1).unwrap());
    }

    #[test]
    fn test_saving_more_than_fifty_keeps_newest_fifty() {
        let (_dir, storage) = open_temp();

        let mut gallery = Gallery::new();
        for id in 0..75 {
            gallery.add(entry(id, "p"));
        }

        storage.save_gallery(&gallery.persisted()).expect("save");

        let loaded = storage.load_gallery();
        assert_eq!(loaded.len(), MAX_PERSISTED_ENTRIES);
        // Newest first, oldest dropped
        assert_eq!(loaded[0].id, 74);
        assert_eq!(loaded[MAX_PERSISTED_ENTRIES - 1].id, 25);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let (_dir, storage) = open_temp();

        let mut gallery = Gallery::new();
        gallery.add(entry(1, "first"));
        storage.save_gallery(&gallery.persisted()).expect("save");

        gallery.add(entry(2, "second"));
        storage.save_gallery(&gallery.persisted()).expect("save");

        assert_eq!(storage.load_gallery().len(), 2);
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("test.db");
        let storage = Storage::open_at(&db_path).expect("open storage");

        // Scribble over the snapshot from a second connection
        let raw = Connection::open(&db_path).expect("raw connection");
        raw.execute(
            "INSERT OR REPLACE INTO storage (key, value) VALUES (?1, ?2)",
            rusqlite::params![GALLERY_KEY, "this is not json"],
        )
        .expect("write garbage");

        assert!(storage.load_gallery().is_empty());
    }
}
