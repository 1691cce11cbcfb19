// File: src/persistence.rs
use crate::cache::MemoryStore;
use crate::error::CacheError;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// On-disk shape of a cache snapshot.
#[derive(serde::Serialize, serde::Deserialize)]
struct Snapshot {
    entries: HashMap<String, Vec<u8>>,
}

/// Writes the store to `path` atomically: the snapshot goes to a temp file in
/// the same directory and is renamed over the target.
pub fn save_to_disk(store: &MemoryStore, path: &Path) -> Result<(), CacheError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let snapshot = Snapshot {
        entries: store.snapshot()?,
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| CacheError::Io(e.error))?;
    debug!(path = %path.display(), entries = snapshot.entries.len(), "cache snapshot saved");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<MemoryStore, CacheError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    debug!(path = %path.display(), entries = snapshot.entries.len(), "cache snapshot loaded");
    Ok(MemoryStore::from_entries(snapshot.entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.bin");

        let store = MemoryStore::new();
        store.put("verb:v1", vec![1, 2, 3]).unwrap();
        store.put("generated:كتب:form1", vec![4]).unwrap();
        save_to_disk(&store, &path).unwrap();

        let loaded = load_from_disk(&path).unwrap();
        assert_eq!(loaded.snapshot().unwrap(), store.snapshot().unwrap());
    }

    #[test]
    fn saving_replaces_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.bin");

        let store = MemoryStore::new();
        store.put("a", vec![1]).unwrap();
        save_to_disk(&store, &path).unwrap();
        store.remove("a").unwrap();
        save_to_disk(&store, &path).unwrap();

        assert!(load_from_disk(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_disk(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, CacheError::Io(_)));
    }

    #[test]
    fn garbage_is_a_codec_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff; 3]).unwrap();
        let err = load_from_disk(file.path()).unwrap_err();
        assert!(matches!(err, CacheError::Codec(_)));
    }
}
