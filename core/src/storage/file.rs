// cartkit/src/storage/file.rs

use crate::error::{CartError, CartResult};
use crate::storage::{validate_key, KeyValueStore};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// Durable storage in a directory: the record for `key` lives in `<dir>/<key>.json`.
///
/// Saves write a sibling temp file and rename it over the target, so a crash
/// mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  /// Opens (creating if needed) the storage directory.
  pub fn open(dir: impl Into<PathBuf>) -> CartResult<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir)
      .map_err(|e| CartError::Config(format!("Cannot create storage directory '{}': {}", dir.display(), e)))?;
    event!(Level::DEBUG, dir = %dir.display(), "File store opened.");
    Ok(FileStore { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn path_for(&self, key: &str) -> CartResult<PathBuf> {
    validate_key(key)?;
    Ok(self.dir.join(format!("{}.json", key)))
  }

  fn write_record(&self, path: &Path, record: &str) -> anyhow::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, record).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;
    Ok(())
  }
}

impl KeyValueStore for FileStore {
  fn load(&self, key: &str) -> CartResult<Option<String>> {
    let path = self.path_for(key)?;
    match fs::read_to_string(&path) {
      Ok(record) => Ok(Some(record)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(CartError::Storage {
        key: key.to_string(),
        source: anyhow::Error::new(e).context(format!("reading {}", path.display())),
      }),
    }
  }

  fn save(&self, key: &str, record: &str) -> CartResult<()> {
    let path = self.path_for(key)?;
    self.write_record(&path, record).map_err(|source| CartError::Persist {
      key: key.to_string(),
      source,
    })
  }

  fn remove(&self, key: &str) -> CartResult<bool> {
    let path = self.path_for(key)?;
    match fs::remove_file(&path) {
      Ok(()) => Ok(true),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
      Err(e) => Err(CartError::Persist {
        key: key.to_string(),
        source: anyhow::Error::new(e).context(format!("removing {}", path.display())),
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_records_through_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("nested")).unwrap();

    assert_eq!(store.load("cart").unwrap(), None);
    store.save("cart", r#"[{"id":1}]"#).unwrap();
    assert!(dir.path().join("nested").join("cart.json").exists());
    assert_eq!(store.load("cart").unwrap().as_deref(), Some(r#"[{"id":1}]"#));

    store.save("cart", "[]").unwrap();
    assert_eq!(store.load("cart").unwrap().as_deref(), Some("[]"));
    assert!(!dir.path().join("nested").join("cart.json.tmp").exists());

    assert!(store.remove("cart").unwrap());
    assert!(!store.remove("cart").unwrap());
  }

  #[test]
  fn rejects_keys_that_escape_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert!(matches!(store.save("../cart", "[]"), Err(CartError::InvalidKey { .. })));
    assert!(matches!(store.load("a/b"), Err(CartError::InvalidKey { .. })));
  }
}
