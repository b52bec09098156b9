use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use super::{RecordStore, StoreError};
use crate::user::User;

/// Record store backed by a single pretty-printed JSON array on disk.
///
/// Saves never write the target in place: the collection goes to a fresh
/// temp file in the same directory, is fsynced, and is renamed over the
/// target. A reader (or a crash) sees either the old or the new collection.
///
/// The location (and so the guard key) is the normalized absolute path:
/// `data/users.json`, `./data/users.json` and `/srv/app/data/users.json`
/// name the same lock when the process runs in `/srv/app`.
pub struct JsonFileStore {
    path: PathBuf,
    location: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = normalize(&path).display().to_string();
        Self { path, location }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed an empty collection if the backing file does not exist yet,
    /// creating parent directories as needed. An existing file is left as is.
    ///
    /// Returns whether a file was created.
    pub fn init(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        fs::create_dir_all(self.dir()).map_err(|e| self.write_error(e))?;
        self.save(&[])?;
        tracing::info!(path = %self.location, "created empty user collection");
        Ok(true)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Make the rename itself durable.
    #[cfg(unix)]
    fn sync_dir(&self) -> Result<(), StoreError> {
        fs::File::open(self.dir())
            .and_then(|dir| dir.sync_all())
            .map_err(|e| self.write_error(e))
    }

    #[cfg(not(unix))]
    fn sync_dir(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn write_error(&self, err: impl fmt::Display) -> StoreError {
        StoreError::Write {
            location: self.location.clone(),
            message: err.to_string(),
        }
    }
}

/// Absolute form of `path` with `.` and `..` resolved. The parent directory
/// is canonicalized when it exists (following symlinks); otherwise the path
/// is cleaned lexically.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    let cleaned = clean(&absolute);

    match (cleaned.parent(), cleaned.file_name()) {
        (Some(dir), Some(name)) => match dir.canonicalize() {
            Ok(dir) => dir.join(name),
            Err(_) => cleaned,
        },
        _ => cleaned,
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

impl RecordStore for JsonFileStore {
    fn location(&self) -> &str {
        &self.location
    }

    fn load(&self) -> Result<Vec<User>, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            location: self.location.clone(),
            message: e.to_string(),
        })?;
        let users: Vec<User> = serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
            location: self.location.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %self.location, count = users.len(), "loaded users");
        Ok(users)
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let mut bytes = serde_json::to_vec_pretty(users).map_err(|e| self.write_error(e))?;
        bytes.push(b'\n');

        let mut tmp = NamedTempFile::new_in(self.dir()).map_err(|e| self.write_error(e))?;
        tmp.write_all(&bytes).map_err(|e| self.write_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;
        self.sync_dir()?;

        tracing::debug!(path = %self.location, count = users.len(), "saved users");
        Ok(())
    }
}
