//! JSON file backed grievance store
//!
//! The whole record set lives in one file and is rewritten on every save.
//! Saves hold an exclusive advisory lock on a `.lock` sibling for the whole
//! read-check-write cycle, so every store handle on the same path (threads,
//! other instances, other processes) sees the previous save before
//! checking its version. The new file is written to a uniquely named
//! temporary next to the store and renamed over it; readers never take the
//! lock and always see a complete file.

use fs2::FileExt;
use grievance_engine::store::{check_version, sort_records};
use grievance_engine::GrievanceStore;
use grievance_types::*;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileGrievanceStore {
    path: PathBuf,
}

/// Holds the store's lock file; the lock is released when the file closes
struct StoreLock {
    _file: File,
}

impl FileGrievanceStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `records.json` locks through `records.json.lock`
    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Directory holding the store, created on first write
    fn directory(&self) -> GrievanceResult<PathBuf> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|err| storage(&dir, err))?;
        Ok(dir)
    }

    /// Block until this handle holds the store's exclusive lock
    fn lock(&self) -> GrievanceResult<StoreLock> {
        self.directory()?;
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|err| storage(&lock_path, err))?;
        FileExt::lock_exclusive(&file).map_err(|err| storage(&lock_path, err))?;
        tracing::trace!(lock = %lock_path.display(), "Store lock acquired");
        Ok(StoreLock { _file: file })
    }

    fn read_all(&self) -> GrievanceResult<Vec<Grievance>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(storage(&self.path, err)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<Grievance> =
            serde_json::from_str(&raw).map_err(|err| storage(&self.path, err))?;
        for record in &records {
            record.check_integrity().map_err(|err| {
                storage(&self.path, format!("grievance {}: {}", record.id(), err))
            })?;
        }
        Ok(records)
    }

    /// Replace the store file. Callers hold the store lock.
    fn write_all(&self, records: &[Grievance]) -> GrievanceResult<()> {
        let dir = self.directory()?;
        let body = serde_json::to_vec_pretty(records).map_err(|err| storage(&self.path, err))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|err| storage(&dir, err))?;
        tmp.write_all(&body).map_err(|err| storage(tmp.path(), err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| storage(tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| storage(&self.path, err.error))?;
        Ok(())
    }
}

impl GrievanceStore for FileGrievanceStore {
    fn load_records(&self, scope: &Scope) -> GrievanceResult<Vec<Grievance>> {
        let mut records: Vec<Grievance> = self
            .read_all()?
            .into_iter()
            .filter(|g| scope.admits(g))
            .collect();
        sort_records(&mut records);
        Ok(records)
    }

    fn load(&self, id: &GrievanceId) -> GrievanceResult<Option<Grievance>> {
        Ok(self.read_all()?.into_iter().find(|g| g.id() == id))
    }

    fn save_grievance(&self, grievance: &Grievance) -> GrievanceResult<()> {
        let _lock = self.lock()?;
        let mut records = self.read_all()?;

        match records.iter_mut().find(|g| g.id() == grievance.id()) {
            Some(stored) => {
                check_version(stored, grievance)?;
                *stored = grievance.clone();
            }
            None => records.push(grievance.clone()),
        }
        self.write_all(&records)
    }
}

fn storage(path: &Path, err: impl std::fmt::Display) -> GrievanceError {
    GrievanceError::Storage(format!("{}: {}", path.display(), err))
}
