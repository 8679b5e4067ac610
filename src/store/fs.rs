//! Filesystem-backed [`Store`], one file per key under `.redo/data/`.
//!
//! Grounded on `original_source/filedb.go` (`FileDb`, atomic writes, whole-tree
//! walk for prefix scans) and on `loom`'s `fs/locking.rs` for the
//! `fs2`-advisory-lock discipline around concurrent access.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::{Record, Store};

/// A `Store` backed by one regular file per key, rooted at `<redo_dir>/data`.
pub struct FsStore {
    data_dir: PathBuf,
    lock_path: PathBuf,
}

impl FsStore {
    /// Opens (creating if absent) the data directory under an existing
    /// `.redo/` directory.
    pub fn open(redo_dir: &Path) -> Result<Self> {
        let data_dir = redo_dir.join("data");
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating {}", data_dir.display()))?;
        let lock_path = redo_dir.join("store.lock");
        Ok(FsStore { data_dir, lock_path })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }

    fn lock_shared(&self) -> Result<fs::File> {
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.lock_path)
            .with_context(|| format!("opening {}", self.lock_path.display()))?;
        file.lock_shared().context("acquiring shared store lock")?;
        Ok(file)
    }

    fn lock_exclusive(&self) -> Result<fs::File> {
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.lock_path)
            .with_context(|| format!("opening {}", self.lock_path.display()))?;
        file.lock_exclusive().context("acquiring exclusive store lock")?;
        Ok(file)
    }

    /// Recursively collects every regular file under `dir`, yielding
    /// `(key, value)` pairs with keys rebuilt as `/`-joined paths relative
    /// to `data_dir`.
    fn walk(&self, dir: &Path, out: &mut Vec<Record>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", dir.display())),
        };
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, out)?;
            } else {
                let rel = path
                    .strip_prefix(&self.data_dir)
                    .expect("walked path is under data_dir");
                let key = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                let value = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                out.push(Record { key, value });
            }
        }
        Ok(())
    }
}

impl Store for FsStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let dest = self.path_for(key);
        let parent = dest.parent().expect("key path always has a parent under data_dir");
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;

        let _guard = self.lock_exclusive()?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("creating temp file in {}", parent.display()))?;
        std::io::Write::write_all(&mut tmp, value)?;
        tmp.persist(&dest)
            .map_err(|e| e.error)
            .with_context(|| format!("persisting {}", dest.display()))?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        let _guard = self.lock_shared()?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        let _guard = self.lock_exclusive()?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<Record>> {
        let _guard = self.lock_shared()?;
        let mut all = Vec::new();
        self.walk(&self.data_dir, &mut all)?;
        Ok(all.into_iter().filter(|r| r.key.starts_with(prefix)).collect())
    }
}
