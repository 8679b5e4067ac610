//! The degenerate store for targets outside any project.
//!
//! Grounded on `original_source/nulldb.go`: every operation is a silent
//! no-op, and `is_null` reports `true` so callers can skip recording work
//! entirely.

use anyhow::Result;

use super::{Record, Store};

/// A store that discards everything written to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl Store for NullStore {
    fn put(&self, _key: &str, _value: &[u8]) -> Result<()> {
        Ok(())
    }

    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn scan_prefix(&self, _prefix: &str) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    fn is_null(&self) -> bool {
        true
    }
}
