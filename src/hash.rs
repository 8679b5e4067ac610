//! Content and identity hashing.
//!
//! The original implementation hashes with SHA-1; spec.md explicitly allows
//! "any 160-bit-or-stronger hash". This crate reaches for `sha2` (already a
//! dependency pulled in for this exact purpose) and uses SHA-256, rendered as
//! lowercase hex via `hex`, for both the path identity hash and the file
//! content hash.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

/// A hex-encoded SHA-256 digest, used both as a `TargetRef::id_hash` and as a
/// `Metadata::content_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Hash(String);

impl Hash {
    /// Hashes a UTF-8 string (used for path identity).
    pub fn of_str(s: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(s.as_bytes());
        Hash(hex::encode(hasher.finalize()))
    }

    /// Streams a file's contents through the hasher without loading it all
    /// into memory at once.
    pub fn of_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Hash(hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_hashes_identically() {
        assert_eq!(Hash::of_str("foo/bar.c"), Hash::of_str("foo/bar.c"));
    }

    #[test]
    fn different_strings_hash_differently() {
        assert_ne!(Hash::of_str("foo"), Hash::of_str("bar"));
    }

    #[test]
    fn file_hash_reflects_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello").unwrap();
        let h1 = Hash::of_file(&path).unwrap();
        std::fs::write(&path, b"hello").unwrap();
        let h2 = Hash::of_file(&path).unwrap();
        assert_eq!(h1, h2);

        std::fs::write(&path, b"world").unwrap();
        let h3 = Hash::of_file(&path).unwrap();
        assert_ne!(h1, h3);
    }
}
