//! Project-local configuration, loaded from `.redo/config.toml`.
//!
//! Optional by design -- a freshly `init`ed project has none. Grounded on
//! `loom`'s `fs/mod.rs` pattern of a small `Config` struct with an
//! all-fields-optional shape, loaded once and consulted by name, plus the
//! engine's own environment-variable overrides from spec.md §6.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Project-local settings. Every field has an environment-variable override
/// and a built-in default, so the file itself is never required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Extra flags passed after `-e` to `/bin/sh` (`REDO_SHELL_ARGS`).
    pub shell_args: Option<String>,
    /// Override for the scratch directory used for script outputs
    /// (`REDO_TMP_DIR`), relative to the project root unless absolute.
    pub tmp_dir: Option<String>,
}

impl Config {
    /// Loads `<root_dir>/.redo/config.toml` if present; an absent file is
    /// not an error, only a malformed one is.
    pub fn load(root_dir: &Path) -> Result<Config> {
        let path = root_dir.join(".redo").join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).with_context(|| format!("parsing {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Extra `/bin/sh` flags, `REDO_SHELL_ARGS` taking precedence over the
    /// config file, with `-x` appended when `REDO_TRACE` is set (`-x`/`-vvv`
    /// on the CLI, per spec.md §11).
    pub fn shell_args(&self) -> Vec<String> {
        let raw = env::var("REDO_SHELL_ARGS")
            .ok()
            .or_else(|| self.shell_args.clone())
            .unwrap_or_default();
        let mut args: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if env::var_os("REDO_TRACE").is_some() && !args.iter().any(|a| a == "-x") {
            args.push("-x".to_string());
        }
        args
    }

    /// Resolved scratch directory, `REDO_TMP_DIR` taking precedence, falling
    /// back to `<root_dir>/.redo/tmp`.
    pub fn tmp_dir(&self, root_dir: &Path) -> PathBuf {
        let raw = env::var("REDO_TMP_DIR").ok().or_else(|| self.tmp_dir.clone());
        match raw {
            Some(p) if Path::new(&p).is_absolute() => PathBuf::from(p),
            Some(p) => root_dir.join(p),
            None => root_dir.join(".redo").join("tmp"),
        }
    }
}
