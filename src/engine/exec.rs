//! Script execution contract -- spec.md §4.5.4.
//!
//! Grounded on `original_source/dofile.go`'s `RunDoFile`/`runCmd`, with the
//! `std::process::Command` construction style taken from `loom`'s
//! `orchestrator/terminal/native/spawner.rs`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::SystemTime;

use anyhow::{Context, Result};

use super::{Context as RedoContext, Engine};
use crate::error::RedoError;
use crate::target::TargetRef;

/// The deterministic mtime stamped onto `$3` before the child runs; any
/// deviation at exit means the script touched the file.
const ARG3_SENTINEL: SystemTime = SystemTime::UNIX_EPOCH;

/// The two scratch files a script run may have written to, plus enough
/// state to tell whether each was touched.
pub struct ScriptOutputs {
    pub stdout_path: PathBuf,
    pub arg3_path: PathBuf,
}

/// Runs the `.do` script governing `target`, per the full subprocess
/// contract: argv, working directory, environment, and loop detection.
/// Returns the two candidate output files for the caller to inspect and
/// install (or reject) per spec.md's output-disposition table.
pub fn run_script(
    engine: &Engine,
    target: &TargetRef,
    do_file: &Path,
    ctx: &RedoContext,
) -> Result<ScriptOutputs> {
    if super::is_loop(&ctx.pending, target.id_hash().as_str()) {
        anyhow::bail!(RedoError::Loop(target.rel_path().to_string()));
    }

    let script_dir = do_file
        .parent()
        .context("`.do` file has no parent directory")?;
    let arg1 = to_slash_string(&target.rel_to(script_dir));
    let arg2 = strip_last_extension(&arg1);

    let tmp_dir = engine.config.tmp_dir(&engine.root_dir);
    fs::create_dir_all(&tmp_dir).with_context(|| format!("creating {}", tmp_dir.display()))?;

    let stdout_path = unique_tmp_path(&tmp_dir, "out0")?;
    let stdout_file = File::create(&stdout_path)
        .with_context(|| format!("creating {}", stdout_path.display()))?;

    let arg3_path = unique_tmp_path(&tmp_dir, "arg3")?;
    {
        let arg3_file = File::create(&arg3_path)
            .with_context(|| format!("creating {}", arg3_path.display()))?;
        arg3_file
            .set_modified(ARG3_SENTINEL)
            .with_context(|| format!("stamping {}", arg3_path.display()))?;
    }

    let child_ctx = ctx.child_for(target);
    let shell_args = engine.config.shell_args();

    let mut command = Command::new("/bin/sh");
    command.arg("-e");
    for flag in &shell_args {
        command.arg(flag);
    }
    command
        .arg(do_file)
        .arg(&arg1)
        .arg(&arg2)
        .arg(&arg3_path)
        .current_dir(script_dir)
        .env("REDO_PARENT", child_ctx.parent.as_deref().unwrap_or_default())
        .env("REDO_DEPTH", child_ctx.depth.to_string())
        .env("REDO_PENDING", &child_ctx.pending)
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::inherit());

    let status = command
        .status()
        .with_context(|| format!("spawning /bin/sh for {}", do_file.display()))?;

    if !status.success() {
        anyhow::bail!(RedoError::ScriptFailed {
            target: target.rel_path().to_string(),
            command: format!("/bin/sh -e {} {} {}", do_file.display(), arg1, arg2),
            status: status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "terminated by signal".to_string()),
        });
    }

    Ok(ScriptOutputs { stdout_path, arg3_path })
}

/// `true` if `path`'s current mtime differs from [`ARG3_SENTINEL`], or the
/// file is non-empty -- either way, the script touched it.
pub fn arg3_was_touched(path: &Path) -> Result<bool> {
    let meta = fs::metadata(path).with_context(|| format!("statting {}", path.display()))?;
    if meta.len() > 0 {
        return Ok(true);
    }
    let mtime = meta.modified().with_context(|| format!("statting {}", path.display()))?;
    Ok(mtime != ARG3_SENTINEL)
}

pub fn is_nonempty(path: &Path) -> Result<bool> {
    Ok(fs::metadata(path)
        .with_context(|| format!("statting {}", path.display()))?
        .len()
        > 0)
}

/// Installs `src` at `dest` atomically, falling back to copy-then-rename
/// when the two paths live on different filesystems (`EXDEV`). Preserves
/// the source's permission bits across the fallback; uid/gid are not
/// preserved (no privilege-dropping story exists in this crate without
/// pulling in a new dependency purely for chown).
pub fn atomic_install(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.raw_os_error() == Some(18 /* EXDEV */) => {
            let dest_dir = dest.parent().context("install destination has no parent")?;
            let fallback = unique_tmp_path(dest_dir, "install")?;
            fs::copy(src, &fallback)
                .with_context(|| format!("copying {} to {}", src.display(), fallback.display()))?;
            let perms = fs::metadata(src)
                .with_context(|| format!("statting {}", src.display()))?
                .permissions();
            fs::set_permissions(&fallback, perms)
                .with_context(|| format!("setting permissions on {}", fallback.display()))?;
            fs::rename(&fallback, dest)
                .with_context(|| format!("renaming {} to {}", fallback.display(), dest.display()))?;
            let _ = fs::remove_file(src);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("renaming {} to {}", src.display(), dest.display())),
    }
}

fn unique_tmp_path(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let named = tempfile::Builder::new()
        .prefix(prefix)
        .tempfile_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    named
        .into_temp_path()
        .keep()
        .context("detaching temp file for manual lifecycle management")
}

/// Renders a [`TargetRef::rel_to`] result as a `/`-separated string for
/// `$1`, regardless of the host platform's path separator.
fn to_slash_string(path: &Path) -> String {
    path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
}

/// Strips exactly one, rightmost, extension from the basename component of
/// `rel_path`, leaving any directory prefix untouched. This is a distinct
/// rule from the `.do` candidate search: `$2` never loses more than one
/// extension regardless of how many the filename has.
fn strip_last_extension(rel_path: &str) -> String {
    let (dir, base) = match rel_path.rfind('/') {
        Some(idx) => (&rel_path[..=idx], &rel_path[idx + 1..]),
        None => ("", rel_path),
    };
    let stripped = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };
    format!("{dir}{stripped}")
}
