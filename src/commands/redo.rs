//! `redo [TARGET...]` -- spec.md §4.5.1, §6.

use std::env;

use anyhow::{Context, Result};

use crate::engine::{self, Engine};
use crate::error::RedoError;
use crate::target::{self, TargetRef};

/// Builds each of `targets`. With none given, builds `@all` if `@all.do`
/// exists, else `all` if `all.do` exists, else fails with a usage error.
pub fn execute(targets: &[String]) -> Result<()> {
    let cwd = env::current_dir().context("reading current directory")?;

    if targets.is_empty() {
        let root = target::find_root(&cwd)
            .ok_or_else(|| RedoError::Configuration(format!("{} has no .redo/ directory", cwd.display())))?;
        let name = if root.join("@all.do").is_file() {
            "@all"
        } else if root.join("all.do").is_file() {
            "all"
        } else {
            return Err(RedoError::Usage(
                "no targets given and neither @all.do nor all.do exists".to_string(),
            )
            .into());
        };
        return build_one(&cwd, name);
    }

    for t in targets {
        build_one(&cwd, t)?;
    }
    Ok(())
}

fn build_one(cwd: &std::path::Path, name: &str) -> Result<()> {
    let target = TargetRef::resolve(cwd, name)?;
    let engine = Engine::open(target.root_dir())?;
    let ctx = engine::Context::from_env();
    engine::redo(&engine, &target, &ctx)
}
