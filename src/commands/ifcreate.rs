//! `redo-ifcreate TARGET...` -- spec.md §4.5.8, §6. Called from inside a
//! running `.do` script; `$REDO_PARENT` identifies the calling dependent.

use std::env;

use anyhow::{Context as _, Result};

use crate::engine::{self, Engine};
use crate::error::RedoError;
use crate::target::{self, TargetRef};

pub fn execute(targets: &[String]) -> Result<()> {
    let cwd = env::current_dir().context("reading current directory")?;
    let ctx = engine::Context::from_env();
    let parent_rel = ctx
        .parent
        .clone()
        .ok_or_else(|| RedoError::Usage("REDO_PARENT not set; redo-ifcreate must run inside a .do script".to_string()))?;

    let root = target::find_root(&cwd)
        .ok_or_else(|| RedoError::Configuration(format!("{} has no .redo/ directory", cwd.display())))?;
    let dependent = TargetRef::in_project(root, parent_rel);
    let engine = Engine::open(dependent.root_dir())?;

    for t in targets {
        let target = TargetRef::resolve(&cwd, t)?;
        engine::redo_if_create(&engine, &target, &dependent)?;
    }
    Ok(())
}
