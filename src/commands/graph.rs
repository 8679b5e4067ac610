//! `redo graph show [TARGET] [--check]` -- supplemental, SPEC_FULL.md §13.

use std::env;

use anyhow::{Context as _, Result};
use colored::Colorize;

use crate::engine::Engine;
use crate::error::RedoError;
use crate::graph;
use crate::target::{self, TargetRef};

pub fn execute(target_path: Option<&str>, check: bool) -> Result<()> {
    let cwd = env::current_dir().context("reading current directory")?;

    match target_path {
        Some(path) => {
            let target = TargetRef::resolve(&cwd, path)?;
            let engine = Engine::open(target.root_dir())?;
            if check {
                graph::check(&engine)?;
                println!("{}", "no cycle detected".green());
            } else {
                print!("{}", graph::show(&engine, &target)?);
            }
        }
        None => {
            let root = target::find_root(&cwd)
                .ok_or_else(|| RedoError::Configuration(format!("{} has no .redo/ directory", cwd.display())))?;
            let engine = Engine::open(&root)?;
            if check {
                graph::check(&engine)?;
                println!("{}", "no cycle detected".green());
            } else {
                print!("{}", graph::show_all(&engine)?);
            }
        }
    }
    Ok(())
}
