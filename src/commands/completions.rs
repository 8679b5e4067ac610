//! `redo completions <shell>` -- supplemental, SPEC_FULL.md §13. Grounded on
//! `loom`'s `completions/generator.rs`.

use std::io;
use std::str::FromStr;

use anyhow::{Context as _, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;

pub fn execute(shell: &str) -> Result<()> {
    let shell = Shell::from_str(shell)
        .map_err(|_| anyhow::anyhow!("unsupported shell: {shell} (expected bash, zsh, fish, elvish, or powershell)"))
        .context("parsing shell name")?;
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
