use anyhow::Result;

use crate::commands;

use super::types::{Commands, GraphCommands};

/// Dispatches a parsed top-level command. `verbose`/`trace` have already
/// been folded into the process environment by the caller (see
/// `src/bin/redo.rs`) before this runs, since diagnostics initialization
/// happens once at process start.
pub fn dispatch(command: Option<Commands>, targets: Vec<String>) -> Result<()> {
    match command {
        None => commands::redo(&targets),
        Some(Commands::Init { dirs }) => commands::init(&dirs),
        Some(Commands::Ifchange { targets }) => commands::ifchange(&targets),
        Some(Commands::Ifcreate { targets }) => commands::ifcreate(&targets),
        Some(Commands::Graph { command }) => match command {
            GraphCommands::Show { target, check } => commands::graph_show(target.as_deref(), check),
        },
        Some(Commands::Clean { target }) => commands::clean(&target),
        Some(Commands::Completions { shell }) => commands::completions(&shell),
    }
}
