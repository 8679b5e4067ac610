//! Command implementations, called from [`crate::cli::dispatch`]. Split one
//! module per command the way `loom`'s `commands/` directory is organized.

mod clean;
mod completions;
mod graph;
mod ifchange;
mod ifcreate;
mod init;
mod redo;

pub use clean::execute as clean;
pub use completions::execute as completions;
pub use graph::execute as graph_show;
pub use ifchange::execute as ifchange;
pub use ifcreate::execute as ifcreate;
pub use init::execute as init;
pub use redo::execute as redo;
