//! Command-line surface, split the way `loom` splits `cli/types.rs`
//! (argument parsing) from `cli/dispatch.rs` (behavior).

mod dispatch;
mod types;

pub use dispatch::dispatch;
pub use types::{Cli, Commands, GraphCommands};
