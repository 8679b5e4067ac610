use clap::{ArgAction, Parser, Subcommand};

const HELP_TEMPLATE: &str = "
  redo

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "redo")]
#[command(about = "Top-down incremental build engine", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Pass -x to the child shell (shell command tracing)
    #[arg(short = 'x', global = true)]
    pub trace: bool,

    /// Accepted for compatibility with other redo implementations; this
    /// engine builds one target at a time and does not schedule in parallel
    #[arg(short = 'j', long = "jobs")]
    pub jobs: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Targets to build (ignored when a subcommand is given)
    pub targets: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .redo/ under each directory (or $REDO_DIR, or .)
    Init {
        dirs: Vec<String>,
    },

    /// Declare that the calling script's output depends on TARGET's content
    Ifchange {
        targets: Vec<String>,
    },

    /// Declare that the calling script should rerun if TARGET ever appears
    Ifcreate {
        targets: Vec<String>,
    },

    /// Inspect the recorded dependency graph (read-only, does not build)
    Graph {
        #[command(subcommand)]
        command: GraphCommands,
    },

    /// Remove a target's recorded metadata, rebuild flag, and edges
    Clean {
        target: String,
    },

    /// Generate shell completion scripts
    Completions {
        shell: String,
    },
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Print prerequisite/dependent edges for TARGET, or the whole project
    Show {
        target: Option<String>,

        /// Report any dependency cycle found in the recorded graph
        #[arg(long)]
        check: bool,
    },
}
