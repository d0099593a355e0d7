use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::capture::TaskInput;
use crate::model::ListView;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "justdoit",
    version,
    about = "Just do it ! A keyboard-first to-do list for the terminal.",
    after_help = "Examples:\n  justdoit                  Launch the TUI (same as `justdoit tui`)\n  justdoit add Buy oat milk\n  justdoit list --view active --json\n  justdoit done 01HF2K"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "debug" or "info,justdoit=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Capture a new task
    Add(AddArgs),
    /// Print the tasks of a view
    List(ListArgs),
    /// Mark one or more tasks as done by id
    Done(IdArgs),
    /// Delete one or more tasks by id
    Delete(IdArgs),
    /// Remove every completed task
    ClearDone,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task title
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Which tasks to print
    #[arg(long, value_enum, default_value_t = ListView::All)]
    pub view: ListView,

    /// Emit JSON instead of one line per task
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IdArgs {
    /// One or more task ids; the six-character short ids from `list` work too
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

impl From<AddArgs> for TaskInput {
    fn from(args: AddArgs) -> Self {
        TaskInput { text: args.text }
    }
}
