use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::Action;

#[derive(Debug, Parser)]
#[command(
    name = "blochlab",
    about = "BlochLab — apply X, Y and Hadamard gates and watch the qubit move on the Bloch sphere",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct BlochCli {
    /// Global: path to config (TOML); default: ~/.blochlab/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: append logs to FILE (the full-screen view logs nowhere otherwise)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full-screen Bloch sphere with gate buttons (default)
    Tui {
        /// Start with mouse capture off (F9 toggles it)
        #[arg(long = "no-mouse", action = ArgAction::SetTrue)]
        no_mouse: bool,
    },

    /// Line-mode shell
    Shell,

    /// Apply steps in order and print the timeline
    ///
    /// Examples:
    ///   blochlab apply x h
    ///   blochlab apply h y undo --json
    Apply {
        /// Gate names (x, y, h, hadamard, X-Gate…), `undo`, or `reset`/`clear`
        #[arg(value_name = "STEP", required = true)]
        steps: Vec<Action>,

        /// Print the final state and history as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Print the gate table
    Gates,
}

impl Command {
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, Command::Tui { .. })
    }
}
