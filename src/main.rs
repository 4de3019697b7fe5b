//! Bloch Lab — full-screen view by default, plus shell / apply / gates.
use anyhow::Result;
use clap::Parser; // trait import enables BlochCli::parse()
use tracing::debug;

use blochlab::cli::{BlochCli, Command};
use blochlab::config::{resolve_config_path, BlochConfig};
use blochlab::logging::{self, LogSink};
use blochlab::{commands, shell, tui};

fn main() -> Result<()> {
    let args = BlochCli::parse();
    let mut cfg = BlochConfig::load(&args.config)?;

    let cmd = args.cmd.unwrap_or(Command::Tui { no_mouse: false });
    let log_file = args.log_file.or_else(|| cfg.log.file.clone());
    logging::init(&cfg.log.filter, LogSink::choose(log_file, cmd.is_fullscreen()))?;
    debug!(?cmd, "starting");

    match cmd {
        Command::Tui { no_mouse } => {
            if no_mouse {
                cfg.ui.mouse = false;
            }
            tui::app::run_tui(&cfg)
        }
        Command::Shell => shell::start(resolve_config_path(&args.config), &cfg),
        Command::Apply { steps, json } => commands::apply::main(steps, json),
        Command::Gates => commands::gates::main(),
    }
}
