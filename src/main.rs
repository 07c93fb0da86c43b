use anyhow::Result;
use clap::Parser;

use dotfiles_install::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = logging::Logger::new(args.verbose);

    commands::install::run(&args, &log)
}
