use clap::Parser;

/// Command-line interface for the dotfiles installer.
///
/// There are no subcommands: running the binary with no arguments performs an
/// interactive install for the detected platform. Flags only add
/// conveniences on top of that default.
#[derive(Parser, Debug)]
#[command(
    name = "dotfiles-install",
    about = "Install dotfiles for the current platform",
    version
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the dotfiles repository root directory
    #[arg(long)]
    pub root: Option<std::path::PathBuf>,

    /// Skip the interactive confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_arguments() {
        let cli = Cli::parse_from(["dotfiles-install"]);
        assert!(!cli.verbose);
        assert!(!cli.yes);
        assert!(cli.root.is_none());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["dotfiles-install", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_yes() {
        let cli = Cli::parse_from(["dotfiles-install", "--yes"]);
        assert!(cli.yes);
    }

    #[test]
    fn parse_yes_short() {
        let cli = Cli::parse_from(["dotfiles-install", "-y"]);
        assert!(cli.yes);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["dotfiles-install", "--root", "/tmp/dotfiles"]);
        assert_eq!(cli.root, Some(std::path::PathBuf::from("/tmp/dotfiles")));
    }
}
