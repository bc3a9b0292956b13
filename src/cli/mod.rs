pub mod commands;

use clap::{Parser, Subcommand};

use crate::cfg::ConfigOverrides;
pub use commands::{CompleteCommand, InitCommand, InspectCommand, ServeCommand};

/// Bash completion for the OpenStack Magnum client
#[derive(Debug, Parser)]
#[command(name = "magnum-complete", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Complete(CompleteCommand),
    Serve(ServeCommand),
    Init(InitCommand),
    Inspect(InspectCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_complete_takes_words_after_separator() {
        let cli = Cli::parse_from(["magnum-complete", "complete", "--cword", "2", "--", "magnum", "cluster-list", "--na"]);
        let Command::Complete(cmd) = cli.command else {
            panic!("expected complete");
        };
        assert_eq!(cmd.cword, 2);
        assert_eq!(cmd.words, vec!["magnum", "cluster-list", "--na"]);
        assert_eq!(cmd.request().current(), "--na");
    }

    #[test]
    fn test_complete_accepts_empty_trailing_word() {
        let cli = Cli::parse_from(["magnum-complete", "complete", "--cword", "1", "--", "magnum", ""]);
        let Command::Complete(cmd) = cli.command else {
            panic!("expected complete");
        };
        assert_eq!(cmd.words, vec!["magnum", ""]);
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::parse_from(["magnum-complete", "serve", "--client", "/usr/bin/magnum", "--timeout-ms", "250"]);
        assert_eq!(cli.overrides.client.as_deref(), Some("/usr/bin/magnum"));
        assert_eq!(cli.overrides.timeout_ms, Some(250));
    }

    #[test]
    fn test_init_defaults_to_bash_for_magnum() {
        let cli = Cli::parse_from(["magnum-complete", "init"]);
        let Command::Init(cmd) = cli.command else {
            panic!("expected init");
        };
        assert!(cmd.script().contains("complete -F _magnum_complete magnum"));
    }
}
