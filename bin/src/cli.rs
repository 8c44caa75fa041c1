use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sistrum", version, about = "Drive the Sistrum modal editing overlay")]
pub struct Cli {
    /// Session configuration (RON)
    #[arg(long, global = true, env = "SISTRUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file, or directory to put it in
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the commands a host can bind
    Commands,

    /// Run a command script against marked text in an in-memory editor
    Run {
        /// File holding the initial text, with `|` marking cursors
        #[arg(long)]
        text: PathBuf,

        /// File with one command per line: `<command-id> [json-args]`, `@focus` or `@blur`
        #[arg(long)]
        script: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_with_global_flags() {
        let cli = Cli::try_parse_from([
            "sistrum",
            "run",
            "--text",
            "buffer.txt",
            "--script",
            "keys.txt",
            "--config",
            "sistrum.ron",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("sistrum.ron")));
        assert!(matches!(cli.command, Command::Run { .. }));
    }

    #[test]
    fn run_requires_both_files() {
        assert!(Cli::try_parse_from(["sistrum", "run", "--text", "buffer.txt"]).is_err());
    }
}
