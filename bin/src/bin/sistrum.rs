use clap::Parser;
use sistrum_bin::{
    cli::{Cli, Command},
    commands,
};
use sistrum_core::SessionConfig;
use sistrum_log::LogConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match sistrum_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            None
        },
    };

    let config = match &cli.config {
        Some(path) => SessionConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }),
        None => SessionConfig::default(),
    };

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Command::Commands => commands::list::run(&config),
        Command::Run { text, script } => commands::run::handle(&config, &text, &script).await,
    };

    if let Err(e) = result {
        eprintln!("Command failed: {e}");
        std::process::exit(1);
    }
}
