use clap::Parser;
use env_logger::Target;
use eyre::{Report, Result};
use log::{info, warn};
use magnum_complete::cfg::CompleterConfig;
use magnum_complete::cli::{Cli, Command};
use std::fs::OpenOptions;

fn setup_logging() -> Result<(), Report> {
    let log_dir = dirs::data_local_dir()
        .ok_or_else(|| eyre::eyre!("Could not determine local data directory"))?
        .join("magnum-complete")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("magnum-complete.log");

    let log_file = OpenOptions::new().create(true).append(true).open(&log_file_path)?;

    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .target(Target::Pipe(Box::new(log_file)))
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries completions, so logs only ever go to the file
    if let Err(e) = setup_logging() {
        if matches!(cli.command, Command::Init(_) | Command::Inspect(_)) {
            eprintln!("Logging disabled: {e}");
        }
    }
    info!("Starting magnum-complete {:?}", std::env::args().nth(1));

    if let Err(e) = run(cli).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Report> {
    match &cli.command {
        Command::Init(cmd) => cmd.execute(),
        Command::Inspect(cmd) => {
            let config = CompleterConfig::load(&cli.overrides)?;
            cmd.execute(&config).await
        }
        Command::Complete(cmd) => {
            let config = completion_config(&cli);
            if let Err(e) = cmd.execute(&config).await {
                warn!("Completion failed: {e:#}");
            }
            Ok(())
        }
        Command::Serve(cmd) => {
            let config = completion_config(&cli);
            cmd.execute(&config).await
        }
    }
}

/// Completion must never fail the shell; a broken config falls back to defaults
fn completion_config(cli: &Cli) -> CompleterConfig {
    CompleterConfig::load(&cli.overrides).unwrap_or_else(|e| {
        warn!("Ignoring config: {e:#}");
        let mut config = CompleterConfig::default();
        config.apply(&cli.overrides);
        config
    })
}
