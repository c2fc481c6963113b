use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use bizplanner::{App, Cli, Config, Result};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let app = App::new(config, config_path)?;
    app.run(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    match run(cli) {
        Ok(()) => {
            info!("Application shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
