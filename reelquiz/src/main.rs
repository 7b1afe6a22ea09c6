use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod app;
mod config;
mod deck;
mod page;
mod storage;
mod utils;

use app::App;
use config::Config;

/// A movie-trivia quiz for your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Override the configuration directory
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::get(cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = App::new(config).run() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
