mod cli;
mod config;
mod format;
mod frames;
mod logging;
mod model;
mod mood;
mod observe;
mod pet;
mod poll;
mod tui;
mod visualizer;

use std::process;

use clap::Parser;
use jiff::Timestamp;

use cli::{Cli, Command, StatusReport};
use config::Config;
use frames::FrameCache;
use logging::LogTarget;
use observe::GitHubClient;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Init { force }) => {
            logging::init(LogTarget::Stderr);
            init(cli.config, force);
        }
        Some(Command::Status { json }) => {
            logging::init(LogTarget::Stderr);
            status(&load_config(cli.config.as_deref()), json);
        }
        None => {
            logging::init(LogTarget::File);
            let config = load_config(cli.config.as_deref());
            let frames = match &config.assets.dir {
                Some(dir) => FrameCache::load(dir),
                None => FrameCache::builtin(),
            };
            let client = client(&config);

            if let Err(e) = tui::run(&config, frames, client, !cli.no_visualizer) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("{e}");
        if matches!(e, config::ConfigError::NotFound(_)) {
            eprintln!("Run `tuxagotchi init` to create one.");
        }
        process::exit(1);
    })
}

fn client(config: &Config) -> GitHubClient {
    GitHubClient::new(&config.github).unwrap_or_else(|e| {
        eprintln!("Failed to set up GitHub client: {e}");
        process::exit(1);
    })
}

fn status(config: &Config, json: bool) {
    let report = StatusReport::collect(&client(config), &config.github.repo, Timestamp::now());
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize status: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", report.to_text());
    }
}

fn init(explicit: Option<std::path::PathBuf>, force: bool) {
    let Some(path) = explicit.or_else(Config::path) else {
        eprintln!("{}", config::ConfigError::NoConfigDir);
        process::exit(1);
    };
    if let Err(e) = Config::write_template(&path, force) {
        eprintln!("Failed to write {}: {e}", path.display());
        process::exit(1);
    }
    println!("Wrote {}", path.display());
}
