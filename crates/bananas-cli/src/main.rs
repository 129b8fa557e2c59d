mod cli;
mod commands;
mod sink;

use anyhow::Result;
use bananas_core::Config;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

fn load_config(args: &Args) -> Config {
    let path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = match Config::load(&path) {
        Ok(c) => {
            info!("Loaded config from {:?}", path);
            c
        }
        Err(e) => {
            // Only complain about a file the user pointed at explicitly.
            if args.config.is_some() {
                warn!("Failed to load config: {}, using defaults", e);
            }
            Config::default()
        }
    };

    if let Some(store) = &args.store {
        config.store.path = store.clone();
    }
    config
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bananas=info".parse()?)
                .add_directive("bananas_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args);

    match args.command {
        Command::Show { learner } => commands::show::run(&config, learner.as_deref()),
        Command::Export {
            learner,
            format,
            output_dir,
            no_open,
        } => commands::export::run(&config, learner.as_deref(), format, output_dir, no_open),
        Command::Dispatch { directory, request } => commands::dispatch::run(&directory, &request),
    }
}
