use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::prelude::*;
use warmup_climate::config::LoggingConfig;
use warmup_climate::integrations::warmup::generate_entity_id;
use warmup_climate::Config;
use warmup_climate::ConfigError;

/// Check a Warmup thermostat configuration and list the entities it sets up
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Config file to load
    #[arg(default_value = "warmup.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let (config, diagnostics) = match Config::from_file(&args.config) {
        Ok(loaded) => loaded,
        Err(ConfigError::Invalid(diagnostics)) => {
            eprint!("{}", diagnostics);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if !diagnostics.0.is_empty() {
        eprint!("{}", diagnostics);
    }

    init_logging(&config.logging);

    tracing::info!("Loaded config from: {}", args.config.display());

    if config.warmup.is_empty() {
        tracing::warn!("No Warmup devices configured");
    }

    let mut entries: Vec<_> = config.warmup.iter().collect();
    entries.sort_by_key(|(entry_id, _)| entry_id.as_str());
    let mut entity_ids = HashSet::new();
    for (entry_id, device) in entries {
        let entity_id = generate_entity_id(&device.name, &entity_ids);
        tracing::info!(
            "[{}] {} -> room '{}' in '{}' (target {}°C)",
            entry_id,
            entity_id,
            device.room,
            device.location,
            device.target_temp
        );
        entity_ids.insert(entity_id);
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(logging: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(logging.targets())
        .init();
}
