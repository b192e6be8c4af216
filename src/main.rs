//! Cadence - job descriptor normalization
//!
//! Loads scheduler defaults and a job manifest from one TOML file and prints
//! the resolved descriptors.

mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cadence_config::{Config, ConfigLoader, ConfigValidator};
use cadence_core::{DescriptorBuilder, Interval, JobDescriptor, JobManifest};

use cli::{Cli, Commands};

/// Get the ~/.cadence directory path.
fn cadence_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".cadence"))
        .unwrap_or_else(|| PathBuf::from(".cadence"))
}

/// Pick the config file: explicit flag, ./cadence.toml, then ~/.cadence/config.toml.
fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let local = PathBuf::from("cadence.toml");
    if local.is_file() {
        return local;
    }
    cadence_dir().join("config.toml")
}

/// Initialize tracing on stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config);

    let result = match cli.command.unwrap_or(Commands::Build { pretty: false }) {
        Commands::Build { pretty } => run_build(&config_path, pretty),
        Commands::Check => run_check(&config_path),
        Commands::Validate => run_validate(&config_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_descriptors(config_path: &Path) -> Result<Vec<JobDescriptor>, Box<dyn std::error::Error>> {
    info!("Loading config from {}", config_path.display());
    let config = ConfigLoader::load(config_path)?;
    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    let manifest = JobManifest::load(config_path)?;
    let descriptors = DescriptorBuilder::new().build_all(&manifest.jobs, &config.scheduler)?;
    Ok(descriptors)
}

fn run_build(config_path: &Path, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let descriptors = load_descriptors(config_path)?;
    let output = if pretty {
        serde_json::to_string_pretty(&descriptors)?
    } else {
        serde_json::to_string(&descriptors)?
    };
    println!("{}", output);
    Ok(())
}

fn run_check(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    for descriptor in load_descriptors(config_path)? {
        let name = descriptor.name.as_deref().unwrap_or("<inline>");
        let cadence = match &descriptor.interval {
            Some(Interval::Schedule(schedule)) => match schedule.next_after(&now) {
                Some(next) => format!("cron {} (next {})", schedule, next.to_rfc3339()),
                None => format!("cron {} (no upcoming run)", schedule),
            },
            Some(Interval::Millis(0)) | None => format!("once after {}ms", descriptor.timeout),
            Some(Interval::Millis(millis)) => format!("every {}ms", millis),
        };
        let source = if descriptor.is_inline() { "inline" } else { "file" };
        println!("{:<24} {:<8} {:<7} {}", name, descriptor.run_as.as_str(), source, cadence);
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config: Config = ConfigLoader::load(config_path)?;
    let result = ConfigValidator::validate(&config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("{} is valid", config_path.display());
        Ok(())
    } else {
        Err(format!("{} has {} error(s)", config_path.display(), result.errors.len()).into())
    }
}
