//! dispatchq - in-memory delivery priority queue service
//!
//! Main entry point for the dispatchq CLI and HTTP server.

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dispatchq_api::{ApiConfig, ApiServer};
use dispatchq_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, Severity};
use dispatchq_queue::{PriorityQueueStore, StoreConfig};

use cli::{Cli, Commands, DEFAULT_CONFIG_PATH};

/// Per-user config file, consulted when the default path does not exist.
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dispatchq").join("config.toml"))
}

/// Pick the config file to load, if any.
fn resolve_config_path(requested: &Path) -> Option<PathBuf> {
    if requested.exists() {
        return Some(requested.to_path_buf());
    }
    if requested == Path::new(DEFAULT_CONFIG_PATH) {
        return user_config_path().filter(|p| p.exists());
    }
    None
}

/// Load the configuration, falling back to defaults when no file exists.
///
/// Returns the path that was loaded alongside the config so the caller can
/// report it once logging is up.
fn load_config(requested: &Path) -> Result<(Config, Option<PathBuf>), Box<dyn std::error::Error>> {
    match resolve_config_path(requested) {
        Some(path) => {
            let config = ConfigLoader::load(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}

/// Initialize tracing with console and optional file output.
///
/// `RUST_LOG` takes precedence over the configured level. Log files rotate
/// daily under `logging.directory` when it is set.
fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let file_layer = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("dispatchq")
                .filename_suffix("log")
                .max_log_files(14)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The worker flushes on drop, so it must outlive main
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let (json_layer, text_layer) = if config.json {
        (Some(fmt::layer().json().with_target(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(true).with_ansi(true)))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (config, loaded_from) = load_config(&cli.config)?;

    match cli.command {
        Some(Commands::Check) => check_config(&config, loaded_from.as_deref()),
        Some(Commands::Run { host, port }) => {
            init_tracing(&config.logging)?;
            log_config_source(&cli.config, loaded_from.as_deref());
            run_server(config, host, port).await
        }
        None => {
            init_tracing(&config.logging)?;
            log_config_source(&cli.config, loaded_from.as_deref());
            run_server(config, None, None).await
        }
    }
}

fn log_config_source(requested: &Path, loaded_from: Option<&Path>) {
    match loaded_from {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => warn!(
            "Config file {} not found, using defaults",
            requested.display()
        ),
    }
}

/// Validate the configuration and print the outcome.
fn check_config(config: &Config, loaded_from: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match loaded_from {
        Some(path) => println!("Configuration: {}", path.display()),
        None => println!("Configuration: built-in defaults"),
    }

    let report = ConfigValidator::validate(config);
    for issue in report.issues() {
        let label = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("  {label}: {issue}");
    }

    if report.is_valid() {
        println!("Configuration is valid");
        Ok(())
    } else {
        Err(format!("configuration has {} error(s)", report.errors().count()).into())
    }
}

/// Run the HTTP server until Ctrl-C.
async fn run_server(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting dispatchq v{}", env!("CARGO_PKG_VERSION"));

    let validation = ConfigValidator::validate(&config);
    for issue in validation.issues() {
        match issue.severity {
            Severity::Error => error!("Config {}", issue),
            Severity::Warning => warn!("Config {}", issue),
        }
    }
    if !validation.is_valid() {
        return Err("invalid configuration".into());
    }

    let store = Arc::new(PriorityQueueStore::new(StoreConfig::from(&config.queue)));
    info!(
        history_capacity = store.config().history_capacity,
        cancelled_capacity = store.config().cancelled_capacity,
        "Delivery store initialized"
    );

    let api_config = ApiConfig::new(
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port),
    );
    let server = ApiServer::new(api_config, store);

    server.run(shutdown_signal()).await?;

    info!("dispatchq stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9100\n[queue]\nhistory_capacity = 5").unwrap();

        let (config, loaded_from) = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.queue.history_capacity, 5);
        assert_eq!(loaded_from.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_explicit_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let (config, loaded_from) = load_config(&missing).unwrap();
        assert!(loaded_from.is_none());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.queue.history_capacity, 10);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_check_config_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(check_config(&config, None).is_err());
        assert!(check_config(&Config::default(), None).is_ok());
    }
}
