use std::{env, process, str::FromStr as _};

use clap::Parser as _;
use config_rs::{Config as ConfigRs, ConfigError};
use tracing::{debug, trace};

use crate::{
    app_info::AppInfo,
    cli::{Cli, Commands},
    commands::{generate_secret, issue_token, migrate, serve, version},
    config::Config,
    environment::Environment,
    jobs::job_registry::JobRegistry,
    setup_tracing::setup_tracing_for_command,
};

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

/// What the binary brings to the shared boot sequence.
pub struct BootConfig {
    pub app_info: AppInfo,
    pub job_registry: JobRegistry,
}

impl BootConfig {
    #[must_use]
    pub const fn new(app_info: AppInfo, job_registry: JobRegistry) -> Self {
        Self {
            app_info,
            job_registry,
        }
    }
}

pub async fn boot(config: BootConfig) {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        version::print_version_info(config.app_info, &config.job_registry);
        return;
    }

    let environment = set_environment();

    let app_config = match read_config(&environment) {
        Ok(app_config) => app_config,
        Err(e) => {
            eprintln!("❌ Failed to read configuration for {environment}: {e}");
            process::exit(1);
        }
    };

    setup_tracing_for_command(&cli.command, &app_config.tracing.log_level);

    debug!("Environment set to: {:?}", environment);
    trace!("Configuration loaded: {:?}", app_config);

    handle_command(environment, app_config, cli, config).await;
}

#[must_use]
pub fn set_environment() -> Environment {
    env::var(ENVIRONMENT_VARIABLE)
        .ok()
        .and_then(|s| Environment::from_str(&s).ok())
        .unwrap_or_default()
}

/// Reads `config/{environment}.yaml`, overridden by `APP_*` variables
/// (`APP_DATABASE__URL` sets `database.url`).
pub fn read_config(environment: &Environment) -> Result<Config, ConfigError> {
    let config_file_name = format!("config/{environment}");

    trace!("Reading configuration from: {}", config_file_name);

    ConfigRs::builder()
        .add_source(config_rs::File::with_name(&config_file_name))
        .add_source(
            config_rs::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

pub async fn handle_command(
    environment: Environment,
    config: Config,
    cli: Cli,
    boot_config: BootConfig,
) {
    match cli.command {
        Some(Commands::Migrate { action }) => {
            migrate::handle_migrate_command(&config, action).await;
        }
        Some(Commands::GenerateJwtSecret) => {
            generate_secret::handle_generate_secret_command();
        }
        Some(Commands::IssueToken { user_id, username }) => {
            issue_token::handle_issue_token_command(&config, user_id, username);
        }
        Some(Commands::Version) => {
            version::print_version_info(boot_config.app_info, &boot_config.job_registry);
        }
        Some(Commands::Serve) | None => {
            serve::handle_serve_command(environment, config, boot_config.job_registry).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_test_config() {
        let config = read_config(&Environment::Test).unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.scheduler.job_timeout_seconds, 5);
        assert_eq!(config.upload.minio.bucket_name, "blog");
    }
}
