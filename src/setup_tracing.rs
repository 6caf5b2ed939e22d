use time::macros::format_description;
use tracing_subscriber::{fmt::time::OffsetTime, EnvFilter};

use crate::cli::Commands;

pub fn setup_tracing_for_command(command: &Option<Commands>, server_log_level: &str) {
    // RUST_LOG always wins over these defaults
    let default_level = match command {
        Some(Commands::Migrate { .. }) => "warn",
        Some(Commands::Version | Commands::GenerateJwtSecret | Commands::IssueToken { .. }) => {
            "error"
        }
        Some(Commands::Serve) | None => server_log_level,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{default_level},sqlx::postgres::notice=warn,sea_orm_migration::migrator=warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_ansi(true)
        .with_timer(OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC),
            format_description!("[hour]:[minute]:[second].[subsecond digits:2]"),
        ))
        .compact()
        .init();
}
