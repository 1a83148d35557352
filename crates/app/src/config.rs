//! Configuration read from the command line and environment.

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; when unset products are kept in memory
    /// for a single command only
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Settings {
        #[command(flatten)]
        database: DatabaseConfig,

        #[command(flatten)]
        logging: LoggingConfig,
    }

    #[test]
    fn explicit_flags_are_parsed() -> Result<(), clap::Error> {
        let settings = Settings::try_parse_from([
            "catalog-app",
            "--database-url",
            "postgres://localhost/catalog",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])?;

        assert_eq!(
            settings.database.database_url.as_deref(),
            Some("postgres://localhost/catalog")
        );
        assert_eq!(settings.logging.log_level, "debug");
        assert_eq!(settings.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = Settings::try_parse_from(["catalog-app", "--log-format", "pretty"]);

        assert!(result.is_err());
    }
}
