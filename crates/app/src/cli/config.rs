//! CLI Configuration

use carthorse_app::context::AppContext;
use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

/// Settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct Config {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: String,

    /// ISO 4217 currency code used for cart totals
    #[arg(long, env = "CART_CURRENCY", default_value = "GBP")]
    pub(crate) currency: String,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Connect to the database and build the application services.
    pub(crate) async fn context(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url, &self.currency)
            .await
            .map_err(|error| format!("failed to initialise: {error}"))
    }
}
