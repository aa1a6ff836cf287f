//! Configuration

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser};

use crate::cli::Commands;

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
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub(crate) log_format: LogFormat,
}

/// Storefront settings.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory the cart and wishlist snapshots are saved in
    #[arg(long, env = "CRICHUB_DATA_DIR", default_value = ".crichub", global = true)]
    pub(crate) data_dir: PathBuf,

    /// Catalog fixture to sell from; the bundled catalog when omitted
    #[arg(long, env = "CRICHUB_CATALOG", global = true)]
    pub(crate) catalog: Option<PathBuf>,

    /// How long an order confirmation stays on screen, in milliseconds
    #[arg(
        long,
        env = "CRICHUB_CONFIRMATION_DISPLAY_MS",
        default_value_t = 2000,
        global = true
    )]
    pub(crate) confirmation_display_ms: u64,
}

impl StoreConfig {
    pub(crate) fn confirmation_display(&self) -> Duration {
        Duration::from_millis(self.confirmation_display_ms)
    }
}

/// CricHub storefront CLI configuration
#[derive(Debug, Parser)]
#[command(name = "crichub", about = "CricHub storefront and scoring CLI", long_about = None)]
pub(crate) struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Storefront settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_without_flags() -> TestResult {
        let config = AppConfig::try_parse_from(["crichub", "catalog"])?;

        assert_eq!(config.store.confirmation_display(), Duration::from_secs(2));
        assert!(config.store.catalog.is_none());

        Ok(())
    }

    #[test]
    fn global_flags_follow_the_subcommand() -> TestResult {
        let config = AppConfig::try_parse_from([
            "crichub",
            "cart",
            "show",
            "--data-dir",
            "/tmp/crichub",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.store.data_dir, PathBuf::from("/tmp/crichub"));
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }
}
