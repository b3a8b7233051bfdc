//! Command line and environment configuration shared by the commands.

use clap::{Args, ValueEnum};
use std::{path::PathBuf, time::Duration};
use tracing::level_filters::LevelFilter;
use uapick_catalog::{CatalogManager, CatalogSource, ConstructionError, DeviceKind};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, env = "UAPICK_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info, ignore_case = true)]
    /// default log level, `RUST_LOG` directives take precedence
    pub log_level: LogLevel,

    #[arg(long, global = true, env = "UAPICK_LOG_JSON")]
    /// log as JSON lines instead of human readable text
    pub log_json: bool,

    #[command(flatten)]
    pub catalogs: CatalogArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[arg(long, global = true, env = "UAPICK_DESKTOP_FILE")]
    /// JSON file with the desktop catalog
    ///
    /// (default: embedded catalog)
    pub desktop_file: Option<PathBuf>,

    #[arg(long, global = true, env = "UAPICK_MOBILE_FILE")]
    /// JSON file with the mobile catalog
    ///
    /// (default: embedded catalog)
    pub mobile_file: Option<PathBuf>,
}

impl CatalogArgs {
    fn source(&self, device: DeviceKind) -> CatalogSource {
        let path = match device {
            DeviceKind::Desktop => &self.desktop_file,
            DeviceKind::Mobile => &self.mobile_file,
        };
        match path {
            Some(path) => CatalogSource::from_path(path),
            None => CatalogSource::embedded(device),
        }
    }

    /// Load the configured catalogs.
    pub fn load_manager(&self) -> Result<CatalogManager, ConstructionError> {
        CatalogManager::load(
            self.source(DeviceKind::Desktop),
            self.source(DeviceKind::Mobile),
        )
    }
}

#[derive(Debug, Clone, Args)]
pub struct LimitArgs {
    #[arg(long, env = "UAPICK_MAX_REQUESTS", default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    /// maximum number of selections per client and window
    pub max_requests: u32,

    #[arg(long, env = "UAPICK_WINDOW_SECS", default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    /// length of the rate limit window in seconds
    pub window_secs: u64,
}

impl LimitArgs {
    pub fn max_requests(&self) -> usize {
        self.max_requests as usize
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}
