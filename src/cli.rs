//! Command-line interface for Qelly.

use clap::Parser;
use std::path::PathBuf;

/// Qelly - a tabbed terminal client
#[derive(Parser, Debug)]
#[command(name = "qelly")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/qelly/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit after the specified number of seconds
    #[arg(long, value_name = "SECONDS")]
    pub exit_after: Option<f64>,

    /// Number of empty session tabs to open at startup
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    pub tabs: usize,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// Exit after this many seconds
    pub exit_after: Option<f64>,
    /// Session tabs opened at startup
    pub initial_tabs: usize,
    /// Log level override
    pub log_level: Option<log::LevelFilter>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            exit_after: None,
            initial_tabs: 1,
            log_level: None,
        }
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            exit_after: cli.exit_after,
            initial_tabs: cli.tabs,
            log_level: cli.log_level.map(LogLevelArg::to_level_filter),
        }
    }
}

/// Parse the process arguments
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options: RuntimeOptions = Cli::try_parse_from(["qelly"]).unwrap().into();
        assert_eq!(options.initial_tabs, 1);
        assert!(options.config_path.is_none());
        assert!(options.log_level.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "qelly",
            "--config",
            "/tmp/q.yaml",
            "--tabs",
            "3",
            "--log-level",
            "debug",
            "--exit-after",
            "1.5",
        ])
        .unwrap();
        let options = RuntimeOptions::from(cli);
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/q.yaml")));
        assert_eq!(options.initial_tabs, 3);
        assert_eq!(options.log_level, Some(log::LevelFilter::Debug));
        assert_eq!(options.exit_after, Some(1.5));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        assert!(Cli::try_parse_from(["qelly", "--log-level", "loud"]).is_err());
    }
}
