//! Debug logging for Qelly.
//!
//! Two entry points share one log file:
//!
//! - The `log` facade (`log::info!` etc.), routed here by [`init_log_bridge`].
//!   `--log-level` wins over `RUST_LOG`, which wins over the config file.
//!   When `RUST_LOG` is set, records are mirrored to stderr as well.
//! - Category macros (`debug_info!("TAB", ...)`), controlled by the
//!   `DEBUG_LEVEL` environment variable:
//!   - 0 or unset: No debugging
//!   - 1: Errors only
//!   - 2: Info level
//!   - 3: Debug level
//!   - 4: Trace level
//!
//! Output goes to /tmp/qelly_debug.log on Unix/macOS, or
//! %TEMP%\qelly_debug.log on Windows, so it never mixes with terminal output.

use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::parse(&val),
            Err(_) => DebugLevel::Off,
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/qelly_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("qelly_debug.log")
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<File>,
    open_failed: bool,
}

impl DebugLogger {
    fn new() -> Self {
        DebugLogger {
            level: DebugLevel::from_env(),
            file: None,
            open_failed: false,
        }
    }

    /// Open (truncating) the log file on first use
    fn ensure_file(&mut self) -> Option<&mut File> {
        if self.file.is_none() && !self.open_failed {
            match OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
            {
                Ok(f) => {
                    self.file = Some(f);
                    let header = format!(
                        "\n{}\nqelly debug session started at {} (level={:?})\n{}\n",
                        "=".repeat(80),
                        get_timestamp(),
                        self.level,
                        "=".repeat(80)
                    );
                    self.write_raw(&header);
                }
                // A missing log file must never break the UI
                Err(_) => self.open_failed = true,
            }
        }
        self.file.as_mut()
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(file) = self.ensure_file() {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_line(&mut self, level: &str, category: &str, msg: &str) {
        let line = format!("[{}] [{}] [{}] {}\n", get_timestamp(), level, category, msg);
        self.write_raw(&line);
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level > self.level {
            return;
        }
        let level_str = match level {
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
            DebugLevel::Off => return,
        };
        self.write_line(level_str, category, msg);
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// Set once the CLI or `RUST_LOG` fixed the level; config no longer applies
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    level != DebugLevel::Off && level <= get_logger().lock().level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    get_logger().lock().log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// `log` facade backend writing into the debug log file
struct LogBridge {
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        get_logger()
            .lock()
            .write_line(&format!("{:<5}", record.level()), record.target(), &msg);
        if self.mirror_stderr {
            eprintln!("[{}] [{}] {}", record.level(), record.target(), msg);
        }
    }

    fn flush(&self) {
        if let Some(file) = get_logger().lock().file.as_mut() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Route the `log` facade into the debug log file.
///
/// `cli_level` (from `--log-level`) takes precedence over `RUST_LOG`. When
/// neither is given logging stays off until [`apply_config_log_level`].
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let env_level = std::env::var("RUST_LOG")
        .ok()
        .map(|value| value.parse().unwrap_or(log::LevelFilter::Info));

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: env_level.is_some(),
    });
    if log::set_logger(bridge).is_err() {
        // Already installed (tests, or a second call)
        return;
    }

    match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            log::set_max_level(level);
        }
        None => log::set_max_level(log::LevelFilter::Off),
    }
}

/// Apply the log level from the config file unless the CLI or `RUST_LOG`
/// already chose one
pub fn apply_config_log_level(level: log::LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level);
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
