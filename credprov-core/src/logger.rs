//! Bridge from the `log` facade to a host-provided logger.
//!
//! Everything in this crate logs through the `log` macros. The host installs
//! a [`Logger`] once with [`set_logger`] and receives every record emitted by
//! the provider, plus warnings and errors from dependencies.

use std::sync::{Arc, OnceLock};

/// Sink for provider log messages, implemented by the host.
///
/// # Examples
///
/// ```rust
/// use credprov_core::logger::{LogLevel, Logger};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         eprintln!("[{level:?}] {message}");
///     }
/// }
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Records `message` at `level`.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a forwarded log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed tracing output.
    Trace,
    /// Lifecycle steps useful while debugging tile enumeration.
    Debug,
    /// Summaries such as completed rebuilds.
    Info,
    /// Absorbed failures, e.g. a candidate whose credential failed to build.
    Warn,
    /// Failures the host should look at.
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

/// `log::Log` implementation forwarding to [`LOGGER_INSTANCE`].
struct ForeignLogger;

impl ForeignLogger {
    /// Debug and trace records are only forwarded when they come from this crate.
    fn forwards(metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info || metadata.target().starts_with("credprov")
    }
}

impl log::Log for ForeignLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Self::forwards(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !Self::forwards(record.metadata()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), record.args().to_string());
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Installs the host logger and routes the `log` facade to it.
///
/// Only the first call has an effect; later calls are reported on stdout
/// and otherwise ignored.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        println!("Logger already set");
        return;
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
