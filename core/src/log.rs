//! Logger and logging macros
//!
//! The macros forward to the `log` facade. Binaries install a `log4rs` backend
//! with [`init_logger`], tests with [`try_init_logger`].

use log::LevelFilter;
use log4rs::{Config, config::Root};
use thiserror::Error;

mod appender;
mod consts;
mod logger;

pub use consts::DEFAULT_LOGGER_ENV;

use appender::AppenderSpec;
use consts::{CONSOLE_APPENDER, ERR_LOG_FILE_APPENDER, ERR_LOG_FILE_NAME, LOG_FILE_APPENDER, LOG_FILE_NAME};
use logger::Builder;

#[doc(hidden)]
pub use log as __log;

#[derive(Clone, Debug, Error)]
pub enum LogError {
    #[error("logger spec parsing error: {0}")]
    ParseLoggerSpecError(String),

    #[error("log directory {0} is not a valid path")]
    InvalidLogDir(String),

    #[error("cannot build appender {0}: {1}")]
    Appender(&'static str, String),

    #[error("invalid logger configuration: {0}")]
    Config(String),

    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

pub type LogResult<T> = std::result::Result<T, LogError>;

/// Installs the global logger.
///
/// Always logs to stderr. With a `log_dir`, also logs to a rolling file and
/// writes warnings and errors to a dedicated error file. `filters` follows the
/// `level,module=level` syntax and is applied after `RUST_LOG`.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> LogResult<()> {
    let mut appenders = vec![AppenderSpec::console(CONSOLE_APPENDER, None)];
    if let Some(log_dir) = log_dir {
        appenders.push(AppenderSpec::roller(LOG_FILE_APPENDER, None, log_dir, LOG_FILE_NAME)?);
        appenders.push(AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), log_dir, ERR_LOG_FILE_NAME)?);
    }
    let config = build_config(appenders, filters)?;
    log4rs::init_config(config).map_err(|_| LogError::AlreadyInitialized)?;
    Ok(())
}

/// Tries to init the global logger, but does not panic if it was already setup.
/// Should be used for tests.
pub fn try_init_logger(filters: &str) {
    if let Ok(config) = build_config(vec![AppenderSpec::console(CONSOLE_APPENDER, None)], filters) {
        let _ = log4rs::init_config(config);
    }
}

fn build_config(appenders: Vec<AppenderSpec>, filters: &str) -> LogResult<Config> {
    let names = appenders.iter().map(|x| x.name).collect::<Vec<_>>();
    let loggers = Builder::new()
        .root_level(LevelFilter::Info)
        .appenders(names.iter().copied())
        .parse_env(DEFAULT_LOGGER_ENV)
        .parse_expression(filters)
        .build();
    Config::builder()
        .appenders(appenders.into_iter().map(|x| x.appender()))
        .loggers(loggers.items())
        .build(Root::builder().appenders(names).build(loggers.root_level()))
        .map_err(|err| LogError::Config(err.to_string()))
}

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (
        $crate::log::__log::trace!($($t)*)
    )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (
        $crate::log::__log::debug!($($t)*)
    )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => (
        $crate::log::__log::info!($($t)*)
    )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (
        $crate::log::__log::warn!($($t)*)
    )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (
        $crate::log::__log::error!($($t)*)
    )
}
