//! Logging utilities.
//!
//! Centralizes logger initialization on top of the `log` facade. Programs may
//! mirror records into a debug log file.

mod init;

pub use init::{init_logging, LoggingConfig, LOG_FILE_ENV};
