#![deny(missing_docs)]
//! Shared logging utilities for the toolbar progress workspace.
//!
//! This crate provides the `progress_*` logging macros used across the
//! codebase, a per-thread dispatch sequence number that the macros stamp
//! into every line, and initializers for the global logger.

use std::cell::Cell;
use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log target shared by every crate in the workspace.
pub const TARGET: &str = "toolbar_progress";

thread_local! {
    /// Sequence number of the message currently being dispatched on this thread.
    static DISPATCH_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the dispatch sequence number for the current thread.
/// The UI loop calls this once per processed message.
pub fn set_dispatch_seq(seq: u64) {
    DISPATCH_SEQ.with(|v| v.set(seq));
}

/// Advances the dispatch sequence number and returns the new value.
pub fn next_dispatch_seq() -> u64 {
    DISPATCH_SEQ.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Retrieves the dispatch sequence number for the current thread.
/// Returns 0 if nothing has been dispatched yet.
pub fn dispatch_seq() -> u64 {
    DISPATCH_SEQ.with(|v| v.get())
}

/// Logs a trace-level message stamped with the dispatch sequence.
#[macro_export]
macro_rules! progress_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, "[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message stamped with the dispatch sequence.
#[macro_export]
macro_rules! progress_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, "[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message stamped with the dispatch sequence.
#[macro_export]
macro_rules! progress_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, "[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message stamped with the dispatch sequence.
#[macro_export]
macro_rules! progress_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, "[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message stamped with the dispatch sequence.
#[macro_export]
macro_rules! progress_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, "[#{}] {}", $crate::dispatch_seq(), format_args!($($arg)*));
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to the terminal.
    Terminal,
    /// Write to both the terminal and the given file.
    Both(PathBuf),
}

/// Initializes the global logger.
///
/// If the log file cannot be created the file sink is skipped with a warning
/// on stderr; a terminal sink, if requested, is still installed. Calling this
/// after a logger is already installed is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(&path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )]
        }
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use trace level in debug builds so ignored events show up, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
