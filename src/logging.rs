//! Console and file logging
//!
//! Progress messages go to stdout. Warnings and errors go to stderr with a
//! level prefix, so a piped run still shows what went wrong. The optional
//! log file keeps debug detail whatever the console level is.

use std::cmp::max;
use std::io::{stderr, stdout};

use anyhow::Result;
use atty::Stream;
use chrono::SecondsFormat;
use colored::Colorize;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};

/// How much a run prints to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Warnings and errors only (`-q`)
    Quiet,
    /// Progress messages (default)
    Info,
    /// Per-submission and per-file detail (`-v`)
    Debug,
    /// Also every skipped walk entry (`-vv` or more)
    Trace,
}

impl LogLevel {
    /// Combines the `-v` count with the `-q` flag
    ///
    /// `-q` wins; clap already refuses both together on the command line.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return LogLevel::Quiet;
        }
        match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Quiet => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Level for the log file, never below debug
    pub fn file_level_filter(self) -> LevelFilter {
        max(self.to_level_filter(), LevelFilter::Debug)
    }
}

fn is_problem(level: Level) -> bool {
    level <= Level::Warn
}

fn progress_dispatch() -> Dispatch {
    let tint = ColoredLevelConfig::new()
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);
    let tinted = atty::is(Stream::Stdout);

    Dispatch::new()
        .filter(|metadata| !is_problem(metadata.level()))
        .format(move |out, message, record| {
            if tinted {
                out.finish(format_args!(
                    "\x1B[{}m{}\x1B[0m",
                    tint.get_color(&record.level()).to_fg_str(),
                    message
                ))
            } else {
                out.finish(format_args!("{message}"))
            }
        })
        .chain(stdout())
}

fn problem_dispatch() -> Dispatch {
    let tinted = atty::is(Stream::Stderr);

    Dispatch::new()
        .filter(|metadata| is_problem(metadata.level()))
        .format(move |out, message, record| {
            let line = format!("{}: {message}", record.level());
            match (tinted, record.level()) {
                (true, Level::Error) => out.finish(format_args!("{}", line.red().bold())),
                (true, _) => out.finish(format_args!("{}", line.yellow())),
                (false, _) => out.finish(format_args!("{line}")),
            }
        })
        .chain(stderr())
}

/// Installs the global logger
///
/// When `log_file` is not empty, records are also appended to that file with
/// an RFC 3339 timestamp, the level and the target.
pub fn init_logger(verbosity: LogLevel, log_file: &str) -> Result<()> {
    let console = Dispatch::new()
        .level(verbosity.to_level_filter())
        .chain(progress_dispatch())
        .chain(problem_dispatch());

    if log_file.is_empty() {
        Dispatch::new()
            .level(verbosity.to_level_filter())
            .chain(console)
            .apply()?;
    } else {
        let file = Dispatch::new()
            .level(verbosity.file_level_filter())
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .chain(fern::log_file(log_file)?);
        Dispatch::new()
            .level(verbosity.file_level_filter())
            .chain(console)
            .chain(file)
            .apply()?;
    }

    log::debug!("Logger ready, console level {verbosity:?}");
    Ok(())
}

/// Picks the coloured variant of a message when stdout is a terminal
pub fn format_message(message: &str, colored_message: &str) -> String {
    if atty::is(Stream::Stdout) {
        colored_message.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(LogLevel::from_flags(0, false), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(1, false), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(2, false), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(200, false), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(0, true), LogLevel::Quiet);
        assert_eq!(LogLevel::from_flags(3, true), LogLevel::Quiet);
    }

    #[test]
    fn test_quiet_console_still_shows_warnings() {
        assert_eq!(LogLevel::Quiet.to_level_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_file_level_keeps_debug_detail() {
        assert_eq!(LogLevel::Quiet.file_level_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Info.file_level_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Debug.file_level_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.file_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_problems_are_errors_and_warnings() {
        assert!(is_problem(Level::Error));
        assert!(is_problem(Level::Warn));
        assert!(!is_problem(Level::Info));
        assert!(!is_problem(Level::Trace));
    }

    #[test]
    fn test_format_message() {
        let plain = "Done";
        let colored = "\x1B[32mDone\x1B[0m";

        let result = format_message(plain, colored);
        assert!(result == plain || result == colored);
    }
}
