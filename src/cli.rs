use std::path::PathBuf;

use atty::Stream;
use clap::{Arg, ArgMatches, command, crate_authors, crate_description, crate_name, crate_version};

use crate::constants::{
    CONFIG_HELP, DEFAULT_CONFIG_PATH, DEFAULT_ROOT, LOCAL_LOGGING_HELP, LOG_FILE_DEFAULT,
    LOG_FILE_HELP, QUIET_HELP, ROOT_HELP, VERBOSE_HELP,
};
use crate::errors::{Result, generic_error};
use crate::logging::LogLevel;
use crate::utils::{expand_path, find_project_folder};

/// Checks if stdout is a terminal and waits for user input if it is
///
/// This function is used to prevent the console window from closing
/// immediately after the program finishes when run from a GUI.
pub fn check_for_stdout_stream() {
    if atty::is(Stream::Stdout) {
        dont_disappear::enter_to_continue::default();
    }
}

/// Builds the command-line interface
///
/// Defines the following arguments:
/// - `config`: Path to the configuration file
/// - `root`: Directory holding the downloaded archive
/// - `verbose`: Increase verbosity level
/// - `quiet`: Only warnings and errors on the console
/// - `log_file`: Where the log is written
/// - `log_locally`: Keep the log file next to the invocation
pub fn build_command() -> clap::Command {
    // define arg for reading from a specific config file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .default_value(DEFAULT_CONFIG_PATH);

    // define arg for the working root
    let arg_root = Arg::new("root")
        .short('r')
        .long("root")
        .help(ROOT_HELP)
        .default_value(DEFAULT_ROOT);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(clap::ArgAction::Count);

    // define arg for a quiet console
    let arg_quiet = Arg::new("quiet")
        .short('q')
        .long("quiet")
        .help(QUIET_HELP)
        .conflicts_with("verbose")
        .action(clap::ArgAction::SetTrue);

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .default_value(LOG_FILE_DEFAULT);

    // define arg for local logging
    let log_locally = Arg::new("log_locally")
        .short('L')
        .long("log-locally")
        .help(LOCAL_LOGGING_HELP)
        .action(clap::ArgAction::SetTrue);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_config)
        .arg(arg_root)
        .arg(log_file)
        .arg(log_locally)
        .arg(arg_verbose)
        .arg(arg_quiet)
}

/// Parses the process arguments
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the console level from the `-v` count and `-q`
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_flags(verbose_count, matches.get_flag("quiet"))
}

/// Resolves where the log file goes
///
/// Unless `--log-locally` is given, the file lands in the platform
/// configuration directory.
///
/// # Errors
/// Returns an error if the configuration directory cannot be determined
pub fn get_log_file(matches: &ArgMatches) -> Result<String> {
    let filename = matches
        .get_one::<String>("log_file")
        .cloned()
        .unwrap_or_else(|| LOG_FILE_DEFAULT.to_string());
    if matches.get_flag("log_locally") {
        Ok(filename)
    } else {
        let folder = find_project_folder()?;
        let path = folder.config_dir().join(filename);
        let path_str = path.as_path().to_str().ok_or_else(|| {
            generic_error(&format!("Failed to convert path to string: {path:?}"))
        })?;
        Ok(path_str.to_string())
    }
}

pub fn get_config_path(matches: &ArgMatches) -> PathBuf {
    let path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(expand_path(path))
}

/// Gets the working root with `~` expanded
pub fn get_root(matches: &ArgMatches) -> PathBuf {
    let root = matches
        .get_one::<String>("root")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ROOT);
    PathBuf::from(expand_path(root))
}
