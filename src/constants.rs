/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Qualifier string used for application identification
///
/// This is used as part of the application's unique identifier.
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
///
/// This is used as part of the application's unique identifier.
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// This is the name of the application used in various contexts like
/// configuration file paths and application identification.
pub const APPLICATION: &str = "submission_sort";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read from a specific config file";

/// Help text for the root command-line option
pub const ROOT_HELP: &str = "Directory containing the downloaded submission archive";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the quiet command-line option
pub const QUIET_HELP: &str = "Only print warnings and errors";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Write the log to this file";

/// Help text for the local logging command-line option
pub const LOCAL_LOGGING_HELP: &str =
    "Keep the log file in the current directory instead of the configuration directory";

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "ssort.yaml";

/// Default working root
pub const DEFAULT_ROOT: &str = ".";

/// Default log file name
pub const LOG_FILE_DEFAULT: &str = "ssort.log";

/// Output folder that receives the gradable files
pub const READY_TO_GRADE_DIR: &str = "ReadyToGrade";
/// Output folder for everything that is not gradable
pub const LEFTOVER_DIR: &str = "Leftover";
/// Extracted contents of the individual submissions, under [`LEFTOVER_DIR`]
pub const STUDENT_FILES_DIR: &str = "StudentFiles";
/// Contents of the outer archive, under [`LEFTOVER_DIR`]
pub const STUDENT_ZIPS_DIR: &str = "StudentZips";

/// Suffix identifying an archive
pub const ARCHIVE_SUFFIX: &str = ".zip";
/// Suffix of the plain-text receipts the grading platform ships alongside submissions
pub const TEXT_SUFFIX: &str = ".txt";

/// Separates the segments of a submission archive name
pub const USERNAME_SEPARATOR: char = '_';
/// Every accepted extension starts with this
pub const EXTENSION_SEPARATOR: char = '.';
/// Names starting with this are hidden
pub const HIDDEN_MARKER: char = '.';

/// Prefix of the run report file name
pub const REPORT_PREFIX: &str = "logfile_";
/// Timestamp format used in the report file name
pub const REPORT_FILE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
/// Timestamp format used inside the report
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Deliverable type used when no configuration file is present
pub const DEFAULT_DELIVERABLE_TYPE: &str = "A";
/// Extensions moved to the grading area when no configuration file is present
pub const DEFAULT_ACCEPTED_FORMATS: &[&str] = &[".py", ".txt", ".csv", ".dat"];
/// Folders skipped during the search when no configuration file is present
pub const DEFAULT_IGNORE_FOLDERS: &[&str] = &["venv", "bin", ".idea", "lib", "include"];
