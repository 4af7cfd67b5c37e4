//! Log-related CLI arguments.

use clap::{ArgAction, Parser};

use crate::{LogConfig, LogFormat, verbosity_to_level_filter};

/// Log-related CLI arguments.
///
/// Verbosity levels: 1=ERROR, 2=WARN, 3=INFO (default), 4=DEBUG, 5=TRACE.
/// The number of `-v` flags sets the level, so `-v` alone means ERROR and `-vvvv` means DEBUG.
/// Use `-q` to silence logging entirely.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct LogArgs {
    /// Log level set by the number of -v flags: -v=ERROR, -vv=WARN, -vvv=INFO (default),
    /// -vvvv=DEBUG, -vvvvv=TRACE.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        default_value = "3",
        env = "BATCH_SEARCH_LOG_LEVEL",
        global = true
    )]
    pub level: u8,

    /// Disable logging output.
    #[arg(long = "quiet", short = 'q', global = true)]
    pub quiet: bool,

    /// Log format.
    #[arg(
        long = "log-format",
        default_value = "full",
        env = "BATCH_SEARCH_LOG_FORMAT",
        global = true
    )]
    pub format: LogFormat,
}

impl Default for LogArgs {
    fn default() -> Self {
        Self { level: 3, quiet: false, format: LogFormat::Full }
    }
}

impl From<LogArgs> for LogConfig {
    fn from(args: LogArgs) -> Self {
        Self {
            global_level: verbosity_to_level_filter(args.level),
            format: (!args.quiet).then_some(args.format),
        }
    }
}
