//! Logger installation for the CLI.

use std::io::{self, Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, LevelFilter};

use crate::CliError;

/// Parse a level name such as `warn` or `DEBUG`.
pub(crate) fn parse_level(value: &str) -> Result<LevelFilter, CliError> {
    value
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| CliError::InvalidLogLevel {
            value: value.to_owned(),
        })
}

/// Install a stderr logger at `level`.
///
/// Library diagnostics go to stderr so that stdout carries only the route.
pub(crate) fn init(level: LevelFilter) -> Result<(), CliError> {
    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|err| CliError::InitLogging(io::Error::other(err)))
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
