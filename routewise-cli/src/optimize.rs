//! Optimize command implementation for the RouteWise CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::LevelFilter;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routewise_core::{Coordinate, OptimizedRoute, OptimizerConfig, RouteOptimizer, Stop};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_OPTIMIZE_ALLOW_PARTIAL, ARG_OPTIMIZE_LOG_LEVEL, ARG_OPTIMIZE_PRETTY, ARG_OPTIMIZE_REQUEST,
    CliError, ENV_OPTIMIZE_REQUEST, logging,
};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops of a request into a closed route. The \
                 request is a JSON object with `stops` and `coordinates` \
                 arrays; exactly one stop should carry the `start` \
                 priority. The route is printed to stdout as JSON.",
    about = "Optimize the stop order of a JSON request"
)]
#[ortho_config(prefix = "ROUTEWISE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing the stops and coordinates.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Return partial routes when some locations are unreachable.
    #[arg(long = ARG_OPTIMIZE_ALLOW_PARTIAL, value_name = "bool")]
    #[serde(default)]
    pub(crate) allow_partial: Option<bool>,
    /// Minimum level of diagnostics written to stderr.
    #[arg(long = ARG_OPTIMIZE_LOG_LEVEL, value_name = "level")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(
        long = ARG_OPTIMIZE_PRETTY,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) pretty: Option<bool>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Settings handed to the optimizer.
    pub(crate) optimizer: OptimizerConfig,
    /// Logger threshold.
    pub(crate) log_level: LevelFilter,
    /// Whether output JSON is indented.
    pub(crate) pretty: bool,
}

impl OptimizeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_OPTIMIZE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMIZE_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        let log_level = args
            .log_level
            .as_deref()
            .map_or(Ok(DEFAULT_LOG_LEVEL), logging::parse_level)?;
        let optimizer = OptimizerConfig {
            allow_partial: args
                .allow_partial
                .unwrap_or(OptimizerConfig::default().allow_partial),
        };
        Ok(Self {
            request_path,
            optimizer,
            log_level,
            pretty: args.pretty.unwrap_or(false),
        })
    }
}

/// JSON payload read by the `optimize` command.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct OptimizeRequest {
    /// Stops to order; one should have the `start` priority.
    pub(crate) stops: Vec<Stop>,
    /// Locations referenced by the stops.
    pub(crate) coordinates: Vec<Coordinate>,
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let config = resolve_optimize_config(args)?;
    logging::init(config.log_level)?;
    let mut stdout = std::io::stdout().lock();
    optimize_and_write(&config, &mut stdout)
}

/// Resolve `args` and write the optimized route to `writer`.
///
/// Logging is left untouched so callers may install their own logger.
pub(crate) fn run_optimize_with(args: OptimizeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_optimize_config(args)?;
    optimize_and_write(&config, writer)
}

fn resolve_optimize_config(args: OptimizeArgs) -> Result<OptimizeConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn optimize_and_write(config: &OptimizeConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let request = load_request(&config.request_path)?;
    log::debug!(
        "loaded {} stop(s) and {} coordinate(s) from {}",
        request.stops.len(),
        request.coordinates.len(),
        config.request_path
    );
    let route = RouteOptimizer::new(config.optimizer).optimize(&request.stops, &request.coordinates)?;
    write_route(writer, &route, config.pretty)
}

/// Loads a JSON-encoded [`OptimizeRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<OptimizeRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route(
    writer: &mut dyn Write,
    route: &OptimizedRoute,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(route)
    } else {
        serde_json::to_string(route)
    }
    .map_err(CliError::SerializeRoute)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
