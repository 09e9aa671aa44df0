//! Error types emitted by the RouteWise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use routewise_core::OptimizationError;
use thiserror::Error;

/// Errors emitted by the RouteWise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The configured log level is not one of `off`, `error` to `trace`.
    #[error("unknown log level {value:?}")]
    InvalidLogLevel {
        /// Rejected value.
        value: String,
    },
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[source] std::io::Error),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The optimizer rejected the request.
    #[error("optimization failed: {0}")]
    Optimize(#[from] OptimizationError),
    /// Serializing the optimized route failed.
    #[error("failed to serialize route: {0}")]
    SerializeRoute(#[source] serde_json::Error),
    /// Writing the route output failed.
    #[error("failed to write route output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
