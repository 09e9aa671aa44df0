//! Focused unit tests covering optimize CLI configuration and request parsing.

use super::helpers::{square_request, workspace, write_request, write_utf8};
use super::*;
use log::LevelFilter;
use routewise_core::{OptimizationError, OptimizerConfig, Priority, Stop};
use rstest::rstest;

#[rstest]
fn converting_optimize_without_request_errors() {
    let args = OptimizeArgs {
        request_path: None,
        ..OptimizeArgs::default()
    };

    let err = OptimizeConfig::try_from(args).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_OPTIMIZE_REQUEST);
            assert_eq!(env, ENV_OPTIMIZE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn optimize_config_applies_defaults() {
    let (_tmp, request_path) = workspace();
    let args = OptimizeArgs {
        request_path: Some(request_path.clone()),
        ..OptimizeArgs::default()
    };

    let config = OptimizeConfig::try_from(args).expect("config should build");
    assert_eq!(config.request_path, request_path);
    assert_eq!(config.optimizer, OptimizerConfig::default());
    assert_eq!(config.log_level, LevelFilter::Warn);
    assert!(!config.pretty);
}

#[rstest]
fn optimize_config_rejects_unknown_log_level() {
    let (_tmp, request_path) = workspace();
    let args = OptimizeArgs {
        request_path: Some(request_path),
        log_level: Some("chatty".to_owned()),
        ..OptimizeArgs::default()
    };

    let err = OptimizeConfig::try_from(args).expect_err("unknown level should error");
    match err {
        CliError::InvalidLogLevel { value } => assert_eq!(value, "chatty"),
        other => panic!("expected InvalidLogLevel, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, request_path) = workspace();
    let config = OptimizeConfig::try_from(OptimizeArgs {
        request_path: Some(request_path.clone()),
        ..OptimizeArgs::default()
    })
    .expect("config should build");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_OPTIMIZE_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, request_path) = workspace();
    std::fs::create_dir(&request_path).expect("request directory");
    let config = OptimizeConfig::try_from(OptimizeArgs {
        request_path: Some(request_path.clone()),
        ..OptimizeArgs::default()
    })
    .expect("config should build");

    let err = config
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_OPTIMIZE_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_request_decodes_json() {
    let (_tmp, request_path) = workspace();
    let request = square_request();
    write_request(&request_path, &request);

    let decoded = load_request(&request_path).expect("request should decode");
    assert_eq!(decoded, request);
}

#[rstest]
fn load_request_reads_lowercase_priorities() {
    let (_tmp, request_path) = workspace();
    write_utf8(
        &request_path,
        br#"{
            "stops": [{"id": 1, "coordinate_id": 5, "priority": "start"}],
            "coordinates": [{"id": 5, "latitude": 51.5, "longitude": -0.12}]
        }"#,
    );

    let decoded = load_request(&request_path).expect("request should decode");
    assert_eq!(decoded.stops, vec![Stop::new(1, 5, Priority::Start)]);
}

#[rstest]
fn load_request_rejects_invalid_json() {
    let (_tmp, request_path) = workspace();
    write_utf8(&request_path, b"{ not valid json");

    let err = load_request(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_request_io_error_returns_open_error() {
    let (_tmp, request_path) = workspace();

    let err = load_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenRequest, found {other:?}"),
    }
}

#[rstest]
fn optimizer_errors_surface_as_cli_errors() {
    let (_tmp, request_path) = workspace();
    let mut request = square_request();
    request.stops.retain(|stop| !stop.is_start());
    write_request(&request_path, &request);

    let mut output = Vec::new();
    let err = run_optimize_with(
        OptimizeArgs {
            request_path: Some(request_path),
            ..OptimizeArgs::default()
        },
        &mut output,
    )
    .expect_err("missing start should fail");
    match err {
        CliError::Optimize(OptimizationError::MissingStartLocation) => {}
        other => panic!("expected Optimize, found {other:?}"),
    }
    assert!(output.is_empty());
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let (_tmp, request_path) = workspace();
    let env_request = request_path.with_file_name("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": request_path.as_str(),
            "allow_partial": false,
            "log_level": "info",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "log_level": "debug",
    }));
    composer.push_cli(json!({
        "pretty": true,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert!(!config.optimizer.allow_partial);
    assert_eq!(config.log_level, LevelFilter::Debug);
    assert!(config.pretty);
}
