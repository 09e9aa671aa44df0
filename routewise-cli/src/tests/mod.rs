//! Shared test harness modules for the RouteWise CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::optimize::{
    OptimizeConfig, OptimizeRequest, config_from_layers_for_test, load_request, run_optimize_with,
};

mod helpers;
mod optimize_unit;
