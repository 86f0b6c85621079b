// src/lib.rs - Library interface shared by the stage_merge and apex_fit binaries

pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod stage_inputs;

// Package version, overridden by VERGEN_GIT_SEMVER when the build environment sets it.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
