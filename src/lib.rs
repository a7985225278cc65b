//! Ymir is a scaffolding tool for C++ projects.
//! It turns a handful of options into a ready-to-build CMake project:
//! a directory layout, a `CMakeLists.txt`, an entry point and optionally
//! version-control files.

/// Command-line interface module for the Ymir application
pub mod cli;

/// Project configuration model and its validation
pub mod config;

/// Common constants used throughout the Ymir application
pub mod constants;

/// Pure generators for the content of every generated file
pub mod content;

/// Error types and handling for the Ymir application
pub mod error;

/// Logging setup
pub mod logger;

/// Ordered creation of the project directories and files
pub mod materializer;

/// Interactive completion of missing options
pub mod prompt;

/// Template rendering backed by MiniJinja
pub mod renderer;

/// Git repository initialisation
pub mod vcs;

use std::path::Path;

use log::info;

use crate::cli::Args;
use crate::error::Result;
use crate::materializer::{Materializer, Report};
use crate::prompt::{complete_config, Prompter};
use crate::renderer::MiniJinjaRenderer;

/// Runs one scaffolding request relative to `cwd`.
///
/// # Flow
/// 1. Builds the configuration from the arguments
/// 2. Asks `prompter` for missing values in interactive mode
/// 3. Validates it, before anything is written
/// 4. Materializes the project under `cwd`, or under `--output-dir` joined onto it
///
/// # Errors
/// * `Error::ValidationError` if the configuration is unusable; nothing is created
/// * `Error::PromptError` if interactive input fails
/// * any materialization error, see `Materializer::materialize_in`
pub fn run(args: &Args, cwd: &Path, prompter: &dyn Prompter) -> Result<Report> {
    let mut config = args.to_config();
    if args.interactive {
        config = complete_config(prompter, config)?;
    }
    config.validate()?;

    let base = match &args.output_dir {
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    };
    let engine = MiniJinjaRenderer::new();
    let report = Materializer::new(&engine, config).materialize_in(base)?;

    info!("Configure it with: cmake -S {0} -B {0}/build", report.root.display());
    Ok(report)
}
