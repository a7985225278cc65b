//! Command-line interface implementation for Ymir.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::{ProjectConfig, ProjectType, TargetPlatform};
use crate::constants::{DEFAULT_DEPS_DIR, DEFAULT_INCLUDE_DIR, DEFAULT_SOURCE_DIR, DEFAULT_STANDARD};
use crate::error::{default_error_handler, Error, Result};

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Single-dash spellings longer than one letter, mapped to their long option.
const LEGACY_ALIASES: [(&str, &str); 5] = [
    ("-std", "--standard"),
    ("-sd", "--src-dir"),
    ("-id", "--include-dir"),
    ("-dd", "--deps-dir"),
    ("-ad", "--additional-dirs"),
];

/// Options whose next token is a value, in every spelling.
const VALUE_OPTIONS: [&str; 22] = [
    "--new", "-n", "--standard", "-std", "--type", "-t", "--definitions", "-d", "--flags",
    "-f", "--src-dir", "-sd", "--include-dir", "-id", "--deps-dir", "-dd",
    "--additional-dirs", "-ad", "--platform", "-p", "--output-dir", "-o",
];

/// Command-line arguments structure for Ymir.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ymir: a C++ project generator",
    long_about = None,
    help_template = HELP_TEMPLATE,
)]
pub struct Args {
    /// The name of the new project
    #[arg(short = 'n', long = "new", value_name = "PROJECT_NAME")]
    pub name: Option<String>,

    /// The standard of the language [-std]
    #[arg(long, value_name = "VERSION", default_value_t = DEFAULT_STANDARD,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub standard: u32,

    /// Can be either CONSOLE_APP, GUI_APP, or LIBRARY
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "INVALID",
          hide_default_value = true)]
    pub project_type: ProjectType,

    /// The project's preprocessor definitions, inside quotes
    #[arg(short, long, value_name = "DEFINITIONS", default_value = "", allow_hyphen_values = true)]
    pub definitions: String,

    /// The project's compiler flags, inside quotes
    #[arg(short = 'f', long = "flags", value_name = "FLAGS", default_value = "",
          allow_hyphen_values = true)]
    pub compiler_flags: String,

    /// The name of the source directory [-sd]
    #[arg(long, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub src_dir: String,

    /// The name of the include directory [-id]
    #[arg(long, value_name = "DIR", default_value = DEFAULT_INCLUDE_DIR)]
    pub include_dir: String,

    /// The name of the dependencies directory [-dd]
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DEPS_DIR)]
    pub deps_dir: String,

    /// Extra directories to create, separated by ';' or spaces [-ad]
    #[arg(long, value_name = "DIRS", default_value = "")]
    pub additional_dirs: String,

    /// Create both a .gitignore and a .gitattributes file
    #[arg(short = 'g', long = "has-git")]
    pub has_git: bool,

    /// Initialise a git repository in the new project
    #[arg(long)]
    pub init_repo: bool,

    /// Platform the generated project targets (defaults to this machine's)
    #[arg(short, long, value_enum)]
    pub platform: Option<TargetPlatform>,

    /// Directory in which the project directory is created (defaults to the current one)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Ask for the name and type when they are not given
    #[arg(short, long)]
    pub interactive: bool,

    /// Show every step while generating
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Builds the project configuration from the parsed arguments.
    pub fn to_config(&self) -> ProjectConfig {
        ProjectConfig {
            name: self.name.clone().unwrap_or_default(),
            root_path: None,
            project_type: self.project_type,
            target_platform: self.platform.unwrap_or_else(TargetPlatform::host),
            standard: self.standard,
            definitions: self.definitions.clone(),
            compiler_flags: self.compiler_flags.clone(),
            source_dir: self.src_dir.clone(),
            include_dir: self.include_dir.clone(),
            deps_dir: self.deps_dir.clone(),
            additional_dirs: self.additional_dirs.clone(),
            emit_vcs_files: self.has_git,
            init_repository: self.init_repo,
        }
    }
}

/// Rewrites multi-letter single-dash options to their long form so clap can
/// parse them. Tokens consumed as option values are passed through untouched.
pub fn normalize_args<I, T>(tokens: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;

    for token in tokens.into_iter().map(Into::into) {
        if expects_value {
            expects_value = false;
            normalized.push(token);
            continue;
        }

        let rewritten = token.to_str().and_then(|s| {
            expects_value = VALUE_OPTIONS.contains(&s);
            LEGACY_ALIASES.iter().find(|(alias, _)| *alias == s).map(|(_, long)| OsString::from(*long))
        });
        normalized.push(rewritten.unwrap_or(token));
    }

    normalized
}

fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Parses a full argument list, program name included.
///
/// # Errors
/// * `Error::ArgumentError` when no option is given or clap rejects the input
/// * `Error::HelpRequested` for `--help`, carrying the usage text
///
/// # Exits
/// * With status code 0 after printing the version for `--version`
pub fn parse_args_from<I, T>(tokens: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let tokens = normalize_args(tokens);
    if tokens.len() < 2 {
        return Err(Error::ArgumentError(format!(
            "Insufficient amount of arguments given\n\n{}",
            usage()
        )));
    }

    Args::try_parse_from(tokens).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp => Error::HelpRequested(usage()),
        ErrorKind::DisplayVersion => e.exit(),
        _ => Error::ArgumentError(e.to_string()),
    })
}

/// Parses the process arguments.
///
/// # Exits
/// * With status code 1 after printing the usage for `--help`
/// * With status code 1 after printing the diagnostic for any argument error
pub fn get_args() -> Args {
    match parse_args_from(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => default_error_handler(e),
    }
}
