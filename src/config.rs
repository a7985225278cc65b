//! Project configuration model.
//! Describes the project to generate: its name, kind, directory layout and
//! the build flags written into the manifest.

use std::convert::Infallible;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::constants::{
    DEFAULT_DEPS_DIR, DEFAULT_INCLUDE_DIR, DEFAULT_SOURCE_DIR, DEFAULT_STANDARD, DIR_DELIMITERS,
};
use crate::error::{Error, Result};

/// Kind of build target being scaffolded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ProjectType {
    #[serde(rename = "CONSOLE_APP")]
    ConsoleApp,
    #[serde(rename = "GUI_APP")]
    GuiApp,
    #[serde(rename = "LIBRARY")]
    Library,
    /// Not recognised, or never set
    #[default]
    #[serde(rename = "INVALID")]
    Invalid,
}

impl ProjectType {
    /// Types a user can pick, in the order they are offered.
    pub const CHOICES: [ProjectType; 3] =
        [ProjectType::ConsoleApp, ProjectType::GuiApp, ProjectType::Library];

    pub fn as_token(&self) -> &'static str {
        match self {
            ProjectType::ConsoleApp => "CONSOLE_APP",
            ProjectType::GuiApp => "GUI_APP",
            ProjectType::Library => "LIBRARY",
            ProjectType::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for ProjectType {
    type Err = Infallible;

    /// Unknown tokens map to `Invalid` instead of failing, so the run can
    /// abort with a validation error after parsing.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "CONSOLE_APP" => ProjectType::ConsoleApp,
            "GUI_APP" => ProjectType::GuiApp,
            "LIBRARY" => ProjectType::Library,
            _ => ProjectType::Invalid,
        })
    }
}

/// Platform the generated project is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Windows,
    Linux,
    #[value(name = "macos")]
    MacOs,
}

impl TargetPlatform {
    /// The platform this binary runs on. Anything that is neither Windows nor
    /// Apple is treated like Linux.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            TargetPlatform::Windows
        } else if cfg!(target_vendor = "apple") {
            TargetPlatform::MacOs
        } else {
            TargetPlatform::Linux
        }
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        TargetPlatform::host()
    }
}

/// Validated description of the project to generate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Set by `resolve_root_path` right before materialization
    pub root_path: Option<PathBuf>,
    pub project_type: ProjectType,
    pub target_platform: TargetPlatform,
    /// Language standard level requested in the manifest
    pub standard: u32,
    /// Preprocessor definitions, copied verbatim into the manifest
    pub definitions: String,
    /// Compiler flags, copied verbatim into the manifest
    pub compiler_flags: String,
    pub source_dir: String,
    pub include_dir: String,
    pub deps_dir: String,
    /// Extra directories separated by `;` or spaces
    pub additional_dirs: String,
    pub emit_vcs_files: bool,
    pub init_repository: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            root_path: None,
            project_type: ProjectType::Invalid,
            target_platform: TargetPlatform::host(),
            standard: DEFAULT_STANDARD,
            definitions: String::new(),
            compiler_flags: String::new(),
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            include_dir: DEFAULT_INCLUDE_DIR.to_string(),
            deps_dir: DEFAULT_DEPS_DIR.to_string(),
            additional_dirs: String::new(),
            emit_vcs_files: false,
            init_repository: false,
        }
    }
}

impl ProjectConfig {
    /// Creates a configuration with defaults for everything but the name and type.
    pub fn new<S: Into<String>>(name: S, project_type: ProjectType) -> Self {
        Self { name: name.into(), project_type, ..Self::default() }
    }

    /// False exactly when the project type was never set or not recognised.
    pub fn is_valid(&self) -> bool {
        self.project_type != ProjectType::Invalid
    }

    /// Sets `root_path` to `cwd/name` and returns it.
    pub fn resolve_root_path<P: AsRef<Path>>(&mut self, cwd: P) -> &Path {
        self.root_path.insert(cwd.as_ref().join(&self.name))
    }

    /// Whether a separate include directory is created. Fragments naming the
    /// same directory (`src`, `src/`, `./src`) count as equal.
    pub fn creates_include_dir(&self) -> bool {
        !same_directory(&self.include_dir, &self.source_dir)
    }

    /// Entries of `additional_dirs`, split on any delimiter with empty fragments dropped.
    pub fn additional_dirs(&self) -> Vec<&str> {
        self.additional_dirs
            .split(&DIR_DELIMITERS[..])
            .filter(|dir| !dir.is_empty())
            .collect()
    }

    /// Full check run before anything is created on disk.
    ///
    /// # Errors
    /// * `Error::ValidationError` if the type is `Invalid`, the name is not a
    ///   single plain path component, the standard is zero, or a directory
    ///   fragment is absolute or escapes the project root.
    pub fn validate(&self) -> Result<()> {
        if !self.is_valid() {
            return Err(Error::ValidationError(
                "project type must be one of CONSOLE_APP, GUI_APP or LIBRARY".to_string(),
            ));
        }

        let mut components = Path::new(&self.name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(Error::ValidationError(format!(
                    "invalid project name '{}'",
                    self.name
                )))
            }
        }

        if self.standard == 0 {
            return Err(Error::ValidationError(
                "language standard must be a positive integer".to_string(),
            ));
        }

        let fragments = [
            ("source directory", self.source_dir.as_str()),
            ("include directory", self.include_dir.as_str()),
            ("dependencies directory", self.deps_dir.as_str()),
        ];
        for (what, fragment) in fragments {
            validate_fragment(what, fragment)?;
        }
        for dir in self.additional_dirs() {
            validate_fragment("additional directory", dir)?;
        }

        Ok(())
    }
}

fn same_directory(a: &str, b: &str) -> bool {
    let normal = |fragment: &str| {
        Path::new(fragment)
            .components()
            .filter(|c| *c != Component::CurDir)
            .map(|c| c.as_os_str().to_owned())
            .collect::<Vec<_>>()
    };
    normal(a) == normal(b)
}

/// Directory fragments must stay inside the project root.
fn validate_fragment(what: &str, fragment: &str) -> Result<()> {
    let path = Path::new(fragment);
    let contained = !fragment.is_empty()
        && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if contained {
        Ok(())
    } else {
        Err(Error::ValidationError(format!(
            "{what} '{fragment}' must be a relative path inside the project"
        )))
    }
}
