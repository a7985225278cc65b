//! Turns a validated configuration into directories and files on disk.
//!
//! Steps run strictly in order and every one of them is fatal: the first
//! failure stops the run. Nothing created before the failure is removed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, trace};

use crate::config::{ProjectConfig, ProjectType};
use crate::constants::{
    ATTRIBUTES_FILE, ENTRY_POINT_FILE, IGNORE_FILE, LIBRARY_HEADER_PLACEHOLDER, MANIFEST_FILE,
};
use crate::content::{
    attributes_file_content, build_manifest_content, entry_point_content,
    header_placeholder_content, ignore_file_content,
};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::vcs::init_repository;

/// A single materialization step, used in progress notices and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    RootDirectory,
    SourceDirectory,
    IncludeDirectory,
    DependenciesDirectory,
    AdditionalDirectory(String),
    BuildManifest,
    EntryPoint,
    HeaderPlaceholder,
    IgnoreFile,
    AttributesFile,
    Repository,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::RootDirectory => write!(f, "main project directory"),
            Step::SourceDirectory => write!(f, "source directory"),
            Step::IncludeDirectory => write!(f, "include directory"),
            Step::DependenciesDirectory => write!(f, "dependencies directory"),
            Step::AdditionalDirectory(name) => write!(f, "'{name}' directory"),
            Step::BuildManifest => write!(f, "{MANIFEST_FILE} file"),
            Step::EntryPoint => write!(f, "{ENTRY_POINT_FILE} file"),
            Step::HeaderPlaceholder => write!(f, "{LIBRARY_HEADER_PLACEHOLDER} file"),
            Step::IgnoreFile => write!(f, "{IGNORE_FILE} file"),
            Step::AttributesFile => write!(f, "{ATTRIBUTES_FILE} file"),
            Step::Repository => write!(f, "git repository"),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Absolute path of the project directory
    pub root: PathBuf,
    /// Every directory and file created, in creation order
    pub created: Vec<PathBuf>,
}

pub struct Materializer<'a> {
    engine: &'a dyn TemplateRenderer,
    config: ProjectConfig,
    created: Vec<PathBuf>,
}

impl<'a> Materializer<'a> {
    pub fn new(engine: &'a dyn TemplateRenderer, config: ProjectConfig) -> Self {
        Self { engine, config, created: Vec::new() }
    }

    /// Creates the project under the process working directory.
    pub fn materialize(self) -> Result<Report> {
        let cwd = std::env::current_dir()?;
        self.materialize_in(cwd)
    }

    /// Creates the project under `base`.
    ///
    /// # Errors
    /// * `Error::ValidationError` before anything is created
    /// * `Error::DirectoryCreationError` if a directory cannot be created,
    ///   including when the project directory already exists
    /// * `Error::FileWriteError` if a generated file cannot be written
    /// * `Error::RenderError` if file content cannot be generated
    /// * `Error::RepositoryError` if repository initialisation was requested and failed
    pub fn materialize_in<P: AsRef<Path>>(mut self, base: P) -> Result<Report> {
        self.config.validate()?;
        let root = self.config.resolve_root_path(base).to_path_buf();

        self.create_root(&root)?;
        let source_dir = root.join(&self.config.source_dir);
        self.create_dir(Step::SourceDirectory, &source_dir)?;
        if self.config.creates_include_dir() {
            self.create_dir(Step::IncludeDirectory, &root.join(&self.config.include_dir))?;
        }
        self.create_dir(Step::DependenciesDirectory, &root.join(&self.config.deps_dir))?;

        let additional: Vec<String> =
            self.config.additional_dirs().into_iter().map(str::to_string).collect();
        for dir in additional {
            let path = root.join(&dir);
            self.create_dir(Step::AdditionalDirectory(dir), &path)?;
        }

        let manifest = build_manifest_content(self.engine, &self.config)?;
        self.write_file(Step::BuildManifest, &root.join(MANIFEST_FILE), &manifest)?;

        let entry_point = entry_point_content(&self.config)?;
        self.write_file(Step::EntryPoint, &source_dir.join(ENTRY_POINT_FILE), &entry_point)?;

        if self.config.project_type == ProjectType::Library {
            let header = root.join(&self.config.include_dir).join(LIBRARY_HEADER_PLACEHOLDER);
            self.write_file(Step::HeaderPlaceholder, &header, header_placeholder_content())?;
        }

        if self.config.emit_vcs_files {
            self.write_file(Step::IgnoreFile, &root.join(IGNORE_FILE), ignore_file_content())?;
            self.write_file(
                Step::AttributesFile,
                &root.join(ATTRIBUTES_FILE),
                attributes_file_content(),
            )?;
        }

        if self.config.init_repository {
            match init_repository(&root) {
                Ok(()) => trace!("Created the {} at '{}'", Step::Repository, root.display()),
                Err(e) => {
                    error!("{e}");
                    return Err(e);
                }
            }
        }

        info!("Successfully created a new project with the name '{}'!", self.config.name);
        Ok(Report { root, created: self.created })
    }

    /// The project directory must not exist yet, so this is not recursive.
    fn create_root(&mut self, path: &Path) -> Result<()> {
        self.record(Step::RootDirectory, path, fs::create_dir(path))
            .map_err(|source| Error::DirectoryCreationError {
                step: Step::RootDirectory,
                path: path.to_path_buf(),
                source,
            })
    }

    fn create_dir(&mut self, step: Step, path: &Path) -> Result<()> {
        self.record(step.clone(), path, fs::create_dir_all(path))
            .map_err(|source| Error::DirectoryCreationError { step, path: path.to_path_buf(), source })
    }

    fn write_file(&mut self, step: Step, path: &Path, content: &str) -> Result<()> {
        self.record(step.clone(), path, fs::write(path, content))
            .map_err(|source| Error::FileWriteError { step, path: path.to_path_buf(), source })
    }

    /// Logs the outcome of a step and remembers what it created.
    fn record(
        &mut self,
        step: Step,
        path: &Path,
        outcome: std::io::Result<()>,
    ) -> std::io::Result<()> {
        match outcome {
            Ok(()) => {
                trace!("Created the {} at '{}'", step, path.display());
                self.created.push(path.to_path_buf());
                Ok(())
            }
            Err(e) => {
                error!("Failed to create the {} at '{}': {}", step, path.display(), e);
                Err(e)
            }
        }
    }
}
