use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;
use ymir::config::{ProjectConfig, ProjectType, TargetPlatform};
use ymir::content::{
    attributes_file_content, build_manifest_content, entry_point_content,
    header_placeholder_content, ignore_file_content,
};
use ymir::error::Error;
use ymir::materializer::{Materializer, Step};
use ymir::renderer::MiniJinjaRenderer;

/// Every path below `base`, relative to it, with `/` separators.
fn layout(base: &Path) -> BTreeSet<String> {
    WalkDir::new(base)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry.path().strip_prefix(base).unwrap();
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

fn set(paths: &[&str]) -> BTreeSet<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

fn materialize(base: &Path, config: ProjectConfig) -> ymir::error::Result<ymir::materializer::Report> {
    let engine = MiniJinjaRenderer::new();
    Materializer::new(&engine, config).materialize_in(base)
}

#[test_log::test]
fn test_default_console_layout() {
    let work = TempDir::new().unwrap();
    let report = materialize(work.path(), ProjectConfig::new("demo", ProjectType::ConsoleApp)).unwrap();

    assert_eq!(report.root, work.path().join("demo"));
    assert_eq!(
        layout(work.path()),
        set(&["demo", "demo/CMakeLists.txt", "demo/libs", "demo/src", "demo/src/main.cpp"])
    );
    assert!(!work.path().join("demo/.gitignore").exists());
    assert!(!work.path().join("demo/.gitattributes").exists());
}

#[test_log::test]
fn test_created_in_order() {
    let work = TempDir::new().unwrap();
    let mut config = ProjectConfig::new("demo", ProjectType::Library);
    config.include_dir = "include".to_string();
    config.additional_dirs = "assets;docs".to_string();
    config.emit_vcs_files = true;

    let report = materialize(work.path(), config).unwrap();
    let root = work.path().join("demo");
    let expected: Vec<PathBuf> = vec![
        root.clone(),
        root.join("src"),
        root.join("include"),
        root.join("libs"),
        root.join("assets"),
        root.join("docs"),
        root.join("CMakeLists.txt"),
        root.join("src").join("main.cpp"),
        root.join("include").join("define_headers_here.h"),
        root.join(".gitignore"),
        root.join(".gitattributes"),
    ];
    assert_eq!(report.created, expected);
}

#[test_log::test]
fn test_generated_files_match_generators() {
    let work = TempDir::new().unwrap();
    let mut config = ProjectConfig::new("demo", ProjectType::GuiApp);
    config.target_platform = TargetPlatform::Windows;
    config.emit_vcs_files = true;
    materialize(work.path(), config.clone()).unwrap();

    // Build the tree we expect by hand and compare both directories.
    let expected = TempDir::new().unwrap();
    let root = expected.path().join("demo");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("libs")).unwrap();
    fs::write(
        root.join("CMakeLists.txt"),
        build_manifest_content(&MiniJinjaRenderer::new(), &config).unwrap(),
    )
    .unwrap();
    fs::write(root.join("src/main.cpp"), entry_point_content(&config).unwrap()).unwrap();
    fs::write(root.join(".gitignore"), ignore_file_content()).unwrap();
    fs::write(root.join(".gitattributes"), attributes_file_content()).unwrap();

    assert!(!dir_diff::is_different(work.path(), expected.path()).unwrap());
}

#[test_log::test]
fn test_vcs_files_independent_of_config() {
    let work = TempDir::new().unwrap();

    let mut first = ProjectConfig::new("first", ProjectType::ConsoleApp);
    first.emit_vcs_files = true;
    let mut second = ProjectConfig::new("second", ProjectType::Library);
    second.emit_vcs_files = true;
    second.source_dir = "code".to_string();
    second.compiler_flags = "-O3".to_string();

    materialize(work.path(), first).unwrap();
    materialize(work.path(), second).unwrap();

    for file in [".gitignore", ".gitattributes"] {
        let a = fs::read(work.path().join("first").join(file)).unwrap();
        let b = fs::read(work.path().join("second").join(file)).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(
        fs::read_to_string(work.path().join("first/.gitignore")).unwrap(),
        ignore_file_content()
    );
}

#[test_log::test]
fn test_shared_source_and_include_dir() {
    let work = TempDir::new().unwrap();
    let report = materialize(work.path(), ProjectConfig::new("demo", ProjectType::ConsoleApp)).unwrap();

    let src = work.path().join("demo").join("src");
    assert_eq!(report.created.iter().filter(|p| **p == src).count(), 1);
}

#[test_log::test]
fn test_include_dir_spelled_differently_from_source_dir() {
    for include_dir in ["src/", "./src", "./src/"] {
        let work = TempDir::new().unwrap();
        let mut config = ProjectConfig::new("demo", ProjectType::Library);
        config.include_dir = include_dir.to_string();

        let report = materialize(work.path(), config).unwrap();

        let src = work.path().join("demo").join("src");
        let src_entries = report
            .created
            .iter()
            .filter(|p| p.components().eq(src.components()))
            .count();
        assert_eq!(src_entries, 1, "include dir {include_dir:?}");
        assert!(layout(work.path()).contains("demo/src/define_headers_here.h"));
    }
}

#[test_log::test]
fn test_additional_and_nested_dirs() {
    let work = TempDir::new().unwrap();
    let mut config = ProjectConfig::new("demo", ProjectType::ConsoleApp);
    config.source_dir = "src/app".to_string();
    config.additional_dirs = "assets; docs/api;;".to_string();

    materialize(work.path(), config).unwrap();

    let root = work.path().join("demo");
    assert!(root.join("src/app/main.cpp").is_file());
    assert!(root.join("assets").is_dir());
    assert!(root.join("docs/api").is_dir());
}

#[test_log::test]
fn test_existing_root_halts() {
    let work = TempDir::new().unwrap();
    let root = work.path().join("demo");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("keep.txt"), "mine").unwrap();

    let mut config = ProjectConfig::new("demo", ProjectType::ConsoleApp);
    config.emit_vcs_files = true;
    let err = materialize(work.path(), config).unwrap_err();

    match &err {
        Error::DirectoryCreationError { step, path, .. } => {
            assert_eq!(*step, Step::RootDirectory);
            assert_eq!(*path, root);
        }
        other => panic!("Expected DirectoryCreationError, got {other:?}"),
    }
    assert!(err.to_string().contains(&root.display().to_string()));
    assert_eq!(layout(work.path()), set(&["demo", "demo/keep.txt"]));
}

#[test_log::test]
fn test_invalid_config_creates_nothing() {
    let work = TempDir::new().unwrap();

    let err = materialize(work.path(), ProjectConfig::new("demo", ProjectType::Invalid)).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));

    let mut config = ProjectConfig::new("demo", ProjectType::ConsoleApp);
    config.deps_dir = "../escape".to_string();
    let err = materialize(work.path(), config).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));

    assert!(layout(work.path()).is_empty());
}

#[test_log::test]
fn test_file_failure_is_fatal_without_rollback() {
    let work = TempDir::new().unwrap();
    let mut config = ProjectConfig::new("demo", ProjectType::ConsoleApp);
    // A directory squatting on the manifest path makes the write fail.
    config.additional_dirs = "CMakeLists.txt".to_string();
    config.emit_vcs_files = true;

    let err = materialize(work.path(), config).unwrap_err();
    match err {
        Error::FileWriteError { step, path, .. } => {
            assert_eq!(step, Step::BuildManifest);
            assert_eq!(path, work.path().join("demo").join("CMakeLists.txt"));
        }
        other => panic!("Expected FileWriteError, got {other:?}"),
    }

    // Directories created before the failure stay, later steps never ran.
    assert_eq!(
        layout(work.path()),
        set(&["demo", "demo/CMakeLists.txt", "demo/libs", "demo/src"])
    );
}

#[test_log::test]
fn test_library_header_placeholder() {
    let work = TempDir::new().unwrap();
    materialize(work.path(), ProjectConfig::new("engine", ProjectType::Library)).unwrap();

    let header = work.path().join("engine/src/define_headers_here.h");
    assert_eq!(fs::read_to_string(header).unwrap(), header_placeholder_content());
}

#[test_log::test]
fn test_init_repository() {
    let work = TempDir::new().unwrap();
    let mut config = ProjectConfig::new("demo", ProjectType::ConsoleApp);
    config.emit_vcs_files = true;
    config.init_repository = true;

    materialize(work.path(), config).unwrap();

    let root = work.path().join("demo");
    assert!(root.join(".git").is_dir());
    assert!(root.join(".gitignore").is_file());
}
