//! Content of the generated files.
//! Every function here is pure: it turns a configuration into text and
//! never touches the filesystem.

use minijinja::ErrorKind;
use serde_json::json;

use crate::config::{ProjectConfig, ProjectType, TargetPlatform};
use crate::constants::{CMAKE_MINIMUM_VERSION, ENTRY_POINT_FILE, LIBRARY_HEADER_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

const MANIFEST_TEMPLATE: &str = include_str!("templates/CMakeLists.txt.j2");
const CONSOLE_ENTRY: &str = include_str!("templates/main_console.cpp");
const GUI_ENTRY: &str = include_str!("templates/main_gui.cpp");
const GUI_ENTRY_WINDOWS: &str = include_str!("templates/main_gui_windows.cpp");
const IGNORE_CONTENT: &str = include_str!("templates/gitignore");
const ATTRIBUTES_CONTENT: &str = include_str!("templates/gitattributes");
const HEADER_PLACEHOLDER: &str = include_str!("templates/define_headers_here.h");

fn invalid_type_error() -> Error {
    Error::RenderError(minijinja::Error::new(
        ErrorKind::InvalidOperation,
        "cannot generate content for an INVALID project type",
    ))
}

/// Marker tagging an executable as a windowed application, if the platform has one.
pub fn gui_marker(platform: TargetPlatform) -> Option<&'static str> {
    match platform {
        TargetPlatform::Windows => Some("WIN32"),
        TargetPlatform::MacOs => Some("MACOSX_BUNDLE"),
        TargetPlatform::Linux => None,
    }
}

/// The CMake target declaration for the configured project type.
///
/// # Errors
/// * `Error::RenderError` for `ProjectType::Invalid`
pub fn target_declaration(config: &ProjectConfig) -> Result<String> {
    match config.project_type {
        ProjectType::ConsoleApp => Ok("add_executable(${PROJECT_NAME} ${PROJECT_SOURCES})".to_string()),
        ProjectType::GuiApp => Ok(match gui_marker(config.target_platform) {
            Some(marker) => format!("add_executable(${{PROJECT_NAME}} {marker} ${{PROJECT_SOURCES}})"),
            None => "add_executable(${PROJECT_NAME} ${PROJECT_SOURCES})".to_string(),
        }),
        ProjectType::Library => Ok(format!(
            "add_library(${{PROJECT_NAME}} SHARED ${{PROJECT_SOURCES}} ${{PROJECT_INCLUDE_DIR}}/{LIBRARY_HEADER_PLACEHOLDER})"
        )),
        ProjectType::Invalid => Err(invalid_type_error()),
    }
}

/// Renders the `CMakeLists.txt` for the project.
///
/// Block order: version and project name, project variables, CMake
/// variables, options, sources, sub-projects, target, linking, compiling
/// options. Flags and definitions are copied verbatim. The template sees
/// every serialized configuration field plus `cmake_version`, `entry_point`
/// and `target`.
///
/// # Errors
/// * `Error::RenderError` for `ProjectType::Invalid` or a rendering failure
/// * `Error::SerializationError` if the configuration cannot be serialized
pub fn build_manifest_content(
    engine: &dyn TemplateRenderer,
    config: &ProjectConfig,
) -> Result<String> {
    let mut context = serde_json::to_value(config)?;
    if let Some(fields) = context.as_object_mut() {
        fields.insert("cmake_version".to_string(), json!(CMAKE_MINIMUM_VERSION));
        fields.insert("entry_point".to_string(), json!(ENTRY_POINT_FILE));
        fields.insert("target".to_string(), json!(target_declaration(config)?));
    }

    engine.render(MANIFEST_TEMPLATE, &context)
}

/// Source of the default entry point.
///
/// Console applications and libraries share the same program; GUI
/// applications get a windowed entry point for the target platform.
///
/// # Errors
/// * `Error::RenderError` for `ProjectType::Invalid`
pub fn entry_point_content(config: &ProjectConfig) -> Result<String> {
    let content = match (config.project_type, config.target_platform) {
        (ProjectType::ConsoleApp | ProjectType::Library, _) => CONSOLE_ENTRY,
        (ProjectType::GuiApp, TargetPlatform::Windows) => GUI_ENTRY_WINDOWS,
        (ProjectType::GuiApp, _) => GUI_ENTRY,
        (ProjectType::Invalid, _) => return Err(invalid_type_error()),
    };
    Ok(content.to_string())
}

/// Header listed by library targets, so the generated project configures as is.
pub fn header_placeholder_content() -> &'static str {
    HEADER_PLACEHOLDER
}

/// Fixed `.gitignore` listing build artifacts and IDE metadata.
pub fn ignore_file_content() -> &'static str {
    IGNORE_CONTENT
}

/// Fixed `.gitattributes` enabling text normalisation.
pub fn attributes_file_content() -> &'static str {
    ATTRIBUTES_CONTENT
}
