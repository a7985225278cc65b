//! Common constants used throughout the Ymir application.

/// Build manifest written at the project root
pub const MANIFEST_FILE: &str = "CMakeLists.txt";

/// Default entry-point source file, written into the source directory
pub const ENTRY_POINT_FILE: &str = "main.cpp";

/// Version-control ignore file
pub const IGNORE_FILE: &str = ".gitignore";

/// Version-control attributes file
pub const ATTRIBUTES_FILE: &str = ".gitattributes";

/// Minimum CMake version requested by the generated manifest
pub const CMAKE_MINIMUM_VERSION: &str = "3.27";

/// Header placeholder listed by library targets, relative to the include directory
pub const LIBRARY_HEADER_PLACEHOLDER: &str = "define_headers_here.h";

/// Default language standard level
pub const DEFAULT_STANDARD: u32 = 20;

pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_INCLUDE_DIR: &str = "src";
pub const DEFAULT_DEPS_DIR: &str = "libs";

/// Characters separating entries of the additional directories list
pub const DIR_DELIMITERS: [char; 2] = [';', ' '];
