//! File name and extension constants shared across the workspace.

/// Extensions of files scanned for import declarations.
pub const SOURCE_EXTENSIONS: &[&str] = &["swift"];

/// Name of the per-package configuration file.
pub const CONFIG_FILE_NAME: &str = ".spmlint.json";

/// Name of the package manifest expected in the manifest directory.
pub const MANIFEST_FILE_NAME: &str = "Package.swift";

/// Swift driver used when no configuration overrides it.
pub const DEFAULT_SWIFT_EXEC_PATH: &str = "/usr/bin/swift";
