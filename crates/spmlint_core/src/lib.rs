//! Core model and input handling for spmlint.
//!
//! This crate provides everything the validation passes consume:
//! - The simplified package model (`Package`, `Target`, `Dependency`)
//! - Extracting module names from Swift import declarations
//! - Collecting target sources and scanning them into a `PackageImport`
//! - Loading the tool's `Configuration`
//! - Reading the package manifest through `swift package dump-package`

mod collector;
mod config;
mod constants;
mod imports;
mod manifest;
mod parser;
mod types;

// Re-export public API
pub use collector::{
    FileSystem, LiveFileSystem, collect_sources, is_excluded, is_source_file, resolve_source_dir,
};
pub use config::{Configuration, ExportedImport, IgnoredFramework, IgnoredTarget};
pub use constants::{
    CONFIG_FILE_NAME, DEFAULT_SWIFT_EXEC_PATH, MANIFEST_FILE_NAME, SOURCE_EXTENSIONS,
};
pub use imports::{PackageImport, SourceImport, TargetImport};
pub use manifest::{decode_manifest, read_manifest};
pub use parser::extract_module;
pub use types::{Dependency, Package, Target, TargetKind};
