//! Dependency validation for Swift packages.
//!
//! This crate cross-references a package's declared target dependencies
//! with the modules its sources import, reporting:
//! - Missing dependencies: a module is imported but not declared
//! - Unused dependencies: a dependency is declared but never imported
//! - Redundant imports: a module is imported alongside a module that re-exports it
//! - Redundant dependencies: a dependency is already re-exported by another module
//!
//! # Examples
//!
//! ```no_run
//! use spmlint_core::{Configuration, LiveFileSystem};
//! use spmlint_sanitizer::run_dependency_check;
//! use std::io::{BufWriter, Write};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Configuration::default();
//! let result = run_dependency_check(Path::new("/path/to/package"), &config, &LiveFileSystem)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! spmlint_sanitizer::print_table(&mut stdout, &result.errors)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod filter;
mod missing_dependency;
mod redundant_dependency;
mod redundant_import;
mod reporter;
#[cfg(test)]
mod test_support;
mod types;
mod unused_dependency;

// Re-export public API
pub use checker::{run_all_checks, run_dependency_check};
pub use filter::{filter_source_imports, filter_targets};
pub use missing_dependency::find_missing_dependencies;
pub use redundant_dependency::find_redundant_dependencies;
pub use redundant_import::find_redundant_imports;
pub use reporter::{print_json, print_no_errors_message, print_table, render_table};
pub use types::{CheckResult, FindingRecord, ValidationError};
pub use unused_dependency::find_unused_dependencies;
