use anyhow::Result;
use log::{debug, info};
use spmlint_core::{Configuration, FileSystem, Package, PackageImport, read_manifest};
use std::path::Path;

use crate::{
    missing_dependency::find_missing_dependencies,
    redundant_dependency::find_redundant_dependencies, redundant_import::find_redundant_imports,
    types::{CheckResult, ValidationError},
    unused_dependency::find_unused_dependencies,
};

/// Runs every validation pass and concatenates their findings in a fixed
/// order: missing, unused, redundant import, redundant dependency.
///
/// The passes share no state and run concurrently.
pub fn run_all_checks(
    package: &Package,
    package_import: &PackageImport,
    config: &Configuration,
) -> Vec<ValidationError> {
    let ((missing, unused), (redundant_imports, redundant_dependencies)) = rayon::join(
        || {
            rayon::join(
                || find_missing_dependencies(package, package_import, config),
                || find_unused_dependencies(package, package_import, config),
            )
        },
        || {
            rayon::join(
                || find_redundant_imports(package, package_import, config),
                || find_redundant_dependencies(package, package_import, config),
            )
        },
    );

    debug!(
        "Findings: missing={}, unused={}, redundant imports={}, redundant dependencies={}",
        missing.len(),
        unused.len(),
        redundant_imports.len(),
        redundant_dependencies.len()
    );

    let mut errors = missing;
    errors.extend(unused);
    errors.extend(redundant_imports);
    errors.extend(redundant_dependencies);
    errors
}

/// Reads the manifest in `manifest_dir`, scans every target's sources and
/// validates the result.
pub fn run_dependency_check(
    manifest_dir: &Path,
    config: &Configuration,
    fs: &impl FileSystem,
) -> Result<CheckResult> {
    info!("Starting dependency check");

    let package = read_manifest(manifest_dir, &config.swift_exec_path)?;
    info!("Found {} targets in package {}", package.targets.len(), package.name);

    let package_import = PackageImport::scan(manifest_dir, &package, fs);
    let imports_found: usize =
        package_import.target_imports.iter().map(|t| t.source_imports.len()).sum();
    debug!("Found {} imports across all targets", imports_found);

    let errors = run_all_checks(&package, &package_import, config);
    info!("Dependency check complete. Found {} errors", errors.len());

    Ok(CheckResult { errors, targets_analyzed: package.targets.len(), imports_found })
}
