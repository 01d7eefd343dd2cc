use log::{debug, trace};
use spmlint_core::{Configuration, Dependency, Package, PackageImport};
use std::collections::HashSet;

use crate::{
    filter::{filter_source_imports, filter_targets},
    types::ValidationError,
};

const LOG_TARGET: &str = "spmlint::unused_dependency";

/// Finds declared dependencies that no (filtered) import refers to.
///
/// Targets without scanned imports are skipped, since unused-ness cannot be
/// decided without import data. Findings follow dependency declaration
/// order; a name declared twice is reported once.
pub fn find_unused_dependencies(
    package: &Package,
    package_import: &PackageImport,
    config: &Configuration,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for target in filter_targets(package, config) {
        debug!(target: LOG_TARGET, "Unused Dependencies: processing target: {}", target.name);

        let Some(target_import) = package_import.for_target(&target.name) else {
            debug!(target: LOG_TARGET, "Skipping target {} - no imports found", target.name);
            continue;
        };

        let imported: HashSet<&Dependency> =
            filter_source_imports(&target_import.source_imports, config)
                .into_iter()
                .filter_map(|source_import| {
                    target.dependencies.iter().find(|d| d.name() == source_import.module)
                })
                .collect();
        trace!(target: LOG_TARGET, "Target {} uses {} dependencies", target.name, imported.len());

        let mut reported: HashSet<&Dependency> = HashSet::new();
        for dependency in &target.dependencies {
            if imported.contains(dependency) || !reported.insert(dependency) {
                continue;
            }
            debug!(target: LOG_TARGET, "Dependency {} is never imported", dependency);
            errors.push(ValidationError::UnusedDependency {
                target_name: target.name.clone(),
                dependency: dependency.clone(),
            });
        }
    }

    debug!(target: LOG_TARGET, "Found {} unused dependencies", errors.len());
    errors
}
