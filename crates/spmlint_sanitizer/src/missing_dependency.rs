use log::{debug, trace};
use spmlint_core::{Configuration, Package, PackageImport};

use crate::{
    filter::{filter_source_imports, filter_targets},
    types::ValidationError,
};

const LOG_TARGET: &str = "spmlint::missing_dependency";

/// Finds imports for which the target declares no dependency.
///
/// An import is still satisfied when the module is re-exported by a module
/// the target does depend on. Targets without scanned imports are skipped.
pub fn find_missing_dependencies(
    package: &Package,
    package_import: &PackageImport,
    config: &Configuration,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for target in filter_targets(package, config) {
        debug!(target: LOG_TARGET, "Missing Dependencies: processing target: {}", target.name);

        let Some(target_import) = package_import.for_target(&target.name) else {
            debug!(target: LOG_TARGET, "Skipping target {} - no imports found", target.name);
            continue;
        };

        for source_import in filter_source_imports(&target_import.source_imports, config) {
            let module = &source_import.module;
            if target.depends_on(module) {
                trace!(target: LOG_TARGET, "Found dependency for import of {}", module);
                continue;
            }

            debug!(target: LOG_TARGET, "No dependency found for {}", module);

            if let Some(exported) = config.exporter_of(module)
                && target.depends_on(&exported.owning_module)
            {
                debug!(
                    target: LOG_TARGET,
                    "Found dependency for exported import of {} via {}",
                    module,
                    exported.owning_module
                );
                continue;
            }

            errors.push(ValidationError::MissingDependency {
                target_name: target.name.clone(),
                source_import: source_import.clone(),
            });
        }
    }

    debug!(target: LOG_TARGET, "Found {} missing dependencies", errors.len());
    errors
}
