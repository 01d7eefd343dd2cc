use log::debug;
use spmlint_core::{Configuration, Package, PackageImport, SourceImport};
use std::{collections::BTreeMap, path::Path};

use crate::{
    filter::{filter_source_imports, filter_targets},
    types::ValidationError,
};

const LOG_TARGET: &str = "spmlint::redundant_import";

/// Finds imports of modules that another import in the same file already
/// re-exports.
pub fn find_redundant_imports(
    package: &Package,
    package_import: &PackageImport,
    config: &Configuration,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if config.exported_imports.is_empty() {
        debug!(target: LOG_TARGET, "No exported imports configured, nothing to do!");
        return errors;
    }

    for target in filter_targets(package, config) {
        debug!(target: LOG_TARGET, "Redundant Imports: processing target: {}", target.name);

        let Some(target_import) = package_import.for_target(&target.name) else {
            debug!(target: LOG_TARGET, "Skipping target {} - no imports found", target.name);
            continue;
        };

        let mut by_file: BTreeMap<&Path, Vec<&SourceImport>> = BTreeMap::new();
        for source_import in filter_source_imports(&target_import.source_imports, config) {
            by_file.entry(source_import.file.as_path()).or_default().push(source_import);
        }

        for (file, file_imports) in by_file {
            let file_errors = redundant_imports_in_file(&target.name, &file_imports, config);
            debug!(
                target: LOG_TARGET,
                "Found {} redundant imports in {}", file_errors.len(), file.display()
            );
            errors.extend(file_errors);
        }
    }

    errors
}

fn redundant_imports_in_file(
    target_name: &str,
    file_imports: &[&SourceImport],
    config: &Configuration,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for exported in &config.exported_imports {
        let imports_owner = file_imports.iter().any(|i| i.module == exported.owning_module);
        if !imports_owner {
            continue;
        }

        errors.extend(file_imports.iter().filter(|i| exported.reexports(&i.module)).map(|i| {
            ValidationError::RedundantImport {
                target_name: target_name.to_string(),
                source_import: (*i).clone(),
            }
        }));
    }

    errors
}
