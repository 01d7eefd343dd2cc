use log::debug;
use spmlint_core::{Configuration, ExportedImport, Package, PackageImport};

use crate::{filter::filter_targets, types::ValidationError};

const LOG_TARGET: &str = "spmlint::redundant_dependency";

/// Finds dependencies on modules that are re-exported by some module,
/// making the direct dependency unnecessary.
///
/// Exported imports owned by the target itself are not considered: a
/// module re-exporting its own dependencies still needs to depend on them.
pub fn find_redundant_dependencies(
    package: &Package,
    _package_import: &PackageImport,
    config: &Configuration,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for target in filter_targets(package, config) {
        debug!(target: LOG_TARGET, "Redundant Dependencies: processing target: {}", target.name);

        if target.dependencies.is_empty() {
            debug!(
                target: LOG_TARGET,
                "Target {} has no dependencies, nothing to do!", target.name
            );
            continue;
        }

        let exported_imports: Vec<&ExportedImport> = config
            .exported_imports
            .iter()
            .filter(|e| e.owning_module != target.name)
            .collect();

        let before = errors.len();
        errors.extend(
            target
                .dependencies
                .iter()
                .filter(|d| exported_imports.iter().any(|e| e.reexports(d.name())))
                .map(|d| ValidationError::RedundantDependency {
                    target_name: target.name.clone(),
                    dependency: d.clone(),
                }),
        );
        debug!(
            target: LOG_TARGET,
            "Found {} redundant dependencies in {}", errors.len() - before, target.name
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ConfigBuilder, fixture};

    fn config() -> Configuration {
        ConfigBuilder::new()
            .with_exported_import(ExportedImport::new("SomeModule", &["SomeOtherModule"]))
            .build()
    }

    #[test]
    fn test_not_depending_on_exported_module_no_error() {
        let (package, package_import) = fixture(&["SomeModule"], &["SomeModule"]);
        assert!(find_redundant_dependencies(&package, &package_import, &config()).is_empty());
    }

    #[test]
    fn test_depending_on_exported_module_error_returned() {
        let (package, package_import) =
            fixture(&["SomeModule", "SomeOtherModule"], &["SomeModule", "SomeOtherModule"]);
        let result = find_redundant_dependencies(&package, &package_import, &config());
        assert_eq!(result.len(), 1);
        assert!(matches!(
            &result[0],
            ValidationError::RedundantDependency { target_name, dependency }
                if target_name == "Test" && dependency.name() == "SomeOtherModule"
        ));
    }

    #[test]
    fn test_flagged_without_owner_dependency() {
        let (package, package_import) = fixture(&[], &["SomeOtherModule"]);
        assert_eq!(find_redundant_dependencies(&package, &package_import, &config()).len(), 1);
    }

    #[test]
    fn test_owning_target_excluded() {
        let config = ConfigBuilder::new()
            .with_exported_import(ExportedImport::new("Test", &["Inner"]))
            .build();
        let (package, package_import) = fixture(&["Inner"], &["Inner"]);
        assert!(find_redundant_dependencies(&package, &package_import, &config).is_empty());
    }

    #[test]
    fn test_no_dependencies() {
        let (package, package_import) = fixture(&["SomeOtherModule"], &[]);
        assert!(find_redundant_dependencies(&package, &package_import, &config()).is_empty());
    }

    #[test]
    fn test_ignored_target_skipped() {
        let config = ConfigBuilder::new()
            .with_exported_import(ExportedImport::new("SomeModule", &["SomeOtherModule"]))
            .with_ignored_target("Test")
            .build();
        let (package, package_import) = fixture(&[], &["SomeModule", "SomeOtherModule"]);
        assert!(find_redundant_dependencies(&package, &package_import, &config).is_empty());
    }
}
