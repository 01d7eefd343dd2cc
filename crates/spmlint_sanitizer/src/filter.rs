use log::debug;
use spmlint_core::{Configuration, Package, SourceImport, Target};

const LOG_TARGET: &str = "spmlint::filter";

/// Targets to validate: every target not listed in `ignoredTargets`.
pub fn filter_targets<'a>(package: &'a Package, config: &Configuration) -> Vec<&'a Target> {
    package
        .targets
        .iter()
        .filter(|target| {
            if config.is_ignored_target(&target.name) {
                debug!(target: LOG_TARGET, "Skipping target {} - explicitly ignored", target.name);
                return false;
            }
            true
        })
        .collect()
}

/// Imports to validate: drops system modules and ignored frameworks.
pub fn filter_source_imports<'a>(
    imports: &'a [SourceImport],
    config: &Configuration,
) -> Vec<&'a SourceImport> {
    imports
        .iter()
        .filter(|import| {
            if config.is_system(&import.module) {
                debug!(target: LOG_TARGET, "Skipping import of {} - system module", import.module);
                return false;
            }
            if config.is_ignored(&import.module) {
                debug!(
                    target: LOG_TARGET,
                    "Skipping import of {} - explicitly ignored", import.module
                );
                return false;
            }
            true
        })
        .collect()
}
