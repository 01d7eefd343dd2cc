//! Fixture builders shared by the validation pass tests.

use spmlint_core::{
    Configuration, Dependency, ExportedImport, IgnoredFramework, IgnoredTarget, Package,
    PackageImport, SourceImport, Target, TargetImport, TargetKind,
};
use std::path::PathBuf;

pub(crate) const TARGET_NAME: &str = "Test";

/// Imports of `modules`, one per line of `file`.
pub(crate) fn imports_in(file: &str, modules: &[&str]) -> Vec<SourceImport> {
    modules
        .iter()
        .enumerate()
        .map(|(idx, module)| SourceImport {
            file: PathBuf::from(file),
            line_number: idx + 1,
            raw_text: format!("import {}", module),
            module: module.to_string(),
        })
        .collect()
}

pub(crate) fn imports(modules: &[&str]) -> Vec<SourceImport> {
    imports_in("Test.swift", modules)
}

/// A package with a single regular target importing `source_imports` and
/// depending locally on `dependencies`.
pub(crate) fn fixture_from(
    source_imports: Vec<SourceImport>,
    dependencies: &[&str],
) -> (Package, PackageImport) {
    let package = Package {
        name: "Fake".to_string(),
        targets: vec![Target::new(
            TARGET_NAME,
            TargetKind::Regular,
            dependencies.iter().map(|d| Dependency::local(*d)).collect(),
        )],
    };
    let package_import = PackageImport::new(vec![TargetImport {
        target_name: TARGET_NAME.to_string(),
        kind: TargetKind::Regular,
        source_imports,
    }]);
    (package, package_import)
}

pub(crate) fn fixture(modules: &[&str], dependencies: &[&str]) -> (Package, PackageImport) {
    fixture_from(imports(modules), dependencies)
}

pub(crate) struct ConfigBuilder {
    config: Configuration,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self { config: Configuration::default() }
    }

    pub(crate) fn with_exported_import(mut self, exported_import: ExportedImport) -> Self {
        self.config.exported_imports.push(exported_import);
        self
    }

    pub(crate) fn with_system_framework(mut self, module: &str) -> Self {
        self.config.system_frameworks.push(module.to_string());
        self
    }

    pub(crate) fn with_ignored_framework(mut self, module: &str) -> Self {
        self.config
            .ignored_frameworks
            .push(IgnoredFramework { framework: module.to_string(), reason: None });
        self
    }

    pub(crate) fn with_ignored_target(mut self, target_name: &str) -> Self {
        self.config
            .ignored_targets
            .push(IgnoredTarget { target_name: target_name.to_string(), reason: None });
        self
    }

    pub(crate) fn build(self) -> Configuration {
        self.config
    }
}
