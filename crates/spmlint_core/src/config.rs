use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_SWIFT_EXEC_PATH};

/// User policy controlling which targets and imports are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// The `swift` driver used to dump the package manifest
    pub swift_exec_path: PathBuf,
    /// Modules provided by the platform; never reported
    pub system_frameworks: Vec<String>,
    pub exported_imports: Vec<ExportedImport>,
    pub ignored_frameworks: Vec<IgnoredFramework>,
    pub ignored_targets: Vec<IgnoredTarget>,
    pub enable_debug_logging: bool,
}

/// Declares that importing `owning_module` also makes every module in
/// `reexported_modules` available (`@_exported import`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedImport {
    #[serde(rename = "importFramework")]
    pub owning_module: String,
    #[serde(rename = "exportedImports", default)]
    pub reexported_modules: Vec<String>,
}

impl ExportedImport {
    pub fn new(owning_module: impl Into<String>, reexported_modules: &[&str]) -> Self {
        Self {
            owning_module: owning_module.into(),
            reexported_modules: reexported_modules.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn reexports(&self, module: &str) -> bool {
        self.reexported_modules.iter().any(|m| m == module)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredFramework {
    pub framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredTarget {
    pub target_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            swift_exec_path: PathBuf::from(DEFAULT_SWIFT_EXEC_PATH),
            system_frameworks: Vec::new(),
            exported_imports: Vec::new(),
            ignored_frameworks: Vec::new(),
            ignored_targets: Vec::new(),
            enable_debug_logging: false,
        }
    }
}

impl Configuration {
    pub fn is_system(&self, module: &str) -> bool {
        self.system_frameworks.iter().any(|m| m == module)
    }

    pub fn is_ignored(&self, module: &str) -> bool {
        self.ignored_frameworks.iter().any(|f| f.framework == module)
    }

    pub fn is_ignored_target(&self, target_name: &str) -> bool {
        self.ignored_targets.iter().any(|t| t.target_name == target_name)
    }

    /// The first exported import declaring `module` as re-exported.
    pub fn exporter_of(&self, module: &str) -> Option<&ExportedImport> {
        self.exported_imports.iter().find(|e| e.reexports(module))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the first readable configuration among `candidates`, falling
    /// back to `Configuration::default()`.
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if !path.is_file() {
                debug!("No config file at: {}", path.display());
                continue;
            }
            match Self::from_path(path) {
                Ok(config) => {
                    info!("Using config file {}", path.display());
                    return config;
                }
                Err(e) => warn!("{:#}, using default configuration", e),
            }
        }
        debug!("No usable config file found");
        Self::default()
    }

    /// Where a configuration may live for a package, in lookup order.
    pub fn candidate_paths(manifest_dir: &Path, cwd: &Path) -> Vec<PathBuf> {
        let mut paths = vec![manifest_dir.join(CONFIG_FILE_NAME)];
        let in_cwd = cwd.join(CONFIG_FILE_NAME);
        if !paths.contains(&in_cwd) {
            paths.push(in_cwd);
        }
        paths
    }

    /// An example configuration exercising every field.
    pub fn sample() -> Self {
        Self {
            swift_exec_path: PathBuf::from(DEFAULT_SWIFT_EXEC_PATH),
            system_frameworks: vec!["Foundation".to_string(), "SwiftUI".to_string()],
            exported_imports: vec![ExportedImport::new("SomeFramework", &["SomeOtherFramework"])],
            ignored_frameworks: vec![IgnoredFramework {
                framework: "MyModel".to_string(),
                reason: Some("It's complicated".to_string()),
            }],
            ignored_targets: vec![IgnoredTarget {
                target_name: "MyTarget".to_string(),
                reason: Some("It's also complicated".to_string()),
            }],
            enable_debug_logging: false,
        }
    }

    pub fn sample_json() -> Result<String> {
        serde_json::to_string_pretty(&Self::sample()).context("Failed to encode sample config")
    }

    /// Writes the sample configuration into `dir`, returning its path.
    pub fn write_sample(dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, Self::sample_json()?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(path)
    }
}
