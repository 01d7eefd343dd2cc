use serde::Serialize;
use spmlint_core::{Dependency, SourceImport};
use std::fmt;

/// A single finding produced by one of the validation passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A source imports a module no declared dependency provides
    MissingDependency { target_name: String, source_import: SourceImport },
    /// A declared dependency is never imported
    UnusedDependency { target_name: String, dependency: Dependency },
    /// A source imports a module already re-exported by another import in the same file
    RedundantImport { target_name: String, source_import: SourceImport },
    /// A target depends on a module already re-exported by another dependency
    RedundantDependency { target_name: String, dependency: Dependency },
}

impl ValidationError {
    pub fn target_name(&self) -> &str {
        match self {
            ValidationError::MissingDependency { target_name, .. }
            | ValidationError::UnusedDependency { target_name, .. }
            | ValidationError::RedundantImport { target_name, .. }
            | ValidationError::RedundantDependency { target_name, .. } => target_name,
        }
    }

    pub fn type_description(&self) -> &'static str {
        match self {
            ValidationError::MissingDependency { .. } => "Missing Dependency",
            ValidationError::UnusedDependency { .. } => "Unused Dependency",
            ValidationError::RedundantImport { .. } => "Redundant Import",
            ValidationError::RedundantDependency { .. } => "Redundant Dependency",
        }
    }

    /// The import or dependency being reported on, as a module name.
    pub fn module(&self) -> &str {
        match self {
            ValidationError::MissingDependency { source_import, .. }
            | ValidationError::RedundantImport { source_import, .. } => &source_import.module,
            ValidationError::UnusedDependency { dependency, .. }
            | ValidationError::RedundantDependency { dependency, .. } => dependency.name(),
        }
    }

    /// Multi-line, human readable details of the finding.
    pub fn message(&self) -> String {
        match self {
            ValidationError::MissingDependency { source_import, .. }
            | ValidationError::RedundantImport { source_import, .. } => format!(
                "File:   {}\nLine:   {}\nModule: {}",
                source_import.file_name(),
                source_import.line_number,
                source_import.module
            ),
            ValidationError::UnusedDependency { dependency, .. }
            | ValidationError::RedundantDependency { dependency, .. } => format!(
                "Dependency: {}\nType:       {}\nPackage:    {}",
                dependency.name(),
                dependency.kind_label(),
                dependency.package_name().unwrap_or("--")
            ),
        }
    }

    pub fn to_record(&self) -> FindingRecord {
        FindingRecord {
            target_name: self.target_name().to_string(),
            kind: self.type_description().to_string(),
            details: self.message(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.target_name(), self.type_description(), self.module())
    }
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub errors: Vec<ValidationError>,
    pub targets_analyzed: usize,
    pub imports_found: usize,
}

/// The machine readable shape of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingRecord {
    pub target_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
}
