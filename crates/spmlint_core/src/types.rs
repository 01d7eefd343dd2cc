use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// A simplified package manifest: the package name and its targets in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Package {
    pub name: String,
    pub targets: Vec<Target>,
}

impl Package {
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    /// Explicit source directory, relative to the manifest directory
    #[serde(default)]
    pub path: Option<String>,
    /// Path fragments whose files do not belong to the target
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Target {
    pub fn new(name: impl Into<String>, kind: TargetKind, dependencies: Vec<Dependency>) -> Self {
        Self { name: name.into(), kind, path: None, exclude: Vec::new(), dependencies }
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Regular,
    Test,
    Executable,
}

impl TargetKind {
    /// Conventional top-level directory holding the target's sources.
    pub fn default_source_root(self) -> &'static str {
        match self {
            TargetKind::Regular | TargetKind::Executable => "Sources",
            TargetKind::Test => "Tests",
        }
    }
}

/// A reference from a target to a build product.
///
/// Two dependencies are equal when their names are equal, regardless of
/// whether they are local or external.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawDependency")]
pub enum Dependency {
    /// Another target in the same package
    Local { name: String },
    /// A product vended by another package
    External { name: String, package_name: String },
}

impl Dependency {
    pub fn local(name: impl Into<String>) -> Self {
        Dependency::Local { name: name.into() }
    }

    pub fn external(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Dependency::External { name: name.into(), package_name: package_name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Dependency::Local { name } | Dependency::External { name, .. } => name,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Dependency::Local { .. } => "Local",
            Dependency::External { .. } => "External",
        }
    }

    pub fn package_name(&self) -> Option<&str> {
        match self {
            Dependency::Local { .. } => None,
            Dependency::External { package_name, .. } => Some(package_name),
        }
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Dependency {}

impl Hash for Dependency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The shapes `swift package dump-package` uses for a target dependency.
///
/// Each variant carries a positional array: `byName`/`target` hold
/// `[name, condition]`, `product` holds
/// `[name, package, moduleAliases, condition]`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawDependency {
    ByName(Vec<Value>),
    Target(Vec<Value>),
    Product(Vec<Value>),
}

fn string_at(values: &[Value], idx: usize) -> Option<String> {
    values.get(idx).and_then(Value::as_str).map(str::to_string)
}

impl TryFrom<RawDependency> for Dependency {
    type Error = String;

    fn try_from(raw: RawDependency) -> Result<Self, Self::Error> {
        match raw {
            RawDependency::ByName(values) | RawDependency::Target(values) => string_at(&values, 0)
                .map(|name| Dependency::Local { name })
                .ok_or_else(|| "malformed local dependency: missing name".to_string()),
            RawDependency::Product(values) => {
                let name = string_at(&values, 0)
                    .ok_or_else(|| "malformed product dependency: missing name".to_string())?;
                let package_name = string_at(&values, 1).ok_or_else(|| {
                    format!("malformed product dependency '{}': missing package", name)
                })?;
                Ok(Dependency::External { name, package_name })
            }
        }
    }
}
