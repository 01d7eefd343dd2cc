use dashmap::DashMap;
use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::{
    collector::{FileSystem, collect_sources},
    parser::extract_module,
    types::{Package, Target, TargetKind},
};

/// One import declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImport {
    pub file: PathBuf,
    /// 1-based
    pub line_number: usize,
    pub raw_text: String,
    pub module: String,
}

impl SourceImport {
    /// Builds a `SourceImport` from a line of source when the line is an
    /// import declaration.
    pub fn from_line(file: &Path, line: &str, line_number: usize) -> Option<Self> {
        let module = extract_module(line)?;
        Some(Self {
            file: file.to_path_buf(),
            line_number,
            raw_text: line.to_string(),
            module: module.to_string(),
        })
    }

    /// The file name without its directory, for display.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.to_string_lossy().to_string())
    }
}

/// The imports found across all source files of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetImport {
    pub target_name: String,
    pub kind: TargetKind,
    pub source_imports: Vec<SourceImport>,
}

/// The imports of every target in a package, in target declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageImport {
    pub target_imports: Vec<TargetImport>,
}

impl PackageImport {
    pub fn new(target_imports: Vec<TargetImport>) -> Self {
        Self { target_imports }
    }

    /// Scans the sources of every target in `package`.
    ///
    /// Targets are scanned in parallel; files shared between targets are
    /// only read once. Unreadable files are logged and skipped.
    pub fn scan(manifest_dir: &Path, package: &Package, fs: &impl FileSystem) -> Self {
        debug!("Scanning imports for {} targets", package.targets.len());
        let cache: DashMap<PathBuf, Vec<SourceImport>> = DashMap::new();

        let target_imports: Vec<TargetImport> = package
            .targets
            .par_iter()
            .map(|target| scan_target(manifest_dir, target, fs, &cache))
            .collect();

        debug!("Scanned {} source files", cache.len());
        Self { target_imports }
    }

    pub fn for_target(&self, target_name: &str) -> Option<&TargetImport> {
        self.target_imports.iter().find(|t| t.target_name == target_name)
    }
}

fn scan_target(
    manifest_dir: &Path,
    target: &Target,
    fs: &impl FileSystem,
    cache: &DashMap<PathBuf, Vec<SourceImport>>,
) -> TargetImport {
    trace!("Scanning target: {}", target.name);
    let mut source_imports = Vec::new();

    for source in collect_sources(manifest_dir, target, fs) {
        if let Some(cached) = cache.get(&source) {
            trace!("Cache hit for imports: {}", source.display());
            source_imports.extend(cached.iter().cloned());
            continue;
        }

        let lines = match fs.read_lines(&source) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Error processing file {}: {:#}", source.display(), e);
                continue;
            }
        };

        let found: Vec<SourceImport> = lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| SourceImport::from_line(&source, line, idx + 1))
            .collect();

        debug!("Found {} imports in {}", found.len(), source.display());
        source_imports.extend(found.iter().cloned());
        cache.insert(source, found);
    }

    TargetImport { target_name: target.name.clone(), kind: target.kind, source_imports }
}
