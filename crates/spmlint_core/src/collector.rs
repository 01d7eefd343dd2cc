use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{constants::SOURCE_EXTENSIONS, types::Target};

/// Filesystem access used while scanning target sources.
///
/// Implementations must be shareable across threads since targets are
/// scanned in parallel.
pub trait FileSystem: Sync {
    /// Returns the lines of a text file.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;

    /// Returns every file below `dir`. A missing directory yields no files.
    fn list_files_recursively(&self, dir: &Path) -> Vec<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let src = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let src = src.strip_prefix('\u{FEFF}').unwrap_or(&src);
        Ok(src.lines().map(str::to_string).collect())
    }

    fn list_files_recursively(&self, dir: &Path) -> Vec<PathBuf> {
        debug!("Walking directory tree from: {}", dir.display());
        // Ignore files have no say over which sources belong to a target.
        let walker = WalkBuilder::new(dir)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .build();

        let mut files = Vec::new();
        for res in walker {
            match res {
                // `is_file` on the path follows symlinked sources.
                Ok(dent) if dent.path().is_file() => {
                    files.push(dent.into_path());
                }
                Ok(_) => {}
                Err(e) => trace!("Skipping unreadable entry under {}: {}", dir.display(), e),
            }
        }
        files
    }
}

/// Resolves the directory holding a target's sources.
///
/// An explicit `path` wins; otherwise the conventional
/// `Sources/<name>` or `Tests/<name>` directory is used.
pub fn resolve_source_dir(manifest_dir: &Path, target: &Target) -> PathBuf {
    let dir = match &target.path {
        Some(path) => manifest_dir.join(path),
        None => manifest_dir.join(target.kind.default_source_root()).join(&target.name),
    };
    clean(dir)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

pub fn is_excluded(target: &Target, path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    target.exclude.iter().any(|fragment| path_str.contains(fragment.as_str()))
}

/// Collects the source files that belong to `target`, skipping files with
/// an unrecognised extension or matching one of the target's excludes.
pub fn collect_sources(
    manifest_dir: &Path,
    target: &Target,
    file_system: &impl FileSystem,
) -> Vec<PathBuf> {
    let source_dir = resolve_source_dir(manifest_dir, target);
    debug!("Collecting sources for target {} from {}", target.name, source_dir.display());

    let mut sources = Vec::new();
    for file in file_system.list_files_recursively(&source_dir) {
        if !is_source_file(&file) {
            warn!("Skipping non source: {}", file.display());
            continue;
        }
        if is_excluded(target, &file) {
            warn!("Skipping excluded: {}", file.display());
            continue;
        }
        trace!("Found source file: {}", file.display());
        sources.push(file);
    }
    sources.sort();

    debug!("Collected {} source files for target {}", sources.len(), target.name);
    sources
}
