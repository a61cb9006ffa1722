//! Discovery Module
//!
//! Resolves the component root and recursively collects candidate source
//! files under it.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{GeneratorConfig, DEFAULT_COMPONENT_DIR};
use crate::error::{GenerateError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE LOCATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Resolve the component root from the optional CLI argument.
///
/// The argument is normalized and recombined from its parent directory and
/// file stem, so `components/index.ts` resolves to `components/index`.
pub fn resolve_component_root(project_root: &Path, arg: Option<&str>) -> Result<PathBuf> {
    let root = match arg {
        None => project_root.join(DEFAULT_COMPONENT_DIR),
        Some(raw) => {
            let normalized = normalize_path(&project_root.join(raw));
            match (normalized.parent(), normalized.file_stem()) {
                (Some(dir), Some(stem)) => dir.join(stem),
                _ => normalized,
            }
        }
    };

    if !root.exists() {
        return Err(GenerateError::ComponentRootMissing { path: root });
    }

    Ok(root)
}

/// Lexically collapse `.` and `..` segments without touching the disk.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILE WALKER
// ═══════════════════════════════════════════════════════════════════════════════

/// Recursively find all component source files under `root`.
///
/// Entries are sorted by file name so repeated runs see the same order.
/// Symlink loops are reported by walkdir as errors and skipped. A file
/// reachable through several paths (a symlinked directory inside the root)
/// is kept only at the first path seen.
pub fn find_source_files(root: &Path, config: &GeneratorConfig) -> Vec<SourceFile> {
    let mut files = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !config.is_source_file(path) {
            continue;
        }

        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(canonical) {
            debug!("{} already found through another path", path.display());
            continue;
        }

        debug!("found source file {}", path.display());
        files.push(SourceFile {
            path: path.to_path_buf(),
            name: entry.file_name().to_string_lossy().to_string(),
        });
    }

    files
}
