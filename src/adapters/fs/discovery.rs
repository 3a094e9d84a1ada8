use crate::domain::ports::{ProjectDiscovery, ProjectLayout};
use anyhow::{Result, bail};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Conventional source roots, in lookup order.
const SOURCE_ROOTS: &[&str] = &["src/main/java", "src/test/java"];
const FALLBACK_SOURCE_ROOT: &str = "src";

/// Directories that hold binary dependencies.
const LIBRARY_DIRS: &[&str] = &["lib", "libs", "target/dependency"];

/// Build output directories directly under the project root are never walked for sources.
const SKIPPED_DIRS: &[&str] = &["target", "build", "out", "bin", "node_modules"];

/// File system project discovery
///
/// Conventions:
/// - sourcepath: `src/main/java` and `src/test/java` when present, else `src`, else the root
/// - classpath: `*.jar` under `lib/`, `libs/` and `target/dependency/`
/// - files: every file with the configured extension, except under hidden directories
///   and top-level build output directories
pub struct FsProjectDiscovery {
    extension: String,
}

impl FsProjectDiscovery {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }
}

impl Default for FsProjectDiscovery {
    fn default() -> Self {
        Self::new("java")
    }
}

impl ProjectDiscovery for FsProjectDiscovery {
    fn discover(&self, project_root: &Path) -> Result<ProjectLayout> {
        if !project_root.is_dir() {
            bail!("Project root is not a directory: {}", project_root.display());
        }

        let mut sourcepath: Vec<String> = SOURCE_ROOTS
            .iter()
            .map(|dir| project_root.join(dir))
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.to_string_lossy().into_owned())
            .collect();
        if sourcepath.is_empty() {
            let fallback = project_root.join(FALLBACK_SOURCE_ROOT);
            let root = if fallback.is_dir() {
                fallback
            } else {
                project_root.to_path_buf()
            };
            sourcepath.push(root.to_string_lossy().into_owned());
        }

        let classpath: BTreeSet<String> = LIBRARY_DIRS
            .iter()
            .map(|dir| project_root.join(dir))
            .filter(|dir| dir.is_dir())
            .flat_map(|dir| files_with_extension(&dir, "jar", false))
            .map(|jar| jar.to_string_lossy().into_owned())
            .collect();

        let files: BTreeSet<PathBuf> = files_with_extension(project_root, &self.extension, true)
            .into_iter()
            .collect();

        Ok(ProjectLayout {
            classpath: classpath.into_iter().collect(),
            sourcepath,
            files: files.into_iter().collect(),
        })
    }
}

fn files_with_extension(root: &Path, extension: &str, skip_build_dirs: bool) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, skip_build_dirs))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some(extension))
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn is_skipped_dir(entry: &DirEntry, skip_build_dirs: bool) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    // Deeper matches are package names, e.g. `com/acme/build`.
    skip_build_dirs && entry.depth() == 1 && SKIPPED_DIRS.iter().any(|d| *d == name)
}
