use crate::domain::ports::{DependencyExtractor, ExtractError, ExtractedClass};
use std::path::{Path, PathBuf};

pub const DUMP_SUFFIX: &str = ".deps.json";

/// Front-end adapter over pre-computed dependency dumps.
///
/// An external indexer serializes one [`ExtractedClass`] per source file as
/// `<file>.deps.json`, either next to the source or mirrored under a dump
/// directory. Types were resolved when the dump was written, so classpath and
/// sourcepath are not consulted.
#[derive(Debug, Clone, Default)]
pub struct JsonDependencyExtractor {
    mirror: Option<Mirror>,
}

#[derive(Debug, Clone)]
struct Mirror {
    project_root: PathBuf,
    dump_dir: PathBuf,
}

impl JsonDependencyExtractor {
    /// Dumps live next to their source files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dumps live under `dump_dir`, at the source's path relative to `project_root`.
    pub fn mirrored(project_root: impl Into<PathBuf>, dump_dir: impl Into<PathBuf>) -> Self {
        Self {
            mirror: Some(Mirror {
                project_root: project_root.into(),
                dump_dir: dump_dir.into(),
            }),
        }
    }

    pub fn dump_path(&self, file: &Path) -> PathBuf {
        let base = match &self.mirror {
            Some(m) => m
                .dump_dir
                .join(file.strip_prefix(&m.project_root).unwrap_or(file)),
            None => file.to_path_buf(),
        };
        let mut name = base.into_os_string();
        name.push(DUMP_SUFFIX);
        PathBuf::from(name)
    }
}

impl DependencyExtractor for JsonDependencyExtractor {
    fn extract_one(
        &self,
        file: &Path,
        _classpath: &[String],
        _sourcepath: &[String],
    ) -> Result<ExtractedClass, ExtractError> {
        let dump = self.dump_path(file);
        let content = std::fs::read_to_string(&dump).map_err(|source| ExtractError::Io {
            path: dump.clone(),
            source,
        })?;
        let extracted: ExtractedClass =
            serde_json::from_str(&content).map_err(|e| ExtractError::Parse {
                path: dump.clone(),
                message: e.to_string(),
            })?;
        if extracted.class_name.trim().is_empty() {
            return Err(ExtractError::Resolution {
                path: file.to_path_buf(),
                message: "no class name in dump".to_string(),
            });
        }
        Ok(extracted)
    }
}
