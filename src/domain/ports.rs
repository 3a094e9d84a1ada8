use crate::domain::dependency::Dependency;
use crate::domain::type_descriptor::TypeDescriptor;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result of extracting one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedClass {
    pub class_name: String,
    pub dependencies: Vec<Dependency>,
    pub type_descriptor: TypeDescriptor,
}

/// Per-file front-end failure
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("cannot resolve types in {path}: {message}")]
    Resolution { path: PathBuf, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Language front-end port (implemented by Infrastructure)
///
/// Parses one file, resolves its symbols against `classpath`/`sourcepath` and
/// reports the declared class with all of its outgoing dependencies.
pub trait DependencyExtractor: Send + Sync {
    fn extract_one(
        &self,
        file: &Path,
        classpath: &[String],
        sourcepath: &[String],
    ) -> std::result::Result<ExtractedClass, ExtractError>;
}

/// What a project root resolves to before extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectLayout {
    pub classpath: Vec<String>,
    pub sourcepath: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Project discovery port
pub trait ProjectDiscovery {
    fn discover(&self, project_root: &Path) -> Result<ProjectLayout>;
}
