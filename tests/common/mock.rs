//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use arch_deps::domain::ports::{
    DependencyExtractor, ExtractError, ExtractedClass, ProjectDiscovery, ProjectLayout,
};

/// Mock front-end serving canned results per file.
pub struct MockExtractor {
    results: HashMap<PathBuf, MockOutcome>,
    calls: Mutex<Vec<PathBuf>>,
}

#[derive(Clone)]
enum MockOutcome {
    Ok(ExtractedClass),
    ParseError(String),
    Panic(String),
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_class(mut self, file: impl AsRef<Path>, extracted: ExtractedClass) -> Self {
        self.results
            .insert(file.as_ref().to_path_buf(), MockOutcome::Ok(extracted));
        self
    }

    pub fn with_parse_error(mut self, file: impl AsRef<Path>, message: impl Into<String>) -> Self {
        self.results.insert(
            file.as_ref().to_path_buf(),
            MockOutcome::ParseError(message.into()),
        );
        self
    }

    pub fn with_panic(mut self, file: impl AsRef<Path>, message: impl Into<String>) -> Self {
        self.results
            .insert(file.as_ref().to_path_buf(), MockOutcome::Panic(message.into()));
        self
    }

    /// Files the pipeline asked for, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyExtractor for MockExtractor {
    fn extract_one(
        &self,
        file: &Path,
        _classpath: &[String],
        _sourcepath: &[String],
    ) -> std::result::Result<ExtractedClass, ExtractError> {
        self.calls.lock().unwrap().push(file.to_path_buf());
        match self.results.get(file) {
            Some(MockOutcome::Ok(extracted)) => Ok(extracted.clone()),
            Some(MockOutcome::ParseError(message)) => Err(ExtractError::Parse {
                path: file.to_path_buf(),
                message: message.clone(),
            }),
            Some(MockOutcome::Panic(message)) => panic!("{}", message),
            None => Err(ExtractError::Other(anyhow!(
                "no canned result for {}",
                file.display()
            ))),
        }
    }
}

/// Mock discovery returning a fixed layout.
pub struct MockDiscovery {
    pub layout: ProjectLayout,
}

impl ProjectDiscovery for MockDiscovery {
    fn discover(&self, _project_root: &Path) -> Result<ProjectLayout> {
        Ok(self.layout.clone())
    }
}

/// Discovery that always fails, as when the project root is unusable.
pub struct FailingDiscovery;

impl ProjectDiscovery for FailingDiscovery {
    fn discover(&self, project_root: &Path) -> Result<ProjectLayout> {
        Err(anyhow!("cannot read project at {}", project_root.display()))
    }
}
