use crate::domain::architecture::{Architecture, ClassName};
use crate::domain::noise::NoisePolicy;
use crate::domain::ports::{DependencyExtractor, ExtractError, ExtractedClass};
use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Extraction pipeline settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker count for a dedicated pool; `None` runs on the global rayon pool.
    pub threads: Option<usize>,
    /// Drop noise edges before storing a class.
    pub apply_noise_filter: bool,
    pub noise_policy: NoisePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Outcome of one run. The store holds the data; this only accounts for files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    pub requested: usize,
    pub stored: Vec<ClassName>,
    pub failures: Vec<FileFailure>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ExtractionReport {
    pub fn succeeded(&self) -> usize {
        self.stored.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

enum FileOutcome {
    Stored(ClassName),
    Failed(FileFailure),
}

/// Drives a [`DependencyExtractor`] over a file set and populates an [`Architecture`].
pub struct ExtractionPipeline {
    extractor: Arc<dyn DependencyExtractor>,
    config: PipelineConfig,
}

impl ExtractionPipeline {
    pub fn new(extractor: Arc<dyn DependencyExtractor>, config: PipelineConfig) -> Self {
        Self { extractor, config }
    }

    /// Extract every file concurrently; returns once all of them were attempted.
    ///
    /// A failing file is logged and skipped; it never aborts the run and never
    /// leaves an entry behind.
    pub fn run(
        &self,
        architecture: &Architecture,
        classpath: &[String],
        sourcepath: &[String],
        files: &[PathBuf],
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        info!(files = files.len(), "extracting dependencies");

        let outcomes = match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .context("Failed to build extraction thread pool")?;
                pool.install(|| self.process_all(architecture, classpath, sourcepath, files))
            }
            None => self.process_all(architecture, classpath, sourcepath, files),
        };

        let mut report = ExtractionReport {
            requested: files.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Stored(class_name) => report.stored.push(class_name),
                FileOutcome::Failed(failure) => report.failures.push(failure),
            }
        }
        report.elapsed = start.elapsed();

        info!(
            succeeded = report.succeeded(),
            failed = report.failures.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "extraction finished"
        );
        Ok(report)
    }

    fn process_all(
        &self,
        architecture: &Architecture,
        classpath: &[String],
        sourcepath: &[String],
        files: &[PathBuf],
    ) -> Vec<FileOutcome> {
        files
            .par_iter()
            .map(|file| self.process_file(architecture, classpath, sourcepath, file))
            .collect()
    }

    fn process_file(
        &self,
        architecture: &Architecture,
        classpath: &[String],
        sourcepath: &[String],
        file: &Path,
    ) -> FileOutcome {
        let result = self
            .extract_guarded(file, classpath, sourcepath)
            .and_then(|extracted| self.store(architecture, extracted));

        match result {
            Ok(class_name) => {
                debug!(file = %file.display(), class = %class_name, "stored");
                FileOutcome::Stored(class_name)
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "cannot handle file");
                FileOutcome::Failed(FileFailure {
                    file: file.to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Calls the front-end, turning a panic into an ordinary per-file error.
    fn extract_guarded(
        &self,
        file: &Path,
        classpath: &[String],
        sourcepath: &[String],
    ) -> Result<ExtractedClass, ExtractError> {
        catch_unwind(AssertUnwindSafe(|| {
            self.extractor.extract_one(file, classpath, sourcepath)
        }))
        .unwrap_or_else(|panic| {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "front-end panicked".to_string());
            Err(ExtractError::Other(anyhow!("front-end panicked: {message}")))
        })
    }

    fn store(
        &self,
        architecture: &Architecture,
        extracted: ExtractedClass,
    ) -> Result<ClassName, ExtractError> {
        let ExtractedClass {
            class_name,
            dependencies,
            type_descriptor,
        } = extracted;

        let dependencies = if self.config.apply_noise_filter {
            self.config.noise_policy.filter(&dependencies)
        } else {
            dependencies
        };

        architecture
            .put(class_name.clone(), dependencies)
            .map_err(|e| ExtractError::Other(e.into()))?;
        architecture.add_type_descriptor(type_descriptor);
        Ok(class_name)
    }
}
