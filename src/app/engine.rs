use crate::app::dto::{ArchitectureSummary, ClassDependencies, DependencyDto};
use crate::domain::architecture::Architecture;
use crate::domain::noise::NoisePolicy;
use crate::domain::pipeline::{ExtractionPipeline, ExtractionReport};
use crate::domain::ports::{ProjectDiscovery, ProjectLayout};
use crate::domain::type_descriptor::TypeDescriptor;
use anyhow::{Context as _, Result, anyhow};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// One analysed project: its layout, the populated store and the latest run's report.
pub struct ArchitectureEngine {
    project_root: PathBuf,
    layout: ProjectLayout,
    pipeline: ExtractionPipeline,
    architecture: Arc<Architecture>,
    last_report: RwLock<ExtractionReport>,
}

impl ArchitectureEngine {
    /// Discover the project under `project_root` and extract every file.
    ///
    /// Only discovery failures abort; per-file failures end up in the report.
    pub fn analyze(
        project_root: &Path,
        discovery: &dyn ProjectDiscovery,
        pipeline: ExtractionPipeline,
    ) -> Result<Self> {
        let layout = discovery
            .discover(project_root)
            .with_context(|| format!("Failed to discover project: {}", project_root.display()))?;
        info!(
            root = %project_root.display(),
            files = layout.files.len(),
            classpath = layout.classpath.len(),
            sourcepath = layout.sourcepath.len(),
            "project discovered"
        );

        let architecture = Arc::new(Architecture::new());
        let report = pipeline.run(
            &architecture,
            &layout.classpath,
            &layout.sourcepath,
            &layout.files,
        )?;

        Ok(Self {
            project_root: project_root.to_path_buf(),
            layout,
            pipeline,
            architecture,
            last_report: RwLock::new(report),
        })
    }

    pub fn architecture(&self) -> &Arc<Architecture> {
        &self.architecture
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn last_report(&self) -> ExtractionReport {
        self.last_report
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-extract `files` into the existing store; their classes are replaced in place.
    ///
    /// Classes whose file now fails keep their previous entry.
    pub fn refresh(&self, files: &[PathBuf]) -> Result<ExtractionReport> {
        let report = self.pipeline.run(
            &self.architecture,
            &self.layout.classpath,
            &self.layout.sourcepath,
            files,
        )?;
        *self
            .last_report
            .write()
            .unwrap_or_else(PoisonError::into_inner) = report.clone();
        Ok(report)
    }

    pub fn summary(&self) -> ArchitectureSummary {
        let report = self.last_report();
        ArchitectureSummary {
            project_root: self.project_root.to_string_lossy().to_string(),
            project_files: self.layout.files.len(),
            requested_files: report.requested,
            class_count: self.architecture.class_count(),
            dependency_count: self.architecture.dependency_count(),
            relation_count: self.architecture.export_all().len(),
            type_descriptor_count: self.architecture.type_descriptor_count(),
            module_count: self.architecture.modules().len(),
            failures: report.failures,
        }
    }

    pub fn class_dependencies(
        &self,
        class_name: &str,
        policy: Option<&NoisePolicy>,
    ) -> Result<ClassDependencies> {
        let deps = self
            .architecture
            .get(class_name)
            .ok_or_else(|| anyhow!("Class not found: {}", class_name))?;
        let dependencies = deps
            .iter()
            .filter(|d| policy.is_none_or(|p| !p.is_noise(d)))
            .map(DependencyDto::from)
            .collect();
        let descriptor = self.architecture.type_descriptor(class_name);
        Ok(ClassDependencies {
            class_name: class_name.to_string(),
            simple_name: descriptor.as_ref().map(|td| td.simple_name().to_string()),
            kind: descriptor.as_ref().map(|td| td.kind),
            is_abstract: descriptor.as_ref().map(TypeDescriptor::is_abstract),
            dependencies,
        })
    }
}
