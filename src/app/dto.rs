use crate::domain::dependency::Dependency;
use crate::domain::pipeline::FileFailure;
use crate::domain::type_descriptor::TypeKind;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ArchitectureSummary {
    pub project_root: String,
    /// Source files discovered in the project.
    pub project_files: usize,
    /// Files attempted by the latest run; fewer than `project_files` after a partial refresh.
    pub requested_files: usize,
    pub class_count: usize,
    pub dependency_count: usize,
    pub relation_count: usize,
    pub type_descriptor_count: usize,
    pub module_count: usize,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassDependencies {
    pub class_name: String,
    /// Descriptor-derived fields; absent when the front-end recorded no descriptor.
    pub simple_name: Option<String>,
    pub kind: Option<TypeKind>,
    pub is_abstract: Option<bool>,
    pub dependencies: Vec<DependencyDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyDto {
    pub target: String,
    pub kind: String,
    /// 1-based; absent when unknown.
    pub line: Option<u32>,
}

impl From<&Dependency> for DependencyDto {
    fn from(dep: &Dependency) -> Self {
        Self {
            target: dep.class_name_b().to_string(),
            kind: dep.dependency_type().value().to_string(),
            line: dep.line_number(),
        }
    }
}
