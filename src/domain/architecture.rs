use crate::domain::dependency::{Dependency, DependencyType};
use crate::domain::export::to_relation_line;
use crate::domain::noise::NoisePolicy;
use crate::domain::type_descriptor::TypeDescriptor;
use dashmap::DashMap;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Class name (fully-qualified)
pub type ClassName = String;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchitectureError {
    #[error("dependency of {found} cannot be stored under {class_name}")]
    ForeignDependency { class_name: String, found: String },
}

/// Architecture store - the dependency model of one analysis run.
///
/// Writers replace a whole class entry or append a whole descriptor; readers
/// get snapshots and never observe a half-written entry.
#[derive(Debug, Default)]
pub struct Architecture {
    classes: DashMap<ClassName, Arc<[Dependency]>>,
    modules: DashMap<String, String>,
    type_descriptors: RwLock<Vec<TypeDescriptor>>,
}

impl Architecture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or create) the entry for `class_name`.
    ///
    /// Every dependency must originate from `class_name`; otherwise nothing is stored.
    pub fn put(
        &self,
        class_name: impl Into<ClassName>,
        dependencies: Vec<Dependency>,
    ) -> Result<(), ArchitectureError> {
        let class_name = class_name.into();
        if let Some(foreign) = dependencies
            .iter()
            .find(|d| d.class_name_a() != class_name)
        {
            return Err(ArchitectureError::ForeignDependency {
                found: foreign.class_name_a().to_string(),
                class_name,
            });
        }
        self.classes.insert(class_name, dependencies.into());
        Ok(())
    }

    /// Refresh a class after the initial run. Same contract as [`Architecture::put`].
    pub fn update_dependencies(
        &self,
        class_name: impl Into<ClassName>,
        dependencies: Vec<Dependency>,
    ) -> Result<(), ArchitectureError> {
        self.put(class_name, dependencies)
    }

    pub fn get(&self, class_name: &str) -> Option<Arc<[Dependency]>> {
        self.classes.get(class_name).map(|entry| entry.value().clone())
    }

    pub fn contains_class(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn class_names(&self) -> HashSet<ClassName> {
        self.classes.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Every stored dependency, across all classes, unfiltered.
    pub fn all_dependencies(&self) -> Vec<Dependency> {
        self.classes
            .iter()
            .flat_map(|entry| entry.value().iter().cloned().collect::<Vec<_>>())
            .collect()
    }

    pub fn dependency_count(&self) -> usize {
        self.classes.iter().map(|entry| entry.value().len()).sum()
    }

    /// First dependency of `class_name_a` matching target, kind and line.
    ///
    /// All three conditions must hold. `line_number_a == None` matches only
    /// dependencies whose own line is unknown.
    pub fn find_dependency(
        &self,
        class_name_a: &str,
        class_name_b: &str,
        line_number_a: Option<u32>,
        dependency_type: DependencyType,
    ) -> Option<Dependency> {
        let entry = self.classes.get(class_name_a)?;
        entry
            .value()
            .iter()
            .find(|d| {
                d.line_number() == line_number_a
                    && d.class_name_b() == class_name_b
                    && d.dependency_type() == dependency_type
            })
            .cloned()
    }

    /// Dependencies of `class_name` with noise removed; the stored entry is untouched.
    pub fn filtered_dependencies(
        &self,
        class_name: &str,
        policy: &NoisePolicy,
    ) -> Option<Vec<Dependency>> {
        self.get(class_name).map(|deps| policy.filter(&deps))
    }

    /// Sorted class names matching `pattern`.
    pub fn search_classes(&self, pattern: &Regex) -> Vec<ClassName> {
        let mut names: Vec<ClassName> = self
            .classes
            .iter()
            .filter(|entry| pattern.is_match(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Relation listing of every stored dependency, one line per distinct record.
    pub fn export_all(&self) -> HashSet<String> {
        self.classes
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .map(to_relation_line)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Relation listing with `policy` applied to each class's dependencies.
    pub fn export_filtered(&self, policy: &NoisePolicy) -> HashSet<String> {
        self.classes
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|d| !policy.is_noise(d))
                    .map(to_relation_line)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    // ---- Modules ----

    pub fn put_module(&self, name: impl Into<String>, description: impl Into<String>) {
        self.modules.insert(name.into(), description.into());
    }

    pub fn module_description(&self, name: &str) -> Option<String> {
        self.modules.get(name).map(|entry| entry.value().clone())
    }

    pub fn modules(&self) -> BTreeMap<String, String> {
        self.modules
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    // ---- Type descriptors ----

    pub fn add_type_descriptor(&self, descriptor: TypeDescriptor) {
        self.type_descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(descriptor);
    }

    pub fn type_descriptors(&self) -> Vec<TypeDescriptor> {
        self.type_descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn type_descriptor_count(&self) -> usize {
        self.type_descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Most recently appended descriptor for `qualified_name`.
    pub fn type_descriptor(&self, qualified_name: &str) -> Option<TypeDescriptor> {
        self.type_descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|td| td.qualified_name == qualified_name)
            .cloned()
    }
}
