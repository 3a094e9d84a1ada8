//! Noise policy: which dependency edges are too ubiquitous to be interesting.
//!
//! Two explicit rule sets are kept apart so the policy stays auditable:
//! - `exact`: fully-qualified names that are noise as written
//!   (primitives, boxed wrappers and their 1-D/2-D arrays, the object root,
//!   marker annotations, and a few ubiquitous core library types).
//! - `prefixes`: type families that are noise whatever follows the prefix
//!   (the generic list family, including every parametrization and array form).
//!
//! An edge is noise when either endpoint matches.

use crate::domain::dependency::Dependency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PRIMITIVES: &[&str] = &[
    "boolean", "char", "byte", "short", "int", "long", "float", "double",
];

/// Wrapper and core `java.lang` types; also denied as `T[]` and `T[][]`.
const BOXED_AND_CORE: &[&str] = &[
    "java.lang.Boolean",
    "java.lang.Character",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.String",
    "java.lang.Object",
];

/// Compiler marker annotations.
const MARKERS: &[&str] = &[
    "java.lang.Deprecated",
    "java.lang.Override",
    "java.lang.SafeVarargs",
    "java.lang.SuppressWarnings",
];

/// Core library types denied only as written, without array forms.
const CORE_TYPES: &[&str] = &["java.lang.Class", "java.util.Iterator", "java.util.Vector"];

const GENERIC_LIST_FAMILY: &str = "java.util.ArrayList";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoisePolicy {
    exact: BTreeSet<String>,
    prefixes: BTreeSet<String>,
}

impl Default for NoisePolicy {
    fn default() -> Self {
        Self::java_defaults()
    }
}

impl NoisePolicy {
    /// A policy that treats nothing as noise.
    pub fn empty() -> Self {
        Self {
            exact: BTreeSet::new(),
            prefixes: BTreeSet::new(),
        }
    }

    pub fn java_defaults() -> Self {
        let mut policy = Self::empty();
        for name in PRIMITIVES.iter().chain(MARKERS).chain(CORE_TYPES) {
            policy.exact.insert((*name).to_string());
        }
        for name in BOXED_AND_CORE {
            policy.exact.insert((*name).to_string());
            policy.exact.insert(format!("{name}[]"));
            policy.exact.insert(format!("{name}[][]"));
        }
        policy.prefixes.insert(GENERIC_LIST_FAMILY.to_string());
        policy
    }

    pub fn with_exact(mut self, name: impl Into<String>) -> Self {
        self.exact.insert(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into());
        self
    }

    pub fn exact_names(&self) -> impl Iterator<Item = &str> {
        self.exact.iter().map(String::as_str)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn is_noise_name(&self, name: &str) -> bool {
        self.exact.contains(name) || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    pub fn is_noise(&self, dependency: &Dependency) -> bool {
        self.is_noise_name(dependency.class_name_a()) || self.is_noise_name(dependency.class_name_b())
    }

    /// Returns the non-noise subset, leaving the input untouched.
    pub fn filter(&self, dependencies: &[Dependency]) -> Vec<Dependency> {
        dependencies
            .iter()
            .filter(|d| !self.is_noise(d))
            .cloned()
            .collect()
    }
}
