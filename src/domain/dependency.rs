use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dependency kind - the structural relationship a class has to another class.
///
/// The set is owned by the front-end; the core only compares kinds and renders
/// them through [`DependencyType::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyType {
    // ============ Type Hierarchy ============
    Extends,
    Implements,

    // ============ Declarations ============
    Field,
    Parameter,
    Return,
    LocalVariable,
    Throws,

    // ============ Usage ============
    MethodInvocation,
    FieldAccess,
    Instantiation,

    // ============ Annotations ============
    Annotation,
}

impl DependencyType {
    pub const ALL: [DependencyType; 11] = [
        DependencyType::Extends,
        DependencyType::Implements,
        DependencyType::Field,
        DependencyType::Parameter,
        DependencyType::Return,
        DependencyType::LocalVariable,
        DependencyType::Throws,
        DependencyType::MethodInvocation,
        DependencyType::FieldAccess,
        DependencyType::Instantiation,
        DependencyType::Annotation,
    ];

    /// Stable textual value used by the flat relation export.
    pub fn value(&self) -> &'static str {
        match self {
            DependencyType::Extends => "EXTENDS",
            DependencyType::Implements => "IMPLEMENTS",
            DependencyType::Field => "FIELD",
            DependencyType::Parameter => "PARAMETER",
            DependencyType::Return => "RETURN",
            DependencyType::LocalVariable => "LOCAL_VARIABLE",
            DependencyType::Throws => "THROWS",
            DependencyType::MethodInvocation => "METHOD_INVOCATION",
            DependencyType::FieldAccess => "FIELD_ACCESS",
            DependencyType::Instantiation => "INSTANTIATION",
            DependencyType::Annotation => "ANNOTATION",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dependency type: {0}")]
pub struct UnknownDependencyType(pub String);

impl FromStr for DependencyType {
    type Err = UnknownDependencyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.value().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDependencyType(s.to_string()))
    }
}

/// A directed, typed edge from the declaring class (`A`) to a referenced class (`B`).
///
/// Fields are private: a `Dependency` never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    class_name_a: String,
    class_name_b: String,
    dependency_type: DependencyType,
    /// 1-based line in the declaring file, if the front-end knew it.
    #[serde(default)]
    line_number: Option<u32>,
}

impl Dependency {
    pub fn new(
        class_name_a: impl Into<String>,
        class_name_b: impl Into<String>,
        dependency_type: DependencyType,
        line_number: Option<u32>,
    ) -> Self {
        Self {
            class_name_a: class_name_a.into(),
            class_name_b: class_name_b.into(),
            dependency_type,
            line_number,
        }
    }

    pub fn class_name_a(&self) -> &str {
        &self.class_name_a
    }

    pub fn class_name_b(&self) -> &str {
        &self.class_name_b
    }

    pub fn dependency_type(&self) -> DependencyType {
        self.dependency_type
    }

    pub fn line_number(&self) -> Option<u32> {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_matches_serde_name() {
        for kind in DependencyType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.value()));
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "local_variable".parse::<DependencyType>().unwrap(),
            DependencyType::LocalVariable
        );
        assert_eq!("FIELD".parse::<DependencyType>().unwrap(), DependencyType::Field);
        assert!("INHERITS".parse::<DependencyType>().is_err());
    }

    #[test]
    fn test_missing_line_number_deserializes_as_none() {
        let dep: Dependency = serde_json::from_str(
            r#"{"class_name_a":"a.A","class_name_b":"b.B","dependency_type":"EXTENDS"}"#,
        )
        .unwrap();
        assert_eq!(dep.line_number(), None);
        assert_eq!(dep.dependency_type(), DependencyType::Extends);
    }
}
