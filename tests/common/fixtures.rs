//! Test fixture generators for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use arch_deps::domain::dependency::{Dependency, DependencyType};
use arch_deps::domain::ports::{ExtractedClass, ProjectLayout};
use arch_deps::domain::type_descriptor::{TypeDescriptor, TypeKind};

use super::mock::MockExtractor;

pub fn extracted(class_name: &str, dependencies: Vec<Dependency>) -> ExtractedClass {
    ExtractedClass {
        class_name: class_name.to_string(),
        dependencies,
        type_descriptor: TypeDescriptor::new(class_name, TypeKind::Class),
    }
}

pub fn three_files() -> Vec<PathBuf> {
    vec![
        PathBuf::from("src/A.java"),
        PathBuf::from("src/B.java"),
        PathBuf::from("src/C.java"),
    ]
}

/// `A` depends on `B` (field, line 10), `B` on `java.lang.String`
/// (local variable, line 4), `C` does not parse.
pub fn three_file_extractor() -> MockExtractor {
    MockExtractor::new()
        .with_class(
            "src/A.java",
            extracted(
                "A",
                vec![Dependency::new("A", "B", DependencyType::Field, Some(10))],
            ),
        )
        .with_class(
            "src/B.java",
            extracted(
                "B",
                vec![Dependency::new(
                    "B",
                    "java.lang.String",
                    DependencyType::LocalVariable,
                    Some(4),
                )],
            ),
        )
        .with_parse_error("src/C.java", "Syntax error on token \"}\"")
}

pub fn three_file_layout() -> ProjectLayout {
    ProjectLayout {
        classpath: vec!["lib/guava.jar".to_string()],
        sourcepath: vec!["src".to_string()],
        files: three_files(),
    }
}

/// A small layered project: web -> service -> repository, with some noise.
pub fn layered_project_extractor() -> MockExtractor {
    MockExtractor::new()
        .with_class(
            "web/OrderController.java",
            extracted(
                "com.shop.web.OrderController",
                vec![
                    Dependency::new(
                        "com.shop.web.OrderController",
                        "com.shop.service.OrderService",
                        DependencyType::Field,
                        Some(12),
                    ),
                    Dependency::new(
                        "com.shop.web.OrderController",
                        "com.shop.service.OrderService",
                        DependencyType::MethodInvocation,
                        Some(20),
                    ),
                    Dependency::new(
                        "com.shop.web.OrderController",
                        "java.lang.Override",
                        DependencyType::Annotation,
                        None,
                    ),
                ],
            ),
        )
        .with_class(
            "service/OrderService.java",
            extracted(
                "com.shop.service.OrderService",
                vec![
                    Dependency::new(
                        "com.shop.service.OrderService",
                        "com.shop.repo.OrderRepository",
                        DependencyType::Field,
                        Some(8),
                    ),
                    Dependency::new(
                        "com.shop.service.OrderService",
                        "java.util.ArrayList<com.shop.model.Order>",
                        DependencyType::Return,
                        Some(15),
                    ),
                ],
            ),
        )
        .with_class(
            "repo/OrderRepository.java",
            extracted("com.shop.repo.OrderRepository", Vec::new()),
        )
}

pub fn layered_project_files() -> Vec<PathBuf> {
    vec![
        PathBuf::from("web/OrderController.java"),
        PathBuf::from("service/OrderService.java"),
        PathBuf::from("repo/OrderRepository.java"),
    ]
}
