//! ArchitectureEngine integration tests using mock collaborators.

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arch_deps::app::engine::ArchitectureEngine;
use arch_deps::domain::dependency::{Dependency, DependencyType};
use arch_deps::domain::graph::DependencyGraph;
use arch_deps::domain::noise::NoisePolicy;
use arch_deps::domain::pipeline::{ExtractionPipeline, PipelineConfig};
use arch_deps::domain::ports::ProjectLayout;
use arch_deps::domain::type_descriptor::{TypeDescriptor, TypeKind};

use common::fixtures::{
    extracted, layered_project_extractor, layered_project_files, three_file_extractor,
    three_file_layout,
};
use common::mock::{FailingDiscovery, MockDiscovery, MockExtractor};

fn layered_engine() -> ArchitectureEngine {
    let discovery = MockDiscovery {
        layout: ProjectLayout {
            files: layered_project_files(),
            ..Default::default()
        },
    };
    let pipeline = ExtractionPipeline::new(
        Arc::new(layered_project_extractor()),
        PipelineConfig::default(),
    );
    ArchitectureEngine::analyze(Path::new("/shop"), &discovery, pipeline).unwrap()
}

#[test]
fn test_summary_counts() {
    let discovery = MockDiscovery {
        layout: three_file_layout(),
    };
    let pipeline = ExtractionPipeline::new(Arc::new(three_file_extractor()), PipelineConfig::default());
    let engine = ArchitectureEngine::analyze(Path::new("/proj"), &discovery, pipeline).unwrap();

    let summary = engine.summary();
    assert_eq!(summary.project_files, 3);
    assert_eq!(summary.requested_files, 3);
    assert_eq!(summary.class_count, 2);
    assert_eq!(summary.dependency_count, 2);
    assert_eq!(summary.relation_count, 2);
    assert_eq!(summary.type_descriptor_count, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(engine.layout().classpath, vec!["lib/guava.jar".to_string()]);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["class_count"], 2);
}

#[test]
fn test_discovery_failure_aborts() {
    let pipeline = ExtractionPipeline::new(Arc::new(MockExtractor::new()), PipelineConfig::default());
    let result = ArchitectureEngine::analyze(Path::new("/nowhere"), &FailingDiscovery, pipeline);
    assert!(result.is_err());
}

#[test]
fn test_class_dependencies_with_and_without_policy() {
    let engine = layered_engine();

    let raw = engine
        .class_dependencies("com.shop.web.OrderController", None)
        .unwrap();
    assert_eq!(raw.dependencies.len(), 3);

    let policy = NoisePolicy::default();
    let filtered = engine
        .class_dependencies("com.shop.web.OrderController", Some(&policy))
        .unwrap();
    assert_eq!(filtered.dependencies.len(), 2);
    assert!(filtered
        .dependencies
        .iter()
        .all(|d| d.target == "com.shop.service.OrderService"));

    assert!(engine.class_dependencies("com.shop.Missing", None).is_err());
}

#[test]
fn test_class_dependencies_carry_descriptor() {
    let engine = layered_engine();
    let view = engine
        .class_dependencies("com.shop.repo.OrderRepository", None)
        .unwrap();
    assert_eq!(view.simple_name.as_deref(), Some("OrderRepository"));
    assert_eq!(view.kind, Some(TypeKind::Class));
    assert_eq!(view.is_abstract, Some(false));

    let mut port = TypeDescriptor::new("com.shop.repo.Store", TypeKind::Interface);
    port.modifiers.push("public".to_string());
    engine.architecture().put("com.shop.repo.Store", Vec::new()).unwrap();
    engine.architecture().add_type_descriptor(port);
    let view = engine.class_dependencies("com.shop.repo.Store", None).unwrap();
    assert_eq!(view.is_abstract, Some(true));

    // A class stored without a descriptor still resolves.
    engine.architecture().put("com.shop.Bare", Vec::new()).unwrap();
    let view = engine.class_dependencies("com.shop.Bare", None).unwrap();
    assert_eq!(view.simple_name, None);
    assert_eq!(view.is_abstract, None);
}

#[test]
fn test_find_dependency_through_engine() {
    let engine = layered_engine();
    let arch = engine.architecture();

    let found = arch
        .find_dependency(
            "com.shop.web.OrderController",
            "java.lang.Override",
            None,
            DependencyType::Annotation,
        )
        .unwrap();
    assert_eq!(found.line_number(), None);

    // Line-less query must not pick up the field edge at line 12.
    assert!(arch
        .find_dependency(
            "com.shop.web.OrderController",
            "com.shop.service.OrderService",
            None,
            DependencyType::Field,
        )
        .is_none());
}

#[test]
fn test_refresh_replaces_subset() {
    let discovery = MockDiscovery {
        layout: ProjectLayout {
            files: vec![PathBuf::from("src/A.java")],
            ..Default::default()
        },
    };
    // The same mock serves the initial run and the refresh; only put/update semantics matter here.
    let extractor = MockExtractor::new()
        .with_class(
            "src/A.java",
            extracted("A", vec![Dependency::new("A", "B", DependencyType::Field, Some(1))]),
        )
        .with_parse_error("src/Broken.java", "bad");
    let pipeline = ExtractionPipeline::new(Arc::new(extractor), PipelineConfig::default());
    let engine = ArchitectureEngine::analyze(Path::new("/proj"), &discovery, pipeline).unwrap();
    assert!(engine.last_report().is_complete());

    let report = engine
        .refresh(&[PathBuf::from("src/A.java"), PathBuf::from("src/Broken.java")])
        .unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(engine.last_report().failures.len(), 1);
    assert_eq!(engine.architecture().class_count(), 1);
    assert_eq!(engine.architecture().type_descriptor_count(), 2);
}

#[test]
fn test_summary_after_partial_refresh() {
    let engine = layered_engine();
    assert_eq!(engine.summary().requested_files, 3);

    let report = engine
        .refresh(&[PathBuf::from("repo/OrderRepository.java")])
        .unwrap();
    assert!(report.is_complete());

    let summary = engine.summary();
    assert_eq!(summary.project_files, 3);
    assert_eq!(summary.requested_files, 1);
    assert!(summary.failures.is_empty());
    assert_eq!(summary.class_count, 3);
}

#[test]
fn test_update_dependencies_after_run() {
    let engine = layered_engine();
    let arch = engine.architecture();

    arch.update_dependencies(
        "com.shop.repo.OrderRepository",
        vec![Dependency::new(
            "com.shop.repo.OrderRepository",
            "com.shop.model.Order",
            DependencyType::Return,
            Some(3),
        )],
    )
    .unwrap();
    assert!(arch
        .export_all()
        .contains("com.shop.repo.OrderRepository,RETURN,com.shop.model.Order,3"));

    // Edges of another class are refused.
    assert!(arch
        .update_dependencies(
            "com.shop.repo.OrderRepository",
            vec![Dependency::new("x.Y", "com.shop.model.Order", DependencyType::Return, None)],
        )
        .is_err());
}

#[test]
fn test_dependency_graph_view() {
    let engine = layered_engine();
    let graph = DependencyGraph::from_architecture(engine.architecture());

    assert!(graph
        .dependents_of("com.shop.service.OrderService")
        .contains("com.shop.web.OrderController"));
    assert!(graph
        .dependencies_of("com.shop.service.OrderService")
        .contains("com.shop.repo.OrderRepository"));
    assert!(graph.get_node_by_class("com.shop.repo.OrderRepository").is_some());
}
