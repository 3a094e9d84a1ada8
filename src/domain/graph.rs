use crate::domain::architecture::Architecture;
use crate::domain::dependency::DependencyType;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

/// Dependency graph - class-level view of an [`Architecture`] for graph consumers.
///
/// One node per class name seen at either end of an edge, one edge per stored
/// dependency (parallel edges are kept).
pub struct DependencyGraph {
    pub graph: DiGraph<String, DependencyType>,
    class_to_node: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn from_architecture(architecture: &Architecture) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            class_to_node: HashMap::new(),
        };
        for dep in architecture.all_dependencies() {
            let source = graph.get_or_create_node(dep.class_name_a());
            let target = graph.get_or_create_node(dep.class_name_b());
            graph.graph.add_edge(source, target, dep.dependency_type());
        }
        // Classes without outgoing edges still belong to the project.
        for class_name in architecture.class_names() {
            graph.get_or_create_node(&class_name);
        }
        graph
    }

    fn get_or_create_node(&mut self, class_name: &str) -> NodeIndex {
        if let Some(&idx) = self.class_to_node.get(class_name) {
            return idx;
        }
        let idx = self.graph.add_node(class_name.to_string());
        self.class_to_node.insert(class_name.to_string(), idx);
        idx
    }

    pub fn get_node_by_class(&self, class_name: &str) -> Option<NodeIndex> {
        self.class_to_node.get(class_name).copied()
    }

    /// Classes `class_name` depends on.
    pub fn dependencies_of(&self, class_name: &str) -> BTreeSet<String> {
        self.neighbors(class_name, Direction::Outgoing)
    }

    /// Classes that depend on `class_name`.
    pub fn dependents_of(&self, class_name: &str) -> BTreeSet<String> {
        self.neighbors(class_name, Direction::Incoming)
    }

    fn neighbors(&self, class_name: &str, direction: Direction) -> BTreeSet<String> {
        let Some(idx) = self.get_node_by_class(class_name) else {
            return BTreeSet::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .filter(|&n| n != idx)
            .map(|n| self.graph[n].clone())
            .collect()
    }
}
