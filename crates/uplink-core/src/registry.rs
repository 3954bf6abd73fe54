//! Node registry - the fixed catalogue of selectable scene locations

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::section::Section;
use crate::Vec3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Node registry is empty")]
    Empty,
    #[error("Duplicate node for section {0}")]
    Duplicate(Section),
    #[error("No node for section {0}")]
    Missing(Section),
}

/// One selectable location in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Section this node opens
    pub id: Section,
    /// Display label
    pub label: String,
    /// Position in scene space
    pub position: Vec3,
    /// Color as RGB (0.0-1.0)
    pub color: [f32; 3],
    /// Uniform size of the node marker
    pub size: f32,
}

impl Node {
    /// Node with the section's default label and color
    pub fn new(id: Section, position: Vec3, size: f32) -> Self {
        Self {
            id,
            label: id.default_label().to_string(),
            position,
            color: id.default_color(),
            size,
        }
    }
}

/// Connection from the hub to another node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Section,
    pub to: Section,
}

/// Ordered, immutable catalogue of nodes, exactly one per section.
///
/// The first node is the hub; every other node is connected to it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
}

impl NodeRegistry {
    /// Build a registry, checking that every section has exactly one node
    pub fn new(nodes: Vec<Node>) -> Result<Self, RegistryError> {
        if nodes.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, node) in nodes.iter().enumerate() {
            if nodes[..i].iter().any(|n| n.id == node.id) {
                return Err(RegistryError::Duplicate(node.id));
            }
        }

        if let Some(missing) = Section::ALL
            .into_iter()
            .find(|section| !nodes.iter().any(|n| n.id == *section))
        {
            return Err(RegistryError::Missing(missing));
        }

        Ok(Self { nodes })
    }

    pub fn get(&self, id: Section) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn hub(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hub-to-node edges, one per non-hub node, in registry order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let hub = self.hub().id;
        self.nodes[1..].iter().map(move |n| Edge { from: hub, to: n.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_nodes() -> Vec<Node> {
        Section::ALL
            .into_iter()
            .enumerate()
            .map(|(i, s)| Node::new(s, [i as f32, 0.0, 0.0], 1.0))
            .collect()
    }

    #[test]
    fn test_registry_accepts_one_node_per_section() {
        let registry = NodeRegistry::new(all_nodes()).unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.hub().id, Section::Profile);
        assert_eq!(registry.get(Section::Skills).unwrap().position, [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_registry_rejects_missing_and_duplicate() {
        let mut nodes = all_nodes();
        nodes.pop();
        assert_eq!(
            NodeRegistry::new(nodes.clone()),
            Err(RegistryError::Missing(Section::Contact))
        );

        nodes.push(Node::new(Section::Skills, [9.0, 9.0, 9.0], 1.0));
        assert_eq!(
            NodeRegistry::new(nodes),
            Err(RegistryError::Duplicate(Section::Skills))
        );

        assert_eq!(NodeRegistry::new(Vec::new()), Err(RegistryError::Empty));
    }

    #[test]
    fn test_edges_connect_hub_to_every_other_node() {
        let registry = NodeRegistry::new(all_nodes()).unwrap();
        let edges: Vec<_> = registry.edges().collect();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.from == Section::Profile));
        assert_eq!(edges[0].to, Section::Experience);
        assert_eq!(edges[3].to, Section::Contact);
    }
}
