use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use thiserror::Error;

use super::category::TagCategory;
use super::metrics::Points;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub key: String,
    pub label: String,
    pub tag: String,
    pub category: TagCategory,
    pub cluster: String,
    pub position: Position,
    /// Synthetic identifier; empty unless the node is a user.
    pub id: String,
    pub points: Points,
    pub event_number: u32,
    pub color: String,
    pub size: f32,
    pub image: String,
    /// Extra dataset fields merged with the owning cluster's fields.
    pub attributes: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub size: f32,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub key: String,
    pub fields: Map<String, Value>,
}

impl Cluster {
    pub fn display_label(&self) -> &str {
        ["clusterLabel", "label"]
            .iter()
            .find_map(|field| self.fields.get(*field).and_then(Value::as_str))
            .unwrap_or(&self.key)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub key: String,
    pub image: String,
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InsertError {
    #[error("node `{0}` already exists")]
    DuplicateNode(String),
    #[error("edge {from} -> {to} references missing node `{missing}`")]
    MissingEndpoint {
        from: String,
        to: String,
        missing: String,
    },
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },
}

/// Directed graph of nodes keyed by dataset key, with edges in insertion order.
#[derive(Clone, Debug, Default)]
pub struct EntityGraph {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
    edges: Vec<Edge>,
    edge_pairs: HashSet<(String, String)>,
    outgoing: HashMap<String, Vec<usize>>,
    incoming: HashMap<String, Vec<usize>>,
}

impl EntityGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|key| self.nodes.get(key))
    }

    pub(super) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge_pairs
            .contains(&(source.to_owned(), target.to_owned()))
    }

    /// True when an edge joins the two nodes in either direction.
    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        self.outgoing_edges(a).any(|edge| edge.target == b)
            || self.incoming_edges(a).any(|edge| edge.source == b)
    }

    pub fn outgoing_edges<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.outgoing
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.edges.get(index))
    }

    pub fn incoming_edges<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.incoming
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.edges.get(index))
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), InsertError> {
        if self.nodes.contains_key(&node.key) {
            return Err(InsertError::DuplicateNode(node.key));
        }

        self.order.push(node.key.clone());
        self.nodes.insert(node.key.clone(), node);
        Ok(())
    }

    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        size: f32,
        color: &str,
    ) -> Result<usize, InsertError> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(InsertError::MissingEndpoint {
                    from: source.to_owned(),
                    to: target.to_owned(),
                    missing: endpoint.to_owned(),
                });
            }
        }

        if !self
            .edge_pairs
            .insert((source.to_owned(), target.to_owned()))
        {
            return Err(InsertError::DuplicateEdge {
                from: source.to_owned(),
                to: target.to_owned(),
            });
        }

        let index = self.edges.len();
        self.edges.push(Edge {
            source: source.to_owned(),
            target: target.to_owned(),
            size,
            color: color.to_owned(),
        });
        self.outgoing
            .entry(source.to_owned())
            .or_default()
            .push(index);
        self.incoming
            .entry(target.to_owned())
            .or_default()
            .push(index);
        Ok(index)
    }
}

#[cfg(test)]
pub(crate) fn test_node(key: &str, tag: &str, cluster: &str) -> Node {
    Node {
        key: key.to_owned(),
        label: key.to_owned(),
        tag: tag.to_owned(),
        category: TagCategory::from_tag(tag),
        cluster: cluster.to_owned(),
        position: Position::default(),
        id: String::new(),
        points: Points::Empty,
        event_number: 0,
        color: String::new(),
        size: 1.0,
        image: String::new(),
        attributes: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> EntityGraph {
        let mut graph = EntityGraph::default();
        for key in ["a", "b", "c"] {
            graph.add_node(test_node(key, "Person", "c1")).unwrap();
        }
        graph.add_edge("a", "b", 1.0, "#000").unwrap();
        graph.add_edge("b", "c", 1.0, "#000").unwrap();
        graph
    }

    #[test]
    fn nodes_keep_insertion_order() {
        let graph = triangle();
        let keys = graph.nodes().map(|node| node.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut graph = triangle();
        let error = graph.add_node(test_node("a", "Tool", "c2")).unwrap_err();
        assert_eq!(error, InsertError::DuplicateNode("a".into()));
        assert_eq!(graph.node("a").unwrap().tag, "Person");
    }

    #[test]
    fn edges_need_both_endpoints() {
        let mut graph = triangle();
        let error = graph.add_edge("a", "zzz", 1.0, "#000").unwrap_err();
        assert!(matches!(
            error,
            InsertError::MissingEndpoint { ref missing, .. } if missing == "zzz"
        ));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn duplicate_pair_is_rejected_but_reverse_pair_is_not() {
        let mut graph = triangle();
        assert!(matches!(
            graph.add_edge("a", "b", 1.0, "#000"),
            Err(InsertError::DuplicateEdge { .. })
        ));
        assert!(graph.add_edge("b", "a", 1.0, "#000").is_ok());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn adjacency_ignores_direction() {
        let graph = triangle();
        assert!(graph.has_edge("a", "b"));
        assert!(!graph.has_edge("b", "a"));
        assert!(graph.are_adjacent("b", "a"));
        assert!(graph.are_adjacent("b", "c"));
        assert!(!graph.are_adjacent("a", "c"));
    }

    #[test]
    fn cluster_label_prefers_display_fields() {
        let mut fields = Map::new();
        let cluster = Cluster {
            key: "c1".into(),
            fields: fields.clone(),
        };
        assert_eq!(cluster.display_label(), "c1");

        fields.insert("clusterLabel".into(), Value::from("Research"));
        let cluster = Cluster {
            key: "c1".into(),
            fields,
        };
        assert_eq!(cluster.display_label(), "Research");
    }
}
