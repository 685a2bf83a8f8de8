use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::entity::{Edge, EntityGraph, Node};

/// Enabled clusters and tags. A key missing from a mapping is disabled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    known_clusters: BTreeSet<String>,
    known_tags: BTreeSet<String>,
    clusters: BTreeMap<String, bool>,
    tags: BTreeMap<String, bool>,
}

impl FilterState {
    /// Starts with every known key enabled.
    pub fn new<C, T>(clusters: C, tags: T) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let known_clusters = clusters.into_iter().map(Into::into).collect::<BTreeSet<_>>();
        let known_tags = tags.into_iter().map(Into::into).collect::<BTreeSet<_>>();

        Self {
            clusters: known_clusters.iter().map(|key| (key.clone(), true)).collect(),
            tags: known_tags.iter().map(|key| (key.clone(), true)).collect(),
            known_clusters,
            known_tags,
        }
    }

    pub fn clusters(&self) -> &BTreeMap<String, bool> {
        &self.clusters
    }

    pub fn tags(&self) -> &BTreeMap<String, bool> {
        &self.tags
    }

    pub fn is_cluster_enabled(&self, key: &str) -> bool {
        self.clusters.get(key).copied().unwrap_or(false)
    }

    pub fn is_tag_enabled(&self, key: &str) -> bool {
        self.tags.get(key).copied().unwrap_or(false)
    }

    /// Flips one cluster. Returns false for keys the dataset never declared.
    pub fn toggle_cluster(&mut self, key: &str) -> bool {
        toggle(&self.known_clusters, &mut self.clusters, "cluster", key)
    }

    /// Flips one tag. Returns false for keys the dataset never declared.
    pub fn toggle_tag(&mut self, key: &str) -> bool {
        toggle(&self.known_tags, &mut self.tags, "tag", key)
    }

    /// Enables exactly the given clusters; unknown keys are ignored.
    pub fn set_clusters<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        self.clusters = restrict(&self.known_clusters, keys);
    }

    /// Enables exactly the given tags; unknown keys are ignored.
    pub fn set_tags<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        self.tags = restrict(&self.known_tags, keys);
    }

    pub fn node_visible(&self, node: &Node) -> bool {
        self.is_cluster_enabled(&node.cluster) && self.is_tag_enabled(&node.tag)
    }

    pub fn edge_visible(&self, graph: &EntityGraph, edge: &Edge) -> bool {
        let visible = |key: &str| graph.node(key).is_some_and(|node| self.node_visible(node));
        visible(&edge.source) && visible(&edge.target)
    }
}

fn toggle(
    known: &BTreeSet<String>,
    enabled: &mut BTreeMap<String, bool>,
    kind: &str,
    key: &str,
) -> bool {
    if !known.contains(key) {
        debug!("ignoring toggle of unknown {kind} `{key}`");
        return false;
    }

    if enabled.remove(key).is_none() {
        enabled.insert(key.to_owned(), true);
    }
    true
}

fn restrict<'a>(
    known: &BTreeSet<String>,
    keys: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<String, bool> {
    keys.into_iter()
        .filter(|key| known.contains(*key))
        .map(|key| (key.to_owned(), true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::entity::test_node;

    fn sample() -> (EntityGraph, FilterState) {
        let mut graph = EntityGraph::default();
        graph.add_node(test_node("a", "Person", "c1")).unwrap();
        graph.add_node(test_node("b", "Org", "c1")).unwrap();
        graph.add_node(test_node("c", "Person", "c2")).unwrap();
        graph.add_edge("a", "b", 1.0, "#000").unwrap();
        graph.add_edge("b", "c", 1.0, "#000").unwrap();
        (graph, FilterState::new(["c1", "c2"], ["Person", "Org"]))
    }

    #[test]
    fn everything_starts_enabled() {
        let (graph, filters) = sample();
        assert!(filters.clusters().values().all(|enabled| *enabled));
        assert!(filters.tags().values().all(|enabled| *enabled));
        assert!(graph.nodes().all(|node| filters.node_visible(node)));
        assert!(graph.edges().iter().all(|edge| filters.edge_visible(&graph, edge)));
    }

    #[test]
    fn node_visibility_needs_cluster_and_tag() {
        let (graph, mut filters) = sample();
        assert!(filters.toggle_tag("Org"));

        let visible = graph
            .nodes()
            .filter(|node| filters.node_visible(node))
            .map(|node| node.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(visible, ["a", "c"]);
        assert!(!filters.is_tag_enabled("Org"));
        assert!(!filters.tags().contains_key("Org"));
    }

    #[test]
    fn edges_follow_both_endpoints() {
        let (graph, mut filters) = sample();
        filters.toggle_cluster("c2");

        let edges = graph.edges();
        assert!(filters.edge_visible(&graph, &edges[0]));
        assert!(!filters.edge_visible(&graph, &edges[1]));
    }

    #[test]
    fn toggling_twice_round_trips() {
        let (_, mut filters) = sample();
        let before = filters.clone();

        filters.toggle_cluster("c1");
        assert!(!filters.is_cluster_enabled("c1"));
        filters.toggle_cluster("c1");

        assert_eq!(filters, before);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (_, mut filters) = sample();
        let before = filters.clone();

        assert!(!filters.toggle_cluster("c9"));
        assert!(!filters.toggle_tag("Spaceship"));
        assert_eq!(filters, before);
    }

    #[test]
    fn bulk_set_restricts_to_known_keys() {
        let (graph, mut filters) = sample();
        filters.set_clusters(["c2", "c9"]);
        assert_eq!(filters.clusters().keys().collect::<Vec<_>>(), ["c2"]);

        filters.set_tags([]);
        assert!(graph.nodes().all(|node| !filters.node_visible(node)));

        filters.set_tags(["Person", "Org"]);
        filters.set_clusters(["c1", "c2"]);
        assert!(graph.nodes().all(|node| filters.node_visible(node)));
    }
}
