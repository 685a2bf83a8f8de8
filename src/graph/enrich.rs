use crate::config::Palette;

use super::entity::EntityGraph;

/// Assigns baseline size and color to every node. Safe to run repeatedly.
pub fn enrich(graph: &mut EntityGraph, palette: &Palette) {
    for node in graph.nodes_mut() {
        node.size = palette.node_size;
        node.color = if node.category.is_project() {
            palette.project_color.clone()
        } else {
            palette.muted_color.clone()
        };
    }
}
