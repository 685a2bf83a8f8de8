use std::collections::{HashMap, HashSet};

use crate::config::{EdgeCurve, EngineConfig, LabelSettings};
use crate::util::cell_key;

use super::entity::{EntityGraph, Node, Position};
use super::filter::FilterState;
use super::interaction::InteractionState;

/// Camera parameters the label policy depends on. Pan does not affect labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrame {
    pub key: String,
    pub position: Position,
    pub size: f32,
    pub color: String,
    pub visible: bool,
    pub label: Option<String>,
    pub image: Option<String>,
    pub highlighted: bool,
    /// Outside the hovered neighbourhood.
    pub dimmed: bool,
    pub z_index: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeFrame {
    pub source: String,
    pub target: String,
    pub visible: bool,
    pub curve: EdgeCurve,
    pub color: String,
    /// Not incident to the hovered node.
    pub dimmed: bool,
    pub size: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub nodes: Vec<NodeFrame>,
    pub edges: Vec<EdgeFrame>,
    pub hovered: Option<String>,
    pub visible_nodes: usize,
    pub visible_edges: usize,
}

impl RenderFrame {
    pub fn node(&self, key: &str) -> Option<&NodeFrame> {
        self.nodes.iter().find(|node| node.key == key)
    }
}

/// Projects the current session state into drawable attributes.
pub fn project(
    graph: &EntityGraph,
    filters: &FilterState,
    interaction: &InteractionState,
    config: &EngineConfig,
    camera: Camera,
) -> RenderFrame {
    let hovered = interaction.hovered();
    let palette = &config.palette;

    let mut nodes = graph
        .nodes()
        .map(|node| {
            let visible = filters.node_visible(node);
            let is_hovered = hovered == Some(node.key.as_str());
            let dimmed = hovered.is_some() && !interaction.in_neighbourhood(graph, &node.key);

            NodeFrame {
                key: node.key.clone(),
                position: node.position,
                size: node.size,
                color: if dimmed {
                    palette.dimmed_color.clone()
                } else {
                    node.color.clone()
                },
                visible,
                label: None,
                image: (!dimmed).then(|| node.image.clone()),
                highlighted: is_hovered,
                dimmed,
                z_index: u8::from(is_hovered),
            }
        })
        .collect::<Vec<_>>();

    let labelled = label_candidates(graph, &nodes, &config.labels, camera);
    for (frame, node) in nodes.iter_mut().zip(graph.nodes()) {
        if frame.visible && (frame.highlighted || labelled.contains(node.key.as_str())) {
            frame.label = Some(node.label.clone());
        }
    }

    let edges = graph
        .edges()
        .iter()
        .map(|edge| {
            let incident = hovered
                .is_some_and(|key| edge.source == key || edge.target == key);
            let dimmed = hovered.is_some() && !incident;

            EdgeFrame {
                source: edge.source.clone(),
                target: edge.target.clone(),
                visible: filters.edge_visible(graph, edge),
                curve: config.edge_curve,
                color: if incident {
                    palette.hover_edge_color.clone()
                } else if dimmed {
                    palette.dimmed_color.clone()
                } else {
                    edge.color.clone()
                },
                dimmed,
                size: edge.size,
            }
        })
        .collect::<Vec<_>>();

    RenderFrame {
        visible_nodes: nodes.iter().filter(|node| node.visible).count(),
        visible_edges: edges.iter().filter(|edge| edge.visible).count(),
        hovered: hovered.map(str::to_owned),
        nodes,
        edges,
    }
}

/// Size a node is drawn at for the given zoom.
pub fn rendered_size(size: f32, zoom: f32) -> f32 {
    size * zoom.max(0.0).sqrt()
}

/// Picks which labels fit: nodes large enough on screen, a bounded number per grid cell.
fn label_candidates<'a>(
    graph: &'a EntityGraph,
    frames: &[NodeFrame],
    labels: &LabelSettings,
    camera: Camera,
) -> HashSet<&'a str> {
    let per_cell = (labels.density.max(0.0) * camera.zoom * camera.zoom).ceil() as usize;
    if per_cell == 0 || labels.grid_cell_size <= 0.0 {
        return HashSet::new();
    }

    let mut cells: HashMap<u64, Vec<&Node>> = HashMap::new();
    for (frame, node) in frames.iter().zip(graph.nodes()) {
        if !frame.visible || frame.dimmed {
            continue;
        }
        if rendered_size(node.size, camera.zoom) < labels.rendered_size_threshold {
            continue;
        }

        let screen_x = node.position.x as f32 * camera.zoom;
        let screen_y = node.position.y as f32 * camera.zoom;
        let cell_x = (screen_x / labels.grid_cell_size).floor() as i32;
        let cell_y = (screen_y / labels.grid_cell_size).floor() as i32;
        cells.entry(cell_key(cell_x, cell_y)).or_default().push(node);
    }

    let mut shown = HashSet::new();
    for candidates in cells.values_mut() {
        candidates.sort_by(|a, b| b.size.total_cmp(&a.size).then_with(|| a.key.cmp(&b.key)));
        shown.extend(candidates.iter().take(per_cell).map(|node| node.key.as_str()));
    }
    shown
}
