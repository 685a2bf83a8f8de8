use std::collections::BTreeMap;

use log::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::dataset::{RawDataset, RawNode};

use super::category::TagCategory;
use super::entity::{Cluster, EntityGraph, Node, Position, Tag};
use super::metrics::{MetricProvider, Points};
use super::report::{EntryKind, EntryOutcome, LoadReport, SkipReason};

/// Output of one normalization pass.
#[derive(Clone, Debug, Default)]
pub struct Normalized {
    pub graph: EntityGraph,
    pub clusters: BTreeMap<String, Cluster>,
    pub tags: BTreeMap<String, Tag>,
    pub report: LoadReport,
}

pub fn normalize(
    raw: RawDataset,
    config: &EngineConfig,
    metrics: &mut dyn MetricProvider,
) -> Normalized {
    let RawDataset {
        nodes,
        edges,
        clusters,
        tags,
        malformed,
    } = raw;

    let clusters = clusters
        .into_iter()
        .map(|cluster| {
            (
                cluster.key.clone(),
                Cluster {
                    key: cluster.key,
                    fields: cluster.fields,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();
    let tags = tags
        .into_iter()
        .map(|tag| {
            (
                tag.key.clone(),
                Tag {
                    key: tag.key,
                    image: tag.image,
                    fields: tag.fields,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    let mut graph = EntityGraph::default();
    let mut report = LoadReport::with_malformed(malformed);

    for raw_node in nodes {
        let key = raw_node.key.clone();
        let outcome = match build_node(raw_node, &clusters, &tags, config, metrics) {
            Ok(node) => graph.add_node(node).map_err(SkipReason::from),
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(()) => report.record(EntryKind::Node, key, EntryOutcome::Loaded),
            Err(reason) => {
                warn!("skipping node `{key}`: {reason}");
                report.record(EntryKind::Node, key, EntryOutcome::Skipped(reason));
            }
        }
    }

    for edge in edges {
        let key = format!("{}->{}", edge.source(), edge.target());
        match graph.add_edge(
            edge.source(),
            edge.target(),
            config.palette.edge_size,
            &config.palette.edge_color,
        ) {
            Ok(_) => report.record(EntryKind::Edge, key, EntryOutcome::Loaded),
            Err(error) => {
                warn!("skipping edge {key}: {error}");
                report.record(EntryKind::Edge, key, EntryOutcome::Skipped(error.into()));
            }
        }
    }

    debug!(
        "normalized {} nodes and {} edges ({} entries skipped)",
        graph.node_count(),
        graph.edge_count(),
        report.skipped_count(),
    );

    Normalized {
        graph,
        clusters,
        tags,
        report,
    }
}

fn build_node(
    raw: RawNode,
    clusters: &BTreeMap<String, Cluster>,
    tags: &BTreeMap<String, Tag>,
    config: &EngineConfig,
    metrics: &mut dyn MetricProvider,
) -> Result<Node, SkipReason> {
    let tag = tags
        .get(&raw.tag)
        .ok_or_else(|| SkipReason::UnknownTag(raw.tag.clone()))?;
    let cluster = clusters
        .get(&raw.cluster)
        .ok_or_else(|| SkipReason::UnknownCluster(raw.cluster.clone()))?;

    let category = TagCategory::from_tag(&raw.tag);
    let (id, points, event_number) = if category.is_user() {
        let sample = metrics.sample(&raw);
        (
            Uuid::new_v4().to_string(),
            Points::Score(sample.points),
            sample.event_number,
        )
    } else {
        (String::new(), Points::Empty, 0)
    };

    let mut attributes = raw.extra;
    for (field, value) in &cluster.fields {
        attributes.insert(field.clone(), value.clone());
    }

    Ok(Node {
        label: raw.label.unwrap_or_else(|| raw.key.clone()),
        key: raw.key,
        tag: raw.tag,
        category,
        cluster: raw.cluster,
        position: Position { x: raw.x, y: raw.y },
        id,
        points,
        event_number,
        color: config.palette.muted_color.clone(),
        size: config.palette.node_size,
        image: config.image_path(&tag.image),
        attributes,
    })
}
