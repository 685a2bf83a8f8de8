use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{error, info};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::dataset::{RawDataset, read_dataset};

use super::binding::{Camera, RenderFrame, project};
use super::enrich::enrich;
use super::entity::{Cluster, EntityGraph, Node, Tag};
use super::filter::FilterState;
use super::interaction::{HoverChange, HoverEvent, InteractionState};
use super::metrics::{MetricProvider, RandomMetrics};
use super::normalize::{Normalized, normalize};
use super::report::LoadReport;
use super::search::{SearchHit, search};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("a dataset load is already in progress")]
    InFlight,
}

/// Result of polling a background load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load is running.
    Idle,
    Pending,
    /// The load finished during this poll and the graph is ready.
    Completed,
    /// The load failed during this poll; see [`GraphEngine::last_error`].
    Failed,
}

struct Session {
    graph: EntityGraph,
    clusters: BTreeMap<String, Cluster>,
    tags: BTreeMap<String, Tag>,
    filters: FilterState,
    interaction: InteractionState,
    report: LoadReport,
}

/// One graph session: entity graph, filters, hover state and load lifecycle.
pub struct GraphEngine {
    config: EngineConfig,
    metrics: Box<dyn MetricProvider>,
    session: Option<Session>,
    pending: Option<Receiver<anyhow::Result<RawDataset>>>,
    last_error: Option<String>,
    revision: u64,
}

impl GraphEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_metrics(config, Box::new(RandomMetrics::new()))
    }

    pub fn with_metrics(config: EngineConfig, metrics: Box<dyn MetricProvider>) -> Self {
        Self {
            config,
            metrics,
            session: None,
            pending: None,
            last_error: None,
            revision: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Bumped on every change that can alter the rendered frame.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Normalizes and enriches a parsed dataset, replacing the current session.
    pub fn load(&mut self, raw: RawDataset) -> &LoadReport {
        let Normalized {
            mut graph,
            clusters,
            tags,
            report,
        } = normalize(raw, &self.config, self.metrics.as_mut());
        enrich(&mut graph, &self.config.palette);

        let filters = FilterState::new(clusters.keys().cloned(), tags.keys().cloned());
        info!(
            "graph ready: {} nodes, {} edges, {} skipped entries",
            graph.node_count(),
            graph.edge_count(),
            report.skipped_count() + report.malformed,
        );

        self.last_error = None;
        self.bump();
        let session = self.session.insert(Session {
            graph,
            clusters,
            tags,
            filters,
            interaction: InteractionState::default(),
            report,
        });
        &session.report
    }

    /// Starts reading a dataset on a background thread.
    pub fn begin_load(&mut self, path: PathBuf) -> Result<(), LoadError> {
        if self.pending.is_some() {
            return Err(LoadError::InFlight);
        }

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(read_dataset(&path));
        });

        self.pending = Some(rx);
        Ok(())
    }

    /// Finishes a background load once its data has arrived.
    pub fn poll_load(&mut self) -> LoadStatus {
        let Some(rx) = self.pending.take() else {
            return LoadStatus::Idle;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => {
                self.pending = Some(rx);
                return LoadStatus::Pending;
            }
            Err(TryRecvError::Disconnected) => {
                Err(anyhow::anyhow!("background load worker disconnected"))
            }
        };

        match outcome {
            Ok(raw) => {
                self.load(raw);
                LoadStatus::Completed
            }
            Err(failure) => {
                error!("dataset load failed: {failure:#}");
                self.session = None;
                self.last_error = Some(format!("{failure:#}"));
                self.bump();
                LoadStatus::Failed
            }
        }
    }

    pub fn graph(&self) -> Option<&EntityGraph> {
        self.session.as_ref().map(|session| &session.graph)
    }

    pub fn report(&self) -> Option<&LoadReport> {
        self.session.as_ref().map(|session| &session.report)
    }

    pub fn filters(&self) -> Option<&FilterState> {
        self.session.as_ref().map(|session| &session.filters)
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.session
            .iter()
            .flat_map(|session| session.clusters.values())
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.session.iter().flat_map(|session| session.tags.values())
    }

    pub fn toggle_cluster(&mut self, key: &str) -> bool {
        let changed = self
            .session
            .as_mut()
            .is_some_and(|session| session.filters.toggle_cluster(key));
        if changed {
            self.bump();
        }
        changed
    }

    pub fn toggle_tag(&mut self, key: &str) -> bool {
        let changed = self
            .session
            .as_mut()
            .is_some_and(|session| session.filters.toggle_tag(key));
        if changed {
            self.bump();
        }
        changed
    }

    pub fn set_clusters<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        if let Some(session) = self.session.as_mut() {
            session.filters.set_clusters(keys);
            self.bump();
        }
    }

    pub fn set_tags<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        if let Some(session) = self.session.as_mut() {
            session.filters.set_tags(keys);
            self.bump();
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.interaction.hovered())
    }

    pub fn hovered_node(&self) -> Option<&Node> {
        let session = self.session.as_ref()?;
        let key = session.interaction.hovered()?;
        session.graph.node(key)
    }

    pub fn set_hovered(&mut self, target: Option<&str>) -> HoverChange {
        let change = match self.session.as_mut() {
            Some(session) => session.interaction.set_hovered(&session.graph, target),
            None => HoverChange::default(),
        };
        if !change.is_noop() {
            self.bump();
        }
        change
    }

    /// Applies a sequenced hover event; stale events return `None`.
    pub fn apply_hover(&mut self, event: HoverEvent) -> Option<HoverChange> {
        let session = self.session.as_mut()?;
        let change = session.interaction.apply(&session.graph, event)?;
        if !change.is_noop() {
            self.bump();
        }
        Some(change)
    }

    /// The drawable state of the graph, or `None` until a load has completed.
    pub fn frame(&self, camera: Camera) -> Option<RenderFrame> {
        let session = self.session.as_ref()?;
        Some(project(
            &session.graph,
            &session.filters,
            &session.interaction,
            &self.config,
            camera,
        ))
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.graph()
            .map(|graph| search(graph, query, limit))
            .unwrap_or_default()
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::dataset::parse_dataset;
    use crate::graph::metrics::UserMetrics;

    const DATASET: &str = r#"{
        "nodes": [
            { "key": "a", "tag": "Person", "cluster": "c1" },
            { "key": "b", "tag": "Org", "cluster": "c1" },
            { "key": "u", "tag": "User", "cluster": "c2" }
        ],
        "edges": [["a", "b"], ["b", "u"], ["a", "ghost"]],
        "clusters": [{ "key": "c1" }, { "key": "c2" }],
        "tags": [
            { "key": "Person", "image": "person.svg" },
            { "key": "Org", "image": "org.svg" },
            { "key": "User", "image": "user.svg" }
        ]
    }"#;

    fn engine() -> GraphEngine {
        let provider = |_: &crate::dataset::RawNode| UserMetrics {
            points: 10,
            event_number: 1,
        };
        let mut engine = GraphEngine::with_metrics(EngineConfig::default(), Box::new(provider));
        engine.load(parse_dataset(DATASET).unwrap());
        engine
    }

    fn wait_for_load(engine: &mut GraphEngine) -> LoadStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let status = engine.poll_load();
            if status != LoadStatus::Pending || Instant::now() > deadline {
                return status;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn not_ready_before_load() {
        let engine = GraphEngine::new(EngineConfig::default());
        assert!(!engine.is_ready());
        assert!(engine.frame(Camera::default()).is_none());
        assert!(engine.filters().is_none());
        assert!(engine.search("a", 5).is_empty());
    }

    #[test]
    fn load_seeds_filters_and_report() {
        let engine = engine();
        assert!(engine.is_ready());

        let filters = engine.filters().unwrap();
        assert_eq!(filters.clusters().len(), 2);
        assert_eq!(filters.tags().len(), 3);

        let report = engine.report().unwrap();
        assert_eq!(report.skipped_count(), 1);

        let frame = engine.frame(Camera::default()).unwrap();
        assert_eq!(frame.visible_nodes, 3);
        assert_eq!(frame.visible_edges, 2);
    }

    #[test]
    fn state_changes_bump_revision() {
        let mut engine = engine();
        let start = engine.revision();

        assert!(engine.toggle_cluster("c1"));
        assert_eq!(engine.revision(), start + 1);

        assert!(!engine.toggle_tag("Unknown"));
        assert_eq!(engine.revision(), start + 1);

        engine.set_hovered(Some("a"));
        assert_eq!(engine.revision(), start + 2);
        engine.set_hovered(Some("a"));
        assert_eq!(engine.revision(), start + 2);
    }

    #[test]
    fn hover_keeps_edges_between_visible_nodes_visible() {
        let mut engine = engine();
        engine.set_hovered(Some("a"));
        let frame = engine.frame(Camera::default()).unwrap();

        for edge in &frame.edges {
            let source = frame.node(&edge.source).unwrap();
            let target = frame.node(&edge.target).unwrap();
            assert_eq!(edge.visible, source.visible && target.visible);
        }
        let far_edge = frame
            .edges
            .iter()
            .find(|edge| edge.source == "b" && edge.target == "u")
            .unwrap();
        assert!(far_edge.visible);
        assert!(far_edge.dimmed);
        assert_eq!(frame.visible_edges, 2);
    }

    #[test]
    fn hovered_node_exposes_details() {
        let mut engine = engine();
        engine.set_hovered(Some("u"));

        let node = engine.hovered_node().unwrap();
        assert_eq!(node.key, "u");
        assert_eq!(node.points.to_string(), "10");
        assert!(!node.id.is_empty());

        engine.set_hovered(None);
        assert!(engine.hovered_node().is_none());
    }

    #[test]
    fn reload_resets_interaction_and_filters() {
        let mut engine = engine();
        engine.toggle_cluster("c1");
        engine.set_hovered(Some("a"));

        engine.load(parse_dataset(DATASET).unwrap());
        assert_eq!(engine.hovered(), None);
        assert!(engine.filters().unwrap().is_cluster_enabled("c1"));
    }

    #[test]
    fn background_load_completes() {
        let path = std::env::temp_dir().join(format!(
            "graph-explorer-engine-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, DATASET).unwrap();

        let mut engine = GraphEngine::new(EngineConfig::default());
        assert_eq!(engine.poll_load(), LoadStatus::Idle);
        engine.begin_load(path.clone()).unwrap();
        assert_eq!(engine.begin_load(path.clone()), Err(LoadError::InFlight));

        assert_eq!(wait_for_load(&mut engine), LoadStatus::Completed);
        assert!(engine.is_ready());
        assert_eq!(engine.graph().unwrap().node_count(), 3);
        assert_eq!(engine.poll_load(), LoadStatus::Idle);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn failed_load_stays_not_ready() {
        let mut engine = GraphEngine::new(EngineConfig::default());
        engine
            .begin_load(PathBuf::from("/no/such/graph-explorer.json"))
            .unwrap();

        assert_eq!(wait_for_load(&mut engine), LoadStatus::Failed);
        assert!(!engine.is_ready());
        assert!(engine.last_error().unwrap().contains("failed to read dataset"));
        assert!(engine.frame(Camera::default()).is_none());
    }
}
