use log::debug;

use super::entity::EntityGraph;

/// A hover candidate reported by hit-testing, stamped with its arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverEvent {
    pub seq: u64,
    pub target: Option<String>,
}

/// What a hover update changed. Both sides are `None` when nothing changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<String>,
    pub entered: Option<String>,
}

impl HoverChange {
    pub fn is_noop(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// The single hovered node of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<String>,
    last_seq: Option<u64>,
}

impl InteractionState {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_hovered(&self, key: &str) -> bool {
        self.hovered.as_deref() == Some(key)
    }

    /// True for the hovered node and for nodes adjacent to it.
    pub fn in_neighbourhood(&self, graph: &EntityGraph, key: &str) -> bool {
        match self.hovered.as_deref() {
            Some(hovered) => hovered == key || graph.are_adjacent(hovered, key),
            None => false,
        }
    }

    /// Replaces the hovered node. Keys missing from the graph leave the state untouched.
    pub fn set_hovered(&mut self, graph: &EntityGraph, target: Option<&str>) -> HoverChange {
        if let Some(key) = target
            && !graph.contains_node(key)
        {
            debug!("ignoring hover of unknown node `{key}`");
            return HoverChange::default();
        }

        if self.hovered.as_deref() == target {
            return HoverChange::default();
        }

        let left = self.hovered.take();
        self.hovered = target.map(str::to_owned);
        HoverChange {
            left,
            entered: self.hovered.clone(),
        }
    }

    /// Applies an event unless a newer one was already applied.
    pub fn apply(&mut self, graph: &EntityGraph, event: HoverEvent) -> Option<HoverChange> {
        if self.last_seq.is_some_and(|last| event.seq <= last) {
            debug!("dropping stale hover event #{}", event.seq);
            return None;
        }

        self.last_seq = Some(event.seq);
        Some(self.set_hovered(graph, event.target.as_deref()))
    }
}

/// Collects hover candidates between frames; only the newest survives.
#[derive(Clone, Debug, Default)]
pub struct HoverInbox {
    next_seq: u64,
    pending: Option<HoverEvent>,
}

impl HoverInbox {
    pub fn push(&mut self, target: Option<String>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(HoverEvent { seq, target });
        seq
    }

    pub fn take(&mut self) -> Option<HoverEvent> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::entity::test_node;

    fn graph() -> EntityGraph {
        let mut graph = EntityGraph::default();
        for key in ["a", "b", "c"] {
            graph.add_node(test_node(key, "Person", "c1")).unwrap();
        }
        graph.add_edge("a", "b", 1.0, "#000").unwrap();
        graph
    }

    #[test]
    fn previous_node_leaves_before_next_enters() {
        let graph = graph();
        let mut state = InteractionState::default();

        let change = state.set_hovered(&graph, Some("a"));
        assert_eq!(change.left, None);
        assert_eq!(change.entered.as_deref(), Some("a"));

        let change = state.set_hovered(&graph, Some("b"));
        assert_eq!(change.left.as_deref(), Some("a"));
        assert_eq!(change.entered.as_deref(), Some("b"));
        assert_eq!(state.hovered(), Some("b"));
        assert!(!state.is_hovered("a"));
    }

    #[test]
    fn clearing_hover_returns_none() {
        let graph = graph();
        let mut state = InteractionState::default();
        state.set_hovered(&graph, Some("a"));

        let change = state.set_hovered(&graph, None);
        assert_eq!(change.left.as_deref(), Some("a"));
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn repeated_and_unknown_hovers_are_noops() {
        let graph = graph();
        let mut state = InteractionState::default();
        state.set_hovered(&graph, Some("a"));

        assert!(state.set_hovered(&graph, Some("a")).is_noop());
        assert!(state.set_hovered(&graph, Some("missing")).is_noop());
        assert_eq!(state.hovered(), Some("a"));
    }

    #[test]
    fn stale_events_never_override_newer_ones() {
        let graph = graph();
        let mut state = InteractionState::default();
        let mut inbox = HoverInbox::default();

        let first = inbox.push(Some("a".into()));
        let second = inbox.push(Some("b".into()));
        assert!(second > first);

        let newest = inbox.take().unwrap();
        assert_eq!(newest.target.as_deref(), Some("b"));
        assert!(!inbox.has_pending());
        assert!(state.apply(&graph, newest).is_some());

        let stale = HoverEvent {
            seq: first,
            target: Some("a".into()),
        };
        assert_eq!(state.apply(&graph, stale), None);
        assert_eq!(state.hovered(), Some("b"));
    }

    #[test]
    fn neighbourhood_covers_both_directions() {
        let graph = graph();
        let mut state = InteractionState::default();
        assert!(!state.in_neighbourhood(&graph, "a"));

        state.set_hovered(&graph, Some("b"));
        assert!(state.in_neighbourhood(&graph, "b"));
        assert!(state.in_neighbourhood(&graph, "a"));
        assert!(!state.in_neighbourhood(&graph, "c"));
    }
}
