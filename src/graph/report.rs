use thiserror::Error;

use super::entity::InsertError;

/// Why a single dataset entry was left out of the entity graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("unknown tag `{0}`")]
    UnknownTag(String),
    #[error("unknown cluster `{0}`")]
    UnknownCluster(String),
    #[error(transparent)]
    Insert(#[from] InsertError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Node,
    Edge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Loaded,
    Skipped(SkipReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryReport {
    pub kind: EntryKind,
    /// Node key, or `source->target` for edges.
    pub key: String,
    pub outcome: EntryOutcome,
}

/// Per-entry outcome of one dataset load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    entries: Vec<EntryReport>,
    /// Entries the parser could not read at all.
    pub malformed: usize,
}

impl LoadReport {
    pub(super) fn with_malformed(malformed: usize) -> Self {
        Self {
            entries: Vec::new(),
            malformed,
        }
    }

    pub(super) fn record(&mut self, kind: EntryKind, key: String, outcome: EntryOutcome) {
        self.entries.push(EntryReport { kind, key, outcome });
    }

    pub fn entries(&self) -> &[EntryReport] {
        &self.entries
    }

    pub fn loaded(&self, kind: EntryKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind && entry.outcome == EntryOutcome::Loaded)
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&EntryReport, &SkipReason)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            EntryOutcome::Skipped(reason) => Some((entry, reason)),
            EntryOutcome::Loaded => None,
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// True when every parsed and raw entry made it into the graph.
    pub fn is_complete(&self) -> bool {
        self.malformed == 0 && self.skipped_count() == 0
    }
}
