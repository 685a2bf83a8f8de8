use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::raw::RawDataset;

pub fn read_dataset(path: &Path) -> Result<RawDataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    parse_dataset(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))
}

/// Parses a dataset document, dropping entries that do not match their record shape.
pub fn parse_dataset(raw: &str) -> Result<RawDataset> {
    let parsed: Value = serde_json::from_str(raw).context("invalid dataset JSON")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("dataset root must be a JSON object"))?;

    let mut malformed = 0usize;
    let nodes = parse_entries(object, "nodes", &mut malformed)?;
    let edges = parse_entries(object, "edges", &mut malformed)?;
    let clusters = parse_entries(object, "clusters", &mut malformed)?;
    let tags = parse_entries(object, "tags", &mut malformed)?;

    debug!(
        "parsed dataset: {} nodes, {} edges, {} clusters, {} tags, {malformed} malformed",
        nodes.len(),
        edges.len(),
        clusters.len(),
        tags.len(),
    );

    Ok(RawDataset {
        nodes,
        edges,
        clusters,
        tags,
        malformed,
    })
}

fn parse_entries<T: DeserializeOwned>(
    object: &Map<String, Value>,
    field: &str,
    malformed: &mut usize,
) -> Result<Vec<T>> {
    let Some(value) = object.get(field) else {
        warn!("dataset has no `{field}` collection; treating it as empty");
        return Ok(Vec::new());
    };

    let entries = value
        .as_array()
        .ok_or_else(|| anyhow!("dataset `{field}` must be an array"))?;

    let mut parsed = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(record) => parsed.push(record),
            Err(error) => {
                warn!("skipping malformed {field} entry #{index}: {error}");
                *malformed += 1;
            }
        }
    }

    Ok(parsed)
}
