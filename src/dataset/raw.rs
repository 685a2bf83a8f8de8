use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawNode {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub tag: String,
    pub cluster: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A directed `[source, target]` pair.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RawEdge(pub String, pub String);

impl RawEdge {
    pub fn source(&self) -> &str {
        &self.0
    }

    pub fn target(&self) -> &str {
        &self.1
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawCluster {
    pub key: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawTag {
    pub key: String,
    pub image: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawDataset {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
    pub clusters: Vec<RawCluster>,
    pub tags: Vec<RawTag>,
    /// Entries dropped while parsing because they did not match the record shape.
    pub malformed: usize,
}
