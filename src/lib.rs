//! Data and interaction engine for clustered, tagged node-link graphs.
//!
//! A [`GraphEngine`] owns one session: the entity graph built from a dataset,
//! the cluster/tag filter state and the hover state. Rendering backends pull a
//! [`RenderFrame`] from it whenever something changed.

pub mod config;
pub mod dataset;
pub mod graph;
pub mod util;

pub use config::{EngineConfig, load_config};
pub use graph::{Camera, GraphEngine, LoadStatus, RenderFrame};
