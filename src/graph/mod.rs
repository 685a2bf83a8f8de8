mod binding;
mod category;
mod engine;
mod enrich;
mod entity;
mod filter;
mod interaction;
mod metrics;
mod normalize;
mod report;
mod search;

pub use binding::{Camera, EdgeFrame, NodeFrame, RenderFrame, project, rendered_size};
pub use category::TagCategory;
pub use engine::{GraphEngine, LoadError, LoadStatus};
pub use enrich::enrich;
pub use entity::{Cluster, Edge, EntityGraph, InsertError, Node, Position, Tag};
pub use filter::FilterState;
pub use interaction::{HoverChange, HoverEvent, HoverInbox, InteractionState};
pub use metrics::{MetricProvider, Points, RandomMetrics, UserMetrics};
pub use normalize::{Normalized, normalize};
pub use report::{EntryKind, EntryOutcome, EntryReport, LoadReport, SkipReason};
pub use search::{SearchHit, search};
