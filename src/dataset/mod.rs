mod parse;
mod raw;

pub use parse::{parse_dataset, read_dataset};
pub use raw::{RawCluster, RawDataset, RawEdge, RawNode, RawTag};
