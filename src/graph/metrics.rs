use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::RawNode;
use crate::util::compact_count;

/// Point score shown for user nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Points {
    #[default]
    Empty,
    Score(u32),
}

impl Points {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn score(self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Score(score) => Some(score),
        }
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Score(score) => f.write_str(&compact_count(*score)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserMetrics {
    pub points: u32,
    pub event_number: u32,
}

/// Supplies the analytics shown for user nodes.
pub trait MetricProvider {
    fn sample(&mut self, node: &RawNode) -> UserMetrics;
}

impl<F> MetricProvider for F
where
    F: FnMut(&RawNode) -> UserMetrics,
{
    fn sample(&mut self, node: &RawNode) -> UserMetrics {
        self(node)
    }
}

/// Placeholder analytics: uniformly sampled demo scores.
pub struct RandomMetrics {
    rng: StdRng,
    max_points: u32,
    max_events: u32,
}

impl RandomMetrics {
    pub const MAX_POINTS: u32 = 10_000;
    pub const MAX_EVENTS: u32 = 50;

    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            max_points: Self::MAX_POINTS,
            max_events: Self::MAX_EVENTS,
        }
    }
}

impl Default for RandomMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricProvider for RandomMetrics {
    fn sample(&mut self, _node: &RawNode) -> UserMetrics {
        UserMetrics {
            points: self.rng.gen_range(0..=self.max_points),
            event_number: self.rng.gen_range(0..=self.max_events),
        }
    }
}
