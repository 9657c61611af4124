//! Overall ranking of the features within one group.
//!
//! Features are ordered by merged total count, highest first, with ties broken by ascending
//! name. The first feature gets rank 1.

use ahash::AHashMap;

use crate::aggregate::{EndpointCounts, MergedEndpointMap};

/// Sum of all counts, saturating at `u64::MAX`.
#[must_use]
pub fn total_count(counts: &EndpointCounts) -> u64 {
    counts.values().fold(0, |total, &count| total.saturating_add(count))
}

/// Position with the highest count; the lowest such position on ties.
///
/// Returns `None` when `counts` is empty.
#[must_use]
pub fn dominant_position(counts: &EndpointCounts) -> Option<i64> {
    let mut best: Option<(i64, u64)> = None;
    for (&position, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((position, count)),
        }
    }
    best.map(|(position, _)| position)
}

/// Group-wide statistics of one feature, derived from its merged counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedFeature {
    /// 1-based rank within the group
    pub overall_rank: usize,
    /// Sum of merged counts over all positions
    pub total_count: u64,
    /// Merged mode of the end positions, `None` if the feature has no end points
    pub dominant_position: Option<i64>,
}

/// Rank table of one group.
#[derive(Debug, Clone, Default)]
pub struct GroupRanking {
    features: AHashMap<String, RankedFeature>,
}

impl GroupRanking {
    /// Ranks every feature of a group's merged map.
    #[must_use]
    pub fn from_merged(merged: &MergedEndpointMap) -> Self {
        let mut totals: Vec<(&str, &EndpointCounts, u64)> =
            merged.iter().map(|(name, counts)| (name, counts, total_count(counts))).collect();
        totals.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

        let features = totals
            .into_iter()
            .enumerate()
            .map(|(idx, (name, counts, total))| {
                let ranked = RankedFeature {
                    overall_rank: idx + 1,
                    total_count: total,
                    dominant_position: dominant_position(counts),
                };
                (name.to_string(), ranked)
            })
            .collect();
        Self { features }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RankedFeature> {
        self.features.get(name)
    }

    /// Overall rank of `name`, or `None` if it did not contribute to the group.
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.features.get(name).map(|f| f.overall_rank)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
