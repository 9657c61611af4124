//! Cross-sample merging of end-point counts per feature group.
//!
//! For every group key, each sample contributes the primary features of its first `top_n`
//! matching loci. Counts of the same feature name are summed position-wise across samples.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::errors::{Result, SrnaError};
use crate::feature::{FeatureRecord, SampleFeatures};

/// Number of top-ranked loci per sample and group that contribute to the merged counts.
pub const DEFAULT_TOP_N: usize = 10;

/// Read counts keyed by end position, in ascending position order.
pub type EndpointCounts = BTreeMap<i64, u64>;

/// Merged end-point counts of every feature contributing to one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedEndpointMap {
    features: BTreeMap<String, EndpointCounts>,
}

impl MergedEndpointMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record's end points to the counts stored under its name.
    pub fn merge(&mut self, record: &FeatureRecord) {
        let counts = self.features.entry(record.name().to_string()).or_default();
        for ep in record.end_points() {
            let count = counts.entry(ep.position).or_insert(0);
            *count = count.saturating_add(ep.count);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EndpointCounts> {
        self.features.get(name)
    }

    /// Iterates `(feature name, counts)` in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointCounts)> {
        self.features.iter().map(|(name, counts)| (name.as_str(), counts))
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

/// Merged maps for all groups, keyed and iterated by group key in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAggregates {
    groups: BTreeMap<String, MergedEndpointMap>,
}

impl GroupAggregates {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MergedEndpointMap> {
        self.groups.get(key)
    }

    /// Iterates `(group key, merged map)` in ascending group key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MergedEndpointMap)> {
        self.groups.iter().map(|(key, merged)| (key.as_str(), merged))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Builds [`GroupAggregates`] from the loaded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAggregator {
    top_n: usize,
}

impl Default for GroupAggregator {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

impl GroupAggregator {
    /// Creates an aggregator that keeps at most `top_n` loci per sample and group.
    ///
    /// # Errors
    ///
    /// Returns [`SrnaError::InvalidParameter`] if `top_n` is zero.
    pub fn with_top_n(top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(SrnaError::InvalidParameter {
                parameter: "top-n".to_string(),
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(Self { top_n })
    }

    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Merges each sample's top-N primary features into per-group maps.
    #[must_use]
    pub fn aggregate(&self, samples: &[SampleFeatures]) -> GroupAggregates {
        let mut groups = BTreeMap::new();
        for key in collect_group_keys(samples) {
            let mut merged = MergedEndpointMap::new();
            for sample in samples {
                for record in sample.primaries_matching(&key).take(self.top_n) {
                    merged.merge(record);
                }
            }
            debug!("Group {key}: merged {} features", merged.len());
            groups.insert(key, merged);
        }
        GroupAggregates { groups }
    }
}

/// Distinct group keys of all primary features across `samples`, sorted ascending.
#[must_use]
pub fn collect_group_keys(samples: &[SampleFeatures]) -> Vec<String> {
    samples
        .iter()
        .flat_map(|sample| sample.groups().iter().map(|g| g.primary().group_key().to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
