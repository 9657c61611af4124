//! Feature data model shared by the loader, aggregator, ranker and report emitter.
//!
//! A sample is a list of [`FeatureGroup`]s (mapping loci) ordered by the sample's own
//! abundance ranking. Each group holds one or more [`FeatureRecord`]s; the first record is the
//! group's primary feature and is the only one the summarizer looks at.

use std::collections::BTreeMap;

/// Delimiter separating the group key from the rest of a feature name.
pub const GROUP_DELIMITER: char = ':';

/// Returns the group key of a feature name: everything before the first [`GROUP_DELIMITER`].
///
/// A name without a delimiter is its own group key.
///
/// # Examples
///
/// ```
/// use srnatools_lib::feature::group_key;
///
/// assert_eq!(group_key("mmu-miR-1a-3p:MIMAT0000416"), "mmu-miR-1a-3p");
/// assert_eq!(group_key("tRNA-Gly-GCC"), "tRNA-Gly-GCC");
/// ```
#[must_use]
pub fn group_key(name: &str) -> &str {
    name.split_once(GROUP_DELIMITER).map_or(name, |(key, _)| key)
}

/// Number of reads ending at a given position of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndPoint {
    /// End coordinate of the reads, relative to the feature start
    pub position: i64,
    /// Number of reads ending at `position`
    pub count: u64,
}

impl EndPoint {
    #[must_use]
    pub fn new(position: i64, count: u64) -> Self {
        Self { position, count }
    }
}

/// One named feature and the read end-point evidence observed for it in one sample.
///
/// `end_points` may list the same position more than once; such entries are additive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    name: String,
    sequence: String,
    end_points: Vec<EndPoint>,
}

impl FeatureRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        sequence: impl Into<String>,
        end_points: Vec<EndPoint>,
    ) -> Self {
        Self { name: name.into(), sequence: sequence.into(), end_points }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[must_use]
    pub fn end_points(&self) -> &[EndPoint] {
        &self.end_points
    }

    /// The group key derived from this feature's name.
    #[must_use]
    pub fn group_key(&self) -> &str {
        group_key(&self.name)
    }

    /// Total number of reads over all end points, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.end_points.iter().fold(0, |total, ep| total.saturating_add(ep.count))
    }

    /// Read counts keyed by position, with duplicate positions summed (saturating).
    ///
    /// Iteration order is ascending position.
    #[must_use]
    pub fn position_counts(&self) -> BTreeMap<i64, u64> {
        let mut counts = BTreeMap::new();
        for ep in &self.end_points {
            let count = counts.entry(ep.position).or_insert(0u64);
            *count = count.saturating_add(ep.count);
        }
        counts
    }
}

/// A mapping locus: one or more features that the same reads were assigned to.
///
/// Always holds at least one feature; the first is the primary feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGroup {
    features: Vec<FeatureRecord>,
}

impl FeatureGroup {
    /// Creates a group from its features, or `None` if `features` is empty.
    #[must_use]
    pub fn from_features(features: Vec<FeatureRecord>) -> Option<Self> {
        if features.is_empty() { None } else { Some(Self { features }) }
    }

    /// The group's primary feature, which determines its identity for ranking.
    #[must_use]
    pub fn primary(&self) -> &FeatureRecord {
        &self.features[0]
    }

    #[must_use]
    pub fn features(&self) -> &[FeatureRecord] {
        &self.features
    }
}

impl From<FeatureRecord> for FeatureGroup {
    fn from(primary: FeatureRecord) -> Self {
        Self { features: vec![primary] }
    }
}

/// All mapping loci reported for one sample, in the sample's abundance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFeatures {
    sample_id: String,
    groups: Vec<FeatureGroup>,
}

impl SampleFeatures {
    #[must_use]
    pub fn new(sample_id: impl Into<String>, groups: Vec<FeatureGroup>) -> Self {
        Self { sample_id: sample_id.into(), groups }
    }

    #[must_use]
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    #[must_use]
    pub fn groups(&self) -> &[FeatureGroup] {
        &self.groups
    }

    /// Primary features of this sample whose name starts with `key`, in the sample's order.
    pub fn primaries_matching<'a>(
        &'a self,
        key: &'a str,
    ) -> impl Iterator<Item = &'a FeatureRecord> {
        self.groups.iter().map(FeatureGroup::primary).filter(move |f| f.name().starts_with(key))
    }
}
