//! Canonical label counts per group.

use std::collections::BTreeMap;

use serde::Serialize;

use odelia_model::{CanonicalLabel, NormalizedLabel};

/// Counts of the three canonical labels among a group's members.
///
/// Labels that did not normalize to a canonical value are tallied in
/// `unmapped` but are never part of `counts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelDistribution {
    counts: BTreeMap<CanonicalLabel, usize>,
    #[serde(skip)]
    unmapped: usize,
}

impl LabelDistribution {
    fn empty() -> Self {
        Self {
            counts: CanonicalLabel::ALL.iter().map(|label| (*label, 0)).collect(),
            unmapped: 0,
        }
    }

    pub fn count(&self, label: CanonicalLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// All three canonical labels, zero counts included, in report order.
    pub fn counts(&self) -> &BTreeMap<CanonicalLabel, usize> {
        &self.counts
    }

    pub fn unmapped(&self) -> usize {
        self.unmapped
    }
}

/// Counts labels of the cases selected by `mask`.
pub fn label_distribution(labels: &[NormalizedLabel], mask: &[bool]) -> LabelDistribution {
    let mut distribution = LabelDistribution::empty();
    for (label, member) in labels.iter().zip(mask) {
        if !member {
            continue;
        }
        match label.canonical() {
            Some(canonical) => *distribution.counts.entry(canonical).or_insert(0) += 1,
            None => distribution.unmapped += 1,
        }
    }
    distribution
}
