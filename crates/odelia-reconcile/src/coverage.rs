//! Modality-group membership.

use odelia_model::{CaseRecord, GroupSet, ModalityGroup};

use crate::truthy::is_truthy;

/// Membership of every case in one modality group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCoverage {
    pub group: ModalityGroup,
    /// One entry per case, in case order.
    pub mask: Vec<bool>,
    pub count: usize,
}

impl GroupCoverage {
    /// Indices of member cases in case order.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(idx, member)| member.then_some(idx))
    }
}

/// A case belongs to a group iff every required flag is present and true.
pub fn is_member(case: &CaseRecord, group: &ModalityGroup) -> bool {
    group
        .modalities
        .iter()
        .all(|modality| case.flag(modality).is_some_and(is_truthy))
}

pub fn evaluate_group(cases: &[CaseRecord], group: &ModalityGroup) -> GroupCoverage {
    let mask: Vec<bool> = cases.iter().map(|case| is_member(case, group)).collect();
    let count = mask.iter().filter(|member| **member).count();
    GroupCoverage {
        group: group.clone(),
        mask,
        count,
    }
}

/// Evaluates every group independently over the full case set.
pub fn evaluate_coverage(cases: &[CaseRecord], groups: &GroupSet) -> Vec<GroupCoverage> {
    groups
        .groups()
        .iter()
        .map(|group| evaluate_group(cases, group))
        .collect()
}
