//! Modality groups: named coverage tiers over `has_<Modality>` flags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::case::flag_column;
use crate::error::{ModelError, Result};

/// A named list of modalities a case must have to belong to the group.
///
/// Groups are not mutually exclusive; a case may satisfy several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityGroup {
    pub name: String,
    pub modalities: Vec<String>,
}

impl ModalityGroup {
    pub fn new<I, S>(name: impl Into<String>, modalities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            modalities: modalities.into_iter().map(Into::into).collect(),
        }
    }

    /// Flag columns required by this group, e.g. `has_T2`.
    pub fn flag_columns(&self) -> Vec<String> {
        self.modalities.iter().map(|m| flag_column(m)).collect()
    }
}

/// The coverage tiers used for the challenge's unilateral split.
pub fn default_groups() -> Vec<ModalityGroup> {
    vec![
        ModalityGroup::new("Pre\u{2013}Post2", ["Pre", "Post_1", "T2"]),
        ModalityGroup::new(
            "Pre\u{2013}Post4",
            ["Pre", "Post_1", "Post_2", "Post_3", "Post_4"],
        ),
    ]
}

/// A validated, ordered set of modality groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSet {
    #[serde(rename = "group")]
    groups: Vec<ModalityGroup>,
}

impl GroupSet {
    /// Validates group definitions: at least one group, unique non-empty
    /// names, and at least one modality per group.
    pub fn new(groups: Vec<ModalityGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(ModelError::NoGroups);
        }
        let mut seen = BTreeSet::new();
        for group in &groups {
            if group.name.trim().is_empty() {
                return Err(ModelError::EmptyGroupName);
            }
            if group.modalities.is_empty() {
                return Err(ModelError::EmptyGroup {
                    name: group.name.clone(),
                });
            }
            if !seen.insert(group.name.as_str()) {
                return Err(ModelError::DuplicateGroup {
                    name: group.name.clone(),
                });
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[ModalityGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Re-validates a set read from an untrusted source.
    pub fn validated(self) -> Result<Self> {
        Self::new(self.groups)
    }
}

impl Default for GroupSet {
    fn default() -> Self {
        Self {
            groups: default_groups(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_groups_require_expected_flags() {
        let groups = default_groups();
        assert_eq!(groups[0].flag_columns(), vec!["has_Pre", "has_Post_1", "has_T2"]);
        assert_eq!(groups[1].modalities.len(), 5);
    }

    #[test]
    fn rejects_empty_group_list() {
        assert!(matches!(GroupSet::new(Vec::new()), Err(ModelError::NoGroups)));
    }

    #[test]
    fn rejects_group_without_modalities() {
        let groups = vec![ModalityGroup::new("Empty", Vec::<String>::new())];
        assert!(matches!(
            GroupSet::new(groups),
            Err(ModelError::EmptyGroup { name }) if name == "Empty"
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let groups = vec![
            ModalityGroup::new("A", ["Pre"]),
            ModalityGroup::new("A", ["T2"]),
        ];
        assert!(matches!(
            GroupSet::new(groups),
            Err(ModelError::DuplicateGroup { .. })
        ));
    }

    #[test]
    fn parses_group_table_from_toml() {
        let text = r#"
            [[group]]
            name = "T2 only"
            modalities = ["T2"]
        "#;
        let set: GroupSet = toml::from_str(text).expect("parse groups");
        let set = set.validated().expect("valid groups");
        assert_eq!(set.len(), 1);
        assert_eq!(set.groups()[0].flag_columns(), vec!["has_T2"]);
    }
}
