//! Hierarchy builder: turns a flat, parent-linked record list into a forest.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::domain::error::{MenuError, MenuResult};
use crate::domain::forest::{Forest, TreeNode};
use crate::domain::record::{FieldNames, Record, RecordKey};

/// What to do with records whose parent identifier matches no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrphanPolicy {
    /// Leave them out of the forest, together with their subtrees.
    #[default]
    Drop,
    /// Attach them to the roots, after the regular roots.
    PromoteToRoot,
}

impl std::str::FromStr for OrphanPolicy {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Self::Drop),
            "promote-to-root" | "promote" => Ok(Self::PromoteToRoot),
            other => Err(MenuError::config(format!("unknown orphan policy: {}", other))),
        }
    }
}

/// Parent slot a record is linked under.
///
/// `Root` is the sentinel for "no parent"; it never collides with a real
/// identifier, not even `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ParentKey {
    Root,
    Id(RecordKey),
}

/// Children collected under a parent identifier that no record carries.
#[derive(Debug)]
struct Placeholder {
    key: RecordKey,
    children: Vec<Index>,
}

/// Builds a [`Forest`] in two linear passes: index, then link.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    fields: FieldNames,
    orphans: OrphanPolicy,
}

impl HierarchyBuilder {
    pub fn new(fields: FieldNames) -> Self {
        Self {
            fields,
            orphans: OrphanPolicy::default(),
        }
    }

    pub fn with_orphans(mut self, orphans: OrphanPolicy) -> Self {
        self.orphans = orphans;
        self
    }

    /// Build the forest.
    ///
    /// Records are indexed by identifier in input order; a repeated
    /// identifier replaces the record but keeps the first position. Each
    /// record is then appended to the child list of its parent, so siblings
    /// keep input order.
    ///
    /// # Errors
    /// [`MenuError::TypeMismatch`] for the first record without a usable
    /// identifier field.
    #[instrument(level = "debug", skip(self, records), fields(id = %self.fields.id, parent = %self.fields.parent))]
    pub fn build<R, I>(&self, records: I) -> MenuResult<Forest<R>>
    where
        R: Record,
        I: IntoIterator<Item = R>,
    {
        let mut arena: Arena<TreeNode<R>> = Arena::new();
        let mut index: HashMap<RecordKey, Index> = HashMap::new();
        let mut order: Vec<Index> = Vec::new();

        for (position, record) in records.into_iter().enumerate() {
            let key = self
                .fields
                .id_of(&record)
                .ok_or_else(|| MenuError::TypeMismatch {
                    position,
                    reason: format!("no usable identifier in field '{}'", self.fields.id),
                })?;

            match index.get(&key) {
                Some(&idx) => arena[idx].data = record,
                None => {
                    let idx = arena.insert(TreeNode {
                        data: record,
                        key: key.clone(),
                        children: Vec::new(),
                    });
                    index.insert(key, idx);
                    order.push(idx);
                }
            }
        }

        let mut roots = Vec::new();
        let mut placeholders: Vec<Placeholder> = Vec::new();
        let mut placeholder_slots: HashMap<RecordKey, usize> = HashMap::new();

        for &idx in &order {
            let parent_key = match self.fields.parent_of(&arena[idx].data) {
                Some(key) => ParentKey::Id(key),
                None => ParentKey::Root,
            };

            match parent_key {
                ParentKey::Root => roots.push(idx),
                ParentKey::Id(key) => match index.get(&key) {
                    Some(&parent_idx) => arena[parent_idx].children.push(idx),
                    None => {
                        let slot = *placeholder_slots.entry(key.clone()).or_insert_with(|| {
                            placeholders.push(Placeholder {
                                key,
                                children: Vec::new(),
                            });
                            placeholders.len() - 1
                        });
                        placeholders[slot].children.push(idx);
                    }
                },
            }
        }

        for placeholder in placeholders {
            match self.orphans {
                OrphanPolicy::Drop => warn!(
                    parent = %placeholder.key,
                    count = placeholder.children.len(),
                    "parent record missing, dropping its children"
                ),
                OrphanPolicy::PromoteToRoot => {
                    info!(
                        parent = %placeholder.key,
                        count = placeholder.children.len(),
                        "parent record missing, promoting its children to roots"
                    );
                    roots.extend(placeholder.children);
                }
            }
        }

        debug!(records = order.len(), roots = roots.len(), "built forest");
        Ok(Forest::from_parts(arena, roots, order))
    }
}

/// Build a forest with the default orphan policy.
pub fn build_forest<R, I>(records: I, fields: &FieldNames) -> MenuResult<Forest<R>>
where
    R: Record,
    I: IntoIterator<Item = R>,
{
    HierarchyBuilder::new(fields.clone()).build(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphan_policy_from_str() {
        assert_eq!("drop".parse::<OrphanPolicy>().unwrap(), OrphanPolicy::Drop);
        assert_eq!(
            "promote-to-root".parse::<OrphanPolicy>().unwrap(),
            OrphanPolicy::PromoteToRoot
        );
        assert!("keep".parse::<OrphanPolicy>().is_err());
    }
}
