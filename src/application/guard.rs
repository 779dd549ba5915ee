//! Parentage guard
//!
//! Keeps the record store a well-formed forest while it is mutated: parent
//! reassignments are checked for cycles, and deleting a record hands its
//! children to its own parent.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{FieldNames, FieldValue, Record, RecordKey};
use crate::infrastructure::RecordStore;

/// Hierarchy integrity checks against a [`RecordStore`].
pub struct ParentageGuard<S> {
    store: Arc<S>,
    fields: FieldNames,
}

impl<S: RecordStore> ParentageGuard<S> {
    pub fn new(store: Arc<S>, fields: FieldNames) -> Self {
        Self { store, fields }
    }

    fn id_of(&self, record: &S::Record) -> ApplicationResult<RecordKey> {
        self.fields.id_of(record).ok_or_else(|| {
            ApplicationError::InvalidRecord(format!(
                "no usable identifier in field '{}'",
                self.fields.id
            ))
        })
    }

    /// Whether `proposed_parent` may become the parent of `candidate`.
    ///
    /// Walks up the ancestor chain starting at `proposed_parent`. Returns
    /// `false` as soon as the chain reaches `candidate` (including
    /// `proposed_parent == candidate`), `true` once it reaches a root.
    ///
    /// # Errors
    /// * [`ApplicationError::RecordNotFound`] if an ancestor is missing.
    /// * [`ApplicationError::Integrity`] if the chain is longer than the
    ///   number of stored records, i.e. the store already contains a cycle.
    /// * Store errors, unchanged.
    #[instrument(level = "debug", skip(self, candidate))]
    pub fn validate_new_parent(
        &self,
        candidate: &S::Record,
        proposed_parent: &RecordKey,
    ) -> ApplicationResult<bool> {
        let candidate_id = self.id_of(candidate)?;
        let limit = self.store.count()?.max(1);
        let mut current = proposed_parent.clone();

        for _ in 0..limit {
            let ancestor = self
                .store
                .find_by_id(&current)?
                .ok_or_else(|| ApplicationError::RecordNotFound(current.clone()))?;

            if self.id_of(&ancestor)? == candidate_id {
                debug!(candidate = %candidate_id, via = %current, "new parent would create a cycle");
                return Ok(false);
            }

            match self.fields.parent_of(&ancestor) {
                Some(parent) => current = parent,
                None => return Ok(true),
            }
        }

        Err(ApplicationError::Integrity(format!(
            "ancestor chain starting at {} is longer than {} records",
            proposed_parent, limit
        )))
    }

    /// Reparent the children of `deleted` to its own parent.
    ///
    /// Issues a single bulk update: every record whose parent is `deleted`
    /// gets `deleted`'s parent value (null when `deleted` was a root).
    /// Returns the number of reparented records.
    #[instrument(level = "debug", skip(self, deleted))]
    pub fn reparent_children_on_delete(&self, deleted: &S::Record) -> ApplicationResult<usize> {
        let deleted_id = self.id_of(deleted)?;
        let new_parent = deleted
            .field(&self.fields.parent)
            .unwrap_or(FieldValue::Null);

        let updated = self.store.update_all(
            &[(self.fields.parent.clone(), new_parent)],
            &self.fields.parent,
            &FieldValue::from(deleted_id.clone()),
        )?;
        debug!(deleted = %deleted_id, updated, "reparented children");
        Ok(updated)
    }
}
