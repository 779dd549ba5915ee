//! Collaborator traits consumed by the core
//!
//! The record store, the template renderer and the tag builder live outside
//! the hierarchy logic. The core only talks to them through these traits, so
//! each can be swapped (an ORM, a real template engine) or mocked in tests.

use std::collections::BTreeMap;

use crate::domain::{FieldValue, MenuResult, Record, RecordKey};
use crate::infrastructure::error::StoreResult;

/// Markup attributes, rendered in key order.
pub type Attributes = BTreeMap<String, String>;

/// Extra parameters handed to item templates.
pub type TemplateParams = BTreeMap<String, String>;

/// Persistent source of records.
pub trait RecordStore: Send + Sync {
    type Record: Record;

    /// Fetch one record by identifier.
    fn find_by_id(&self, id: &RecordKey) -> StoreResult<Option<Self::Record>>;

    /// Set `set` fields on every record whose `match_field` matches `match_value`.
    ///
    /// Identifier-like values match by key (see [`FieldValue::matches`]), so a
    /// parent stored as `"10"` matches the integer `10`.
    ///
    /// Returns the number of updated records.
    fn update_all(
        &self,
        set: &[(String, FieldValue)],
        match_field: &str,
        match_value: &FieldValue,
    ) -> StoreResult<usize>;

    /// Total number of records.
    fn count(&self) -> StoreResult<usize>;
}

/// Everything an item template gets to see.
#[derive(Debug)]
pub struct TemplateContext<'a, R> {
    /// The record behind the rendered item
    pub data: &'a R,
    /// Resolved template parameters (never contains `data`)
    pub params: &'a TemplateParams,
    /// Nesting depth of the item, 0 for roots
    pub depth: usize,
}

/// Renders an item template into a markup fragment.
pub trait TemplateRenderer<R> {
    fn render(&self, template: &str, ctx: &TemplateContext<'_, R>) -> MenuResult<String>;
}

/// Wraps content in a markup tag.
pub trait TagBuilder {
    fn tag(&self, name: &str, content: &str, attributes: &Attributes) -> String;
}
