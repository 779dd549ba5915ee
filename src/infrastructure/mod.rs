//! Infrastructure layer: collaborator traits and their bundled implementations
//!
//! The record store, template renderer and tag builder are consumed through
//! traits; the implementations here back the CLI and the tests.

pub mod error;
pub mod html;
pub mod store;
pub mod templates;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use html::{escape_html, HtmlTagBuilder};
pub use store::InMemoryRecordStore;
pub use templates::PlaceholderTemplates;
pub use traits::{
    Attributes, RecordStore, TagBuilder, TemplateContext, TemplateParams, TemplateRenderer,
};
