//! Application layer: rendering and hierarchy integrity
//!
//! This layer orchestrates domain logic and depends on the collaborator traits.

pub mod error;
pub mod guard;
pub mod options;
pub mod renderer;

pub use error::{ApplicationError, ApplicationResult};
pub use guard::ParentageGuard;
pub use options::MenuOptions;
pub use renderer::{render_forest, render_records, TreeRenderer};
