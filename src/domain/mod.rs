//! Domain layer: records, the forest and level-aware configuration
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod display;
pub mod error;
pub mod forest;
pub mod level;
pub mod record;

pub use builder::{build_forest, HierarchyBuilder, OrphanPolicy};
pub use display::TreeDisplay;
pub use error::{MenuError, MenuResult};
pub use forest::{Forest, NodeRef, TreeNode};
pub use level::{LevelConfig, LevelValue, Resolver};
pub use record::{FieldNames, FieldValue, MapRecord, Record, RecordKey};
