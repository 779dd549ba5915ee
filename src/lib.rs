//! Render flat, self-referential record sets as nested multi-level menus.
//!
//! Records carry their own identifier and the identifier of their parent.
//! [`domain::HierarchyBuilder`] links them into a [`domain::Forest`] in two
//! linear passes, [`application::TreeRenderer`] turns the forest into nested
//! markup with options that may vary per depth ([`domain::LevelConfig`]),
//! and [`application::ParentageGuard`] keeps a [`infrastructure::RecordStore`]
//! free of cycles and orphans while it is edited.
//!
//! ```
//! use multimenu::application::{render_forest, MenuOptions};
//! use multimenu::domain::{build_forest, FieldNames, FieldValue, MapRecord};
//!
//! let records = vec![
//!     MapRecord::new().with("id", 1).with("parentId", FieldValue::Null),
//!     MapRecord::new().with("id", 2).with("parentId", 1),
//! ];
//! let forest = build_forest(records, &FieldNames::default()).unwrap();
//! let html = render_forest(&forest, &MenuOptions::with_template("#{id}")).unwrap();
//! assert_eq!(html, "<ul><li>#1<ul><li>#2</li></ul></li></ul>");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
