//! Level-aware configuration values.
//!
//! Every visual aspect of a rendered menu (tag names, attribute maps, item
//! templates and their parameters) may be
//!
//! * a constant, identical on every level,
//! * a per-level list, indexed by depth, whose last entry covers every level
//!   beyond the list, or
//! * computed from the current depth and node.
//!
//! In configuration files a per-level list is written as a mapping with a
//! `levels` key:
//!
//! ```toml
//! [menu.main_container_tag]
//! levels = ["ul", "ol"]
//! ```

use std::fmt;
use std::sync::Arc;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::domain::error::{MenuError, MenuResult};
use crate::domain::forest::NodeRef;

/// Reserved key marking a per-level list in configuration files.
const LEVELS_KEY: &str = "levels";

/// Function computing a value from `(depth, node)`.
///
/// `node` is `None` where no node applies (the root container).
pub type Resolver<T, R> = Arc<dyn for<'a> Fn(usize, Option<NodeRef<'a, R>>) -> T + Send + Sync>;

/// One entry of a per-level list.
pub enum LevelValue<T, R> {
    Value(T),
    Computed(Resolver<T, R>),
}

/// A configuration value that may vary by nesting depth.
pub enum LevelConfig<T, R> {
    Constant(T),
    PerLevel(Vec<LevelValue<T, R>>),
    Computed(Resolver<T, R>),
}

impl<T: Clone, R> LevelConfig<T, R> {
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Per-level list of plain values.
    pub fn levels<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::PerLevel(values.into_iter().map(LevelValue::Value).collect())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: for<'a> Fn(usize, Option<NodeRef<'a, R>>) -> T + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolve the value for `depth`.
    ///
    /// Computed values are invoked once with `(depth, node)` and returned
    /// as-is. A per-level list falls back to its last entry for depths beyond
    /// its length.
    ///
    /// # Errors
    /// [`MenuError::Configuration`] if a per-level list is empty.
    pub fn resolve(&self, depth: usize, node: Option<NodeRef<'_, R>>) -> MenuResult<T> {
        match self {
            Self::Constant(value) => Ok(value.clone()),
            Self::Computed(f) => Ok(f(depth, node)),
            Self::PerLevel(levels) => {
                let entry = levels
                    .get(depth)
                    .or_else(|| levels.last())
                    .ok_or_else(|| MenuError::config("level values are not defined"))?;
                Ok(match entry {
                    LevelValue::Value(value) => value.clone(),
                    LevelValue::Computed(f) => f(depth, node),
                })
            }
        }
    }
}

impl<T, R> LevelConfig<T, R> {
    /// Reports an empty per-level list before anything is rendered.
    pub fn validate(&self, name: &str) -> MenuResult<()> {
        match self {
            Self::PerLevel(levels) if levels.is_empty() => Err(MenuError::config(format!(
                "level values are not defined for {}",
                name
            ))),
            _ => Ok(()),
        }
    }
}

impl<R> From<&str> for LevelConfig<String, R> {
    fn from(value: &str) -> Self {
        Self::Constant(value.to_string())
    }
}

impl<T: Default, R> Default for LevelConfig<T, R> {
    fn default() -> Self {
        Self::Constant(T::default())
    }
}

impl<T: Clone, R> Clone for LevelValue<T, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(v) => Self::Value(v.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T: Clone, R> Clone for LevelConfig<T, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(v) => Self::Constant(v.clone()),
            Self::PerLevel(levels) => Self::PerLevel(levels.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for LevelValue<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => v.fmt(f),
            Self::Computed(_) => f.write_str("<computed>"),
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for LevelConfig<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::PerLevel(levels) => f.debug_tuple("PerLevel").field(levels).finish(),
            Self::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl<'de, T, R> Deserialize<'de> for LevelConfig<T, R>
where
    T: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A mapping carrying `levels` is a per-level list, anything else a constant.
        let value = serde_json::Value::deserialize(deserializer)?;

        match value {
            serde_json::Value::Object(mut map) if map.contains_key(LEVELS_KEY) => {
                if map.len() > 1 {
                    return Err(D::Error::custom(format!(
                        "a mapping with `{}` must have no other keys",
                        LEVELS_KEY
                    )));
                }
                let levels = map.remove(LEVELS_KEY).unwrap_or_default();
                if !levels.is_array() {
                    return Err(D::Error::custom(format!(
                        "`{}` must be a list of values",
                        LEVELS_KEY
                    )));
                }
                let levels: Vec<T> = serde_json::from_value(levels).map_err(D::Error::custom)?;
                Ok(LevelConfig::PerLevel(
                    levels.into_iter().map(LevelValue::Value).collect(),
                ))
            }
            other => serde_json::from_value(other)
                .map(LevelConfig::Constant)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::MapRecord;
    use std::collections::BTreeMap;

    type Attrs = BTreeMap<String, String>;

    #[test]
    fn test_deserialize_scalar_is_constant() {
        let cfg: BTreeMap<String, LevelConfig<String, MapRecord>> =
            toml::from_str(r#"tag = "ul""#).unwrap();
        assert_eq!(cfg["tag"].resolve(3, None).unwrap(), "ul");
    }

    #[test]
    fn test_deserialize_levels_mapping_is_per_level() {
        let cfg: BTreeMap<String, LevelConfig<Attrs, MapRecord>> = toml::from_str(
            r#"
            [attrs]
            levels = [{ class = "top" }, { class = "sub" }]
            "#,
        )
        .unwrap();
        let attrs = &cfg["attrs"];
        assert_eq!(attrs.resolve(0, None).unwrap()["class"], "top");
        assert_eq!(attrs.resolve(7, None).unwrap()["class"], "sub");
    }

    #[test]
    fn test_deserialize_plain_mapping_is_constant() {
        let cfg: BTreeMap<String, LevelConfig<Attrs, MapRecord>> = toml::from_str(
            r#"
            [attrs]
            class = "menu"
            "#,
        )
        .unwrap();
        assert!(matches!(cfg["attrs"], LevelConfig::Constant(_)));
    }

    #[test]
    fn test_deserialize_levels_key_requires_a_list() {
        let result: Result<BTreeMap<String, LevelConfig<Attrs, MapRecord>>, _> =
            toml::from_str(r#"attrs = { levels = "x" }"#);
        assert!(result.is_err());

        let result: Result<BTreeMap<String, LevelConfig<Attrs, MapRecord>>, _> =
            toml::from_str(r#"attrs = { levels = [], class = "menu" }"#);
        assert!(result.is_err());
    }
}
