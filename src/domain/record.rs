//! Records as seen by the hierarchy: identifier, parent reference, free-form fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default identifier field name.
pub const DEFAULT_ID_FIELD: &str = "id";
/// Default parent-reference field name.
pub const DEFAULT_PARENT_FIELD: &str = "parentId";

/// Scalar value of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FieldValue {
    /// Converts the value into a key usable as identifier.
    ///
    /// Only integers and strings identify records. A string holding a
    /// canonical decimal integer becomes an integer key, so `"10"` and `10`
    /// name the same record.
    pub fn as_key(&self) -> Option<RecordKey> {
        match self {
            FieldValue::Int(i) => Some(RecordKey::Int(*i)),
            FieldValue::Str(s) => Some(RecordKey::parse(s)),
            FieldValue::Null | FieldValue::Bool(_) => None,
        }
    }

    /// Whether both values name the same record, or are equal otherwise.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self.as_key(), other.as_key()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Whether the value counts as "no value" for a parent reference.
    ///
    /// `null`, `false`, `0`, `""` and `"0"` are empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Bool(b) => !b,
            FieldValue::Int(i) => *i == 0,
            FieldValue::Str(s) => s.is_empty() || s == "0",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<RecordKey> for FieldValue {
    fn from(key: RecordKey) -> Self {
        match key {
            RecordKey::Int(i) => FieldValue::Int(i),
            RecordKey::Str(s) => FieldValue::Str(s),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

/// Identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Int(i64),
    Str(String),
}

impl RecordKey {
    /// Parses an identifier: canonical decimal integers first, strings otherwise.
    ///
    /// `"007"` and `"+7"` stay strings; they do not print back unchanged.
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(i) if i.to_string() == s => RecordKey::Int(i),
            _ => RecordKey::Str(s.to_string()),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Int(i) => write!(f, "{}", i),
            RecordKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(v: i64) -> Self {
        RecordKey::Int(v)
    }
}

impl From<&str> for RecordKey {
    fn from(v: &str) -> Self {
        RecordKey::parse(v)
    }
}

/// Flat entity carrying its own identifier and a parent identifier.
pub trait Record {
    /// Value of the named field, `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// All fields, used to expose the record to templates.
    fn fields(&self) -> Vec<(String, FieldValue)>;
}

/// Record backed by an ordered field map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapRecord(BTreeMap<String, FieldValue>);

impl MapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }
}

impl Record for MapRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.0.get(name).cloned()
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for MapRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Names of the identifier and parent-reference fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub parent: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID_FIELD.to_string(),
            parent: DEFAULT_PARENT_FIELD.to_string(),
        }
    }
}

impl FieldNames {
    pub fn new(id: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
        }
    }

    /// Identifier of `record`, `None` if missing or not a key.
    pub fn id_of<R: Record + ?Sized>(&self, record: &R) -> Option<RecordKey> {
        record.field(&self.id).and_then(|v| v.as_key())
    }

    /// Parent identifier of `record`, `None` for roots.
    pub fn parent_of<R: Record + ?Sized>(&self, record: &R) -> Option<RecordKey> {
        record
            .field(&self.parent)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.as_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::Int(0).is_empty());
        assert!(FieldValue::Str("0".into()).is_empty());
        assert!(FieldValue::Str(String::new()).is_empty());
        assert!(FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::Int(3).is_empty());
        assert!(!FieldValue::Str("a".into()).is_empty());
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(RecordKey::parse("42"), RecordKey::Int(42));
        assert_eq!(RecordKey::parse("-3"), RecordKey::Int(-3));
        assert_eq!(RecordKey::parse("home"), RecordKey::Str("home".into()));
        assert_eq!(RecordKey::parse("007"), RecordKey::Str("007".into()));
        assert_eq!(RecordKey::parse("+7"), RecordKey::Str("+7".into()));
    }

    #[test]
    fn test_numeric_string_and_integer_are_the_same_key() {
        assert_eq!(FieldValue::from("10").as_key(), Some(RecordKey::Int(10)));
        assert!(FieldValue::from("10").matches(&FieldValue::Int(10)));
        assert!(!FieldValue::from("010").matches(&FieldValue::Int(10)));
        assert!(FieldValue::Null.matches(&FieldValue::Null));
        assert!(!FieldValue::Null.matches(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_parent_of_treats_zero_as_root() {
        let fields = FieldNames::default();
        let rec = MapRecord::new().with("id", 1).with("parentId", 0);
        assert_eq!(fields.parent_of(&rec), None);
        assert_eq!(fields.id_of(&rec), Some(RecordKey::Int(1)));
    }
}
