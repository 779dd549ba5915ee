//! In-memory record store backed by a JSON or TOML record file

use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{FieldNames, FieldValue, MapRecord, Record, RecordKey};
use crate::infrastructure::error::{StoreError, StoreResult};
use crate::infrastructure::traits::RecordStore;

/// TOML layout of a record file: an array of `[[records]]` tables.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    #[serde(default)]
    records: Vec<MapRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn of(path: &Path) -> StoreResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(StoreError::format(
                path.display().to_string(),
                "expected a .json or .toml file",
            )),
        }
    }
}

/// Record store holding a snapshot of records in memory.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    fields: FieldNames,
    records: RwLock<Vec<MapRecord>>,
}

impl InMemoryRecordStore {
    pub fn new(records: Vec<MapRecord>, fields: FieldNames) -> Self {
        Self {
            fields,
            records: RwLock::new(records),
        }
    }

    /// Load records from a `.json` (array of objects) or `.toml`
    /// (`[[records]]` tables) file.
    #[instrument(level = "debug", skip(fields))]
    pub fn load(path: &Path, fields: FieldNames) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::io(format!("read {}", path.display()), e))?;
        let context = path.display().to_string();

        let records = match FileFormat::of(path)? {
            FileFormat::Json => serde_json::from_str::<Vec<MapRecord>>(&content)
                .map_err(|e| StoreError::format(context, e))?,
            FileFormat::Toml => {
                toml::from_str::<RecordFile>(&content)
                    .map_err(|e| StoreError::format(context, e))?
                    .records
            }
        };
        debug!("loaded {} records", records.len());

        Ok(Self::new(records, fields))
    }

    /// Write the current records back in the format given by the extension.
    ///
    /// TOML has no null; null fields are omitted, which reads back as "no parent".
    #[instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let records = self.records()?;
        let context = path.display().to_string();

        let content = match FileFormat::of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(&records)
                .map_err(|e| StoreError::format(context, e))?,
            FileFormat::Toml => {
                let records = records
                    .into_iter()
                    .map(|r| {
                        r.fields()
                            .into_iter()
                            .filter(|(_, v)| *v != FieldValue::Null)
                            .collect::<MapRecord>()
                    })
                    .collect();
                toml::to_string_pretty(&RecordFile { records })
                    .map_err(|e| StoreError::format(context, e))?
            }
        };

        std::fs::write(path, content)
            .map_err(|e| StoreError::io(format!("write {}", path.display()), e))
    }

    /// Snapshot of all records, in store order.
    pub fn records(&self) -> StoreResult<Vec<MapRecord>> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }

    /// Remove the record with identifier `id`, returning it.
    pub fn remove(&self, id: &RecordKey) -> StoreResult<Option<MapRecord>> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let position = records
            .iter()
            .position(|r| self.fields.id_of(r).as_ref() == Some(id));
        Ok(position.map(|p| records.remove(p)))
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }
}

impl RecordStore for InMemoryRecordStore {
    type Record = MapRecord;

    fn find_by_id(&self, id: &RecordKey) -> StoreResult<Option<MapRecord>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .find(|r| self.fields.id_of(*r).as_ref() == Some(id))
            .cloned())
    }

    fn update_all(
        &self,
        set: &[(String, FieldValue)],
        match_field: &str,
        match_value: &FieldValue,
    ) -> StoreResult<usize> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let mut updated = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.get(match_field).is_some_and(|v| v.matches(match_value)))
        {
            for (name, value) in set {
                record.set(name.clone(), value.clone());
            }
            updated += 1;
        }
        debug!(match_field, %match_value, updated, "bulk update");
        Ok(updated)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().map_err(|_| StoreError::Poisoned)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryRecordStore {
        InMemoryRecordStore::new(
            vec![
                MapRecord::new().with("id", 1).with("parentId", FieldValue::Null),
                MapRecord::new().with("id", 2).with("parentId", 1),
                MapRecord::new().with("id", 3).with("parentId", 1),
            ],
            FieldNames::default(),
        )
    }

    #[test]
    fn test_find_by_id() {
        let found = store().find_by_id(&RecordKey::Int(2)).unwrap();
        assert_eq!(found.unwrap().get("parentId"), Some(&FieldValue::Int(1)));
        assert!(store().find_by_id(&RecordKey::Int(9)).unwrap().is_none());
    }

    #[test]
    fn test_update_all_counts_matches() {
        let store = store();
        let n = store
            .update_all(
                &[("parentId".into(), FieldValue::Int(5))],
                "parentId",
                &FieldValue::Int(1),
            )
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_remove() {
        let store = store();
        assert!(store.remove(&RecordKey::Int(3)).unwrap().is_some());
        assert!(store.remove(&RecordKey::Int(3)).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 2);
    }
}
