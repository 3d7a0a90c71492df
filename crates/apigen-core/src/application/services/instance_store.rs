//! Instance store - record lifecycle against the data store document.
//!
//! Each operation reloads the document, mutates it, and persists it whole.
//! Not-found outcomes leave the document untouched (no save).

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::DocumentStore},
    domain::{FieldMap, FieldValue, Record},
    error::CoreResult,
};

/// Store for instance records, bound to the data store document.
pub struct InstanceStore {
    store: Box<dyn DocumentStore>,
    timestamps: bool,
}

impl InstanceStore {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self {
            store,
            timestamps: true,
        }
    }

    /// Disable (or re-enable) `created_at`/`updated_at` stamping on create.
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Create a record for a resource from a partial set of field values.
    ///
    /// For every schema field except `id`: a supplied value is used as-is,
    /// otherwise the type's fixed default applies (`""` / `null` / `false`).
    /// The record gets a freshly generated UUID and, unless disabled,
    /// RFC 3339 creation/update stamps.
    #[instrument(skip_all, fields(resource = plural))]
    pub fn create(
        &self,
        plural: &str,
        schema: &FieldMap,
        values: &BTreeMap<String, FieldValue>,
    ) -> CoreResult<Record> {
        let mut doc = self.store.load()?;

        let id = uuid::Uuid::new_v4().to_string();
        let mut record = Record::new();
        record.insert("id".into(), Value::String(id.clone()));

        if self.timestamps {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            record.insert("created_at".into(), Value::String(now.clone()));
            record.insert("updated_at".into(), Value::String(now));
        }

        for (field, ty) in schema {
            if field == "id" {
                continue;
            }
            let value = values
                .get(field)
                .map(FieldValue::to_json)
                .unwrap_or_else(|| ty.default_value());
            record.insert(field.clone(), value);
        }

        records_mut(&mut doc, plural)?.push(Value::Object(record.clone()));
        self.store.save(&doc)?;
        info!(id = %id, "instance created");

        Ok(record)
    }

    /// All records for a resource, in insertion order. Unknown resource → empty.
    pub fn all(&self, plural: &str) -> CoreResult<Vec<Value>> {
        let doc = self.store.load()?;
        Ok(doc
            .get(plural)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Find one record by exact id match.
    pub fn find(&self, plural: &str, id: &str) -> CoreResult<Option<Value>> {
        Ok(self
            .all(plural)?
            .into_iter()
            .find(|item| record_id(item) == Some(id)))
    }

    /// Shallow-merge a partial record over the existing one. The id field
    /// cannot be overwritten by the merge. Returns `None` (document
    /// untouched) when the resource or id does not exist.
    #[instrument(skip_all, fields(resource = plural, id))]
    pub fn update(&self, plural: &str, id: &str, patch: &Record) -> CoreResult<Option<Value>> {
        let mut doc = self.store.load()?;

        let Some(items) = doc.get_mut(plural).and_then(Value::as_array_mut) else {
            return Ok(None);
        };
        let Some(existing) = items
            .iter_mut()
            .find(|item| record_id(item) == Some(id))
            .and_then(Value::as_object_mut)
        else {
            return Ok(None);
        };

        for (key, value) in patch {
            existing.insert(key.clone(), value.clone());
        }
        // id is immutable no matter what the patch carried
        existing.insert("id".into(), Value::String(id.to_string()));
        let updated = Value::Object(existing.clone());

        self.store.save(&doc)?;
        info!("instance updated");
        Ok(Some(updated))
    }

    /// Delete the record with the given id. Returns `false` (document
    /// untouched) when the resource or id does not exist.
    #[instrument(skip_all, fields(resource = plural, id))]
    pub fn remove(&self, plural: &str, id: &str) -> CoreResult<bool> {
        let mut doc = self.store.load()?;

        let Some(items) = doc.get_mut(plural).and_then(Value::as_array_mut) else {
            return Ok(false);
        };
        let before = items.len();
        items.retain(|item| record_id(item) != Some(id));
        if items.len() == before {
            return Ok(false);
        }

        self.store.save(&doc)?;
        info!("instance removed");
        Ok(true)
    }

    /// Delete one record matched by id, falling back to an exact `name`
    /// match. Returns the removed record's id, or `None` if nothing matched.
    pub fn remove_by_id_or_name(&self, plural: &str, key: &str) -> CoreResult<Option<String>> {
        let matched = self.all(plural)?.into_iter().find_map(|item| {
            let obj = item.as_object()?;
            let id = obj.get("id")?.as_str()?;
            let by_name = obj.get("name").and_then(Value::as_str) == Some(key);
            (id == key || by_name).then(|| id.to_string())
        });

        match matched {
            Some(id) => {
                self.remove(plural, &id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Drop a resource's whole record list (explicit teardown).
    pub fn remove_resource(&self, plural: &str) -> CoreResult<bool> {
        let mut doc = self.store.load()?;
        if doc.remove(plural).is_none() {
            return Ok(false);
        }
        self.store.save(&doc)?;
        info!(resource = plural, "all instances removed");
        Ok(true)
    }
}

fn record_id(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

/// The resource's record list, created lazily. A pre-existing entry that is
/// not a list (hand-edited store) is a fatal configuration error, never a
/// silent overwrite.
fn records_mut<'a>(
    doc: &'a mut crate::domain::Document,
    plural: &str,
) -> CoreResult<&'a mut Vec<Value>> {
    doc.entry(plural.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| {
            ApplicationError::MalformedRecordList {
                resource: plural.into(),
            }
            .into()
        })
}

// ── tests ─────────────────────────────────────────────────────────────────────
