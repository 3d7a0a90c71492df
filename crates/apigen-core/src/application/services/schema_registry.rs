//! Schema registry - per-resource field maps in the schema document.
//!
//! Every mutating operation re-reads the schema document fresh, applies the
//! change, and rewrites the whole document. There is no schema versioning and
//! no validation that existing instance records remain compatible after a
//! field map change.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DocumentStore, SnapshotStore},
    },
    domain::{Document, FieldDef, FieldMap, FieldType, FieldValue},
    error::CoreResult,
};

/// How `define_or_extend` treats a pre-existing field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    /// Leave an existing field map untouched (the default).
    #[default]
    CreateIfAbsent,
    /// Merge new definitions in: new keys added, re-declared keys overwritten.
    ForceMerge,
    /// Discard the existing field map and replace it entirely.
    Reset,
}

/// What `define_or_extend` actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    Created,
    Merged,
    Reset,
    Unchanged,
}

/// Registry over the schema document, with a single-slot backup taken before
/// any destructive change.
pub struct SchemaRegistry {
    store: Box<dyn DocumentStore>,
    backup: Box<dyn SnapshotStore>,
}

impl SchemaRegistry {
    pub fn new(store: Box<dyn DocumentStore>, backup: Box<dyn SnapshotStore>) -> Self {
        Self { store, backup }
    }

    /// Look up the field map for a resource, or `None` if undefined.
    pub fn get(&self, plural: &str) -> CoreResult<Option<FieldMap>> {
        let doc = self.store.load()?;
        doc.get(plural)
            .map(|v| field_map_from_value(plural, v))
            .transpose()
    }

    /// Ensure a field map exists, inferring one from example values.
    ///
    /// When the resource has no field map yet, synthesizes `id: string` plus
    /// one entry per supplied value with its type inferred from the value's
    /// runtime kind. When a field map already exists this is a no-op and the
    /// existing map is returned unchanged.
    #[instrument(skip_all, fields(resource = plural))]
    pub fn ensure_from_values(
        &self,
        plural: &str,
        values: &BTreeMap<String, FieldValue>,
    ) -> CoreResult<FieldMap> {
        let mut doc = self.store.load()?;

        if let Some(existing) = doc.get(plural) {
            debug!("schema already present, leaving untouched");
            return field_map_from_value(plural, existing);
        }

        let mut fields = FieldMap::new();
        fields.insert("id".into(), FieldType::String);
        for (key, value) in values {
            fields.insert(key.clone(), value.field_type());
        }

        doc.insert(plural.to_string(), field_map_to_value(&fields));
        self.store.save(&doc)?;
        info!(fields = fields.len(), "schema inferred from values");

        Ok(fields)
    }

    /// Define a resource's field map, or extend/replace an existing one.
    ///
    /// A full snapshot of the current schema document is persisted to the
    /// single-slot backup before any destructive change (`ForceMerge` or
    /// `Reset` on a pre-existing resource). The resulting field map always
    /// contains `id: string`.
    #[instrument(skip_all, fields(resource = plural, ?mode))]
    pub fn define_or_extend(
        &self,
        plural: &str,
        defs: &[FieldDef],
        mode: SchemaMode,
    ) -> CoreResult<(FieldMap, SchemaOutcome)> {
        let mut doc = self.store.load()?;

        let (fields, outcome) = match doc.get(plural) {
            None => (build_map(defs, None), SchemaOutcome::Created),
            Some(existing) => match mode {
                SchemaMode::CreateIfAbsent => {
                    debug!("schema exists, skipping update");
                    return Ok((field_map_from_value(plural, existing)?, SchemaOutcome::Unchanged));
                }
                SchemaMode::ForceMerge => {
                    let existing = field_map_from_value(plural, existing)?;
                    self.backup(&doc)?;
                    (build_map(defs, Some(existing)), SchemaOutcome::Merged)
                }
                SchemaMode::Reset => {
                    self.backup(&doc)?;
                    (build_map(defs, None), SchemaOutcome::Reset)
                }
            },
        };

        doc.insert(plural.to_string(), field_map_to_value(&fields));
        self.store.save(&doc)?;
        info!(?outcome, fields = fields.len(), "schema updated");

        Ok((fields, outcome))
    }

    /// Remove a resource's field map entirely (explicit teardown).
    ///
    /// Returns `false` if the resource had no schema. No backup is taken;
    /// teardown is an explicit operator action, not an edit mode.
    pub fn remove(&self, plural: &str) -> CoreResult<bool> {
        let mut doc = self.store.load()?;
        if doc.remove(plural).is_none() {
            return Ok(false);
        }
        self.store.save(&doc)?;
        info!(resource = plural, "schema entry removed");
        Ok(true)
    }

    fn backup(&self, doc: &Document) -> CoreResult<()> {
        self.backup.snapshot(doc)?;
        debug!("schema document snapshotted before destructive change");
        Ok(())
    }
}

/// Build a field map from definitions, optionally merged over an existing
/// map, always containing `id: string`.
fn build_map(defs: &[FieldDef], existing: Option<FieldMap>) -> FieldMap {
    let mut fields = existing.unwrap_or_default();
    for def in defs {
        fields.insert(def.name.clone(), def.ty);
    }
    // Schema document invariant: every field map carries an id.
    fields.entry("id".into()).or_insert(FieldType::String);
    fields
}

fn field_map_to_value(fields: &FieldMap) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, t)| (k.clone(), Value::String(t.as_str().into())))
            .collect(),
    )
}

fn field_map_from_value(plural: &str, value: &Value) -> CoreResult<FieldMap> {
    let obj = value
        .as_object()
        .ok_or_else(|| ApplicationError::MalformedSchema {
            resource: plural.into(),
            reason: "schema entry is not an object".into(),
        })?;

    let mut fields = FieldMap::new();
    for (name, tag) in obj {
        let tag = tag
            .as_str()
            .ok_or_else(|| ApplicationError::MalformedSchema {
                resource: plural.into(),
                reason: format!("type tag for '{name}' is not a string"),
            })?;
        let ty = tag
            .parse::<FieldType>()
            .map_err(|_| ApplicationError::MalformedSchema {
                resource: plural.into(),
                reason: format!("unknown type tag '{tag}' for '{name}'"),
            })?;
        fields.insert(name.clone(), ty);
    }
    Ok(fields)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryDocument, MemorySnapshot};
    use crate::domain::FieldDef;

    fn registry() -> (SchemaRegistry, MemoryDocument, MemorySnapshot) {
        let store = MemoryDocument::new();
        let backup = MemorySnapshot::new();
        let registry = SchemaRegistry::new(Box::new(store.clone()), Box::new(backup.clone()));
        (registry, store, backup)
    }

    fn defs(pairs: &[(&str, FieldType)]) -> Vec<FieldDef> {
        pairs.iter().map(|(n, t)| FieldDef::new(*n, *t)).collect()
    }

    #[test]
    fn create_if_absent_defines_new_resource() {
        let (registry, _, backup) = registry();
        let (fields, outcome) = registry
            .define_or_extend(
                "widgets",
                &defs(&[("color", FieldType::String)]),
                SchemaMode::CreateIfAbsent,
            )
            .unwrap();

        assert_eq!(outcome, SchemaOutcome::Created);
        assert_eq!(fields.get("id"), Some(&FieldType::String));
        assert_eq!(fields.get("color"), Some(&FieldType::String));
        // creation is not destructive, so no backup
        assert!(backup.last().is_none());
    }

    #[test]
    fn create_if_absent_is_a_noop_on_existing() {
        let (registry, store, _) = registry();
        registry
            .define_or_extend(
                "widgets",
                &defs(&[("color", FieldType::String)]),
                SchemaMode::CreateIfAbsent,
            )
            .unwrap();
        let before = store.document();

        let (fields, outcome) = registry
            .define_or_extend(
                "widgets",
                &defs(&[("weight", FieldType::Number)]),
                SchemaMode::CreateIfAbsent,
            )
            .unwrap();

        assert_eq!(outcome, SchemaOutcome::Unchanged);
        assert!(!fields.contains_key("weight"));
        assert_eq!(store.document(), before, "document must be untouched");
    }

    #[test]
    fn force_merge_is_monotonic_and_backs_up() {
        let (registry, _, backup) = registry();
        registry
            .define_or_extend(
                "widgets",
                &defs(&[("color", FieldType::String), ("count", FieldType::Number)]),
                SchemaMode::CreateIfAbsent,
            )
            .unwrap();

        let (fields, outcome) = registry
            .define_or_extend(
                "widgets",
                &defs(&[("count", FieldType::String), ("active", FieldType::Boolean)]),
                SchemaMode::ForceMerge,
            )
            .unwrap();

        assert_eq!(outcome, SchemaOutcome::Merged);
        // never removes a previously existing field
        assert!(fields.contains_key("color"));
        // re-declared field's type overwritten
        assert_eq!(fields.get("count"), Some(&FieldType::String));
        assert_eq!(fields.get("active"), Some(&FieldType::Boolean));
        // snapshot taken and it holds the pre-change state
        let snap = backup.last().expect("backup must exist");
        let snap = snap.get("widgets").unwrap();
        assert_eq!(snap["count"], "number");
    }

    #[test]
    fn reset_replaces_wholly() {
        let (registry, _, backup) = registry();
        registry
            .define_or_extend(
                "widgets",
                &defs(&[("a", FieldType::String), ("b", FieldType::Number)]),
                SchemaMode::CreateIfAbsent,
            )
            .unwrap();

        let (fields, outcome) = registry
            .define_or_extend(
                "widgets",
                &defs(&[("c", FieldType::Boolean)]),
                SchemaMode::Reset,
            )
            .unwrap();

        assert_eq!(outcome, SchemaOutcome::Reset);
        assert!(!fields.contains_key("a"));
        assert!(!fields.contains_key("b"));
        assert_eq!(fields.get("c"), Some(&FieldType::Boolean));
        // id survives resets by invariant
        assert_eq!(fields.get("id"), Some(&FieldType::String));
        assert!(backup.last().is_some());
    }

    #[test]
    fn second_destructive_change_overwrites_backup() {
        let (registry, _, backup) = registry();
        registry
            .define_or_extend("widgets", &defs(&[("a", FieldType::String)]), SchemaMode::CreateIfAbsent)
            .unwrap();
        registry
            .define_or_extend("widgets", &defs(&[("b", FieldType::String)]), SchemaMode::ForceMerge)
            .unwrap();
        registry
            .define_or_extend("widgets", &defs(&[("c", FieldType::String)]), SchemaMode::Reset)
            .unwrap();

        // only the most recent destructive change is recoverable: the slot
        // holds the state *before* the reset, which already includes b.
        let snap = backup.last().unwrap();
        let entry = snap.get("widgets").unwrap().as_object().unwrap();
        assert!(entry.contains_key("b"));
    }

    #[test]
    fn ensure_from_values_infers_types() {
        let (registry, _, _) = registry();
        let mut values = BTreeMap::new();
        values.insert("name".to_string(), FieldValue::Str("Tom".into()));
        values.insert("age".to_string(), FieldValue::Num(47.0));
        values.insert("active".to_string(), FieldValue::Bool(true));

        let fields = registry.ensure_from_values("actors", &values).unwrap();
        assert_eq!(fields.get("id"), Some(&FieldType::String));
        assert_eq!(fields.get("name"), Some(&FieldType::String));
        assert_eq!(fields.get("age"), Some(&FieldType::Number));
        assert_eq!(fields.get("active"), Some(&FieldType::Boolean));
    }

    #[test]
    fn ensure_from_values_noop_when_present() {
        let (registry, store, _) = registry();
        registry
            .define_or_extend("actors", &defs(&[("name", FieldType::String)]), SchemaMode::CreateIfAbsent)
            .unwrap();
        let before = store.document();

        let mut values = BTreeMap::new();
        values.insert("age".to_string(), FieldValue::Num(47.0));
        let fields = registry.ensure_from_values("actors", &values).unwrap();

        assert!(!fields.contains_key("age"));
        assert_eq!(store.document(), before);
    }

    #[test]
    fn remove_reports_missing_resource() {
        let (registry, _, _) = registry();
        assert!(!registry.remove("ghosts").unwrap());
    }

    #[test]
    fn malformed_schema_entry_is_an_error() {
        let (registry, store, _) = registry();
        let mut doc = Document::new();
        doc.insert("widgets".into(), serde_json::json!(["not", "a", "map"]));
        store.set_document(doc);

        assert!(registry.get("widgets").is_err());
    }
}
