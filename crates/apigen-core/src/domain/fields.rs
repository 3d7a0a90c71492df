//! Field types, values, and definitions.
//!
//! The type system is deliberately tiny: a closed set of three tags matching
//! what the generated JavaScript layer can represent in JSON. Classification
//! from runtime values is a pure function, so type inference stays testable
//! without touching any dynamic runtime.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DomainError;

/// Per-resource mapping from field name to type tag.
///
/// Invariant (enforced by the schema registry): every persisted field map
/// contains an `id: string` entry.
pub type FieldMap = BTreeMap<String, FieldType>;

/// Closed set of schema type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Fixed default policy for unsupplied instance fields.
    ///
    /// `""` for string, `null` for number, `false` for boolean. This is not
    /// schema-driven and not overridable.
    pub fn default_value(&self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Number => Value::Null,
            Self::Boolean => Value::Bool(false),
        }
    }

    /// Classify a JSON value's runtime kind into a type tag.
    ///
    /// Anything that is not a boolean or a number degrades to `string`.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            _ => Self::String,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            other => Err(DomainError::UnknownFieldType { tag: other.into() }),
        }
    }
}

/// A typed value produced by the key:value argument parser.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl FieldValue {
    /// The type tag this value's runtime kind implies.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Str(_) => FieldType::String,
            Self::Num(_) => FieldType::Number,
            Self::Bool(_) => FieldType::Boolean,
        }
    }

    /// Convert into the JSON representation stored in the data store.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            // Finite by construction (the KV parser rejects NaN/inf), so the
            // fallback is unreachable in practice.
            Self::Num(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Bool(b) => Value::Bool(*b),
        }
    }
}

/// A single `name:type` declaration from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Parse one `name:type` token. A missing type defaults to `string`;
    /// an unrecognised type tag is an error.
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let (name, ty) = match token.split_once(':') {
            Some((name, tag)) if !tag.is_empty() => (name, tag.parse()?),
            Some((name, _)) => (name, FieldType::String),
            None => (token, FieldType::String),
        };

        if name.is_empty() {
            return Err(DomainError::InvalidFieldDef {
                token: token.into(),
                reason: "field name cannot be empty".into(),
            });
        }

        Ok(Self::new(name, ty))
    }
}

/// Parse a list of `name:type` tokens into field definitions.
pub fn parse_field_defs(tokens: &[String]) -> Result<Vec<FieldDef>, DomainError> {
    tokens.iter().map(|t| FieldDef::parse(t)).collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_tags_round_trip_as_str() {
        for ty in [FieldType::String, FieldType::Number, FieldType::Boolean] {
            assert_eq!(ty.as_str().parse::<FieldType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(
            "datetime".parse::<FieldType>(),
            Err(DomainError::UnknownFieldType { .. })
        ));
    }

    #[test]
    fn default_values_follow_fixed_policy() {
        assert_eq!(FieldType::String.default_value(), json!(""));
        assert_eq!(FieldType::Number.default_value(), Value::Null);
        assert_eq!(FieldType::Boolean.default_value(), json!(false));
    }

    #[test]
    fn inference_from_runtime_kind() {
        assert_eq!(FieldType::infer(&json!(true)), FieldType::Boolean);
        assert_eq!(FieldType::infer(&json!(47)), FieldType::Number);
        assert_eq!(FieldType::infer(&json!("x")), FieldType::String);
        // null and sub-objects degrade to string
        assert_eq!(FieldType::infer(&Value::Null), FieldType::String);
    }

    #[test]
    fn field_def_parses_name_and_type() {
        let def = FieldDef::parse("rating:number").unwrap();
        assert_eq!(def.name, "rating");
        assert_eq!(def.ty, FieldType::Number);
    }

    #[test]
    fn field_def_missing_type_defaults_to_string() {
        assert_eq!(FieldDef::parse("title").unwrap().ty, FieldType::String);
        assert_eq!(FieldDef::parse("title:").unwrap().ty, FieldType::String);
    }

    #[test]
    fn field_def_empty_name_is_invalid() {
        assert!(FieldDef::parse(":string").is_err());
    }

    #[test]
    fn field_value_type_matches_variant() {
        assert_eq!(FieldValue::Bool(true).field_type(), FieldType::Boolean);
        assert_eq!(FieldValue::Num(5.0).field_type(), FieldType::Number);
        assert_eq!(FieldValue::Str("x".into()).field_type(), FieldType::String);
    }
}
