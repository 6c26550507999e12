use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod catalog;
pub mod wire;

pub use wire::{ModelRegistry, WireFieldType, WireModel, WireModelError};

/// Semantic type of a declared schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Integer,
    Str,
    Number,
    DateTime,
    /// Foreign-key reference to another entity. Accepted by the validation
    /// layer but has no wire-model mapping.
    Reference,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Str => "string",
            Self::Number => "number",
            Self::DateTime => "datetime",
            Self::Reference => "reference",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared field of an entity schema.
#[derive(Clone, Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub dump_only: bool,
}

impl FieldDef {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            dump_only: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Serialized on dump but rejected on load (e.g. the generated `id`).
    #[must_use]
    pub const fn dump_only(mut self) -> Self {
        self.dump_only = true;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a valid {expected}")]
    InvalidValue {
        field: &'static str,
        expected: FieldKind,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' cannot be set")]
    ImmutableField(&'static str),

    #[error("payload contains no fields")]
    EmptyPayload,
}

/// Declarative field schema for one entity. Serializes entities for
/// responses and validates incoming payloads before persistence.
#[derive(Clone, Debug)]
pub struct EntitySchema {
    name: &'static str,
    fields: Vec<FieldDef>,
}

impl EntitySchema {
    #[must_use]
    pub const fn new(name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self { name, fields }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Projects the declared fields out of a serializable entity. Attributes
    /// not declared in the schema are dropped; declared fields absent on the
    /// entity dump as null.
    pub fn dump<T: Serialize>(&self, entity: &T) -> Map<String, Value> {
        let mut attrs = match serde_json::to_value(entity) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let mut out = Map::new();
        for field in &self.fields {
            let value = attrs.remove(field.name).unwrap_or(Value::Null);
            out.insert(field.name.to_string(), value);
        }
        out
    }

    pub fn dump_many<T: Serialize>(&self, entities: &[T]) -> Vec<Value> {
        entities
            .iter()
            .map(|e| Value::Object(self.dump(e)))
            .collect()
    }

    /// Validates a full creation payload: every required field must be
    /// present, every present field must coerce to its declared kind, and
    /// unknown or dump-only fields are rejected.
    pub fn load(&self, payload: &Value) -> Result<Map<String, Value>, SchemaError> {
        let attrs = payload.as_object().ok_or(SchemaError::NotAnObject)?;
        self.reject_undeclared(attrs)?;

        let mut out = Map::new();
        for field in self.fields.iter().filter(|f| !f.dump_only) {
            match attrs.get(field.name) {
                Some(value) => {
                    out.insert(field.name.to_string(), coerce(field, value)?);
                }
                None if field.required => return Err(SchemaError::MissingField(field.name)),
                None => {}
            }
        }
        Ok(out)
    }

    /// Validates an update payload: only the provided fields are checked,
    /// required-ness is not enforced, and the payload must name at least one
    /// mutable field.
    pub fn load_partial(&self, payload: &Value) -> Result<Map<String, Value>, SchemaError> {
        let attrs = payload.as_object().ok_or(SchemaError::NotAnObject)?;
        if attrs.is_empty() {
            return Err(SchemaError::EmptyPayload);
        }
        self.reject_undeclared(attrs)?;

        let mut out = Map::new();
        for (name, value) in attrs {
            // reject_undeclared guarantees the lookup succeeds
            if let Some(field) = self.field(name) {
                out.insert(name.clone(), coerce(field, value)?);
            }
        }
        Ok(out)
    }

    fn reject_undeclared(&self, attrs: &Map<String, Value>) -> Result<(), SchemaError> {
        for name in attrs.keys() {
            match self.field(name) {
                None => return Err(SchemaError::UnknownField(name.clone())),
                Some(field) if field.dump_only => {
                    return Err(SchemaError::ImmutableField(field.name));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn coerce(field: &FieldDef, value: &Value) -> Result<Value, SchemaError> {
    let invalid = || SchemaError::InvalidValue {
        field: field.name,
        expected: field.kind,
    };

    // Optional fields accept null (clears a nullable column); required ones
    // never do.
    if value.is_null() {
        return if field.required {
            Err(invalid())
        } else {
            Ok(Value::Null)
        };
    }

    match field.kind {
        FieldKind::Float => coerce_f64(value)
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid),
        FieldKind::Integer => coerce_i64(value).map(Value::from).ok_or_else(invalid),
        FieldKind::Number => match value {
            Value::Number(n) => Ok(Value::Number(n.clone())),
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
        FieldKind::Str => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(invalid),
        FieldKind::DateTime => value
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| Value::String(dt.to_rfc3339()))
            .ok_or_else(invalid),
        FieldKind::Reference => value.as_i64().map(Value::from).ok_or_else(invalid),
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> EntitySchema {
        EntitySchema::new(
            "sample",
            vec![
                FieldDef::new("id", FieldKind::Integer).dump_only(),
                FieldDef::new("title", FieldKind::Str).required(),
                FieldDef::new("year", FieldKind::Integer).required(),
                FieldDef::new("rating", FieldKind::Float).required(),
                FieldDef::new("director_id", FieldKind::Integer),
                FieldDef::new("released_at", FieldKind::DateTime),
            ],
        )
    }

    #[test]
    fn dump_projects_declared_fields_only() {
        #[derive(serde::Serialize)]
        struct Row {
            id: i32,
            title: String,
            year: i32,
            rating: f64,
            director_id: Option<i32>,
            internal_note: String,
        }

        let row = Row {
            id: 7,
            title: "Stalker".into(),
            year: 1979,
            rating: 8.2,
            director_id: Some(3),
            internal_note: "not part of the schema".into(),
        };

        let dumped = sample().dump(&row);
        assert_eq!(dumped.get("id"), Some(&json!(7)));
        assert_eq!(dumped.get("title"), Some(&json!("Stalker")));
        assert_eq!(dumped.get("director_id"), Some(&json!(3)));
        assert!(!dumped.contains_key("internal_note"));
        // declared but absent on the entity dumps as null
        assert_eq!(dumped.get("released_at"), Some(&Value::Null));
    }

    #[test]
    fn load_accepts_valid_payload_and_coerces_strings() {
        let fields = sample()
            .load(&json!({
                "title": "Solaris",
                "year": "1972",
                "rating": "8.1",
                "director_id": 3,
            }))
            .unwrap();

        assert_eq!(fields.get("year"), Some(&json!(1972)));
        assert_eq!(fields.get("rating"), Some(&json!(8.1)));
        assert_eq!(fields.get("director_id"), Some(&json!(3)));
    }

    #[test]
    fn load_rejects_missing_required_field() {
        let err = sample()
            .load(&json!({"title": "Solaris", "rating": 8.1}))
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("year"));
    }

    #[test]
    fn load_rejects_uncoercible_values() {
        let err = sample()
            .load(&json!({"title": "Solaris", "year": "nineteen", "rating": 8.1}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                field: "year",
                expected: FieldKind::Integer
            }
        );

        let err = sample()
            .load(&json!({"title": 42, "year": 1972, "rating": 8.1}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                field: "title",
                expected: FieldKind::Str
            }
        );
    }

    #[test]
    fn load_rejects_fractional_integers() {
        let err = sample()
            .load(&json!({"title": "Solaris", "year": 1972.5, "rating": 8.1}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                field: "year",
                expected: FieldKind::Integer
            }
        );
    }

    #[test]
    fn load_rejects_unknown_and_immutable_fields() {
        let schema = sample();
        assert_eq!(
            schema
                .load(&json!({"title": "Solaris", "year": 1972, "rating": 8.1, "budget": 1}))
                .unwrap_err(),
            SchemaError::UnknownField("budget".to_string())
        );
        assert_eq!(
            schema
                .load(&json!({"id": 9, "title": "Solaris", "year": 1972, "rating": 8.1}))
                .unwrap_err(),
            SchemaError::ImmutableField("id")
        );
    }

    #[test]
    fn load_normalizes_datetimes() {
        let fields = sample()
            .load(&json!({
                "title": "Solaris",
                "year": 1972,
                "rating": 8.1,
                "released_at": "1972-03-20T00:00:00Z",
            }))
            .unwrap();
        assert_eq!(
            fields.get("released_at"),
            Some(&json!("1972-03-20T00:00:00+00:00"))
        );

        let err = sample()
            .load(&json!({
                "title": "Solaris",
                "year": 1972,
                "rating": 8.1,
                "released_at": "March 1972",
            }))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                field: "released_at",
                expected: FieldKind::DateTime
            }
        );
    }

    #[test]
    fn load_allows_null_for_optional_fields_only() {
        let fields = sample()
            .load(&json!({
                "title": "Solaris",
                "year": 1972,
                "rating": 8.1,
                "director_id": null,
            }))
            .unwrap();
        assert_eq!(fields.get("director_id"), Some(&Value::Null));

        let err = sample()
            .load(&json!({"title": null, "year": 1972, "rating": 8.1}))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidValue {
                field: "title",
                expected: FieldKind::Str
            }
        );
    }

    #[test]
    fn load_partial_checks_only_provided_fields() {
        let fields = sample()
            .load_partial(&json!({"rating": "9.0"}))
            .unwrap();
        assert_eq!(fields.get("rating"), Some(&json!(9.0)));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn load_partial_rejects_empty_id_and_unknown() {
        let schema = sample();
        assert_eq!(
            schema.load_partial(&json!({})).unwrap_err(),
            SchemaError::EmptyPayload
        );
        assert_eq!(
            schema.load_partial(&json!({"id": 12})).unwrap_err(),
            SchemaError::ImmutableField("id")
        );
        assert_eq!(
            schema.load_partial(&json!({"studio": "Mosfilm"})).unwrap_err(),
            SchemaError::UnknownField("studio".to_string())
        );
        assert_eq!(
            schema.load_partial(&json!([1, 2])).unwrap_err(),
            SchemaError::NotAnObject
        );
    }
}
