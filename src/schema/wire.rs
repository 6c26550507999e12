//! Conversion of entity schemas into wire models for API documentation.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::{EntitySchema, FieldKind, catalog};

/// Wire-level type of a documented field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFieldType {
    Float,
    Integer,
    String,
    DateTime,
}

/// One field-type entry per declared schema field.
pub type WireModel = BTreeMap<String, WireFieldType>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireModelError {
    #[error("schema '{schema}' field '{field}' has kind '{kind}' with no wire mapping")]
    UnsupportedFieldKind {
        schema: &'static str,
        field: &'static str,
        kind: FieldKind,
    },
}

const fn map_kind(kind: FieldKind) -> Option<WireFieldType> {
    match kind {
        FieldKind::Float => Some(WireFieldType::Float),
        FieldKind::Integer => Some(WireFieldType::Integer),
        FieldKind::Str => Some(WireFieldType::String),
        FieldKind::Number => Some(WireFieldType::Integer),
        FieldKind::DateTime => Some(WireFieldType::DateTime),
        FieldKind::Reference => None,
    }
}

/// Derives a wire model from a validation schema, one entry per declared
/// field. Fails on any field kind absent from the mapping table.
pub fn convert_schema(schema: &EntitySchema) -> Result<WireModel, WireModelError> {
    let mut model = WireModel::new();
    for field in schema.fields() {
        let wire = map_kind(field.kind).ok_or(WireModelError::UnsupportedFieldKind {
            schema: schema.name(),
            field: field.name,
            kind: field.kind,
        })?;
        model.insert(field.name.to_string(), wire);
    }
    Ok(model)
}

/// Name-keyed collection of wire models, built once at startup and served
/// read-only for documentation generation.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ModelRegistry {
    models: BTreeMap<String, WireModel>,
}

impl ModelRegistry {
    /// Converts and registers every shipped entity schema under its singular
    /// and plural names. Fails fast on an unmappable field kind.
    pub fn build() -> Result<Self, WireModelError> {
        let mut registry = Self::default();
        for (plural, schema) in [
            ("movies", catalog::movie()),
            ("directors", catalog::director()),
            ("genres", catalog::genre()),
        ] {
            registry.register(schema.name(), &schema)?;
            registry.register(plural, &schema)?;
        }
        Ok(registry)
    }

    /// Re-registering a name overwrites the previous model.
    pub fn register(
        &mut self,
        name: &str,
        schema: &EntitySchema,
    ) -> Result<&WireModel, WireModelError> {
        let model = convert_schema(schema)?;
        self.models.insert(name.to_string(), model);
        Ok(&self.models[name])
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WireModel> {
        self.models.get(name)
    }

    #[must_use]
    pub fn models(&self) -> &BTreeMap<String, WireModel> {
        &self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;

    #[test]
    fn converts_each_kind_through_the_fixed_table() {
        let schema = EntitySchema::new(
            "kinds",
            vec![
                FieldDef::new("a", FieldKind::Float),
                FieldDef::new("b", FieldKind::Integer),
                FieldDef::new("c", FieldKind::Str),
                FieldDef::new("d", FieldKind::Number),
                FieldDef::new("e", FieldKind::DateTime),
            ],
        );

        let model = convert_schema(&schema).unwrap();
        assert_eq!(model["a"], WireFieldType::Float);
        assert_eq!(model["b"], WireFieldType::Integer);
        assert_eq!(model["c"], WireFieldType::String);
        assert_eq!(model["d"], WireFieldType::Integer);
        assert_eq!(model["e"], WireFieldType::DateTime);
        assert_eq!(model.len(), 5);
    }

    #[test]
    fn movie_schema_converts_to_expected_model() {
        let model = convert_schema(&catalog::movie()).unwrap();
        assert_eq!(model["title"], WireFieldType::String);
        assert_eq!(model["year"], WireFieldType::Integer);
        assert_eq!(model["rating"], WireFieldType::Float);
        assert_eq!(model["id"], WireFieldType::Integer);
        assert_eq!(model.len(), 6);
    }

    #[test]
    fn reference_fields_have_no_wire_mapping() {
        let schema = EntitySchema::new(
            "broken",
            vec![FieldDef::new("owner", FieldKind::Reference)],
        );
        assert_eq!(
            convert_schema(&schema).unwrap_err(),
            WireModelError::UnsupportedFieldKind {
                schema: "broken",
                field: "owner",
                kind: FieldKind::Reference,
            }
        );
    }

    #[test]
    fn build_registers_singular_and_plural_names() {
        let registry = ModelRegistry::build().unwrap();
        for name in ["movie", "movies", "director", "directors", "genre", "genres"] {
            assert!(registry.get(name).is_some(), "missing model '{name}'");
        }
        assert_eq!(registry.models().len(), 6);
    }

    #[test]
    fn register_overwrites_existing_names() {
        let mut registry = ModelRegistry::default();
        registry.register("movie", &catalog::movie()).unwrap();
        registry.register("movie", &catalog::genre()).unwrap();
        let model = registry.get("movie").unwrap();
        assert_eq!(model.len(), 2);
        assert!(model.contains_key("name"));
    }
}
