//! The entity schemas served by this process.

use super::{EntitySchema, FieldDef, FieldKind};

#[must_use]
pub fn movie() -> EntitySchema {
    EntitySchema::new(
        "movie",
        vec![
            FieldDef::new("id", FieldKind::Integer).dump_only(),
            FieldDef::new("title", FieldKind::Str).required(),
            FieldDef::new("year", FieldKind::Integer).required(),
            FieldDef::new("rating", FieldKind::Float).required(),
            FieldDef::new("director_id", FieldKind::Integer),
            FieldDef::new("genre_id", FieldKind::Integer),
        ],
    )
}

#[must_use]
pub fn director() -> EntitySchema {
    EntitySchema::new(
        "director",
        vec![
            FieldDef::new("id", FieldKind::Integer).dump_only(),
            FieldDef::new("name", FieldKind::Str).required(),
        ],
    )
}

#[must_use]
pub fn genre() -> EntitySchema {
    EntitySchema::new(
        "genre",
        vec![
            FieldDef::new("id", FieldKind::Integer).dump_only(),
            FieldDef::new("name", FieldKind::Str).required(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_schema_declares_expected_fields() {
        let schema = movie();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["id", "title", "year", "rating", "director_id", "genre_id"]
        );
    }

    #[test]
    fn id_is_dump_only_everywhere() {
        for schema in [movie(), director(), genre()] {
            let id = schema
                .fields()
                .iter()
                .find(|f| f.name == "id")
                .expect("id declared");
            assert!(id.dump_only, "{} id must be dump-only", schema.name());
        }
    }
}
