use serde::Deserialize;
use serde_json::{Map, Value};

/// Fields for inserting a movie, deserialized from a schema-validated map.
#[derive(Clone, Debug, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[serde(default)]
    pub director_id: Option<i32>,
    #[serde(default)]
    pub genre_id: Option<i32>,
}

/// Partial update of a movie row. The outer `Option` is field presence; for
/// the foreign keys the inner `Option` distinguishes setting an id from
/// clearing the column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub director_id: Option<Option<i32>>,
    pub genre_id: Option<Option<i32>>,
}

impl MovieUpdate {
    /// Builds an update from a field map already validated by the movie
    /// schema; values are coerced to their declared kinds by that point.
    #[must_use]
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            title: fields
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_owned),
            year: fields.get("year").and_then(as_i32),
            rating: fields.get("rating").and_then(Value::as_f64),
            director_id: fields.get("director_id").map(as_i32),
            genre_id: fields.get("genre_id").map(as_i32),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.rating.is_none()
            && self.director_id.is_none()
            && self.genre_id.is_none()
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_distinguishes_absent_from_cleared_foreign_keys() {
        let fields = json!({"title": "Mirror", "director_id": null});
        let update = MovieUpdate::from_fields(fields.as_object().unwrap());

        assert_eq!(update.title.as_deref(), Some("Mirror"));
        assert_eq!(update.director_id, Some(None));
        assert_eq!(update.genre_id, None);
        assert!(update.year.is_none());
    }

    #[test]
    fn new_movie_deserializes_from_validated_fields() {
        let fields = json!({"title": "Mirror", "year": 1975, "rating": 8.0});
        let new: NewMovie = serde_json::from_value(fields).unwrap();
        assert_eq!(new.title, "Mirror");
        assert_eq!(new.director_id, None);
    }
}
