use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct NewDirector {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectorUpdate {
    pub name: Option<String>,
}

impl DirectorUpdate {
    #[must_use]
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            name: fields
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
