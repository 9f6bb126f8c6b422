use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered, possibly repeating list of genre names stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Genres(pub Vec<String>);

impl From<Vec<String>> for Genres {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl Genres {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
