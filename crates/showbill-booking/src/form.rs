//! Form-encoded submissions.
//!
//! A submission is an ordered list of `(key, value)` pairs in which a key may
//! repeat (`genres=Jazz&genres=Folk`). Single-valued lookups return the first
//! value for a key.
//!
//! Checkbox fields follow the HTML convention: a checked box is sent, an
//! unchecked one is omitted entirely. [`FormFields::flag`] is therefore true
//! whenever the key is present, whatever its value (`seeking_talent=n` still
//! reads as true). Do not "fix" this by parsing the value.

use crate::error::BookingError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append, mostly for tests and internal callers.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Presence-based boolean (see module docs).
    pub fn flag(&self, key: &str) -> bool {
        self.contains(key)
    }

    pub fn require(&self, key: &str) -> Result<String, BookingError> {
        self.get(key)
            .map(str::to_owned)
            .ok_or_else(|| BookingError::MissingField(key.to_string()))
    }

    /// Non-empty value or `None`; empty search filters count as absent.
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    pub fn require_id(&self, key: &'static str) -> Result<i32, BookingError> {
        let raw = self.require(key)?;
        raw.trim()
            .parse()
            .map_err(|_| BookingError::InvalidField {
                field: key,
                reason: format!("expected an integer id, got {raw:?}"),
            })
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let form = FormFields::new().with("name", "first").with("name", "second");
        assert_eq!(form.get("name"), Some("first"));
    }

    #[test]
    fn test_get_all_keeps_order_and_duplicates() {
        let form: FormFields = [("genres", "Jazz"), ("name", "x"), ("genres", "Folk"), ("genres", "Jazz")]
            .into_iter()
            .collect();
        assert_eq!(form.get_all("genres"), vec!["Jazz", "Folk", "Jazz"]);
        assert!(form.get_all("missing").is_empty());
    }

    #[test]
    fn test_flag_is_presence_based() {
        let form = FormFields::new().with("seeking_talent", "n");
        assert!(form.flag("seeking_talent"));
        assert!(!form.flag("seeking_venue"));

        let empty_value = FormFields::new().with("seeking_venue", "");
        assert!(empty_value.flag("seeking_venue"));
    }

    #[test]
    fn test_require_missing_field() {
        let form = FormFields::new();
        let err = form.require("city").unwrap_err();
        assert!(matches!(err, BookingError::MissingField(ref f) if f == "city"));
    }

    #[test]
    fn test_require_allows_empty_value() {
        let form = FormFields::new().with("phone", "");
        assert_eq!(form.require("phone").unwrap(), "");
    }

    #[test]
    fn test_non_empty_treats_blank_as_absent() {
        let form = FormFields::new().with("city", "  ").with("state", "CA");
        assert_eq!(form.non_empty("city"), None);
        assert_eq!(form.non_empty("state").as_deref(), Some("CA"));
        assert_eq!(form.non_empty("zip"), None);
    }

    #[test]
    fn test_require_id() {
        let form = FormFields::new().with("artist_id", " 4 ").with("venue_id", "four");
        assert_eq!(form.require_id("artist_id").unwrap(), 4);
        assert!(matches!(
            form.require_id("venue_id"),
            Err(BookingError::InvalidField { field: "venue_id", .. })
        ));
    }
}
