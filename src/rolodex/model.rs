use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Name-bearing fields used when nothing else is configured.
pub const DEFAULT_NAME_FIELDS: [&str; 2] = ["first_name", "last_name"];

/// Key the identifier is serialized under. Never stored in a field map.
pub const ID_FIELD: &str = "id";

/// Backend-assigned record identifier.
///
/// Backends disagree on whether ids are integers or strings, so both are
/// accepted on the way in. The id is always written back out as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordId(s),
            RawId::Unsigned(n) => RecordId(n.to_string()),
            RawId::Signed(n) => RecordId(n.to_string()),
        })
    }
}

/// A contact entity.
///
/// `id` is `None` until the backend has confirmed the first save. All other
/// data lives in `fields` as scalar strings or nulls, and is serialized as a
/// flat JSON object alongside `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub id: Option<RecordId>,
    pub fields: BTreeMap<String, Option<String>>,
}

impl Record {
    /// An unsaved record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, Some(value.into()));
        self
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_id(&self, id: &RecordId) -> bool {
        self.id.as_ref() == Some(id)
    }

    /// Value of a field, treating null and missing the same way.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    /// Sets a data field. The `id` key is reserved and silently ignored.
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        insert_field(&mut self.fields, name.into(), value);
    }

    /// Human-readable label: the default name fields joined, falling back to the id.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = DEFAULT_NAME_FIELDS
            .iter()
            .filter_map(|f| self.get(f))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if !parts.is_empty() {
            return parts.join(" ");
        }
        match &self.id {
            Some(id) => format!("#{}", id),
            None => "(unsaved)".to_string(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() - usize::from(self.fields.contains_key(ID_FIELD))
            + usize::from(self.id.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        for (name, value) in self.fields.iter().filter(|(name, _)| *name != ID_FIELD) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut record = Record::new();

        for (name, value) in raw {
            if name == ID_FIELD {
                record.id = match value {
                    Value::Null => None,
                    other => Some(RecordId::deserialize(other).map_err(de::Error::custom)?),
                };
                continue;
            }

            let scalar = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "field `{}` must be a scalar value",
                        name
                    )));
                }
            };
            record.fields.insert(name, scalar);
        }

        Ok(record)
    }
}

/// A staged, not yet persisted set of field values.
///
/// Exists while a create or edit form is open. When staged from an existing
/// record it remembers that record's id, so [`PendingEdit::into_record`] yields
/// the record to send as an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdit {
    id: Option<RecordId>,
    fields: BTreeMap<String, Option<String>>,
}

impl PendingEdit {
    /// A blank draft for a new record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft seeded from a saved record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            fields: record.fields.clone(),
        }
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Stages a value. The `id` key is reserved: the id comes from the seed record.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        insert_field(&mut self.fields, name.into(), Some(value.into()));
        self
    }

    /// Clears a field to null rather than dropping it, so the backend sees the change.
    pub fn unset(&mut self, name: impl Into<String>) -> &mut Self {
        insert_field(&mut self.fields, name.into(), None);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    pub fn fields(&self) -> &BTreeMap<String, Option<String>> {
        &self.fields
    }

    pub fn into_record(self) -> Record {
        Record {
            id: self.id,
            fields: self.fields,
        }
    }
}

fn insert_field(fields: &mut BTreeMap<String, Option<String>>, name: String, value: Option<String>) {
    if name != ID_FIELD {
        fields.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_integers_and_strings() {
        let from_int: RecordId = serde_json::from_str("42").unwrap();
        let from_str: RecordId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(from_int, RecordId::from(42));
        assert_eq!(from_str.as_str(), "abc-1");
    }

    #[test]
    fn record_deserializes_flat_object() {
        let json = r#"{"id": 7, "first_name": "Ann", "phone": null, "age": 31, "vip": true}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, Some(RecordId::from(7)));
        assert_eq!(record.get("first_name"), Some("Ann"));
        assert_eq!(record.get("phone"), None);
        assert!(record.fields.contains_key("phone"));
        assert_eq!(record.get("age"), Some("31"));
        assert_eq!(record.get("vip"), Some("true"));
    }

    #[test]
    fn record_without_id_is_unsaved() {
        let record: Record = serde_json::from_str(r#"{"first_name": "Bob"}"#).unwrap();
        assert!(!record.is_saved());

        let null_id: Record = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert!(!null_id.is_saved());
    }

    #[test]
    fn record_rejects_nested_values() {
        let err = serde_json::from_str::<Record>(r#"{"id": 1, "tags": ["a"]}"#).unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn record_serializes_id_as_string() {
        let record = Record::with_id(3u64).with_field("first_name", "Cy");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "3");
        assert_eq!(value["first_name"], "Cy");
    }

    #[test]
    fn display_name_joins_name_fields() {
        let record = Record::with_id(1u64)
            .with_field("first_name", "John")
            .with_field("last_name", "Smith");
        assert_eq!(record.display_name(), "John Smith");

        let anonymous = Record::with_id(9u64);
        assert_eq!(anonymous.display_name(), "#9");
        assert_eq!(Record::new().display_name(), "(unsaved)");
    }

    #[test]
    fn pending_edit_keeps_id_of_seed_record() {
        let saved = Record::with_id(5u64).with_field("first_name", "Dee");
        let mut edit = PendingEdit::from_record(&saved);
        edit.set("first_name", "Dana").unset("email");

        assert!(!edit.is_new());
        let record = edit.into_record();
        assert_eq!(record.id, Some(RecordId::from(5)));
        assert_eq!(record.get("first_name"), Some("Dana"));
        assert_eq!(record.fields.get("email"), Some(&None));
    }

    #[test]
    fn blank_pending_edit_is_new() {
        let mut edit = PendingEdit::new();
        edit.set("first_name", "Eve");
        assert!(edit.is_new());
        assert_eq!(edit.get("first_name"), Some("Eve"));
        assert!(!edit.into_record().is_saved());
    }

    #[test]
    fn id_is_never_a_data_field() {
        let saved = Record::with_id(1u64).with_field("first_name", "Ann");
        let mut edit = PendingEdit::from_record(&saved);
        edit.unset("id").set("id", "99");
        assert_eq!(edit.fields().get("id"), None);

        let mut record = edit.into_record();
        record.set("id", None);
        assert_eq!(record.id, Some(RecordId::from(1)));
        assert!(!record.fields.contains_key("id"));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json.matches("\"id\"").count(), 1);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, Some(RecordId::from(1)));
    }

    #[test]
    fn stray_id_field_is_not_serialized() {
        let mut record = Record::with_id(4u64).with_field("first_name", "Ann");
        record.fields.insert("id".to_string(), None);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "4");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
