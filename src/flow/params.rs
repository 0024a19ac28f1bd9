use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The input widget a backend-declared parameter is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ParamType {
    Text,
    Textarea,
    Number,
    Switch,
    Date,
}

// The backend falls back to "text" for fields without an explicit input type.
impl From<String> for ParamType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "textarea" => ParamType::Textarea,
            "number" => ParamType::Number,
            "switch" => ParamType::Switch,
            "date" => ParamType::Date,
            _ => ParamType::Text,
        }
    }
}

/// One field of a trigger or reaction parameter schema, as served by
/// `GET /tasks/params/{event|reaction}/{identifier}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub id: String,
    #[serde(rename = "type", default = "default_param_type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
}

fn default_param_type() -> ParamType {
    ParamType::Text
}

/// A single validation failure reported by [`ParamList::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamIssue {
    pub id: String,
    pub message: String,
}

/// Parameter values of a node, kept as ordered `(id, value)` pairs.
///
/// The backend consumes parameters positionally, so the order of this list
/// is the wire order. Lists built from a schema follow the schema's field
/// order; [`ParamList::conform`] re-establishes that order after edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    entries: Vec<(String, String)>,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// One empty entry per schema field, in schema order.
    pub fn from_schema(schema: &[ParamSpec]) -> Self {
        Self {
            entries: schema
                .iter()
                .map(|spec| (spec.id.clone(), String::new()))
                .collect(),
        }
    }

    /// Builds a list from positional values, naming them `0`, `1`, ...
    ///
    /// Used when a stored task is loaded back into the editor, where only the
    /// flattened values survive.
    pub fn from_positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.into()))
                .collect(),
        }
    }

    /// Overwrites the value of `id` in place, or appends it at the end.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    }

    /// The values alone, in list order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuilds the list in schema order.
    ///
    /// Values are carried over by id; fields missing from `self` start empty
    /// and ids the schema does not declare are dropped. When `self` holds
    /// positional entries (see [`ParamList::from_positional`]) they are
    /// matched to the schema by position instead.
    pub fn conform(&self, schema: &[ParamSpec]) -> Self {
        let positional = !self.is_empty()
            && self
                .entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| *k == i.to_string())
            && !schema.iter().any(|spec| self.get(&spec.id).is_some());

        let entries = schema
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let value = if positional {
                    self.entries.get(i).map(|(_, v)| v.clone())
                } else {
                    self.get(&spec.id).map(str::to_string)
                };
                (spec.id.clone(), value.unwrap_or_default())
            })
            .collect();
        Self { entries }
    }

    /// Checks every schema field against its declared type.
    ///
    /// Returns all failures rather than stopping at the first one, so a form
    /// can flag every field at once.
    pub fn validate(&self, schema: &[ParamSpec]) -> Vec<ParamIssue> {
        schema
            .iter()
            .filter_map(|spec| {
                let value = self.get(&spec.id).unwrap_or("").trim();
                let label = if spec.label.is_empty() {
                    spec.id.as_str()
                } else {
                    spec.label.as_str()
                };
                let message = match spec.param_type {
                    ParamType::Text | ParamType::Textarea | ParamType::Date
                        if value.is_empty() =>
                    {
                        Some(format!("{} is required", label))
                    }
                    ParamType::Number if value.parse::<f64>().is_err() => {
                        Some(format!("{} must be a number", label))
                    }
                    ParamType::Switch if value != "true" && value != "false" => {
                        Some(format!("{} must be true or false", label))
                    }
                    _ => None,
                };
                message.map(|message| ParamIssue {
                    id: spec.id.clone(),
                    message,
                })
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamList {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = ParamList::new();
        for (k, v) in iter {
            list.set(k, v);
        }
        list
    }
}

/// Coerces a JSON scalar to the string the backend expects.
fn coerce(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Serialize for ParamList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct ParamListVisitor;

impl<'de> Visitor<'de> for ParamListVisitor {
    type Value = ParamList;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of parameter values or a list of [id, value] pairs")
    }

    // Map entries arrive in document order, which is the order we keep.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ParamList, A::Error> {
        let mut list = ParamList::new();
        while let Some((k, v)) = access.next_entry::<String, serde_json::Value>()? {
            list.set(k, coerce(v));
        }
        Ok(list)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<ParamList, A::Error> {
        let mut list = ParamList::new();
        while let Some((k, v)) = access.next_element::<(String, serde_json::Value)>()? {
            list.set(k, coerce(v));
        }
        Ok(list)
    }

    fn visit_unit<E: de::Error>(self) -> Result<ParamList, E> {
        Ok(ParamList::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<ParamList, E> {
        Ok(ParamList::new())
    }
}

impl<'de> Deserialize<'de> for ParamList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParamListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<ParamSpec> {
        serde_json::from_str(
            r#"[
                {"id": "city", "type": "text", "label": "City", "placeholder": ""},
                {"id": "days", "type": "number", "label": "Days", "placeholder": ""},
                {"id": "alert", "type": "switch", "label": "Alert", "placeholder": ""}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_object_keeps_document_order() {
        let list: ParamList = serde_json::from_str(r#"{"unit": "metric", "city": "Paris"}"#).unwrap();
        assert_eq!(list.values().collect::<Vec<_>>(), vec!["metric", "Paris"]);
    }

    #[test]
    fn test_pair_array_form() {
        let list: ParamList =
            serde_json::from_str(r#"[["city", "Paris"], ["days", 3], ["alert", false]]"#).unwrap();
        assert_eq!(list.get("city"), Some("Paris"));
        assert_eq!(list.values().collect::<Vec<_>>(), vec!["Paris", "3", "false"]);
    }

    #[test]
    fn test_scalars_are_coerced() {
        let list: ParamList = serde_json::from_str(r#"{"days": 3, "alert": true}"#).unwrap();
        assert_eq!(list.get("days"), Some("3"));
        assert_eq!(list.get("alert"), Some("true"));
    }

    #[test]
    fn test_unknown_param_type_is_text() {
        let spec: ParamSpec =
            serde_json::from_str(r#"{"id": "to", "type": "email", "label": "To"}"#).unwrap();
        assert_eq!(spec.param_type, ParamType::Text);
    }

    #[test]
    fn test_conform_follows_schema_order() {
        let mut list = ParamList::new();
        list.set("alert", "false");
        list.set("stale", "x");
        list.set("city", "Lyon");

        let conformed = list.conform(&schema());
        let ids: Vec<_> = conformed.iter().map(|(k, _)| k).collect();
        assert_eq!(ids, vec!["city", "days", "alert"]);
        assert_eq!(conformed.values().collect::<Vec<_>>(), vec!["Lyon", "", "false"]);
    }

    #[test]
    fn test_conform_maps_positional_values() {
        let list = ParamList::from_positional(["Lyon", "4", "true"]);
        let conformed = list.conform(&schema());
        assert_eq!(conformed.get("city"), Some("Lyon"));
        assert_eq!(conformed.get("days"), Some("4"));
        assert_eq!(conformed.get("alert"), Some("true"));
    }

    #[test]
    fn test_validate_reports_every_field() {
        let mut list = ParamList::from_schema(&schema());
        list.set("days", "many");
        let issues = list.validate(&schema());
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].message, "City is required");
        assert_eq!(issues[1].message, "Days must be a number");
    }
}
