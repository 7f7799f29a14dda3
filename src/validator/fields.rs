// file: src/validator/fields.rs
// description: Typed field access over a generic value tree that records every violation
// reference: closed-world decoding with aggregated errors

use crate::error::{FieldError, ValidationErrors};
use crate::models::{Timestamp, Variant};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

/// Dotted location of a field, with bracketed list indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An object whose keys have already been checked against its declared field set.
pub struct Object<'v> {
    path: FieldPath,
    map: &'v Map<String, Value>,
}

impl<'v> Object<'v> {
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Explicit `null` counts as absent.
    fn get(&self, key: &str) -> Option<&'v Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }
}

/// Walks a raw value tree, collecting one [`FieldError`] per violated rule.
///
/// Every accessor returns `None` once it has recorded an error, so callers
/// can keep decoding sibling fields and assemble the record with `?` at the end.
#[derive(Debug, Default)]
pub struct Decoder {
    errors: Vec<FieldError>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.errors.push(FieldError::new(path.as_str(), message));
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.errors.extend(errors);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Resolves the decode outcome: any recorded error fails the whole value.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ if self.errors.is_empty() => Err(ValidationErrors::new(vec![FieldError::new(
                "",
                "invalid incident",
            )])),
            _ => Err(ValidationErrors::new(self.errors)),
        }
    }

    /// Opens `value` as an object, rejecting keys outside `fields`.
    pub fn object<'v>(
        &mut self,
        value: &'v Value,
        path: FieldPath,
        fields: &[&str],
    ) -> Option<Object<'v>> {
        let Some(map) = value.as_object() else {
            self.report(&path, "expected an object");
            return None;
        };

        for key in map.keys() {
            if !fields.contains(&key.as_str()) {
                self.report(&path.key(key), "extra field not permitted");
            }
        }

        Some(Object { path, map })
    }

    fn required<'v>(&mut self, obj: &Object<'v>, key: &str) -> Option<(&'v Value, FieldPath)> {
        let path = obj.path.key(key);
        match obj.get(key) {
            Some(value) => Some((value, path)),
            None => {
                self.report(&path, "field required");
                None
            }
        }
    }

    /// Required string with at least one character.
    pub fn text(&mut self, obj: &Object<'_>, key: &str) -> Option<String> {
        let (value, path) = self.required(obj, key)?;
        self.string_value(value, &path, 1)
    }

    pub fn text_or(
        &mut self,
        obj: &Object<'_>,
        key: &str,
        default: &str,
        min_len: usize,
    ) -> Option<String> {
        match obj.get(key) {
            Some(value) => self.string_value(value, &obj.path.key(key), min_len),
            None => Some(default.to_string()),
        }
    }

    pub fn optional_text(&mut self, obj: &Object<'_>, key: &str) -> Option<Option<String>> {
        match obj.get(key) {
            Some(value) => self.string_value(value, &obj.path.key(key), 0).map(Some),
            None => Some(None),
        }
    }

    pub fn string_value(&mut self, value: &Value, path: &FieldPath, min_len: usize) -> Option<String> {
        match value.as_str() {
            Some(s) if s.chars().count() >= min_len => Some(s.to_string()),
            Some(_) if min_len == 1 => {
                self.report(path, "must not be empty");
                None
            }
            Some(_) => {
                self.report(path, format!("must be at least {min_len} characters"));
                None
            }
            None => {
                self.report(path, "expected a string");
                None
            }
        }
    }

    /// List of free-text entries; absent means empty.
    pub fn text_list(&mut self, obj: &Object<'_>, key: &str) -> Option<Vec<String>> {
        self.list(obj, key, |d, value, path| d.string_value(value, &path, 0))
    }

    pub fn flag(&mut self, obj: &Object<'_>, key: &str) -> Option<bool> {
        let (value, path) = self.required(obj, key)?;
        match value.as_bool() {
            Some(flag) => Some(flag),
            None => {
                self.report(&path, "expected a boolean");
                None
            }
        }
    }

    /// Required non-negative integer.
    pub fn count(&mut self, obj: &Object<'_>, key: &str) -> Option<u64> {
        let (value, path) = self.required(obj, key)?;
        self.count_value(value, &path)
    }

    pub fn count_or(&mut self, obj: &Object<'_>, key: &str, default: u64) -> Option<u64> {
        match obj.get(key) {
            Some(value) => self.count_value(value, &obj.path.key(key)),
            None => Some(default),
        }
    }

    fn count_value(&mut self, value: &Value, path: &FieldPath) -> Option<u64> {
        if let Some(n) = value.as_u64() {
            return Some(n);
        }

        if value.as_i64().is_some() {
            self.report(path, "must be >= 0");
        } else {
            self.report(path, "expected an integer");
        }
        None
    }

    /// Required non-negative number, integer or float.
    pub fn measure(&mut self, obj: &Object<'_>, key: &str) -> Option<f64> {
        let (value, path) = self.required(obj, key)?;
        match value.as_f64() {
            Some(n) if n >= 0.0 => Some(n),
            Some(_) => {
                self.report(&path, "must be >= 0");
                None
            }
            None => {
                self.report(&path, "expected a number");
                None
            }
        }
    }

    pub fn timestamp(&mut self, obj: &Object<'_>, key: &str) -> Option<Timestamp> {
        let (value, path) = self.required(obj, key)?;
        self.timestamp_value(value, &path)
    }

    pub fn optional_timestamp(&mut self, obj: &Object<'_>, key: &str) -> Option<Option<Timestamp>> {
        match obj.get(key) {
            Some(value) => self.timestamp_value(value, &obj.path.key(key)).map(Some),
            None => Some(None),
        }
    }

    fn timestamp_value(&mut self, value: &Value, path: &FieldPath) -> Option<Timestamp> {
        let Some(raw) = value.as_str() else {
            self.report(path, "expected an ISO-8601 datetime string");
            return None;
        };

        match raw.parse::<Timestamp>() {
            Ok(ts) => Some(ts),
            Err(e) => {
                self.report(path, e.to_string());
                None
            }
        }
    }

    pub fn date(&mut self, obj: &Object<'_>, key: &str) -> Option<NaiveDate> {
        let (value, path) = self.required(obj, key)?;
        match value
            .as_str()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        {
            Some(date) => Some(date),
            None => {
                self.report(&path, "expected a date in YYYY-MM-DD format");
                None
            }
        }
    }

    pub fn choice<E: Variant>(&mut self, obj: &Object<'_>, key: &str) -> Option<E> {
        let (value, path) = self.required(obj, key)?;
        match value.as_str().and_then(E::parse) {
            Some(variant) => Some(variant),
            None => {
                self.report(&path, format!("must be one of: {}", E::expected()));
                None
            }
        }
    }

    /// Absolute http(s) URL with a host.
    pub fn url(&mut self, obj: &Object<'_>, key: &str) -> Option<Url> {
        let (value, path) = self.required(obj, key)?;
        let Some(raw) = value.as_str() else {
            self.report(&path, "expected a URL string");
            return None;
        };

        let url = match Url::parse(raw.trim()) {
            Ok(url) => url,
            Err(e) => {
                self.report(&path, format!("invalid URL: {e}"));
                return None;
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            self.report(&path, "URL scheme must be http or https");
            return None;
        }

        if url.host_str().is_none_or(str::is_empty) {
            self.report(&path, "URL must have a host");
            return None;
        }

        Some(url)
    }

    /// Required nested object decoded by `decode`.
    pub fn nested<'v, T>(
        &mut self,
        obj: &Object<'v>,
        key: &str,
        decode: impl FnOnce(&mut Self, &'v Value, FieldPath) -> Option<T>,
    ) -> Option<T> {
        let (value, path) = self.required(obj, key)?;
        decode(self, value, path)
    }

    pub fn nested_or_default<'v, T: Default>(
        &mut self,
        obj: &Object<'v>,
        key: &str,
        decode: impl FnOnce(&mut Self, &'v Value, FieldPath) -> Option<T>,
    ) -> Option<T> {
        match obj.get(key) {
            Some(value) => decode(self, value, obj.path.key(key)),
            None => Some(T::default()),
        }
    }

    /// List decoded element by element; absent means empty.
    ///
    /// All elements are visited even after a failure so every bad entry is reported.
    pub fn list<'v, T>(
        &mut self,
        obj: &Object<'v>,
        key: &str,
        decode: impl Fn(&mut Self, &'v Value, FieldPath) -> Option<T>,
    ) -> Option<Vec<T>> {
        let path = obj.path.key(key);
        let Some(value) = obj.get(key) else {
            return Some(Vec::new());
        };

        let Some(items) = value.as_array() else {
            self.report(&path, "expected a list");
            return None;
        };

        let mut decoded = Vec::with_capacity(items.len());
        let mut failed = false;
        for (i, item) in items.iter().enumerate() {
            match decode(self, item, path.index(i)) {
                Some(v) => decoded.push(v),
                None => failed = true,
            }
        }

        if failed { None } else { Some(decoded) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn open<'v>(d: &mut Decoder, value: &'v Value, fields: &[&str]) -> Object<'v> {
        d.object(value, FieldPath::root().key("thing"), fields).unwrap()
    }

    #[test]
    fn test_field_path_formatting() {
        let path = FieldPath::root().key("action_items").index(2).key("links").index(0).key("url");
        assert_eq!(path.as_str(), "action_items[2].links[0].url");
    }

    #[test]
    fn test_unknown_keys_reported() {
        let value = json!({"name": "api", "colour": "blue"});
        let mut d = Decoder::new();
        let obj = open(&mut d, &value, &["name"]);

        assert_eq!(d.text(&obj, "name"), Some("api".to_string()));
        let errors = d.finish(Some(())).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::new("thing.colour", "extra field not permitted")]);
    }

    #[test]
    fn test_null_is_absent() {
        let value = json!({"name": null, "note": null, "tags": null});
        let mut d = Decoder::new();
        let obj = open(&mut d, &value, &["name", "note", "tags"]);

        assert_eq!(d.text(&obj, "name"), None);
        assert_eq!(d.optional_text(&obj, "note"), Some(None));
        assert_eq!(d.text_list(&obj, "tags"), Some(vec![]));
        assert!(d.finish(Some(())).unwrap_err().contains_path("thing.name"));
    }

    #[test]
    fn test_counts_and_measures() {
        let value = json!({"a": 3, "b": -1, "c": "7", "d": 2.5, "e": -0.5});
        let mut d = Decoder::new();
        let obj = open(&mut d, &value, &["a", "b", "c", "d", "e"]);

        assert_eq!(d.count(&obj, "a"), Some(3));
        assert_eq!(d.count(&obj, "b"), None);
        assert_eq!(d.count(&obj, "c"), None);
        assert_eq!(d.measure(&obj, "d"), Some(2.5));
        assert_eq!(d.measure(&obj, "a"), Some(3.0));
        assert_eq!(d.measure(&obj, "e"), None);
        assert_eq!(d.count_or(&obj, "missing", 0), Some(0));

        let errors = d.finish(Some(())).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                FieldError::new("thing.b", "must be >= 0"),
                FieldError::new("thing.c", "expected an integer"),
                FieldError::new("thing.e", "must be >= 0"),
            ]
        );
    }

    #[test]
    fn test_url_rules() {
        let value = json!({
            "ok": "https://example.com/path",
            "ftp": "ftp://example.com",
            "relative": "/dashboards/1",
            "mail": "mailto:oncall@example.com"
        });
        let mut d = Decoder::new();
        let obj = open(&mut d, &value, &["ok", "ftp", "relative", "mail"]);

        assert!(d.url(&obj, "ok").is_some());
        assert!(d.url(&obj, "ftp").is_none());
        assert!(d.url(&obj, "relative").is_none());
        assert!(d.url(&obj, "mail").is_none());
        assert_eq!(d.error_count(), 3);
    }

    #[test]
    fn test_list_reports_every_bad_element() {
        let value = json!({"items": ["a", 1, "c", false]});
        let mut d = Decoder::new();
        let obj = open(&mut d, &value, &["items"]);

        assert_eq!(d.text_list(&obj, "items"), None);
        let errors = d.finish(Some(())).unwrap_err();
        assert!(errors.contains_path("thing.items[1]"));
        assert!(errors.contains_path("thing.items[3]"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_choice_message_lists_variants() {
        let value = json!({"severity": "SEV-9"});
        let mut d = Decoder::new();
        let obj = open(&mut d, &value, &["severity"]);

        assert_eq!(d.choice::<crate::models::Severity>(&obj, "severity"), None);
        let errors = d.finish(Some(())).unwrap_err();
        assert_eq!(
            errors.errors()[0].message,
            "must be one of: SEV-1, SEV-2, SEV-3, SEV-4"
        );
    }

    #[test]
    fn test_non_object_reported() {
        let value = json!(["not", "an", "object"]);
        let mut d = Decoder::new();
        assert!(d.object(&value, FieldPath::root().key("service"), &[]).is_none());
        let errors = d.finish::<()>(None).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::new("service", "expected an object")]);
    }
}
