//! Field projection from untyped JSON objects into typed records
//!
//! A [`Projector`] wraps one source object and hands out typed field values
//! by key. A field that is absent, `null`, or of an incompatible kind yields
//! its default value and is remembered as an [`UnprojectedField`]; projection
//! itself never fails.
//!
//! Maps and lists are projected element by element. A map drops only its
//! incompatible entries; a list keeps its length and holds a default value in
//! each incompatible slot. Every rejected element is reported under its own
//! qualified name, e.g. `controls.trace` or `virtualAddresses[1]`.
//!
//! Shapes implement [`Project`], which pairs a static field descriptor
//! ([`Project::FIELDS`]) with the extraction code reading those keys.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Dynamic kind of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Kind a record field expects its source value to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    StringMap,
    StringList,
    StringMapList,
    RecordList,
    /// One element of a record list
    Record,
    /// Pool name, or `{"use": "<name>"}`
    PoolRef,
    /// Profile name, or an opaque string map
    ProfileRef,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::StringMap => "string map",
            FieldKind::StringList => "list of strings",
            FieldKind::StringMapList => "list of string maps",
            FieldKind::RecordList => "list of objects",
            FieldKind::Record => "object",
            FieldKind::PoolRef => "pool reference",
            FieldKind::ProfileRef => "profile reference",
        };
        f.write_str(name)
    }
}

/// One entry of a shape's static field descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Source key, matched exactly
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(key: &'static str, kind: FieldKind) -> Self {
        Self { key, kind }
    }
}

/// Why a field kept its default value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnprojectedReason {
    /// Key absent or `null`
    Missing,

    /// Key present with an incompatible value
    TypeMismatch { expected: FieldKind, found: ValueKind },
}

/// A field that could not be projected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnprojectedField {
    /// Source key; elements are qualified, e.g. `controls.trace` or `members[0].servicePort`
    pub field: String,
    pub reason: UnprojectedReason,
}

impl UnprojectedField {
    pub fn is_missing(&self) -> bool {
        matches!(self.reason, UnprojectedReason::Missing)
    }
}

impl fmt::Display for UnprojectedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            UnprojectedReason::Missing => write!(f, "field '{}' is missing", self.field),
            UnprojectedReason::TypeMismatch { expected, found } => {
                write!(f, "field '{}' expected {}, found {}", self.field, expected, found)
            }
        }
    }
}

/// A typed record shape that can be projected from an untyped object
pub trait Project: Default {
    /// Source keys this shape reads, with their expected kinds
    const FIELDS: &'static [FieldSpec];

    /// Read every field in [`Project::FIELDS`] from the projector
    fn project(projector: &mut Projector<'_>) -> Self;

    /// Check whether `key` is one of this shape's own fields
    fn declares(key: &str) -> bool {
        Self::FIELDS.iter().any(|spec| spec.key == key)
    }
}

/// Result of projecting one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<T> {
    pub value: T,
    pub unprojected: Vec<UnprojectedField>,
}

/// Project `source` into shape `T`
pub fn project<T: Project>(source: &Map<String, Value>) -> Projection<T> {
    let mut projector = Projector::new(source);
    let value = T::project(&mut projector);
    Projection { value, unprojected: projector.finish() }
}

/// Typed field reader over one source object
#[derive(Debug)]
pub struct Projector<'a> {
    source: &'a Map<String, Value>,
    prefix: String,
    unprojected: Vec<UnprojectedField>,
}

impl<'a> Projector<'a> {
    pub fn new(source: &'a Map<String, Value>) -> Self {
        Self { source, prefix: String::new(), unprojected: Vec::new() }
    }

    fn nested(source: &'a Map<String, Value>, prefix: String) -> Self {
        Self { source, prefix, unprojected: Vec::new() }
    }

    /// Fields recorded so far as unprojected, in read order
    pub fn finish(self) -> Vec<UnprojectedField> {
        self.unprojected
    }

    pub fn string(&mut self, key: &str) -> String {
        self.take(key, FieldKind::String, |v| v.as_str().map(str::to_string))
    }

    pub fn integer(&mut self, key: &str) -> i64 {
        self.take(key, FieldKind::Integer, as_integer)
    }

    pub fn boolean(&mut self, key: &str) -> bool {
        self.take(key, FieldKind::Boolean, Value::as_bool)
    }

    pub fn string_map(&mut self, key: &str) -> BTreeMap<String, String> {
        match self.present(key, FieldKind::StringMap, Value::as_object) {
            Some(entries) => self.string_entries(key, entries),
            None => BTreeMap::new(),
        }
    }

    pub fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(items) = self.present(key, FieldKind::StringList, Value::as_array) else {
            return Vec::new();
        };
        let mut list = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => list.push(text.to_string()),
                None => {
                    self.reject(&format!("{}[{}]", key, index), FieldKind::String, item);
                    list.push(String::new());
                }
            }
        }
        list
    }

    pub fn string_map_list(&mut self, key: &str) -> Vec<BTreeMap<String, String>> {
        let Some(items) = self.present(key, FieldKind::StringMapList, Value::as_array) else {
            return Vec::new();
        };
        let mut list = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let element = format!("{}[{}]", key, index);
            match item.as_object() {
                Some(entries) => list.push(self.string_entries(&element, entries)),
                None => {
                    self.reject(&element, FieldKind::StringMap, item);
                    list.push(BTreeMap::new());
                }
            }
        }
        list
    }

    /// Read a field through a custom extractor; `None` when unprojected
    pub fn optional<T>(
        &mut self,
        key: &str,
        kind: FieldKind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        self.present(key, kind, extract)
    }

    /// Project a list of nested records.
    ///
    /// A non-object element becomes `T::default()` in its slot. Unprojected
    /// fields inside an element are recorded with an indexed name and do not
    /// reject the element.
    pub fn records<T: Project>(&mut self, key: &str) -> Vec<T> {
        let Some(items) = self.present(key, FieldKind::RecordList, Value::as_array) else {
            return Vec::new();
        };
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let element = format!("{}[{}]", key, index);
            match item.as_object() {
                Some(object) => {
                    let prefix = format!("{}{}.", self.prefix, element);
                    let mut nested = Projector::nested(object, prefix);
                    records.push(T::project(&mut nested));
                    self.unprojected.extend(nested.finish());
                }
                None => {
                    self.reject(&element, FieldKind::Record, item);
                    records.push(T::default());
                }
            }
        }
        records
    }

    fn take<T: Default>(
        &mut self,
        key: &str,
        kind: FieldKind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> T {
        self.present(key, kind, extract).unwrap_or_default()
    }

    /// Extract a present, non-null field; records why when that fails
    fn present<T>(
        &mut self,
        key: &str,
        kind: FieldKind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        let source = self.source;
        match source.get(key) {
            None | Some(Value::Null) => {
                self.record(key, UnprojectedReason::Missing);
                None
            }
            Some(value) => {
                let projected = extract(value);
                if projected.is_none() {
                    self.mismatch(key, kind, value);
                }
                projected
            }
        }
    }

    /// String-valued entries of `entries`; others are reported as `field.entry`
    fn string_entries(
        &mut self,
        field: &str,
        entries: &Map<String, Value>,
    ) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (name, value) in entries {
            match value.as_str() {
                Some(text) => {
                    map.insert(name.clone(), text.to_string());
                }
                None => self.reject(&format!("{}.{}", field, name), FieldKind::String, value),
            }
        }
        map
    }

    /// Record a rejected element; `null` counts as missing
    fn reject(&mut self, element: &str, expected: FieldKind, found: &Value) {
        if found.is_null() {
            self.record(element, UnprojectedReason::Missing);
        } else {
            self.mismatch(element, expected, found);
        }
    }

    fn mismatch(&mut self, key: &str, expected: FieldKind, found: &Value) {
        let found = ValueKind::of(found);
        self.record(key, UnprojectedReason::TypeMismatch { expected, found });
    }

    fn record(&mut self, key: &str, reason: UnprojectedReason) {
        let field = format!("{}{}", self.prefix, key);
        self.unprojected.push(UnprojectedField { field, reason });
    }
}

/// Integer from a JSON integer, or from a float with an integral value
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Whole-value string map; any non-string entry rejects the map
pub(crate) fn as_string_map(value: &Value) -> Option<BTreeMap<String, String>> {
    value.as_object()?.iter().map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string()))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Endpoint {
        host: String,
        port: i64,
    }

    impl Project for Endpoint {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::new("host", FieldKind::String),
            FieldSpec::new("port", FieldKind::Integer),
        ];

        fn project(p: &mut Projector<'_>) -> Self {
            Self { host: p.string("host"), port: p.integer("port") }
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test input must be an object")
    }

    #[test]
    fn test_scalars_project_when_kinds_match() {
        let source = object(json!({"name": "web", "port": 443, "enabled": true}));
        let mut p = Projector::new(&source);
        assert_eq!(p.string("name"), "web");
        assert_eq!(p.integer("port"), 443);
        assert!(p.boolean("enabled"));
        assert!(p.finish().is_empty());
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let source = object(json!({"remark": null}));
        let mut p = Projector::new(&source);
        assert_eq!(p.string("remark"), "");
        assert_eq!(p.integer("port"), 0);

        let unprojected = p.finish();
        assert_eq!(unprojected.len(), 2);
        assert!(unprojected.iter().all(UnprojectedField::is_missing));
        assert_eq!(unprojected[0].field, "remark");
    }

    #[test]
    fn test_type_mismatch_defaults_and_does_not_affect_siblings() {
        let source = object(json!({"virtualPort": "443", "redirect80": false, "layer4": "tcp"}));
        let mut p = Projector::new(&source);
        assert_eq!(p.integer("virtualPort"), 0);
        assert!(!p.boolean("redirect80"));
        assert_eq!(p.string("layer4"), "tcp");

        let unprojected = p.finish();
        assert_eq!(unprojected.len(), 1);
        assert_eq!(
            unprojected[0].reason,
            UnprojectedReason::TypeMismatch {
                expected: FieldKind::Integer,
                found: ValueKind::String
            }
        );
        assert_eq!(
            unprojected[0].to_string(),
            "field 'virtualPort' expected integer, found string"
        );
    }

    #[test]
    fn test_integers_accept_integral_floats_only() {
        let source = object(json!({"a": 30.0, "b": 2.5, "c": -4}));
        let mut p = Projector::new(&source);
        assert_eq!(p.integer("a"), 30);
        assert_eq!(p.integer("b"), 0);
        assert_eq!(p.integer("c"), -4);
        assert_eq!(p.finish().len(), 1);
    }

    #[test]
    fn test_integers_out_of_range_are_mismatches() {
        let source = object(json!({
            "max": i64::MAX,
            "min": i64::MIN,
            "two_pow_63": 9223372036854775808u64,
            "float_two_pow_63": 9.223372036854775808e18,
        }));
        let mut p = Projector::new(&source);
        assert_eq!(p.integer("max"), i64::MAX);
        assert_eq!(p.integer("min"), i64::MIN);
        assert_eq!(p.integer("two_pow_63"), 0);
        assert_eq!(p.integer("float_two_pow_63"), 0);

        let fields: Vec<String> = p.finish().into_iter().map(|u| u.field).collect();
        assert_eq!(fields, vec!["two_pow_63", "float_two_pow_63"]);
    }

    #[test]
    fn test_collections_project_element_by_element() {
        let source = object(json!({
            "controls": {"class": "Controls", "archiveTimestamp": "now", "trace": true},
            "addresses": ["10.0.0.1", 7, "10.0.0.3"],
            "monitors": [{"use": "http_mon", "weight": 2}, "tcp", {"bigip": "/Common/tcp"}],
        }));
        let mut p = Projector::new(&source);

        let controls = p.string_map("controls");
        assert_eq!(controls.len(), 2);
        assert_eq!(controls.get("archiveTimestamp").map(String::as_str), Some("now"));
        assert_eq!(p.string_list("addresses"), vec!["10.0.0.1", "", "10.0.0.3"]);

        let monitors = p.string_map_list("monitors");
        assert_eq!(monitors.len(), 3);
        assert_eq!(monitors[0].get("use").map(String::as_str), Some("http_mon"));
        assert!(monitors[1].is_empty());
        assert_eq!(monitors[2].get("bigip").map(String::as_str), Some("/Common/tcp"));

        let unprojected = p.finish();
        let fields: Vec<&str> = unprojected.iter().map(|u| u.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["controls.trace", "addresses[1]", "monitors[0].weight", "monitors[1]"]
        );
        assert_eq!(
            unprojected[0].reason,
            UnprojectedReason::TypeMismatch {
                expected: FieldKind::String,
                found: ValueKind::Boolean
            }
        );
    }

    #[test]
    fn test_null_elements_count_as_missing() {
        let source = object(json!({"tags": ["a", null], "labels": {"env": null}}));
        let mut p = Projector::new(&source);
        assert_eq!(p.string_list("tags"), vec!["a", ""]);
        assert!(p.string_map("labels").is_empty());

        let unprojected = p.finish();
        assert_eq!(unprojected.len(), 2);
        assert!(unprojected.iter().all(UnprojectedField::is_missing));
        assert_eq!(unprojected[1].field, "labels.env");
    }

    #[test]
    fn test_collection_of_wrong_kind_is_one_mismatch() {
        let source = object(json!({"controls": "none", "addresses": "10.0.0.1"}));
        let mut p = Projector::new(&source);
        assert!(p.string_map("controls").is_empty());
        assert!(p.string_list("addresses").is_empty());

        let fields: Vec<String> = p.finish().into_iter().map(|u| u.field).collect();
        assert_eq!(fields, vec!["controls", "addresses"]);
    }

    #[test]
    fn test_records_report_nested_fields_with_index() {
        let source = object(json!({
            "endpoints": [
                {"host": "a.example", "port": 80},
                {"host": "b.example", "port": "eighty"}
            ]
        }));
        let mut p = Projector::new(&source);
        let endpoints: Vec<Endpoint> = p.records("endpoints");

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[1], Endpoint { host: "b.example".into(), port: 0 });

        let unprojected = p.finish();
        assert_eq!(unprojected.len(), 1);
        assert_eq!(unprojected[0].field, "endpoints[1].port");
    }

    #[test]
    fn test_records_keep_slots_for_non_object_elements() {
        let source = object(json!({"endpoints": [{"host": "a", "port": 80}, "b"]}));
        let mut p = Projector::new(&source);
        let endpoints: Vec<Endpoint> = p.records("endpoints");
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0], Endpoint { host: "a".into(), port: 80 });
        assert_eq!(endpoints[1], Endpoint::default());

        let unprojected = p.finish();
        assert_eq!(unprojected.len(), 1);
        assert_eq!(unprojected[0].field, "endpoints[1]");
        assert_eq!(
            unprojected[0].reason,
            UnprojectedReason::TypeMismatch {
                expected: FieldKind::Record,
                found: ValueKind::String
            }
        );
    }

    #[test]
    fn test_project_on_empty_object_reports_every_declared_field() {
        let projection = project::<Endpoint>(&Map::new());
        assert_eq!(projection.value, Endpoint::default());

        let fields: Vec<&str> = projection.unprojected.iter().map(|u| u.field.as_str()).collect();
        let declared: Vec<&str> = Endpoint::FIELDS.iter().map(|s| s.key).collect();
        assert_eq!(fields, declared);
        assert!(Endpoint::declares("host"));
        assert!(!Endpoint::declares("class"));
    }
}
