//! Ordered raw-JSON storage with two-phase freeze semantics.
//!
//! Every generated model wraps a [`RawObject`]: the as-received JSON object,
//! including fields no typed accessor models. Construction goes through a
//! [`RawObjectBuilder`] that is *consumed* by [`RawObjectBuilder::freeze`],
//! so a frozen object can never be mutated again — there is no post-freeze
//! write path, not even inside the crate.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{json_type_name, Error, Result};

/// Mutable construction phase of a [`RawObject`].
///
/// Keys keep insertion order; setting an existing key overwrites in place.
#[derive(Debug, Default)]
pub struct RawObjectBuilder {
    entries: IndexMap<String, Value>,
}

impl RawObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key. Replacement keeps the key's original position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Remove a key if present. Used by the omit-on-null setter discipline.
    pub fn unset(&mut self, key: &str) -> &mut Self {
        self.entries.shift_remove(key);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Consume the builder into an immutable snapshot.
    pub fn freeze(self) -> RawObject {
        RawObject {
            entries: Arc::new(self.entries),
        }
    }
}

/// Immutable, order-preserving view of a JSON object.
///
/// Cloning shares the underlying snapshot, so copy-constructing a model is
/// cheap and the copy compares equal to the source. Equality and hashing are
/// defined over content only — two objects with the same entries are equal
/// and hash identically no matter which code path built them or in what key
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    entries: Arc<IndexMap<String, Value>>,
}

impl RawObject {
    /// An empty frozen object.
    pub fn new() -> Self {
        RawObjectBuilder::new().freeze()
    }

    pub fn builder() -> RawObjectBuilder {
        RawObjectBuilder::new()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in stored (wire or insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Adopt an already-parsed JSON value. Fails only when the value is not
    /// an object; the contents are taken as-is, unknown fields included.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(RawObject {
                entries: Arc::new(map.into_iter().collect()),
            }),
            other => Err(Error::type_mismatch("$", "object", &other)),
        }
    }

    /// Render back into a JSON value, preserving stored key order.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.entries.iter() {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

impl Default for RawObject {
    fn default() -> Self {
        Self::new()
    }
}

// Equality is key-order-insensitive (IndexMap compares by lookup), so the
// hash must be too: entries are hashed in sorted-key order.
impl Hash for RawObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_entries(self.entries.iter().map(|(k, v)| (k.as_str(), v)), state);
    }
}

fn hash_entries<'a, H: Hasher>(entries: impl Iterator<Item = (&'a str, &'a Value)>, state: &mut H) {
    let mut sorted: Vec<(&str, &Value)> = entries.collect();
    sorted.sort_by_key(|(k, _)| *k);
    state.write_usize(sorted.len());
    for (key, value) in sorted {
        key.hash(state);
        hash_value(value, state);
    }
}

/// Structural hash over a JSON tree, consistent with `serde_json::Value`
/// equality (which is order-insensitive for objects).
pub(crate) fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(n) => {
            state.write_u8(2);
            // Integers and floats never compare equal in serde_json, so
            // hashing them through distinct lanes is safe.
            if let Some(i) = n.as_i64() {
                state.write_u8(0);
                i.hash(state);
            } else if let Some(u) = n.as_u64() {
                state.write_u8(1);
                u.hash(state);
            } else if let Some(f) = n.as_f64() {
                state.write_u8(2);
                f.to_bits().hash(state);
            }
        }
        Value::String(s) => {
            state.write_u8(3);
            s.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            state.write_usize(items.len());
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            state.write_u8(5);
            hash_entries(map.iter().map(|(k, v)| (k.as_str(), v)), state);
        }
    }
}

impl Serialize for RawObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for RawObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(map) => Ok(RawObject {
                entries: Arc::new(map.into_iter().collect()),
            }),
            other => Err(serde::de::Error::custom(format!(
                "expected object, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(obj: &RawObject) -> u64 {
        let mut hasher = DefaultHasher::new();
        obj.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn builder_preserves_insertion_order_and_overwrites_in_place() {
        let mut builder = RawObjectBuilder::new();
        builder.set("b", json!(1));
        builder.set("a", json!(2));
        builder.set("b", json!(3));
        let obj = builder.freeze();
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(obj.get("b"), Some(&json!(3)));
    }

    #[test]
    fn equal_content_compares_and_hashes_equal_regardless_of_key_order() {
        let mut first = RawObjectBuilder::new();
        first.set("id", json!("p_1"));
        first.set("count", json!(2));
        let first = first.freeze();

        let mut second = RawObjectBuilder::new();
        second.set("count", json!(2));
        second.set("id", json!("p_1"));
        let second = second.freeze();

        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn nested_object_key_order_does_not_affect_hash() {
        let a = RawObject::from_value(json!({"outer": {"x": 1, "y": 2}})).unwrap();
        let b = RawObject::from_value(json!({"outer": {"y": 2, "x": 1}})).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn unequal_content_is_unequal() {
        let a = RawObject::from_value(json!({"id": "p_1"})).unwrap();
        let b = RawObject::from_value(json!({"id": "p_2"})).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        let err = RawObject::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(err.to_string(), "field `$`: expected object, found array");
    }

    #[test]
    fn to_value_round_trips_with_unknown_fields() {
        let payload = json!({"id": "p_1", "some_future_field": {"nested": [1, 2, 3]}});
        let obj = RawObject::from_value(payload.clone()).unwrap();
        assert_eq!(obj.to_value(), payload);
    }

    #[test]
    fn clone_shares_content_and_compares_equal() {
        let obj = RawObject::from_value(json!({"id": "p_1"})).unwrap();
        let copy = obj.clone();
        assert_eq!(copy, obj);
        assert_eq!(hash_of(&copy), hash_of(&obj));
    }

    #[test]
    fn serde_round_trip_preserves_key_order() {
        let obj = RawObject::from_value(json!({"z": 1, "a": 2})).unwrap();
        let text = serde_json::to_string(&obj).unwrap();
        assert_eq!(text, r#"{"z":1,"a":2}"#);
        let back: RawObject = serde_json::from_str(&text).unwrap();
        assert_eq!(back, obj);
    }

    #[test]
    fn deserialize_rejects_non_objects() {
        let err = serde_json::from_str::<RawObject>("[1]").unwrap_err();
        assert!(err.to_string().contains("expected object"));
    }
}
