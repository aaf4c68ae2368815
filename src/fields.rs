//! Typed accessors over [`RawObject`], encoding target types into and out of
//! the raw JSON tree.
//!
//! Fields come in four nullability flavors along two axes: required vs
//! optional in the API contract, and reference-like vs value-like targets.
//! Readers map onto [`RawObject::get_required`], [`RawObject::get_optional`],
//! [`RawObject::get_required_value`], and [`RawObject::get_optional_value`].
//!
//! The setter side carries the load-bearing asymmetry between "field never
//! set" and "field explicitly nulled": [`RawObjectBuilder::set_optional`]
//! omits the key entirely when given `None`, while
//! [`RawObjectBuilder::set_nullable`] writes a JSON `null` entry — the
//! distinction PATCH-style payloads depend on.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::raw::{RawObject, RawObjectBuilder};

/// Tri-state payload of an explicitly-nullable field that is present in the
/// raw object: either a JSON `null` or a coerced value. Absence is the third
/// state, expressed by the surrounding `Option` in
/// [`RawObject::get_optional_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    /// Collapse present-null to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Null => None,
            Nullable::Value(value) => Some(value),
        }
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Nullable::Null => Nullable::Null,
            Nullable::Value(value) => Nullable::Value(value),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Nullable::Null,
            Some(value) => Nullable::Value(value),
        }
    }
}

/// Coercion between a JSON value and a strongly-typed field target.
///
/// `from_json` receives the field name purely for error context; it must not
/// affect the coercion itself.
pub trait FieldValue: Sized {
    /// Human-readable shape name used in `TypeMismatch` diagnostics.
    const EXPECTED: &'static str;

    fn from_json(field: &str, value: &Value) -> Result<Self>;

    fn to_json(&self) -> Value;
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

// Integer targets reject fractional numbers and anything out of range;
// serde_json's as_i64/as_u64 already refuse both.
impl FieldValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for u64 {
    const EXPECTED: &'static str = "unsigned integer";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        value
            .as_u64()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FieldValue for i32 {
    const EXPECTED: &'static str = "32-bit integer";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        value
            .as_i64()
            .and_then(|wide| i32::try_from(wide).ok())
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

// Float targets accept any JSON number.
impl FieldValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

/// Timestamps travel as RFC 3339 / ISO-8601 strings and coerce to a
/// timezone-aware [`OffsetDateTime`] on access.
impl FieldValue for OffsetDateTime {
    const EXPECTED: &'static str = "RFC 3339 timestamp string";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        let text = value
            .as_str()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))?;
        OffsetDateTime::parse(text, &Rfc3339)
            .map_err(|_| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        // RFC 3339 cannot express years outside 0..=9999; such timestamps
        // have no wire representation and degrade to null.
        match self.format(&Rfc3339) {
            Ok(text) => Value::String(text),
            Err(_) => Value::Null,
        }
    }
}

impl FieldValue for Uuid {
    const EXPECTED: &'static str = "UUID string";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        let text = value
            .as_str()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))?;
        Uuid::parse_str(text).map_err(|_| Error::type_mismatch(field, Self::EXPECTED, value))
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// Raw passthrough for fields the schema leaves untyped.
impl FieldValue for Value {
    const EXPECTED: &'static str = "JSON value";

    fn from_json(_field: &str, value: &Value) -> Result<Self> {
        Ok(value.clone())
    }

    fn to_json(&self) -> Value {
        self.clone()
    }
}

/// Nested untyped object.
impl FieldValue for RawObject {
    const EXPECTED: &'static str = "object";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => RawObject::from_value(value.clone()),
            other => Err(Error::type_mismatch(field, Self::EXPECTED, other)),
        }
    }

    fn to_json(&self) -> Value {
        self.to_value()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_json(field: &str, value: &Value) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::type_mismatch(field, Self::EXPECTED, value))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::from_json(&format!("{field}[{index}]"), item))
            .collect()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_json).collect())
    }
}

impl RawObject {
    /// Required reference-like field: absent or JSON-null is `MissingField`.
    pub fn get_required<T: FieldValue>(&self, field: &str) -> Result<T> {
        match self.get(field) {
            None | Some(Value::Null) => Err(Error::missing_field(field)),
            Some(value) => T::from_json(field, value),
        }
    }

    /// Optional reference-like field: absent and JSON-null both read as
    /// `None`; a present value of the wrong shape is `TypeMismatch`.
    pub fn get_optional<T: FieldValue>(&self, field: &str) -> Result<Option<T>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_json(field, value).map(Some),
        }
    }

    /// Required value-like field: absent is `MissingField`; a JSON-null is a
    /// shape error, since null cannot coerce to a value type.
    pub fn get_required_value<T: FieldValue>(&self, field: &str) -> Result<T> {
        match self.get(field) {
            None => Err(Error::missing_field(field)),
            Some(value) => T::from_json(field, value),
        }
    }

    /// Optional value-like field, preserving the full tri-state: `None` when
    /// absent, `Some(Nullable::Null)` when explicitly nulled,
    /// `Some(Nullable::Value(_))` otherwise.
    pub fn get_optional_value<T: FieldValue>(&self, field: &str) -> Result<Option<Nullable<T>>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(Nullable::Null)),
            Some(value) => T::from_json(field, value).map(|v| Some(Nullable::Value(v))),
        }
    }
}

impl RawObjectBuilder {
    /// Write a required field.
    pub fn set_field<T: FieldValue>(&mut self, field: &str, value: T) -> &mut Self {
        self.set(field, value.to_json())
    }

    /// Write an ordinary-optional field. `None` omits the key entirely —
    /// nothing is written, and a previously set value is removed.
    pub fn set_optional<T: FieldValue>(&mut self, field: &str, value: Option<T>) -> &mut Self {
        match value {
            Some(value) => self.set(field, value.to_json()),
            None => self.unset(field),
        }
    }

    /// Write an explicitly-nullable field. `None` keeps the key present with
    /// a JSON `null`, distinguishable from never having set it.
    pub fn set_nullable<T: FieldValue>(&mut self, field: &str, value: Option<T>) -> &mut Self {
        match value {
            Some(value) => self.set(field, value.to_json()),
            None => self.set(field, Value::Null),
        }
    }
}
