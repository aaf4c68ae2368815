//! The shared contract every generated model and params type follows.
//!
//! A generated model is a thin wrapper over one frozen [`RawObject`]; request
//! params own up to three (header, query, body). Typed constructors go
//! through a per-model builder whose named setters write into a
//! [`RawObjectBuilder`], while wire-originated instances are adopted whole
//! via [`ApiModel::from_raw_unchecked`] — the latter may legitimately carry
//! fields the compiled schema does not model yet, which is why the two entry
//! points stay distinct and why adoption performs no per-field validation.

use serde_json::Value;

use crate::errors::Result;
use crate::raw::{RawObject, RawObjectBuilder};

/// Contract implemented by every generated model and params type.
///
/// Equality, hashing, and serialization all delegate to the raw object, so a
/// model built via typed setters and one adopted from equivalent wire JSON
/// compare equal, and unknown fields survive a decode/encode round trip
/// untouched. Copy construction is [`Clone`]: the frozen snapshot is shared,
/// and the copy compares equal to the source.
pub trait ApiModel: Clone {
    /// Type name used by the diagnostic pretty-printer.
    const NAME: &'static str;

    /// Adopt already-parsed wire data without per-field validation. Used by
    /// the response deserializer; SDK callers construct via the builder.
    fn from_raw_unchecked(raw: RawObject) -> Self;

    /// Read-only escape hatch over the full underlying payload, including
    /// fields no typed accessor models.
    fn raw(&self) -> &RawObject;

    /// Walk every known field through its typed accessor, recursing into
    /// nested models and enums; fails on the first coercion, missing-field,
    /// or unknown-enum error. Never called implicitly.
    fn validate(&self) -> Result<()>;

    /// Adopt a parsed JSON value; fails only when it is not an object.
    fn from_value(value: Value) -> Result<Self> {
        Ok(Self::from_raw_unchecked(RawObject::from_value(value)?))
    }

    /// Serialize straight from the raw object.
    fn to_value(&self) -> Value {
        self.raw().to_value()
    }
}

/// Diagnostic pretty-printer: type name plus the pretty-printed raw payload.
pub fn pretty<M: ApiModel>(model: &M) -> String {
    let body = serde_json::to_string_pretty(&model.to_value())
        .unwrap_or_else(|_| "<unprintable>".to_string());
    format!("{} {body}", M::NAME)
}

/// Implement the model boilerplate shared by every generated type: serde
/// passthrough over the raw object, [`FieldValue`](crate::FieldValue) so the
/// model can nest inside other models, and a `Display` delegating to the
/// pretty-printer. The struct must hold its raw object and implement
/// [`ApiModel`].
#[macro_export]
macro_rules! model_impls {
    ($name:ident) => {
        impl $crate::FieldValue for $name {
            const EXPECTED: &'static str = "object";

            fn from_json(
                field: &str,
                value: &::serde_json::Value,
            ) -> $crate::Result<Self> {
                match value {
                    ::serde_json::Value::Object(_) => {
                        <$name as $crate::ApiModel>::from_value(value.clone())
                    }
                    other => ::core::result::Result::Err($crate::Error::type_mismatch(
                        field,
                        Self::EXPECTED,
                        other,
                    )),
                }
            }

            fn to_json(&self) -> ::serde_json::Value {
                <$name as $crate::ApiModel>::to_value(self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::pretty(self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize($crate::ApiModel::raw(self), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let raw = <$crate::RawObject as ::serde::Deserialize>::deserialize(deserializer)?;
                ::core::result::Result::Ok(<$name as $crate::ApiModel>::from_raw_unchecked(raw))
            }
        }
    };
}

/// Frozen request parameters: one raw object per transport placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RequestParams {
    pub header: RawObject,
    pub query: RawObject,
    pub body: RawObject,
}

impl RequestParams {
    pub fn builder() -> RequestParamsBuilder {
        RequestParamsBuilder::default()
    }
}

/// Construction phase of [`RequestParams`]; each placement follows the same
/// freeze discipline as a model body.
#[derive(Debug, Default)]
pub struct RequestParamsBuilder {
    pub header: RawObjectBuilder,
    pub query: RawObjectBuilder,
    pub body: RawObjectBuilder,
}

impl RequestParamsBuilder {
    pub fn freeze(self) -> RequestParams {
        RequestParams {
            header: self.header.freeze(),
            query: self.query.freeze(),
            body: self.body.freeze(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use serde_json::json;

    // Minimal generated-style model: required `id`, optional `note`.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Tag {
        raw: RawObject,
    }

    impl Tag {
        fn builder() -> TagBuilder {
            TagBuilder::default()
        }

        fn id(&self) -> Result<String> {
            self.raw.get_required("id")
        }

        fn note(&self) -> Result<Option<String>> {
            self.raw.get_optional("note")
        }
    }

    #[derive(Debug, Default)]
    struct TagBuilder {
        raw: RawObjectBuilder,
    }

    impl TagBuilder {
        fn id(mut self, id: impl Into<String>) -> Self {
            self.raw.set_field("id", id.into());
            self
        }

        fn note(mut self, note: Option<String>) -> Self {
            self.raw.set_optional("note", note);
            self
        }

        fn build(self) -> Tag {
            Tag {
                raw: self.raw.freeze(),
            }
        }
    }

    impl ApiModel for Tag {
        const NAME: &'static str = "Tag";

        fn from_raw_unchecked(raw: RawObject) -> Self {
            Tag { raw }
        }

        fn raw(&self) -> &RawObject {
            &self.raw
        }

        fn validate(&self) -> Result<()> {
            self.id()?;
            self.note()?;
            Ok(())
        }
    }

    crate::model_impls!(Tag);

    #[test]
    fn builder_and_wire_adoption_produce_equal_models() {
        let built = Tag::builder().id("t_1").note(None).build();
        let adopted = Tag::from_value(json!({"id": "t_1"})).unwrap();
        assert_eq!(built, adopted);
    }

    #[test]
    fn clone_is_the_copy_constructor() {
        let tag = Tag::builder().id("t_1").note(Some("hello".into())).build();
        let copy = tag.clone();
        assert_eq!(copy, tag);
        assert_eq!(copy.raw(), tag.raw());
    }

    #[test]
    fn adoption_skips_validation_but_validate_catches_problems() {
        let adopted = Tag::from_value(json!({"note": 42})).unwrap();
        assert!(matches!(
            adopted.validate().unwrap_err(),
            Error::MissingField { .. }
        ));

        let wrong_shape = Tag::from_value(json!({"id": "t_1", "note": 42})).unwrap();
        assert!(matches!(
            wrong_shape.validate().unwrap_err(),
            Error::TypeMismatch { .. }
        ));
    }

    #[test]
    fn serde_goes_through_the_raw_object() {
        let tag: Tag = serde_json::from_str(r#"{"id":"t_1","color":"teal"}"#).unwrap();
        assert_eq!(tag.id().unwrap(), "t_1");
        // Unknown field survives untouched.
        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            r#"{"id":"t_1","color":"teal"}"#
        );
    }

    #[test]
    fn pretty_printer_names_the_type() {
        let tag = Tag::builder().id("t_1").build();
        let text = tag.to_string();
        assert!(text.starts_with("Tag {"), "got: {text}");
        assert!(text.contains("\"id\": \"t_1\""));
    }

    #[test]
    fn models_nest_as_field_values() {
        let raw = RawObject::from_value(json!({"tag": {"id": "t_2"}, "plain": 1})).unwrap();
        let tag: Tag = raw.get_required("tag").unwrap();
        assert_eq!(tag.id().unwrap(), "t_2");
        assert!(raw.get_required::<Tag>("plain").is_err());
    }

    #[test]
    fn request_params_freeze_all_three_placements() {
        let mut builder = RequestParams::builder();
        builder.header.set_field("x-request-id", "r_1".to_string());
        builder.query.set_field("limit", 10i64);
        builder.body.set_nullable::<String>("git_branch", None);
        let params = builder.freeze();

        assert_eq!(params.header.get("x-request-id"), Some(&json!("r_1")));
        assert_eq!(params.query.get("limit"), Some(&json!(10)));
        assert!(params.body.contains_key("git_branch"));
        assert_eq!(params.body.get("git_branch"), Some(&json!(null)));
    }
}
