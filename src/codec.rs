//! Explicit serializer configuration threaded through encode/decode calls.
//!
//! There is deliberately no process-wide serializer state: callers construct
//! a [`Codec`] (or use [`Codec::default`]) and pass it wherever payloads are
//! read or written. Decoding parses the payload into a raw object and adopts
//! it unchecked; strictness stays an opt-in `validate()` away.

use serde_json::Value;

use crate::errors::Result;
use crate::model::ApiModel;

/// Configuration value for JSON encode/decode of generated models.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    pretty: bool,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit pretty-printed output from [`encode`](Codec::encode).
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Decode a payload into a model without validating its fields. Fails
    /// only on syntactically invalid JSON or a non-object top level.
    pub fn decode<M: ApiModel>(&self, json: &str) -> Result<M> {
        let value: Value = serde_json::from_str(json)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(model = M::NAME, bytes = json.len(), "decoded payload");
        M::from_value(value)
    }

    /// Adopt an already-parsed JSON value.
    pub fn decode_value<M: ApiModel>(&self, value: Value) -> Result<M> {
        M::from_value(value)
    }

    /// Encode a model straight from its raw object, so fields captured on
    /// decode but unmodeled by any accessor are written back verbatim.
    pub fn encode<M: ApiModel>(&self, model: &M) -> Result<String> {
        let value = model.to_value();
        let out = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(model = M::NAME, bytes = out.len(), "encoded payload");
        Ok(out)
    }

    /// Encode to a JSON value instead of text.
    pub fn encode_value<M: ApiModel>(&self, model: &M) -> Value {
        model.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, Result};
    use crate::raw::RawObject;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Marker {
        raw: RawObject,
    }

    impl ApiModel for Marker {
        const NAME: &'static str = "Marker";

        fn from_raw_unchecked(raw: RawObject) -> Self {
            Marker { raw }
        }

        fn raw(&self) -> &RawObject {
            &self.raw
        }

        fn validate(&self) -> Result<()> {
            self.raw.get_required::<String>("id").map(|_| ())
        }
    }

    #[test]
    fn decode_then_encode_preserves_unknown_fields_and_order() {
        let codec = Codec::new();
        let payload = r#"{"id":"m_1","added_in_v9":{"flag":true}}"#;
        let marker: Marker = codec.decode(payload).unwrap();
        assert_eq!(codec.encode(&marker).unwrap(), payload);
    }

    #[test]
    fn decode_rejects_only_malformed_json() {
        let codec = Codec::new();
        let err = codec.decode::<Marker>("{not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));

        let err = codec.decode::<Marker>("[1,2]").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        // Valid JSON objects always decode, however incomplete.
        let marker: Marker = codec.decode("{}").unwrap();
        assert!(marker.validate().is_err());
    }

    #[test]
    fn pretty_codec_emits_indented_output() {
        let codec = Codec::new().pretty(true);
        let marker: Marker = codec.decode(r#"{"id":"m_1"}"#).unwrap();
        let out = codec.encode(&marker).unwrap();
        assert!(out.contains("\n"));
        assert_eq!(
            serde_json::from_str::<Value>(&out).unwrap(),
            json!({"id": "m_1"})
        );
    }

    #[test]
    fn decode_value_adopts_parsed_trees() {
        let codec = Codec::new();
        let marker: Marker = codec.decode_value(json!({"id": "m_1"})).unwrap();
        assert_eq!(codec.encode_value(&marker), json!({"id": "m_1"}));
    }
}
