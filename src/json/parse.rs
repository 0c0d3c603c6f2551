//! Purpose: Decode response bodies and encode request bodies for the endpoint invoker.
//! Exports: `decode_body`, `encode_body`.
//! Role: Two-step decode (bytes -> JSON value -> typed payload) so syntax failures and
//!       schema failures land in distinct `DecodeErrorKind`s.
//! Invariants: Request bodies are serialized from an encoded wire object, so named fields
//!             always win over bag entries and no key is emitted twice.
//! Notes: Error mapping to `Error` is done by callsites so operation context stays explicit.

use crate::core::decode::DecodeError;
use crate::core::entity::WireObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::from_serde)?;
    serde_json::from_value(value).map_err(DecodeError::from_serde)
}

pub(crate) fn encode_body(object: WireObject) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::{decode_body, encode_body};
    use crate::core::decode::DecodeErrorKind;
    use serde_json::{Map, Value, json};

    #[test]
    fn empty_body_is_syntax_error() {
        let err = decode_body::<Value>(b"").expect_err("err");
        assert_eq!(err.kind(), DecodeErrorKind::Syntax);
    }

    #[test]
    fn html_error_page_is_syntax_error() {
        let err = decode_body::<Vec<String>>(b"<html>502</html>").expect_err("err");
        assert_eq!(err.kind(), DecodeErrorKind::Syntax);
    }

    #[test]
    fn type_mismatch_is_not_syntax() {
        let err = decode_body::<Vec<String>>(br#"{"a":1}"#).expect_err("err");
        assert_eq!(err.kind(), DecodeErrorKind::InvalidType);
    }

    #[test]
    fn encode_body_emits_compact_object() {
        let mut object = Map::new();
        object.insert("name".to_string(), json!("snap"));
        assert_eq!(encode_body(object).expect("encode"), r#"{"name":"snap"}"#);
    }
}
