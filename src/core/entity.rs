//! Purpose: The entity codec contract shared by every wire model.
//! Exports: `Entity` (decode/encode + additional-properties bag), `declare_entities!`.
//! Role: One codec for all models; per-type field schemas come from serde derive attributes.
//! Invariants: Unknown wire keys land in the bag on decode and are written back on encode.
//! Invariants: Named fields win over bag entries with the same wire key on encode.
//! Invariants: Absent optional fields never appear in encoded output.
use super::decode::DecodeError;
use super::error::{Error, ErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub type WireObject = Map<String, Value>;

pub trait Entity: Serialize + DeserializeOwned + Clone {
    fn additional_properties(&self) -> &WireObject;

    fn additional_properties_mut(&mut self) -> &mut WireObject;

    fn decode(object: WireObject) -> Result<Self, DecodeError> {
        Self::decode_value(Value::Object(object))
    }

    fn decode_value(value: Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value).map_err(DecodeError::from_serde)
    }

    /// Decodes a JSON array element by element; the first failing element aborts.
    fn decode_list(value: Value) -> Result<Vec<Self>, DecodeError> {
        serde_json::from_value(value).map_err(DecodeError::from_serde)
    }

    fn encode(&self) -> Result<WireObject, Error> {
        match serde_json::to_value(self) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => Err(Error::new(ErrorKind::Internal)
                .with_message("entity did not encode to a json object")),
            Err(err) => Err(Error::new(ErrorKind::Internal)
                .with_message("failed to encode entity")
                .with_source(err)),
        }
    }

    fn additional_keys(&self) -> Vec<&str> {
        self.additional_properties()
            .keys()
            .map(String::as_str)
            .collect()
    }

    fn additional(&self, key: &str) -> Option<&Value> {
        self.additional_properties().get(key)
    }

    fn has_additional(&self, key: &str) -> bool {
        self.additional_properties().contains_key(key)
    }

    fn set_additional(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.additional_properties_mut()
            .insert(key.into(), value.into())
    }

    fn remove_additional(&mut self, key: &str) -> Option<Value> {
        self.additional_properties_mut().remove(key)
    }
}

/// Implements `Entity` for models that keep their bag in `additional_properties`.
macro_rules! declare_entities {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl $crate::core::entity::Entity for $entity {
                fn additional_properties(&self) -> &$crate::core::entity::WireObject {
                    &self.additional_properties
                }

                fn additional_properties_mut(&mut self) -> &mut $crate::core::entity::WireObject {
                    &mut self.additional_properties
                }
            }
        )+
    };
}

pub(crate) use declare_entities;

#[cfg(test)]
mod tests {
    use super::{Entity, WireObject};
    use crate::core::decode::DecodeErrorKind;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        #[serde(flatten)]
        additional_properties: WireObject,
        #[serde(rename = "ID")]
        id: i32,
        display_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    declare_entities!(Sample);

    fn object(value: Value) -> WireObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let wire = object(json!({"ID": 3, "displayName": "x", "extra": [1, 2]}));
        let sample = Sample::decode(wire.clone()).expect("decode");
        assert_eq!(sample.additional_keys(), vec!["extra"]);
        assert_eq!(sample.encode().expect("encode"), wire);
    }

    #[test]
    fn named_fields_win_over_bag_entries() {
        let mut sample =
            Sample::decode(object(json!({"ID": 3, "displayName": "x"}))).expect("decode");
        sample.set_additional("displayName", "shadow");
        sample.set_additional("ID", 99);
        let encoded = sample.encode().expect("encode");
        assert_eq!(encoded.get("displayName"), Some(&json!("x")));
        assert_eq!(encoded.get("ID"), Some(&json!(3)));
    }

    #[test]
    fn bag_edits_leave_named_fields_alone() {
        let mut sample =
            Sample::decode(object(json!({"ID": 1, "displayName": "a", "k": true}))).expect("decode");
        assert!(sample.has_additional("k"));
        assert_eq!(sample.remove_additional("k"), Some(json!(true)));
        assert!(!sample.has_additional("k"));
        assert_eq!(sample.set_additional("k2", "v"), None);
        assert_eq!(sample.additional("k2"), Some(&json!("v")));
        assert_eq!(sample.id, 1);
        assert_eq!(sample.display_name, "a");
    }

    #[test]
    fn absent_optional_is_omitted() {
        let sample =
            Sample::decode(object(json!({"ID": 1, "displayName": "a"}))).expect("decode");
        assert_eq!(sample.note, None);
        assert!(!sample.encode().expect("encode").contains_key("note"));
    }

    #[test]
    fn missing_required_field_is_named() {
        let err = Sample::decode(object(json!({"displayName": "a"}))).expect_err("err");
        assert_eq!(err.kind(), DecodeErrorKind::MissingField);
        assert_eq!(err.field(), Some("ID"));
    }

    #[test]
    fn decode_list_aborts_on_bad_element() {
        let err = Sample::decode_list(json!([
            {"ID": 1, "displayName": "a"},
            {"ID": 2}
        ]))
        .expect_err("err");
        assert_eq!(err.field(), Some("displayName"));
    }
}
