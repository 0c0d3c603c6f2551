//! Purpose: Wire helpers for discriminated specs (`type` tag plus one payload key per case).
//! Exports: `TAG_KEY`, `take_payload`, `serialize_tagged`.
//! Invariants: The payload named by the tag is required; other payload keys stay in the bag.
//! Invariants: On encode the tag and its payload win over bag entries with the same key.
use super::decode::DecodeError;
use super::entity::WireObject;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

pub const TAG_KEY: &str = "type";

pub(crate) fn take_payload(rest: &mut WireObject, payload_key: &str) -> Result<Value, DecodeError> {
    rest.remove(payload_key)
        .ok_or_else(|| DecodeError::missing_field(payload_key))
}

pub(crate) fn serialize_tagged<S, T, P>(
    serializer: S,
    bag: &WireObject,
    tag: &T,
    payload_key: &str,
    payload: &P,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
    P: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(None)?;
    for (key, value) in bag {
        if key == TAG_KEY || key == payload_key {
            continue;
        }
        map.serialize_entry(key, value)?;
    }
    map.serialize_entry(TAG_KEY, tag)?;
    map.serialize_entry(payload_key, payload)?;
    map.end()
}
