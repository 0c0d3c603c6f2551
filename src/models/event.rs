//! Purpose: Event log entities and the discriminated `EventSpec`.
//! Exports: `Event`, `EventSpec`, `EventSpecKind`, `EventSpecType`, `EventTaskError`,
//!          `EventTaskCompleted`.
//! Invariants: Same tag/payload wire contract as `TaskSpec`.
use crate::core::decode::DecodeError;
use crate::core::entity::{Entity, WireObject, declare_entities};
use crate::core::tagged::{serialize_tagged, take_payload};
use crate::core::timestamp;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    pub spec: EventSpec,
    #[serde(rename = "createdAt", with = "timestamp")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum EventSpecType {
    TaskError,
    TaskCompleted,
}

impl EventSpecType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSpecType::TaskError => "TaskError",
            EventSpecType::TaskCompleted => "TaskCompleted",
        }
    }

    pub fn payload_key(self) -> &'static str {
        match self {
            EventSpecType::TaskError => "taskError",
            EventSpecType::TaskCompleted => "taskCompleted",
        }
    }
}

impl fmt::Display for EventSpecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventSpecKind {
    TaskError(EventTaskError),
    TaskCompleted(EventTaskCompleted),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "EventSpecWire")]
pub struct EventSpec {
    pub kind: EventSpecKind,
    pub additional_properties: WireObject,
}

#[derive(Deserialize)]
struct EventSpecWire {
    #[serde(rename = "type")]
    spec_type: EventSpecType,
    #[serde(flatten)]
    rest: WireObject,
}

impl TryFrom<EventSpecWire> for EventSpec {
    type Error = DecodeError;

    fn try_from(wire: EventSpecWire) -> Result<Self, Self::Error> {
        let EventSpecWire {
            spec_type,
            mut rest,
        } = wire;
        let payload = take_payload(&mut rest, spec_type.payload_key())?;
        let kind = match spec_type {
            EventSpecType::TaskError => EventSpecKind::TaskError(EventTaskError::decode_value(payload)?),
            EventSpecType::TaskCompleted => {
                EventSpecKind::TaskCompleted(EventTaskCompleted::decode_value(payload)?)
            }
        };
        Ok(Self {
            kind,
            additional_properties: rest,
        })
    }
}

impl Serialize for EventSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let spec_type = self.spec_type();
        let key = spec_type.payload_key();
        match &self.kind {
            EventSpecKind::TaskError(payload) => {
                serialize_tagged(serializer, &self.additional_properties, &spec_type, key, payload)
            }
            EventSpecKind::TaskCompleted(payload) => {
                serialize_tagged(serializer, &self.additional_properties, &spec_type, key, payload)
            }
        }
    }
}

impl EventSpec {
    pub fn new(kind: EventSpecKind) -> Self {
        Self {
            kind,
            additional_properties: WireObject::new(),
        }
    }

    pub fn spec_type(&self) -> EventSpecType {
        match self.kind {
            EventSpecKind::TaskError(_) => EventSpecType::TaskError,
            EventSpecKind::TaskCompleted(_) => EventSpecType::TaskCompleted,
        }
    }

    pub fn task_error(&self) -> Option<&EventTaskError> {
        match &self.kind {
            EventSpecKind::TaskError(payload) => Some(payload),
            EventSpecKind::TaskCompleted(_) => None,
        }
    }

    pub fn task_completed(&self) -> Option<&EventTaskCompleted> {
        match &self.kind {
            EventSpecKind::TaskCompleted(payload) => Some(payload),
            EventSpecKind::TaskError(_) => None,
        }
    }

    /// ID of the task the event refers to.
    pub fn task_id(&self) -> i32 {
        match &self.kind {
            EventSpecKind::TaskError(payload) => payload.task_id,
            EventSpecKind::TaskCompleted(payload) => payload.task_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTaskError {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "taskID")]
    pub task_id: i32,
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTaskCompleted {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "taskID")]
    pub task_id: i32,
}

declare_entities!(Event, EventSpec, EventTaskError, EventTaskCompleted);
