//! Purpose: Background task entities and the discriminated `TaskSpec`.
//! Exports: `Task`, `TaskStatus`, `TaskAttributes`, `TaskCronjob`, `TaskRetryPolicy`,
//!          `TaskSpec`, `TaskSpecKind`, `TaskSpecType`, and the per-type payload records.
//! Role: `TaskSpec` is a closed sum type; the wire keeps the `type` tag plus one payload key.
//! Invariants: Decoding requires the payload named by `type`; unrelated payload keys are kept
//!             in the bag untouched and written back on encode.
use crate::core::decode::DecodeError;
use crate::core::entity::{Entity, WireObject, declare_entities};
use crate::core::tagged::{serialize_tagged, take_payload};
use crate::core::timestamp;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    pub attributes: TaskAttributes,
    pub spec: TaskSpec,
    pub status: TaskStatus,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: OffsetDateTime,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub started_at: Option<OffsetDateTime>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Paused,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Paused => "paused",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAttributes {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    /// Organization of the user that created the task; absent for system tasks.
    #[serde(rename = "orgID", default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i32>,
    /// e.g. `1h`, `1d`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cronjob: Option<TaskCronjob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<TaskRetryPolicy>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCronjob {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub cron_expression: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRetryPolicy {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_retry_on_failure: Option<bool>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TaskSpecType {
    #[serde(rename = "auto-backup")]
    AutoBackup,
    #[serde(rename = "auto-diagnostic")]
    AutoDiagnostic,
    #[serde(rename = "delete-cluster-diagnostic")]
    DeleteClusterDiagnostic,
    #[serde(rename = "delete-opaque-key")]
    DeleteOpaqueKey,
    #[serde(rename = "delete-snapshot")]
    DeleteSnapshot,
}

impl TaskSpecType {
    pub const ALL: [TaskSpecType; 5] = [
        TaskSpecType::AutoBackup,
        TaskSpecType::AutoDiagnostic,
        TaskSpecType::DeleteClusterDiagnostic,
        TaskSpecType::DeleteOpaqueKey,
        TaskSpecType::DeleteSnapshot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskSpecType::AutoBackup => "auto-backup",
            TaskSpecType::AutoDiagnostic => "auto-diagnostic",
            TaskSpecType::DeleteClusterDiagnostic => "delete-cluster-diagnostic",
            TaskSpecType::DeleteOpaqueKey => "delete-opaque-key",
            TaskSpecType::DeleteSnapshot => "delete-snapshot",
        }
    }

    /// Wire key carrying this type's payload.
    pub fn payload_key(self) -> &'static str {
        match self {
            TaskSpecType::AutoBackup => "autoBackup",
            TaskSpecType::AutoDiagnostic => "autoDiagnostic",
            TaskSpecType::DeleteClusterDiagnostic => "deleteClusterDiagnostic",
            TaskSpecType::DeleteOpaqueKey => "deleteOpaqueKey",
            TaskSpecType::DeleteSnapshot => "deleteSnapshot",
        }
    }
}

impl fmt::Display for TaskSpecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TaskSpecKind {
    AutoBackup(TaskSpecAutoBackup),
    AutoDiagnostic(TaskSpecAutoDiagnostic),
    DeleteClusterDiagnostic(TaskSpecDeleteClusterDiagnostic),
    DeleteOpaqueKey(TaskSpecDeleteOpaqueKey),
    DeleteSnapshot(TaskSpecDeleteSnapshot),
}

impl TaskSpecKind {
    pub fn spec_type(&self) -> TaskSpecType {
        match self {
            TaskSpecKind::AutoBackup(_) => TaskSpecType::AutoBackup,
            TaskSpecKind::AutoDiagnostic(_) => TaskSpecType::AutoDiagnostic,
            TaskSpecKind::DeleteClusterDiagnostic(_) => TaskSpecType::DeleteClusterDiagnostic,
            TaskSpecKind::DeleteOpaqueKey(_) => TaskSpecType::DeleteOpaqueKey,
            TaskSpecKind::DeleteSnapshot(_) => TaskSpecType::DeleteSnapshot,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "TaskSpecWire")]
pub struct TaskSpec {
    pub kind: TaskSpecKind,
    /// Keys other than `type` and the active payload, including payloads of other types.
    pub additional_properties: WireObject,
}

#[derive(Deserialize)]
struct TaskSpecWire {
    #[serde(rename = "type")]
    spec_type: TaskSpecType,
    #[serde(flatten)]
    rest: WireObject,
}

impl TryFrom<TaskSpecWire> for TaskSpec {
    type Error = DecodeError;

    fn try_from(wire: TaskSpecWire) -> Result<Self, Self::Error> {
        let TaskSpecWire {
            spec_type,
            mut rest,
        } = wire;
        let payload = take_payload(&mut rest, spec_type.payload_key())?;
        let kind = match spec_type {
            TaskSpecType::AutoBackup => {
                TaskSpecKind::AutoBackup(TaskSpecAutoBackup::decode_value(payload)?)
            }
            TaskSpecType::AutoDiagnostic => {
                TaskSpecKind::AutoDiagnostic(TaskSpecAutoDiagnostic::decode_value(payload)?)
            }
            TaskSpecType::DeleteClusterDiagnostic => TaskSpecKind::DeleteClusterDiagnostic(
                TaskSpecDeleteClusterDiagnostic::decode_value(payload)?,
            ),
            TaskSpecType::DeleteOpaqueKey => {
                TaskSpecKind::DeleteOpaqueKey(TaskSpecDeleteOpaqueKey::decode_value(payload)?)
            }
            TaskSpecType::DeleteSnapshot => {
                TaskSpecKind::DeleteSnapshot(TaskSpecDeleteSnapshot::decode_value(payload)?)
            }
        };
        Ok(Self {
            kind,
            additional_properties: rest,
        })
    }
}

impl Serialize for TaskSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let spec_type = self.spec_type();
        let key = spec_type.payload_key();
        let bag = &self.additional_properties;
        match &self.kind {
            TaskSpecKind::AutoBackup(payload) => {
                serialize_tagged(serializer, bag, &spec_type, key, payload)
            }
            TaskSpecKind::AutoDiagnostic(payload) => {
                serialize_tagged(serializer, bag, &spec_type, key, payload)
            }
            TaskSpecKind::DeleteClusterDiagnostic(payload) => {
                serialize_tagged(serializer, bag, &spec_type, key, payload)
            }
            TaskSpecKind::DeleteOpaqueKey(payload) => {
                serialize_tagged(serializer, bag, &spec_type, key, payload)
            }
            TaskSpecKind::DeleteSnapshot(payload) => {
                serialize_tagged(serializer, bag, &spec_type, key, payload)
            }
        }
    }
}

impl TaskSpec {
    pub fn new(kind: TaskSpecKind) -> Self {
        Self {
            kind,
            additional_properties: WireObject::new(),
        }
    }

    pub fn spec_type(&self) -> TaskSpecType {
        self.kind.spec_type()
    }

    pub fn auto_backup(&self) -> Option<&TaskSpecAutoBackup> {
        match &self.kind {
            TaskSpecKind::AutoBackup(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn auto_diagnostic(&self) -> Option<&TaskSpecAutoDiagnostic> {
        match &self.kind {
            TaskSpecKind::AutoDiagnostic(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn delete_cluster_diagnostic(&self) -> Option<&TaskSpecDeleteClusterDiagnostic> {
        match &self.kind {
            TaskSpecKind::DeleteClusterDiagnostic(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn delete_opaque_key(&self) -> Option<&TaskSpecDeleteOpaqueKey> {
        match &self.kind {
            TaskSpecKind::DeleteOpaqueKey(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn delete_snapshot(&self) -> Option<&TaskSpecDeleteSnapshot> {
        match &self.kind {
            TaskSpecKind::DeleteSnapshot(payload) => Some(payload),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpecAutoBackup {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    pub retention_duration: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpecAutoDiagnostic {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    pub retention_duration: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSpecDeleteClusterDiagnostic {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    #[serde(rename = "diagnosticID")]
    pub diagnostic_id: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSpecDeleteOpaqueKey {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "keyID")]
    pub key_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSpecDeleteSnapshot {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    #[serde(rename = "snapshotID")]
    pub snapshot_id: i32,
}

declare_entities!(
    Task,
    TaskAttributes,
    TaskCronjob,
    TaskRetryPolicy,
    TaskSpec,
    TaskSpecAutoBackup,
    TaskSpecAutoDiagnostic,
    TaskSpecDeleteClusterDiagnostic,
    TaskSpecDeleteOpaqueKey,
    TaskSpecDeleteSnapshot,
);
