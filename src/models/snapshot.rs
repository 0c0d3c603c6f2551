//! Purpose: Snapshot and backup-schedule entities.
//! Exports: `Snapshot`, `SnapshotCreate`, `AutoBackupConfig`.
//! Invariants: `Snapshot` carries the cluster reference as `ClusterID` (capitalised on the wire).
use crate::core::entity::{WireObject, declare_entities};
use crate::core::timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "ClusterID")]
    pub cluster_id: i32,
    pub name: String,
    #[serde(rename = "createdAt", with = "timestamp")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCreate {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
}

impl SnapshotCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            additional_properties: WireObject::new(),
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBackupConfig {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub enabled: bool,
    /// Cron expression for automatic snapshots, e.g. `0 0 * * *`.
    pub cron_expression: String,
    /// How long automatic snapshots are kept, e.g. `7d`.
    pub retention_duration: String,
}

declare_entities!(Snapshot, SnapshotCreate, AutoBackupConfig);
