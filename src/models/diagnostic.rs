use crate::core::entity::{WireObject, declare_entities};
use crate::core::timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One collected diagnostic dump for a cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticData {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "createdAt", with = "timestamp")]
    pub created_at: OffsetDateTime,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoDiagnosticConfig {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub enabled: bool,
    pub cron_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_duration: Option<String>,
}

declare_entities!(DiagnosticData, AutoDiagnosticConfig);
