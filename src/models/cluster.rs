//! Purpose: Cluster entities and the request/response bodies around them.
//! Exports: `Cluster`, `ClusterCreate`, `ClusterImport`, `UpdateClusterRequest`,
//!          `TestClusterConnectionPayload`, `TestClusterConnectionResult`,
//!          `RisectlCommand`, `RisectlCommandResult`.
//! Invariants: Identifier keys keep the server's casing (`ID`, `OrgID`, `metricsStoreID`).
use crate::core::entity::{WireObject, declare_entities};
use crate::core::timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "OrgID")]
    pub org_id: i32,
    pub name: String,
    pub host: String,
    pub sql_port: i32,
    pub meta_port: i32,
    pub http_port: i32,
    pub version: String,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: OffsetDateTime,
    /// ID of the metrics store this cluster reports to.
    #[serde(
        rename = "metricsStoreID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics_store_id: Option<i32>,
}

/// Provisioning request for a brand new cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCreate {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    pub host: String,
    pub sql_port: i32,
    pub meta_node_port: i32,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub database: String,
}

/// Registers an already running cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterImport {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    pub host: String,
    pub sql_port: i32,
    pub meta_port: i32,
    pub http_port: i32,
    pub version: String,
    #[serde(
        rename = "metricsStoreID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics_store_id: Option<i32>,
}

impl ClusterImport {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        sql_port: i32,
        meta_port: i32,
        http_port: i32,
        version: impl Into<String>,
    ) -> Self {
        Self {
            additional_properties: WireObject::new(),
            name: name.into(),
            host: host.into(),
            sql_port,
            meta_port,
            http_port,
            version: version.into(),
            metrics_store_id: None,
        }
    }

    pub fn with_metrics_store_id(mut self, id: i32) -> Self {
        self.metrics_store_id = Some(id);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClusterRequest {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    pub host: String,
    pub sql_port: i32,
    pub meta_port: i32,
    pub http_port: i32,
    pub version: String,
    #[serde(
        rename = "metricsStoreID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics_store_id: Option<i32>,
}

impl From<&Cluster> for UpdateClusterRequest {
    fn from(cluster: &Cluster) -> Self {
        Self {
            additional_properties: WireObject::new(),
            name: cluster.name.clone(),
            host: cluster.host.clone(),
            sql_port: cluster.sql_port,
            meta_port: cluster.meta_port,
            http_port: cluster.http_port,
            version: cluster.version.clone(),
            metrics_store_id: cluster.metrics_store_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestClusterConnectionPayload {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub host: String,
    pub sql_port: i32,
    pub meta_port: i32,
    pub http_port: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestClusterConnectionResult {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub success: bool,
    pub result: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RisectlCommand {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub args: Vec<String>,
}

impl RisectlCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            additional_properties: WireObject::new(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RisectlCommandResult {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Error raised while trying to launch the command, empty when it ran.
    pub err: String,
}

declare_entities!(
    Cluster,
    ClusterCreate,
    ClusterImport,
    UpdateClusterRequest,
    TestClusterConnectionPayload,
    TestClusterConnectionResult,
    RisectlCommand,
    RisectlCommandResult,
);

#[cfg(test)]
mod tests {
    use super::{Cluster, ClusterCreate, ClusterImport, RisectlCommandResult, UpdateClusterRequest};
    use crate::core::decode::DecodeErrorKind;
    use crate::core::entity::{Entity, WireObject};
    use serde_json::{Value, json};

    fn object(value: Value) -> WireObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn cluster_wire() -> WireObject {
        object(json!({
            "ID": 1,
            "OrgID": 7,
            "name": "test",
            "host": "localhost",
            "sqlPort": 5432,
            "metaPort": 9191,
            "httpPort": 8080,
            "version": "v1.0.0",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "metricsStoreID": 1
        }))
    }

    #[test]
    fn cluster_import_round_trip() {
        let wire = cluster_wire();
        let cluster = Cluster::decode(wire.clone()).expect("decode");

        assert_eq!(cluster.id, 1);
        assert_eq!(cluster.org_id, 7);
        assert_eq!(cluster.name, "test");
        assert_eq!(cluster.host, "localhost");
        assert_eq!(cluster.sql_port, 5432);
        assert_eq!(cluster.meta_port, 9191);
        assert_eq!(cluster.http_port, 8080);
        assert_eq!(cluster.version, "v1.0.0");
        assert_eq!(cluster.created_at.unix_timestamp(), 1_704_067_200);
        assert_eq!(cluster.updated_at.unix_timestamp(), 1_704_067_200);
        assert_eq!(cluster.metrics_store_id, Some(1));
        assert!(cluster.additional_properties.is_empty());

        assert_eq!(cluster.encode().expect("encode"), wire);
    }

    #[test]
    fn cluster_without_metrics_store_omits_key() {
        let mut wire = cluster_wire();
        wire.remove("metricsStoreID");
        let cluster = Cluster::decode(wire.clone()).expect("decode");
        assert_eq!(cluster.metrics_store_id, None);
        let encoded = cluster.encode().expect("encode");
        assert!(!encoded.contains_key("metricsStoreID"));
        assert_eq!(encoded, wire);
    }

    #[test]
    fn cluster_requires_org_id() {
        let mut wire = cluster_wire();
        wire.remove("OrgID");
        let err = Cluster::decode(wire).expect_err("err");
        assert_eq!(err.kind(), DecodeErrorKind::MissingField);
        assert_eq!(err.field(), Some("OrgID"));
    }

    #[test]
    fn cluster_rejects_bad_timestamp() {
        let mut wire = cluster_wire();
        wire.insert("updatedAt".to_string(), json!("2024-13-45"));
        let err = Cluster::decode(wire).expect_err("err");
        assert_eq!(err.kind(), DecodeErrorKind::MalformedTimestamp);
        assert_eq!(err.value(), Some("2024-13-45"));
    }

    #[test]
    fn cluster_import_builder_encodes_wire_keys() {
        let body = ClusterImport::new("test", "localhost", 5432, 9191, 8080, "v1.0.0")
            .with_metrics_store_id(1)
            .encode()
            .expect("encode");
        assert_eq!(
            Value::Object(body),
            json!({
                "name": "test",
                "host": "localhost",
                "sqlPort": 5432,
                "metaPort": 9191,
                "httpPort": 8080,
                "version": "v1.0.0",
                "metricsStoreID": 1
            })
        );
    }

    #[test]
    fn cluster_create_uses_meta_node_port() {
        let create = ClusterCreate::decode(object(json!({
            "name": "c",
            "host": "h",
            "sqlPort": 4566,
            "metaNodePort": 5690,
            "user": "root",
            "database": "dev"
        })))
        .expect("decode");
        assert_eq!(create.meta_node_port, 5690);
        assert_eq!(create.password, None);
        assert!(!create.encode().expect("encode").contains_key("password"));
    }

    #[test]
    fn update_request_copies_cluster_fields() {
        let cluster = Cluster::decode(cluster_wire()).expect("decode");
        let update = UpdateClusterRequest::from(&cluster);
        assert_eq!(update.name, cluster.name);
        assert_eq!(update.metrics_store_id, Some(1));
        assert!(!update.encode().expect("encode").contains_key("ID"));
    }

    #[test]
    fn risectl_result_reads_exit_code() {
        let result = RisectlCommandResult::decode(object(json!({
            "stdout": "ok",
            "stderr": "",
            "exitCode": 0,
            "err": ""
        })))
        .expect("decode");
        assert_eq!(result.exit_code, 0);
    }
}
