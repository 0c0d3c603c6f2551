//! Purpose: Cluster, snapshot and diagnostic operations.
//! Exports: operation descriptors for `/clusters/**`, `/cluster-versions`,
//!          `/test-cluster-connection`, and `DiagnosticsQuery`.
#![allow(clippy::result_large_err)]

use super::client::{ApiResult, Client};
use super::operation::{Method, Operation, Request};
use super::response::ApiResponse;
use crate::core::error::{Error, ErrorKind};
use crate::core::timestamp;
use crate::models::{
    AutoBackupConfig, AutoDiagnosticConfig, Cluster, ClusterCreate, ClusterImport,
    DiagnosticData, RisectlCommand, RisectlCommandResult, Snapshot, SnapshotCreate,
    TestClusterConnectionPayload, TestClusterConnectionResult, UpdateClusterRequest,
};
use time::OffsetDateTime;

pub const LIST_CLUSTERS: Operation =
    Operation::new("ListClusters", Method::Get, "/clusters", &[200]);
pub const CREATE_CLUSTER: Operation =
    Operation::new("CreateCluster", Method::Post, "/clusters", &[201]);
pub const IMPORT_CLUSTER: Operation =
    Operation::new("ImportCluster", Method::Post, "/clusters/import", &[201]);
pub const GET_CLUSTER: Operation =
    Operation::new("GetCluster", Method::Get, "/clusters/{ID}", &[200]);
pub const UPDATE_CLUSTER: Operation =
    Operation::new("UpdateCluster", Method::Put, "/clusters/{ID}", &[200]);
pub const DELETE_CLUSTER: Operation =
    Operation::new("DeleteCluster", Method::Delete, "/clusters/{ID}", &[204]);
pub const TEST_CLUSTER_CONNECTION: Operation = Operation::new(
    "TestClusterConnection",
    Method::Post,
    "/test-cluster-connection",
    &[200],
);
pub const LIST_CLUSTER_VERSIONS: Operation =
    Operation::new("ListClusterVersions", Method::Get, "/cluster-versions", &[200]);
pub const RUN_RISECTL_COMMAND: Operation = Operation::new(
    "RunRisectlCommand",
    Method::Post,
    "/clusters/{ID}/risectl",
    &[200],
);

pub const LIST_CLUSTER_SNAPSHOTS: Operation = Operation::new(
    "ListClusterSnapshots",
    Method::Get,
    "/clusters/{ID}/snapshots",
    &[200],
);
pub const CREATE_CLUSTER_SNAPSHOT: Operation = Operation::new(
    "CreateClusterSnapshot",
    Method::Post,
    "/clusters/{ID}/snapshots",
    &[201],
);
pub const DELETE_CLUSTER_SNAPSHOT: Operation = Operation::new(
    "DeleteClusterSnapshot",
    Method::Delete,
    "/clusters/{ID}/snapshots/{snapshotId}",
    &[204],
);
pub const RESTORE_CLUSTER_SNAPSHOT: Operation = Operation::new(
    "RestoreClusterSnapshot",
    Method::Post,
    "/clusters/{ID}/snapshots/{snapshotId}",
    &[200, 204],
);
pub const GET_CLUSTER_AUTO_BACKUP_CONFIG: Operation = Operation::new(
    "GetClusterAutoBackupConfig",
    Method::Get,
    "/clusters/{ID}/auto-backup-config",
    &[200],
);
pub const UPDATE_CLUSTER_AUTO_BACKUP_CONFIG: Operation = Operation::new(
    "UpdateClusterAutoBackupConfig",
    Method::Put,
    "/clusters/{ID}/auto-backup-config",
    &[200, 204],
);

pub const LIST_CLUSTER_DIAGNOSTICS: Operation = Operation::new(
    "ListClusterDiagnostics",
    Method::Get,
    "/clusters/{ID}/diagnostics",
    &[200],
);
pub const CREATE_CLUSTER_DIAGNOSTIC: Operation = Operation::new(
    "CreateClusterDiagnostic",
    Method::Post,
    "/clusters/{ID}/diagnostics",
    &[200, 201],
);
pub const GET_CLUSTER_DIAGNOSTIC: Operation = Operation::new(
    "GetClusterDiagnostic",
    Method::Get,
    "/clusters/{ID}/diagnostics/{diagnosticId}",
    &[200],
);
pub const GET_CLUSTER_AUTO_DIAGNOSTIC_CONFIG: Operation = Operation::new(
    "GetClusterAutoDiagnosticConfig",
    Method::Get,
    "/clusters/{ID}/diagnostics/config",
    &[200],
);
pub const UPDATE_CLUSTER_AUTO_DIAGNOSTIC_CONFIG: Operation = Operation::new(
    "UpdateClusterAutoDiagnosticConfig",
    Method::Put,
    "/clusters/{ID}/diagnostics/config",
    &[200, 204],
);

/// Filters for listing diagnostics; unset fields are left to server defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagnosticsQuery {
    pub from: Option<OffsetDateTime>,
    pub to: Option<OffsetDateTime>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl DiagnosticsQuery {
    fn apply(&self, request: Request) -> ApiResult<Request> {
        Ok(request
            .query_opt("from", self.from.as_ref().map(format_query_time).transpose()?)
            .query_opt("to", self.to.as_ref().map(format_query_time).transpose()?)
            .query_opt("page", self.page)
            .query_opt("perPage", self.per_page))
    }
}

fn format_query_time(value: &OffsetDateTime) -> ApiResult<String> {
    timestamp::format(value).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("timestamp cannot be written as RFC 3339")
            .with_source(err)
    })
}

impl Client {
    pub fn list_clusters_detailed(&self) -> ApiResult<ApiResponse<Vec<Cluster>>> {
        self.execute_json(Request::new(LIST_CLUSTERS))
    }

    pub fn list_clusters(&self) -> ApiResult<Option<Vec<Cluster>>> {
        self.list_clusters_detailed().map(ApiResponse::into_parsed)
    }

    pub fn create_cluster_detailed(&self, body: &ClusterCreate) -> ApiResult<ApiResponse<Cluster>> {
        self.execute_json(Request::new(CREATE_CLUSTER).json(body)?)
    }

    pub fn create_cluster(&self, body: &ClusterCreate) -> ApiResult<Option<Cluster>> {
        self.create_cluster_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    pub fn import_cluster_detailed(&self, body: &ClusterImport) -> ApiResult<ApiResponse<Cluster>> {
        self.execute_json(Request::new(IMPORT_CLUSTER).json(body)?)
    }

    pub fn import_cluster(&self, body: &ClusterImport) -> ApiResult<Option<Cluster>> {
        self.import_cluster_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    pub fn get_cluster_detailed(&self, id: i32) -> ApiResult<ApiResponse<Cluster>> {
        self.execute_json(Request::new(GET_CLUSTER).path("ID", id))
    }

    pub fn get_cluster(&self, id: i32) -> ApiResult<Option<Cluster>> {
        self.get_cluster_detailed(id).map(ApiResponse::into_parsed)
    }

    pub fn update_cluster_detailed(
        &self,
        id: i32,
        body: &UpdateClusterRequest,
    ) -> ApiResult<ApiResponse<Cluster>> {
        self.execute_json(Request::new(UPDATE_CLUSTER).path("ID", id).json(body)?)
    }

    pub fn update_cluster(&self, id: i32, body: &UpdateClusterRequest) -> ApiResult<Option<Cluster>> {
        self.update_cluster_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    /// `cascade` also removes the cluster's snapshots and diagnostics.
    pub fn delete_cluster_detailed(
        &self,
        id: i32,
        cascade: Option<bool>,
    ) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(DELETE_CLUSTER)
                .path("ID", id)
                .query_opt("cascade", cascade),
        )
    }

    pub fn delete_cluster(&self, id: i32, cascade: Option<bool>) -> ApiResult<Option<()>> {
        self.delete_cluster_detailed(id, cascade)
            .map(ApiResponse::into_parsed)
    }

    pub fn test_cluster_connection_detailed(
        &self,
        body: &TestClusterConnectionPayload,
    ) -> ApiResult<ApiResponse<TestClusterConnectionResult>> {
        self.execute_json(Request::new(TEST_CLUSTER_CONNECTION).json(body)?)
    }

    pub fn test_cluster_connection(
        &self,
        body: &TestClusterConnectionPayload,
    ) -> ApiResult<Option<TestClusterConnectionResult>> {
        self.test_cluster_connection_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    pub fn list_cluster_versions_detailed(&self) -> ApiResult<ApiResponse<Vec<String>>> {
        self.execute_json(Request::new(LIST_CLUSTER_VERSIONS))
    }

    pub fn list_cluster_versions(&self) -> ApiResult<Option<Vec<String>>> {
        self.list_cluster_versions_detailed()
            .map(ApiResponse::into_parsed)
    }

    pub fn run_risectl_command_detailed(
        &self,
        id: i32,
        body: &RisectlCommand,
    ) -> ApiResult<ApiResponse<RisectlCommandResult>> {
        self.execute_json(Request::new(RUN_RISECTL_COMMAND).path("ID", id).json(body)?)
    }

    pub fn run_risectl_command(
        &self,
        id: i32,
        body: &RisectlCommand,
    ) -> ApiResult<Option<RisectlCommandResult>> {
        self.run_risectl_command_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    pub fn list_cluster_snapshots_detailed(&self, id: i32) -> ApiResult<ApiResponse<Vec<Snapshot>>> {
        self.execute_json(Request::new(LIST_CLUSTER_SNAPSHOTS).path("ID", id))
    }

    pub fn list_cluster_snapshots(&self, id: i32) -> ApiResult<Option<Vec<Snapshot>>> {
        self.list_cluster_snapshots_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn create_cluster_snapshot_detailed(
        &self,
        id: i32,
        body: &SnapshotCreate,
    ) -> ApiResult<ApiResponse<Snapshot>> {
        self.execute_json(
            Request::new(CREATE_CLUSTER_SNAPSHOT)
                .path("ID", id)
                .json(body)?,
        )
    }

    pub fn create_cluster_snapshot(&self, id: i32, body: &SnapshotCreate) -> ApiResult<Option<Snapshot>> {
        self.create_cluster_snapshot_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    pub fn delete_cluster_snapshot_detailed(
        &self,
        id: i32,
        snapshot_id: i32,
    ) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(DELETE_CLUSTER_SNAPSHOT)
                .path("ID", id)
                .path("snapshotId", snapshot_id),
        )
    }

    pub fn delete_cluster_snapshot(&self, id: i32, snapshot_id: i32) -> ApiResult<Option<()>> {
        self.delete_cluster_snapshot_detailed(id, snapshot_id)
            .map(ApiResponse::into_parsed)
    }

    pub fn restore_cluster_snapshot_detailed(
        &self,
        id: i32,
        snapshot_id: i32,
    ) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(RESTORE_CLUSTER_SNAPSHOT)
                .path("ID", id)
                .path("snapshotId", snapshot_id),
        )
    }

    pub fn restore_cluster_snapshot(&self, id: i32, snapshot_id: i32) -> ApiResult<Option<()>> {
        self.restore_cluster_snapshot_detailed(id, snapshot_id)
            .map(ApiResponse::into_parsed)
    }

    pub fn get_cluster_auto_backup_config_detailed(
        &self,
        id: i32,
    ) -> ApiResult<ApiResponse<AutoBackupConfig>> {
        self.execute_json(Request::new(GET_CLUSTER_AUTO_BACKUP_CONFIG).path("ID", id))
    }

    pub fn get_cluster_auto_backup_config(&self, id: i32) -> ApiResult<Option<AutoBackupConfig>> {
        self.get_cluster_auto_backup_config_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn update_cluster_auto_backup_config_detailed(
        &self,
        id: i32,
        body: &AutoBackupConfig,
    ) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(UPDATE_CLUSTER_AUTO_BACKUP_CONFIG)
                .path("ID", id)
                .json(body)?,
        )
    }

    pub fn update_cluster_auto_backup_config(
        &self,
        id: i32,
        body: &AutoBackupConfig,
    ) -> ApiResult<Option<()>> {
        self.update_cluster_auto_backup_config_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    pub fn list_cluster_diagnostics_detailed(
        &self,
        id: i32,
        query: &DiagnosticsQuery,
    ) -> ApiResult<ApiResponse<Vec<DiagnosticData>>> {
        let request = query.apply(Request::new(LIST_CLUSTER_DIAGNOSTICS).path("ID", id))?;
        self.execute_json(request)
    }

    pub fn list_cluster_diagnostics(
        &self,
        id: i32,
        query: &DiagnosticsQuery,
    ) -> ApiResult<Option<Vec<DiagnosticData>>> {
        self.list_cluster_diagnostics_detailed(id, query)
            .map(ApiResponse::into_parsed)
    }

    pub fn create_cluster_diagnostic_detailed(
        &self,
        id: i32,
    ) -> ApiResult<ApiResponse<DiagnosticData>> {
        self.execute_json(Request::new(CREATE_CLUSTER_DIAGNOSTIC).path("ID", id))
    }

    pub fn create_cluster_diagnostic(&self, id: i32) -> ApiResult<Option<DiagnosticData>> {
        self.create_cluster_diagnostic_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn get_cluster_diagnostic_detailed(
        &self,
        id: i32,
        diagnostic_id: i32,
    ) -> ApiResult<ApiResponse<DiagnosticData>> {
        self.execute_json(
            Request::new(GET_CLUSTER_DIAGNOSTIC)
                .path("ID", id)
                .path("diagnosticId", diagnostic_id),
        )
    }

    pub fn get_cluster_diagnostic(
        &self,
        id: i32,
        diagnostic_id: i32,
    ) -> ApiResult<Option<DiagnosticData>> {
        self.get_cluster_diagnostic_detailed(id, diagnostic_id)
            .map(ApiResponse::into_parsed)
    }

    pub fn get_cluster_auto_diagnostic_config_detailed(
        &self,
        id: i32,
    ) -> ApiResult<ApiResponse<AutoDiagnosticConfig>> {
        self.execute_json(Request::new(GET_CLUSTER_AUTO_DIAGNOSTIC_CONFIG).path("ID", id))
    }

    pub fn get_cluster_auto_diagnostic_config(
        &self,
        id: i32,
    ) -> ApiResult<Option<AutoDiagnosticConfig>> {
        self.get_cluster_auto_diagnostic_config_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn update_cluster_auto_diagnostic_config_detailed(
        &self,
        id: i32,
        body: &AutoDiagnosticConfig,
    ) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(UPDATE_CLUSTER_AUTO_DIAGNOSTIC_CONFIG)
                .path("ID", id)
                .json(body)?,
        )
    }

    pub fn update_cluster_auto_diagnostic_config(
        &self,
        id: i32,
        body: &AutoDiagnosticConfig,
    ) -> ApiResult<Option<()>> {
        self.update_cluster_auto_diagnostic_config_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagnosticsQuery, LIST_CLUSTER_DIAGNOSTICS};
    use crate::api::operation::Request;
    use crate::core::timestamp;

    #[test]
    fn diagnostics_query_sends_only_set_fields() {
        let query = DiagnosticsQuery {
            from: Some(timestamp::parse("2024-01-01T00:00:00Z").expect("ts")),
            per_page: Some(50),
            ..DiagnosticsQuery::default()
        };
        let request = query
            .apply(Request::new(LIST_CLUSTER_DIAGNOSTICS))
            .expect("apply");
        assert_eq!(
            request.query,
            vec![
                ("from", "2024-01-01T00:00:00Z".to_string()),
                ("perPage", "50".to_string()),
            ]
        );
    }

    #[test]
    fn empty_diagnostics_query_adds_nothing() {
        let request = DiagnosticsQuery::default()
            .apply(Request::new(LIST_CLUSTER_DIAGNOSTICS))
            .expect("apply");
        assert!(request.query.is_empty());
    }
}
