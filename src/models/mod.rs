//! Purpose: Wire models for the Console and Wavekit APIs.
//! Exports: every entity type, grouped by resource.
//! Role: Declarative field schemas only; all codec behavior comes from `core::entity`.
pub mod auth;
pub mod cluster;
pub mod database;
pub mod diagnostic;
pub mod event;
pub mod metrics;
pub mod snapshot;
pub mod task;

pub use auth::{Credentials, CredentialsTokenType, RefreshTokenRequest, User};
pub use cluster::{
    Cluster, ClusterCreate, ClusterImport, RisectlCommand, RisectlCommandResult,
    TestClusterConnectionPayload, TestClusterConnectionResult, UpdateClusterRequest,
};
pub use database::{
    Column, Database, DatabaseConnectInfo, DdlProgress, QueryRequest, QueryResponse,
    QueryResponseRowsItem, Relation, RelationType, Schema, TestDatabaseConnectionPayload,
    TestDatabaseConnectionResult,
};
pub use diagnostic::{AutoDiagnosticConfig, DiagnosticData};
pub use event::{Event, EventSpec, EventSpecKind, EventSpecType, EventTaskCompleted, EventTaskError};
pub use metrics::{
    MetricSeries, MetricSeriesMetric, MetricsBackend, MetricsStore, MetricsStoreDownloadReq,
    MetricsStoreImport, MetricsStoreLabelMatcher, MetricsStoreLabelMatcherOp, MetricsStorePrometheus,
    MetricsStoreSpec, MetricsStoreVictoriaMetrics,
};
pub use snapshot::{AutoBackupConfig, Snapshot, SnapshotCreate};
pub use task::{
    Task, TaskAttributes, TaskCronjob, TaskRetryPolicy, TaskSpec, TaskSpecAutoBackup,
    TaskSpecAutoDiagnostic, TaskSpecDeleteClusterDiagnostic, TaskSpecDeleteOpaqueKey,
    TaskSpecDeleteSnapshot, TaskSpecKind, TaskSpecType, TaskStatus,
};
