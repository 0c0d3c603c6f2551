//! Purpose: Database connection entities, catalog metadata and SQL query bodies.
//! Exports: `Database`, `DatabaseConnectInfo`, `TestDatabaseConnectionPayload`,
//!          `TestDatabaseConnectionResult`, `Schema`, `Relation`, `RelationType`, `Column`,
//!          `QueryRequest`, `QueryResponse`, `QueryResponseRowsItem`, `DdlProgress`.
//! Invariants: Catalog lists (`schemas`, `relations`, `columns`) decode element by element
//!             and keep server order.
use crate::core::entity::{WireObject, declare_entities};
use crate::core::timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    #[serde(rename = "OrgID")]
    pub org_id: i32,
    pub username: String,
    pub database: String,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<Schema>>,
}

/// Body for importing or updating a database connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConnectInfo {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    pub username: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestDatabaseConnectionPayload {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "clusterID")]
    pub cluster_id: i32,
    pub username: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestDatabaseConnectionResult {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub success: bool,
    pub result: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    pub relations: Vec<Relation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub columns: Vec<Column>,
    /// IDs of the relations this one reads from.
    pub dependencies: Vec<i32>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum RelationType {
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "source")]
    Source,
    #[serde(rename = "sink")]
    Sink,
    #[serde(rename = "materializedView")]
    MaterializedView,
    #[serde(rename = "system table")]
    SystemTable,
}

impl RelationType {
    pub const ALL: [RelationType; 5] = [
        RelationType::Table,
        RelationType::Source,
        RelationType::Sink,
        RelationType::MaterializedView,
        RelationType::SystemTable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::Table => "table",
            RelationType::Source => "source",
            RelationType::Sink => "sink",
            RelationType::MaterializedView => "materializedView",
            RelationType::SystemTable => "system table",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    /// SQL data type name as reported by the cluster.
    #[serde(rename = "type")]
    pub column_type: String,
    pub is_primary_key: bool,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub query: String,
    /// Run DDL in background mode (server default: false).
    #[serde(
        rename = "backgroundDDL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_ddl: Option<bool>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            additional_properties: WireObject::new(),
            query: query.into(),
            background_ddl: None,
        }
    }

    pub fn with_background_ddl(mut self, enabled: bool) -> Self {
        self.background_ddl = Some(enabled);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub columns: Vec<Column>,
    pub rows: Vec<QueryResponseRowsItem>,
    pub rows_affected: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One result row keyed by column name; every key lives in the bag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponseRowsItem {
    #[serde(flatten)]
    pub additional_properties: WireObject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdlProgress {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i64,
    pub statement: String,
    pub progress: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub initialized_at: Option<OffsetDateTime>,
}

declare_entities!(
    Database,
    DatabaseConnectInfo,
    TestDatabaseConnectionPayload,
    TestDatabaseConnectionResult,
    Schema,
    Relation,
    Column,
    QueryRequest,
    QueryResponse,
    QueryResponseRowsItem,
    DdlProgress,
);
