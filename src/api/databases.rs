#![allow(clippy::result_large_err)]

use super::client::{ApiResult, Client};
use super::operation::{Method, Operation, Request};
use super::response::ApiResponse;
use crate::models::{
    Database, DatabaseConnectInfo, DdlProgress, QueryRequest, QueryResponse,
    TestDatabaseConnectionPayload, TestDatabaseConnectionResult,
};

pub const LIST_DATABASES: Operation =
    Operation::new("ListDatabases", Method::Get, "/databases", &[200]);
pub const IMPORT_DATABASE: Operation =
    Operation::new("CreateDatabase", Method::Post, "/databases", &[201]);
pub const TEST_DATABASE_CONNECTION: Operation = Operation::new(
    "TestDatabaseConnection",
    Method::Post,
    "/databases/test-connection",
    &[200],
);
pub const GET_DATABASE: Operation =
    Operation::new("GetDatabase", Method::Get, "/databases/{ID}", &[200]);
pub const UPDATE_DATABASE: Operation =
    Operation::new("UpdateDatabase", Method::Put, "/databases/{ID}", &[200]);
pub const DELETE_DATABASE: Operation =
    Operation::new("DeleteDatabase", Method::Delete, "/databases/{ID}", &[204]);
pub const QUERY_DATABASE: Operation =
    Operation::new("QueryDatabase", Method::Post, "/databases/{ID}/query", &[200]);
pub const LIST_DDL_PROGRESS: Operation = Operation::new(
    "GetDDLProgress",
    Method::Get,
    "/databases/{ID}/ddl-progress",
    &[200],
);
pub const CANCEL_DDL_PROGRESS: Operation = Operation::new(
    "CancelDDLProgress",
    Method::Post,
    "/databases/{ID}/ddl-progress/{ddlID}/cancel",
    &[200, 204],
);

impl Client {
    pub fn list_databases_detailed(&self) -> ApiResult<ApiResponse<Vec<Database>>> {
        self.execute_json(Request::new(LIST_DATABASES))
    }

    pub fn list_databases(&self) -> ApiResult<Option<Vec<Database>>> {
        self.list_databases_detailed().map(ApiResponse::into_parsed)
    }

    pub fn import_database_detailed(
        &self,
        body: &DatabaseConnectInfo,
    ) -> ApiResult<ApiResponse<Database>> {
        self.execute_json(Request::new(IMPORT_DATABASE).json(body)?)
    }

    pub fn import_database(&self, body: &DatabaseConnectInfo) -> ApiResult<Option<Database>> {
        self.import_database_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    pub fn test_database_connection_detailed(
        &self,
        body: &TestDatabaseConnectionPayload,
    ) -> ApiResult<ApiResponse<TestDatabaseConnectionResult>> {
        self.execute_json(Request::new(TEST_DATABASE_CONNECTION).json(body)?)
    }

    pub fn test_database_connection(
        &self,
        body: &TestDatabaseConnectionPayload,
    ) -> ApiResult<Option<TestDatabaseConnectionResult>> {
        self.test_database_connection_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    /// Includes schemas and relations when the cluster is reachable.
    pub fn get_database_detailed(&self, id: i32) -> ApiResult<ApiResponse<Database>> {
        self.execute_json(Request::new(GET_DATABASE).path("ID", id))
    }

    pub fn get_database(&self, id: i32) -> ApiResult<Option<Database>> {
        self.get_database_detailed(id).map(ApiResponse::into_parsed)
    }

    pub fn update_database_detailed(
        &self,
        id: i32,
        body: &DatabaseConnectInfo,
    ) -> ApiResult<ApiResponse<Database>> {
        self.execute_json(Request::new(UPDATE_DATABASE).path("ID", id).json(body)?)
    }

    pub fn update_database(&self, id: i32, body: &DatabaseConnectInfo) -> ApiResult<Option<Database>> {
        self.update_database_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    pub fn delete_database_detailed(&self, id: i32) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(Request::new(DELETE_DATABASE).path("ID", id))
    }

    pub fn delete_database(&self, id: i32) -> ApiResult<Option<()>> {
        self.delete_database_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn query_database_detailed(
        &self,
        id: i32,
        body: &QueryRequest,
    ) -> ApiResult<ApiResponse<QueryResponse>> {
        self.execute_json(Request::new(QUERY_DATABASE).path("ID", id).json(body)?)
    }

    pub fn query_database(&self, id: i32, body: &QueryRequest) -> ApiResult<Option<QueryResponse>> {
        self.query_database_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    pub fn list_ddl_progress_detailed(&self, id: i32) -> ApiResult<ApiResponse<Vec<DdlProgress>>> {
        self.execute_json(Request::new(LIST_DDL_PROGRESS).path("ID", id))
    }

    pub fn list_ddl_progress(&self, id: i32) -> ApiResult<Option<Vec<DdlProgress>>> {
        self.list_ddl_progress_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn cancel_ddl_progress_detailed(&self, id: i32, ddl_id: i64) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(CANCEL_DDL_PROGRESS)
                .path("ID", id)
                .path("ddlID", ddl_id),
        )
    }

    pub fn cancel_ddl_progress(&self, id: i32, ddl_id: i64) -> ApiResult<Option<()>> {
        self.cancel_ddl_progress_detailed(id, ddl_id)
            .map(ApiResponse::into_parsed)
    }
}
