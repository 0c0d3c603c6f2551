#![allow(clippy::result_large_err)]

use super::client::{ApiResult, Client};
use super::operation::{Method, Operation, Request};
use super::response::ApiResponse;
use crate::models::{MetricSeries, MetricsStore, MetricsStoreImport};

pub const LIST_METRICS_STORES: Operation =
    Operation::new("ListMetricsStores", Method::Get, "/metrics-stores", &[200]);
pub const IMPORT_METRICS_STORE: Operation =
    Operation::new("CreateMetricsStore", Method::Post, "/metrics-stores", &[201]);
pub const GET_METRICS_STORE: Operation =
    Operation::new("GetMetricsStore", Method::Get, "/metrics-stores/{ID}", &[200]);
pub const UPDATE_METRICS_STORE: Operation =
    Operation::new("UpdateMetricsStore", Method::Put, "/metrics-stores/{ID}", &[200]);
pub const DELETE_METRICS_STORE: Operation =
    Operation::new("DeleteMetricsStore", Method::Delete, "/metrics-stores/{ID}", &[204]);
pub const GET_MATERIALIZED_VIEW_THROUGHPUT: Operation = Operation::new(
    "GetMaterializedViewThroughput",
    Method::Get,
    "/metrics/{clusterID}/materialized-view-throughput",
    &[200],
);

impl Client {
    pub fn list_metrics_stores_detailed(&self) -> ApiResult<ApiResponse<Vec<MetricsStore>>> {
        self.execute_json(Request::new(LIST_METRICS_STORES))
    }

    pub fn list_metrics_stores(&self) -> ApiResult<Option<Vec<MetricsStore>>> {
        self.list_metrics_stores_detailed()
            .map(ApiResponse::into_parsed)
    }

    pub fn import_metrics_store_detailed(
        &self,
        body: &MetricsStoreImport,
    ) -> ApiResult<ApiResponse<MetricsStore>> {
        self.execute_json(Request::new(IMPORT_METRICS_STORE).json(body)?)
    }

    pub fn import_metrics_store(&self, body: &MetricsStoreImport) -> ApiResult<Option<MetricsStore>> {
        self.import_metrics_store_detailed(body)
            .map(ApiResponse::into_parsed)
    }

    pub fn get_metrics_store_detailed(&self, id: i32) -> ApiResult<ApiResponse<MetricsStore>> {
        self.execute_json(Request::new(GET_METRICS_STORE).path("ID", id))
    }

    pub fn get_metrics_store(&self, id: i32) -> ApiResult<Option<MetricsStore>> {
        self.get_metrics_store_detailed(id)
            .map(ApiResponse::into_parsed)
    }

    pub fn update_metrics_store_detailed(
        &self,
        id: i32,
        body: &MetricsStoreImport,
    ) -> ApiResult<ApiResponse<MetricsStore>> {
        self.execute_json(Request::new(UPDATE_METRICS_STORE).path("ID", id).json(body)?)
    }

    pub fn update_metrics_store(
        &self,
        id: i32,
        body: &MetricsStoreImport,
    ) -> ApiResult<Option<MetricsStore>> {
        self.update_metrics_store_detailed(id, body)
            .map(ApiResponse::into_parsed)
    }

    /// `force` detaches the store from clusters still referencing it.
    pub fn delete_metrics_store_detailed(
        &self,
        id: i32,
        force: Option<bool>,
    ) -> ApiResult<ApiResponse<()>> {
        self.execute_empty(
            Request::new(DELETE_METRICS_STORE)
                .path("ID", id)
                .query_opt("force", force),
        )
    }

    pub fn delete_metrics_store(&self, id: i32, force: Option<bool>) -> ApiResult<Option<()>> {
        self.delete_metrics_store_detailed(id, force)
            .map(ApiResponse::into_parsed)
    }

    pub fn get_materialized_view_throughput_detailed(
        &self,
        cluster_id: i32,
    ) -> ApiResult<ApiResponse<Vec<MetricSeries>>> {
        self.execute_json(Request::new(GET_MATERIALIZED_VIEW_THROUGHPUT).path("clusterID", cluster_id))
    }

    pub fn get_materialized_view_throughput(
        &self,
        cluster_id: i32,
    ) -> ApiResult<Option<Vec<MetricSeries>>> {
        self.get_materialized_view_throughput_detailed(cluster_id)
            .map(ApiResponse::into_parsed)
    }
}
