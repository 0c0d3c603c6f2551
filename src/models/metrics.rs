//! Purpose: Metrics store entities and metric query payloads.
//! Exports: `MetricsStore`, `MetricsStoreImport`, `MetricsStoreSpec`, `MetricsBackend`,
//!          `MetricsStorePrometheus`, `MetricsStoreVictoriaMetrics`, `MetricsStoreLabelMatcher`,
//!          `MetricsStoreLabelMatcherOp`, `MetricsStoreDownloadReq`, `MetricSeries`,
//!          `MetricSeriesMetric`.
//! Invariants: `MetricsStoreSpec` has no tag on the wire; each backend payload is optional
//!             and both are encoded when both are set.
use crate::core::entity::{WireObject, declare_entities};
use crate::core::timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsStore {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<MetricsStoreSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_labels: Option<Vec<MetricsStoreLabelMatcher>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsStoreImport {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub name: String,
    pub spec: MetricsStoreSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_labels: Option<Vec<MetricsStoreLabelMatcher>>,
}

impl MetricsStoreImport {
    pub fn new(name: impl Into<String>, spec: MetricsStoreSpec) -> Self {
        Self {
            additional_properties: WireObject::new(),
            name: name.into(),
            spec,
            default_labels: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsStoreSpec {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<MetricsStorePrometheus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victoriametrics: Option<MetricsStoreVictoriaMetrics>,
}

/// Borrowed view of the configured backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricsBackend<'a> {
    Prometheus(&'a MetricsStorePrometheus),
    VictoriaMetrics(&'a MetricsStoreVictoriaMetrics),
}

impl MetricsStoreSpec {
    pub fn from_prometheus(endpoint: impl Into<String>) -> Self {
        Self {
            prometheus: Some(MetricsStorePrometheus::new(endpoint)),
            ..Self::default()
        }
    }

    pub fn from_victoriametrics(endpoint: impl Into<String>) -> Self {
        Self {
            victoriametrics: Some(MetricsStoreVictoriaMetrics::new(endpoint)),
            ..Self::default()
        }
    }

    /// Prometheus wins when both payloads are set.
    pub fn backend(&self) -> Option<MetricsBackend<'_>> {
        if let Some(prometheus) = &self.prometheus {
            return Some(MetricsBackend::Prometheus(prometheus));
        }
        self.victoriametrics
            .as_ref()
            .map(MetricsBackend::VictoriaMetrics)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsStorePrometheus {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub endpoint: String,
}

impl MetricsStorePrometheus {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            additional_properties: WireObject::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsStoreVictoriaMetrics {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub endpoint: String,
}

impl MetricsStoreVictoriaMetrics {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            additional_properties: WireObject::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsStoreLabelMatcher {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub key: String,
    pub value: String,
    pub op: MetricsStoreLabelMatcherOp,
}

/// PromQL label matching operators: `=`, `!=`, `=~`, `!~`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricsStoreLabelMatcherOp {
    Eq,
    Neq,
    Re,
    Nre,
}

impl MetricsStoreLabelMatcherOp {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricsStoreLabelMatcherOp::Eq => "EQ",
            MetricsStoreLabelMatcherOp::Neq => "NEQ",
            MetricsStoreLabelMatcherOp::Re => "RE",
            MetricsStoreLabelMatcherOp::Nre => "NRE",
        }
    }

    pub fn promql(self) -> &'static str {
        match self {
            MetricsStoreLabelMatcherOp::Eq => "=",
            MetricsStoreLabelMatcherOp::Neq => "!=",
            MetricsStoreLabelMatcherOp::Re => "=~",
            MetricsStoreLabelMatcherOp::Nre => "!~",
        }
    }
}

impl fmt::Display for MetricsStoreLabelMatcherOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MetricsStoreLabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:?}", self.key, self.op.promql(), self.value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsStoreDownloadReq {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    /// Resolution step, e.g. `1m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub start: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub end: Option<OffsetDateTime>,
    /// In (0, 1]; shrinks each query window when the backend runs out of memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    #[serde(flatten)]
    pub additional_properties: WireObject,
    pub metric: MetricSeriesMetric,
    /// `[timestamp, value]` samples as sent by the backend.
    pub values: Vec<Vec<Value>>,
}

/// Label set of a series; every label lives in the bag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeriesMetric {
    #[serde(flatten)]
    pub additional_properties: WireObject,
}

declare_entities!(
    MetricsStore,
    MetricsStoreImport,
    MetricsStoreSpec,
    MetricsStorePrometheus,
    MetricsStoreVictoriaMetrics,
    MetricsStoreLabelMatcher,
    MetricsStoreDownloadReq,
    MetricSeries,
    MetricSeriesMetric,
);
