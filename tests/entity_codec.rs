//! Purpose: Public-API tests for the entity codec across resource modules.
//! Exports: None (integration test module).
//! Role: Pin wire compatibility for the documented decode/encode scenarios.
//! Invariants: Every fixture is literal wire JSON as the services emit it.

use serde_json::{Value, json};
use wavekit::core::decode::DecodeErrorKind;
use wavekit::core::entity::Entity;
use wavekit::models::{
    Cluster, DiagnosticData, Event, EventSpecType, MetricsBackend, MetricsStore, Relation,
    RelationType, Task, TaskSpec, TaskSpecType, TaskStatus,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn cluster_wire() -> Value {
    json!({
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
    })
}

#[test]
fn cluster_round_trip_is_key_for_key_equal() -> TestResult {
    let wire = cluster_wire();
    let cluster = Cluster::decode_value(wire.clone())?;
    assert_eq!(cluster.id, 1);
    assert_eq!(cluster.org_id, 7);
    assert_eq!(cluster.name, "test");
    assert_eq!(cluster.host, "localhost");
    assert_eq!(cluster.sql_port, 5432);
    assert_eq!(cluster.meta_port, 9191);
    assert_eq!(cluster.http_port, 8080);
    assert_eq!(cluster.version, "v1.0.0");
    assert_eq!(cluster.created_at.unix_timestamp(), 1_704_067_200);
    assert_eq!(cluster.metrics_store_id, Some(1));
    assert!(cluster.additional_properties.is_empty());

    assert_eq!(Value::Object(cluster.encode()?), wire);
    Ok(())
}

#[test]
fn cluster_without_optional_omits_key() -> TestResult {
    let mut wire = cluster_wire();
    if let Some(object) = wire.as_object_mut() {
        object.remove("metricsStoreID");
    }
    let cluster = Cluster::decode_value(wire.clone())?;
    assert_eq!(cluster.metrics_store_id, None);

    let encoded = cluster.encode()?;
    assert!(!encoded.contains_key("metricsStoreID"));
    assert_eq!(Value::Object(encoded), wire);
    Ok(())
}

#[test]
fn unknown_keys_survive_and_are_editable() -> TestResult {
    let mut wire = cluster_wire();
    wire["labels"] = json!({"team": "storage"});
    let mut cluster = Cluster::decode_value(wire.clone())?;
    assert_eq!(cluster.additional_keys(), vec!["labels"]);

    cluster.set_additional("region", "us-east-1");
    cluster.remove_additional("labels");
    let encoded = Value::Object(cluster.encode()?);
    assert_eq!(encoded["region"], "us-east-1");
    assert!(encoded.get("labels").is_none());
    assert_eq!(encoded["name"], "test");
    Ok(())
}

#[test]
fn diagnostic_data_has_empty_bag() -> TestResult {
    let data = DiagnosticData::decode_value(json!({
        "ID": 2,
        "createdAt": "2024-01-01T00:00:00Z",
        "content": "diag"
    }))?;
    assert_eq!(data.id, 2);
    assert_eq!(data.content, "diag");
    assert!(data.additional_properties.is_empty());
    Ok(())
}

#[test]
fn task_spec_auto_backup_populates_only_its_payload() -> TestResult {
    let spec: TaskSpec = serde_json::from_value(json!({
        "type": "auto-backup",
        "autoBackup": {"clusterID": 5, "retentionDuration": "7d"}
    }))?;
    assert_eq!(spec.spec_type(), TaskSpecType::AutoBackup);
    let backup = spec.auto_backup().ok_or("auto-backup payload missing")?;
    assert_eq!(backup.cluster_id, 5);
    assert_eq!(backup.retention_duration, "7d");
    assert!(spec.auto_diagnostic().is_none());
    assert!(spec.delete_cluster_diagnostic().is_none());
    assert!(spec.delete_opaque_key().is_none());
    assert!(spec.delete_snapshot().is_none());
    Ok(())
}

#[test]
fn task_decodes_nested_spec_and_status() -> TestResult {
    let wire = json!({
        "ID": 12,
        "attributes": {"orgID": 3, "timeout": "1h", "cronjob": {"cronExpression": "0 0 * * *"}},
        "spec": {
            "type": "delete-snapshot",
            "deleteSnapshot": {"clusterID": 5, "snapshotID": 77}
        },
        "status": "paused",
        "createdAt": "2024-03-01T10:00:00+02:00",
        "updatedAt": "2024-03-01T10:00:00+02:00"
    });
    let task = Task::decode_value(wire.clone())?;
    assert_eq!(task.status, TaskStatus::Paused);
    assert_eq!(task.attributes.org_id, Some(3));
    let delete = task.spec.delete_snapshot().ok_or("payload missing")?;
    assert_eq!(delete.snapshot_id, 77);

    // The +02:00 offset is written back unchanged.
    assert_eq!(Value::Object(task.encode()?), wire);
    Ok(())
}

#[test]
fn task_with_unknown_status_fails_as_enum_error() {
    let err = Task::decode_value(json!({
        "ID": 1,
        "attributes": {},
        "spec": {"type": "delete-opaque-key", "deleteOpaqueKey": {"keyID": 1}},
        "status": "running",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
    .expect_err("unknown status");
    assert_eq!(err.kind(), DecodeErrorKind::UnknownEnumValue);
    assert_eq!(err.value(), Some("running"));
}

#[test]
fn event_spec_reports_task_id_for_either_kind() -> TestResult {
    let event = Event::decode_value(json!({
        "ID": 4,
        "spec": {"type": "TaskError", "taskError": {"taskID": 12, "error": "timeout"}},
        "createdAt": "2024-01-01T00:00:00Z"
    }))?;
    assert_eq!(event.spec.spec_type(), EventSpecType::TaskError);
    assert_eq!(event.spec.task_id(), 12);
    assert_eq!(
        event.spec.task_error().map(|payload| payload.error.as_str()),
        Some("timeout")
    );
    Ok(())
}

#[test]
fn missing_required_field_names_the_wire_key() {
    let mut wire = cluster_wire();
    if let Some(object) = wire.as_object_mut() {
        object.remove("OrgID");
    }
    let err = Cluster::decode_value(wire).expect_err("OrgID is required");
    assert_eq!(err.kind(), DecodeErrorKind::MissingField);
    assert_eq!(err.field(), Some("OrgID"));
}

#[test]
fn malformed_timestamp_is_not_defaulted() {
    let mut wire = cluster_wire();
    wire["updatedAt"] = json!("2024-13-45");
    let err = Cluster::decode_value(wire).expect_err("bad timestamp");
    assert_eq!(err.kind(), DecodeErrorKind::MalformedTimestamp);
    assert_eq!(err.value(), Some("2024-13-45"));
}

#[test]
fn wrong_json_type_is_invalid_type() {
    let mut wire = cluster_wire();
    wire["sqlPort"] = json!("5432");
    let err = Cluster::decode_value(wire).expect_err("string port");
    assert_eq!(err.kind(), DecodeErrorKind::InvalidType);
}

#[test]
fn decode_list_rejects_non_array() {
    let err = Cluster::decode_list(cluster_wire()).expect_err("object is not a list");
    assert_eq!(err.kind(), DecodeErrorKind::InvalidType);
}

#[test]
fn relation_type_keeps_spaced_token() -> TestResult {
    let relation = Relation::decode_value(json!({
        "ID": 1,
        "name": "pg_class",
        "type": "system table",
        "columns": [],
        "dependencies": []
    }))?;
    assert_eq!(relation.relation_type, RelationType::SystemTable);
    assert_eq!(Value::Object(relation.encode()?)["type"], "system table");
    Ok(())
}

#[test]
fn metrics_store_backend_follows_payload() -> TestResult {
    let store = MetricsStore::decode_value(json!({
        "ID": 1,
        "name": "vm",
        "createdAt": "2024-01-01T00:00:00Z",
        "spec": {"victoriametrics": {"endpoint": "http://vm:8428"}}
    }))?;
    let spec = store.spec.as_ref().ok_or("spec missing")?;
    match spec.backend() {
        Some(MetricsBackend::VictoriaMetrics(vm)) => assert_eq!(vm.endpoint, "http://vm:8428"),
        other => return Err(format!("unexpected backend {other:?}").into()),
    }
    Ok(())
}
