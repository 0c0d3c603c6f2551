//! Purpose: Hold top-level CLI command dispatch for `wavekit`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and map each command onto one client call.
//! Invariants: Output values are produced by the entity codec, never by hand-built JSON,
//!             except for acknowledgements of bodiless operations.
use super::*;
use wavekit::api::DiagnosticsQuery;
use wavekit::core::entity::Entity;
use wavekit::core::timestamp;
use wavekit::models::{ClusterImport, QueryRequest, SnapshotCreate};

pub(super) fn dispatch_command(command: Command, client: &Client) -> Result<Value, Error> {
    match command {
        Command::SignIn { name, password } => {
            entity_json(&require(client.sign_in(&name, &password)?, "SignIn")?)
        }
        Command::Clusters(command) => dispatch_cluster(command, client),
        Command::Snapshots(SnapshotCommand::List { cluster }) => {
            list_json(&require(client.list_cluster_snapshots(cluster)?, "ListClusterSnapshots")?)
        }
        Command::Snapshots(SnapshotCommand::Create { cluster, name }) => {
            let snapshot = client.create_cluster_snapshot(cluster, &SnapshotCreate::new(name))?;
            entity_json(&require(snapshot, "CreateClusterSnapshot")?)
        }
        Command::Diagnostics(DiagnosticCommand::List {
            cluster,
            from,
            to,
            page,
            per_page,
        }) => {
            let query = DiagnosticsQuery {
                from: from.as_deref().map(|raw| parse_time("--from", raw)).transpose()?,
                to: to.as_deref().map(|raw| parse_time("--to", raw)).transpose()?,
                page,
                per_page,
            };
            let diagnostics = client.list_cluster_diagnostics(cluster, &query)?;
            list_json(&require(diagnostics, "ListClusterDiagnostic")?)
        }
        Command::Diagnostics(DiagnosticCommand::Get {
            cluster,
            diagnostic,
        }) => {
            let data = client.get_cluster_diagnostic(cluster, diagnostic)?;
            entity_json(&require(data, "GetClusterDiagnostic")?)
        }
        Command::Databases(ListCommand::List) => {
            list_json(&require(client.list_databases()?, "ListDatabases")?)
        }
        Command::MetricsStores(ListCommand::List) => {
            list_json(&require(client.list_metrics_stores()?, "ListMetricsStores")?)
        }
        Command::Tasks(ListCommand::List) => {
            list_json(&require(client.list_tasks()?, "ListTasks")?)
        }
        Command::Events(ListCommand::List) => {
            list_json(&require(client.list_events()?, "ListEvents")?)
        }
        Command::Query {
            database,
            sql,
            background_ddl,
        } => {
            let mut request = QueryRequest::new(sql);
            if background_ddl {
                request = request.with_background_ddl(true);
            }
            entity_json(&require(client.query_database(database, &request)?, "QueryDatabase")?)
        }
    }
}

fn dispatch_cluster(command: ClusterCommand, client: &Client) -> Result<Value, Error> {
    match command {
        ClusterCommand::List => list_json(&require(client.list_clusters()?, "ListClusters")?),
        ClusterCommand::Get { id } => entity_json(&require(client.get_cluster(id)?, "GetCluster")?),
        ClusterCommand::Import(args) => {
            let mut body = ClusterImport::new(
                args.name,
                args.host,
                args.sql_port,
                args.meta_port,
                args.http_port,
                args.version,
            );
            if let Some(id) = args.metrics_store_id {
                body = body.with_metrics_store_id(id);
            }
            entity_json(&require(client.import_cluster(&body)?, "ImportCluster")?)
        }
        ClusterCommand::Delete { id, cascade } => {
            let cascade = cascade.then_some(true);
            require(client.delete_cluster(id, cascade)?, "DeleteCluster")?;
            Ok(json!({ "deleted": { "cluster": id, "cascade": cascade.unwrap_or(false) } }))
        }
    }
}

/// The client raises on unexpected statuses here, so a missing payload is a bug.
fn require<T>(parsed: Option<T>, operation: &str) -> Result<T, Error> {
    parsed.ok_or_else(|| {
        Error::new(ErrorKind::Internal)
            .with_message("response had no parsed payload")
            .with_operation(operation)
    })
}

fn entity_json<E: Entity>(entity: &E) -> Result<Value, Error> {
    Ok(Value::Object(entity.encode()?))
}

fn list_json<E: Entity>(entities: &[E]) -> Result<Value, Error> {
    entities
        .iter()
        .map(entity_json)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn parse_time(flag: &str, raw: &str) -> Result<time::OffsetDateTime, Error> {
    timestamp::parse(raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("invalid {flag} timestamp"))
            .with_hint("Use RFC 3339, for example 2024-01-01T00:00:00Z.")
            .with_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{list_json, parse_time, require};
    use wavekit::api::ErrorKind;
    use wavekit::core::entity::Entity;
    use wavekit::models::Snapshot;

    #[test]
    fn list_json_keeps_unknown_keys() {
        let snapshot = Snapshot::decode_value(serde_json::json!({
            "ID": 3,
            "ClusterID": 1,
            "name": "nightly",
            "createdAt": "2024-05-01T00:00:00Z",
            "size": 42
        }))
        .unwrap();
        let value = list_json(&[snapshot]).unwrap();
        assert_eq!(value[0]["size"], 42);
        assert_eq!(value[0]["name"], "nightly");
    }

    #[test]
    fn missing_payload_is_internal() {
        let err = require::<()>(None, "ListTasks").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.operation(), Some("ListTasks"));
    }

    #[test]
    fn bad_time_flag_is_usage_error() {
        let err = parse_time("--from", "yesterday").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.message().is_some_and(|m| m.contains("--from")));
    }
}
