//! Purpose: `wavekit` CLI entry point.
//! Role: Binary crate root; parses args, builds the API client, emits JSON on stdout.
//! Invariants: Results are entities encoded through the codec, so unknown keys are printed.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use wavekit::api::{Client, Error, ErrorKind, to_exit_code};

mod command_dispatch;

const DEFAULT_URL: &str = "http://localhost:8020/api/v1";

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(exit_code);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint(clap_error_hint(&err)));
            }
        },
    };

    init_tracing();

    let client = build_client(&cli.connection).map_err(add_usage_hint)?;
    let value = command_dispatch::dispatch_command(cli.command, &client)
        .map_err(add_transport_hint)
        .map_err(add_status_hint)?;
    emit_json(value);
    Ok(0)
}

#[derive(Parser)]
#[command(
    name = "wavekit",
    version,
    about = "Command-line client for the Console and Wavekit APIs",
    after_help = r#"EXAMPLES
  $ wavekit sign-in --name root --password root
  $ wavekit --token "$TOKEN" clusters list
  $ wavekit diagnostics list 1 --from 2024-01-01T00:00:00Z --per-page 20
  $ wavekit query 1 "select 1""#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    #[arg(
        long,
        global = true,
        env = "WAVEKIT_URL",
        default_value = DEFAULT_URL,
        help = "API base URL, including any path prefix",
        value_hint = ValueHint::Url
    )]
    url: String,
    #[arg(
        long,
        global = true,
        env = "WAVEKIT_TOKEN",
        hide_env_values = true,
        help = "Bearer token sent as the Authorization header"
    )]
    token: Option<String>,
    #[arg(
        long,
        global = true,
        help = "PEM file with extra trusted CA certificates",
        value_hint = ValueHint::FilePath
    )]
    ca_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Skip TLS certificate verification (development only)"
    )]
    insecure: bool,
    #[arg(
        long,
        global = true,
        value_parser = parse_duration,
        help = "Request timeout (e.g. 500ms, 10s, 1m)"
    )]
    timeout: Option<Duration>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Exchange a user name and password for tokens")]
    SignIn {
        #[arg(long)]
        name: String,
        #[arg(long, env = "WAVEKIT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    #[command(subcommand, about = "Inspect and manage clusters")]
    Clusters(ClusterCommand),
    #[command(subcommand, about = "List and take cluster snapshots")]
    Snapshots(SnapshotCommand),
    #[command(subcommand, about = "Read cluster diagnostics")]
    Diagnostics(DiagnosticCommand),
    #[command(subcommand, about = "List databases")]
    Databases(ListCommand),
    #[command(subcommand, name = "metrics-stores", about = "List metrics stores")]
    MetricsStores(ListCommand),
    #[command(subcommand, about = "List background tasks")]
    Tasks(ListCommand),
    #[command(subcommand, about = "List task events")]
    Events(ListCommand),
    #[command(about = "Run SQL against a database")]
    Query {
        database: i32,
        sql: String,
        #[arg(long, help = "Run DDL in the background and return immediately")]
        background_ddl: bool,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    List,
}

#[derive(Subcommand)]
enum ClusterCommand {
    List,
    Get {
        id: i32,
    },
    #[command(about = "Register an already running cluster")]
    Import(ClusterImportArgs),
    Delete {
        id: i32,
        #[arg(long, help = "Also delete the cluster's snapshots and diagnostics")]
        cascade: bool,
    },
}

#[derive(Args)]
struct ClusterImportArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    host: String,
    #[arg(long, default_value_t = 4566)]
    sql_port: i32,
    #[arg(long, default_value_t = 5690)]
    meta_port: i32,
    #[arg(long, default_value_t = 5691)]
    http_port: i32,
    #[arg(long)]
    version: String,
    #[arg(long)]
    metrics_store_id: Option<i32>,
}

#[derive(Subcommand)]
enum SnapshotCommand {
    List { cluster: i32 },
    Create { cluster: i32, name: String },
}

#[derive(Subcommand)]
enum DiagnosticCommand {
    List {
        cluster: i32,
        #[arg(long, help = "RFC 3339 lower bound")]
        from: Option<String>,
        #[arg(long, help = "RFC 3339 upper bound")]
        to: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    Get {
        cluster: i32,
        diagnostic: i32,
    },
}

fn build_client(args: &ConnectionArgs) -> Result<Client, Error> {
    let mut client = Client::new(&args.url)?.with_raise_on_unexpected_status(true);
    if let Some(token) = &args.token {
        client = client.with_token(token.clone());
    }
    if let Some(timeout) = args.timeout {
        client = client.with_timeout(timeout);
    }
    if let Some(path) = &args.ca_file {
        client = client.with_tls_ca_file(path)?;
    }
    if args.insecure {
        client = client.with_tls_skip_verify();
    }
    Ok(client)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_duration(input: &str) -> Result<Duration, Error> {
    let trimmed = input.trim();
    let invalid = || {
        Error::new(ErrorKind::Usage)
            .with_message("invalid duration")
            .with_hint("Use a number plus ms|s|m|h (e.g. 10s).")
    };
    let split = trimmed.char_indices().find(|(_, ch)| !ch.is_ascii_digit());
    let (num_str, unit) = match split {
        Some((idx, _)) => trimmed.split_at(idx),
        None => ("", ""),
    };
    if num_str.is_empty() || unit.is_empty() {
        return Err(invalid());
    }
    let value: u64 = num_str.parse().map_err(|_| invalid())?;
    let millis = match unit {
        "ms" => value,
        "s" => value.saturating_mul(1_000),
        "m" => value.saturating_mul(60_000),
        "h" => value.saturating_mul(3_600_000),
        _ => return Err(invalid()),
    };
    Ok(Duration::from_millis(millis))
}

fn add_usage_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Usage || err.hint().is_some() {
        return err;
    }
    err.with_hint("Check --url, --ca-file, and the WAVEKIT_URL environment variable.")
}

fn add_transport_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Transport || err.hint().is_some() {
        return err;
    }
    err.with_hint("Could not reach the server. Check --url and that the service is running.")
}

fn add_status_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::UnexpectedStatus || err.hint().is_some() {
        return err;
    }
    match err.status() {
        Some(401) => err.with_hint("Sign in and pass the access token with --token."),
        Some(403) => err.with_hint("The token is not allowed to perform this operation."),
        Some(404) => err.with_hint("Check the resource id."),
        _ => err,
    }
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Transport => "transport error".to_string(),
        ErrorKind::UnexpectedStatus => "unexpected status".to_string(),
        ErrorKind::Decode => "response could not be decoded".to_string(),
    }
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(operation) = err.operation() {
        lines.push(format!("operation: {operation}"));
    }
    if let Some(status) = err.status() {
        lines.push(format!("status: {status}"));
    }
    if let Some(body) = err.body().filter(|body| !body.is_empty()) {
        lines.push(format!("body: {}", String::from_utf8_lossy(body)));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(operation) = err.operation() {
        inner.insert("operation".to_string(), json!(operation));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    if let Some(body) = err.body().filter(|body| !body.is_empty()) {
        let body = serde_json::from_slice::<Value>(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));
        inner.insert("body".to_string(), body);
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);
    let Some(usage) = usage else {
        return "Try `wavekit --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "wavekit") else {
        return "Try `wavekit --help`.".to_string();
    };
    let parts: Vec<&str> = tokens
        .iter()
        .skip(pos + 1)
        .take_while(|token| {
            !(token.starts_with('-') || token.starts_with('<') || token.starts_with('['))
        })
        .copied()
        .collect();
    if parts.is_empty() {
        return "Try `wavekit --help`.".to_string();
    }
    format!("Try `wavekit {} --help`.", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, error_json, parse_duration};
    use clap::Parser;
    use std::time::Duration;
    use wavekit::api::{Error, ErrorKind};

    #[test]
    fn parse_duration_accepts_units() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn parse_duration_rejects_bad_input() {
        for input in ["", "10", "s", "10d", "-1s"] {
            let err = parse_duration(input).expect_err("should reject");
            assert_eq!(err.kind(), ErrorKind::Usage, "input {input:?}");
            assert!(err.hint().is_some());
        }
    }

    #[test]
    fn error_json_carries_status_and_body() {
        let err = Error::new(ErrorKind::UnexpectedStatus)
            .with_message("unexpected status 500")
            .with_operation("GetCluster")
            .with_status(500)
            .with_body(br#"{"msg":"boom"}"#.to_vec());
        let value = error_json(&err);
        let inner = &value["error"];
        assert_eq!(inner["kind"], "UnexpectedStatus");
        assert_eq!(inner["operation"], "GetCluster");
        assert_eq!(inner["status"], 500);
        assert_eq!(inner["body"]["msg"], "boom");
        assert!(inner.get("causes").is_none());
    }

    #[test]
    fn error_json_keeps_non_json_body_as_text() {
        let err = Error::new(ErrorKind::UnexpectedStatus)
            .with_status(502)
            .with_body(b"bad gateway".to_vec());
        let value = error_json(&err);
        assert_eq!(value["error"]["body"], "bad gateway");
        assert_eq!(value["error"]["message"], "unexpected status");
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wavekit",
            "clusters",
            "delete",
            "7",
            "--cascade",
            "--url",
            "http://example.test/api/v1",
            "--timeout",
            "5s",
        ])
        .unwrap();
        assert_eq!(cli.connection.url, "http://example.test/api/v1");
        assert_eq!(cli.connection.timeout, Some(Duration::from_secs(5)));
        assert!(matches!(
            cli.command,
            Command::Clusters(super::ClusterCommand::Delete { id: 7, cascade: true })
        ));
    }
}
