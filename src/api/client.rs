//! Purpose: Blocking HTTP client shared by every Console/Wavekit operation.
//! Exports: `Client`.
//! Role: Builds URLs from operation descriptors, sends them over a `ureq` agent, and maps
//!       responses to `ApiResponse` by status.
//! Invariants: Success statuses are decoded through the entity codec; decode failures are
//!             `ErrorKind::Decode`, never transport or status errors.
//! Invariants: Other statuses yield `parsed: None` unless `raise_on_unexpected_status` is set,
//!             in which case they fail with `ErrorKind::UnexpectedStatus` carrying the body.
//! Invariants: Clones share one agent (and its connection pool).
#![allow(clippy::result_large_err)]

use super::operation::{Body, Operation, Request};
use super::response::ApiResponse;
use crate::core::decode::DecodeError;
use crate::core::error::{Error, ErrorKind};
use crate::json::parse::decode_body;
use serde::de::DeserializeOwned;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use ureq::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use ureq::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use ureq::rustls::{DigitallySignedStruct, Error as TlsError, SignatureScheme};
use url::Url;

pub type ApiResult<T> = Result<T, Error>;

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    settings: Settings,
    agent: ureq::Agent,
}

#[derive(Clone)]
struct Settings {
    base_url: Url,
    token: Option<String>,
    raise_on_unexpected_status: bool,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    tls: Option<Arc<ureq::rustls::ClientConfig>>,
}

#[derive(Debug)]
struct AcceptAllServerCertVerifier;

impl ServerCertVerifier for AcceptAllServerCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        ureq::rustls::crypto::aws_lc_rs::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let settings = &self.inner.settings;
        f.debug_struct("Client")
            .field("base_url", &settings.base_url.as_str())
            .field("token", &settings.token.as_ref().map(|_| "<redacted>"))
            .field(
                "raise_on_unexpected_status",
                &settings.raise_on_unexpected_status,
            )
            .field("timeout", &settings.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// `base_url` may carry a path prefix such as `/api/v1`.
    pub fn new(base_url: impl AsRef<str>) -> ApiResult<Self> {
        let settings = Settings {
            base_url: normalize_base_url(base_url.as_ref())?,
            token: None,
            raise_on_unexpected_status: false,
            timeout: None,
            headers: Vec::new(),
            tls: None,
        };
        let agent = build_agent(&settings);
        Ok(Self {
            inner: Arc::new(ClientInner { settings, agent }),
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.configure(false, |settings| settings.token = Some(token))
    }

    pub fn with_raise_on_unexpected_status(self, raise: bool) -> Self {
        self.configure(false, |settings| settings.raise_on_unexpected_status = raise)
    }

    /// Overall per-request timeout enforced by the transport.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.configure(true, |settings| settings.timeout = Some(timeout))
    }

    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let header = (name.into(), value.into());
        self.configure(false, |settings| settings.headers.push(header))
    }

    pub fn with_tls_ca_file(self, path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let cert_bytes = std::fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!(
                    "failed to read TLS CA/certificate file {}",
                    path.display()
                ))
                .with_source(err)
        })?;
        let mut cert_reader = Cursor::new(cert_bytes);
        let certs = rustls_pemfile::certs(&mut cert_reader)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!(
                        "failed to parse TLS CA/certificate file {}",
                        path.display()
                    ))
                    .with_source(err)
            })?;
        if certs.is_empty() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!(
                    "TLS CA/certificate file {} contains no certificates",
                    path.display()
                ))
                .with_hint("Pass a PEM file with at least one CERTIFICATE block."));
        }

        let _ = ureq::rustls::crypto::aws_lc_rs::default_provider().install_default();
        let mut root_store = ureq::rustls::RootCertStore::empty();
        let (added, _) = root_store.add_parsable_certificates(certs);
        if added == 0 {
            return Err(Error::new(ErrorKind::Usage).with_message(format!(
                "TLS CA/certificate file {} contains no parsable certificates",
                path.display()
            )));
        }

        let tls_config = ureq::rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();
        Ok(self.configure(true, |settings| settings.tls = Some(Arc::new(tls_config))))
    }

    pub fn with_tls_skip_verify(self) -> Self {
        let _ = ureq::rustls::crypto::aws_lc_rs::default_provider().install_default();
        let tls_config = ureq::rustls::ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAllServerCertVerifier))
            .with_no_client_auth();
        self.configure(true, |settings| settings.tls = Some(Arc::new(tls_config)))
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.settings.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.inner.settings.token.as_deref()
    }

    pub fn raise_on_unexpected_status(&self) -> bool {
        self.inner.settings.raise_on_unexpected_status
    }

    pub(crate) fn execute_json<T>(&self, request: Request) -> ApiResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.execute(request, decode_body::<T>)
    }

    /// For operations documented without a response body.
    pub(crate) fn execute_empty(&self, request: Request) -> ApiResult<ApiResponse<()>> {
        self.execute(request, |_| Ok(()))
    }

    fn execute<T, F>(&self, request: Request, parse: F) -> ApiResult<ApiResponse<T>>
    where
        F: FnOnce(&[u8]) -> Result<T, DecodeError>,
    {
        let operation = request.operation;
        let url = self.build_url(&request)?;
        debug!(
            operation = operation.id,
            method = %operation.method,
            url = %url,
            "sending request"
        );
        let started = Instant::now();
        let prepared = self.prepare(operation, &url);
        let sent = match &request.body {
            Body::Empty => prepared.call(),
            Body::Json(text) => prepared
                .set("Content-Type", "application/json")
                .send_string(text),
            Body::Form(fields) => {
                let pairs = fields
                    .iter()
                    .map(|(name, value)| (*name, value.as_str()))
                    .collect::<Vec<_>>();
                prepared.send_form(&pairs)
            }
        };
        let response = match sent {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(err)) => {
                return Err(Error::new(ErrorKind::Transport)
                    .with_message(format!("request to {url} failed"))
                    .with_operation(operation.id)
                    .with_source(err));
            }
        };

        let status = response.status();
        let headers = response_headers(&response);
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|err| {
                Error::new(ErrorKind::Transport)
                    .with_message("failed to read response body")
                    .with_operation(operation.id)
                    .with_status(status)
                    .with_source(err)
            })?;
        debug!(
            operation = operation.id,
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );
        interpret(
            &operation,
            status,
            headers,
            body,
            self.inner.settings.raise_on_unexpected_status,
            parse,
        )
    }

    fn prepare(&self, operation: Operation, url: &Url) -> ureq::Request {
        let settings = &self.inner.settings;
        let mut request = self
            .inner
            .agent
            .request(operation.method.as_str(), url.as_str())
            .set("Accept", "application/json");
        for (name, value) in &settings.headers {
            request = request.set(name, value);
        }
        if let Some(token) = &settings.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        request
    }

    fn build_url(&self, request: &Request) -> ApiResult<Url> {
        let segments = request.operation.segments(&request.path_params)?;
        let mut url = self.inner.settings.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::new(ErrorKind::Usage).with_message("base url cannot be a base")
            })?;
            path.pop_if_empty();
            path.extend(segments.iter().map(String::as_str));
        }
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn configure(mut self, rebuild_agent: bool, edit: impl FnOnce(&mut Settings)) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            edit(&mut inner.settings);
            if rebuild_agent {
                inner.agent = build_agent(&inner.settings);
            }
            return self;
        }
        let mut settings = self.inner.settings.clone();
        edit(&mut settings);
        let agent = if rebuild_agent {
            build_agent(&settings)
        } else {
            self.inner.agent.clone()
        };
        self.inner = Arc::new(ClientInner { settings, agent });
        self
    }
}

fn build_agent(settings: &Settings) -> ureq::Agent {
    let mut builder = ureq::AgentBuilder::new();
    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(tls) = &settings.tls {
        builder = builder.tls_config(Arc::clone(tls));
    }
    builder.build()
}

fn normalize_base_url(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("invalid base url `{raw}`"))
            .with_hint("Use an absolute url such as http://localhost:8020/api/v1.")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(
            Error::new(ErrorKind::Usage).with_message("base url must use http or https scheme")
        );
    }
    if url.cannot_be_a_base() {
        return Err(Error::new(ErrorKind::Usage).with_message("base url cannot be a base"));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn response_headers(response: &ureq::Response) -> Vec<(String, String)> {
    response
        .headers_names()
        .into_iter()
        .filter_map(|name| {
            let value = response.header(&name)?.to_string();
            Some((name, value))
        })
        .collect()
}

/// Maps a received response to the caller-facing result.
fn interpret<T, F>(
    operation: &Operation,
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    raise_on_unexpected_status: bool,
    parse: F,
) -> ApiResult<ApiResponse<T>>
where
    F: FnOnce(&[u8]) -> Result<T, DecodeError>,
{
    if operation.is_success(status) {
        let parsed = parse(&body).map_err(|err| {
            Error::from(err)
                .with_operation(operation.id)
                .with_status(status)
        })?;
        return Ok(ApiResponse {
            status,
            headers,
            body,
            parsed: Some(parsed),
        });
    }

    warn!(
        operation = operation.id,
        status,
        expected = ?operation.success,
        "unexpected response status"
    );
    if raise_on_unexpected_status {
        return Err(Error::new(ErrorKind::UnexpectedStatus)
            .with_message(format!(
                "unexpected status {status}: {}",
                String::from_utf8_lossy(&body)
            ))
            .with_operation(operation.id)
            .with_status(status)
            .with_body(body));
    }
    Ok(ApiResponse {
        status,
        headers,
        body,
        parsed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::{Client, interpret, normalize_base_url};
    use crate::api::operation::{Method, Operation, Request};
    use crate::core::decode::DecodeErrorKind;
    use crate::core::error::ErrorKind;
    use crate::json::parse::decode_body;
    use crate::models::Cluster;
    use std::time::Duration;

    const GET_CLUSTER: Operation =
        Operation::new("getCluster", Method::Get, "/clusters/{ID}", &[200]);

    #[test]
    fn base_url_keeps_path_prefix() {
        let client = Client::new("http://localhost:8020/api/v1").expect("client");
        let url = client
            .build_url(&Request::new(GET_CLUSTER).path("ID", 3))
            .expect("url");
        assert_eq!(url.as_str(), "http://localhost:8020/api/v1/clusters/3");
    }

    #[test]
    fn trailing_slash_does_not_double() {
        let client = Client::new("http://localhost:8020/api/v1/").expect("client");
        let url = client
            .build_url(
                &Request::new(GET_CLUSTER)
                    .path("ID", 3)
                    .query("cascade", true),
            )
            .expect("url");
        assert_eq!(url.as_str(), "http://localhost:8020/api/v1/clusters/3?cascade=true");
    }

    #[test]
    fn path_params_are_escaped() {
        let client = Client::new("http://localhost:8020").expect("client");
        let url = client
            .build_url(&Request::new(GET_CLUSTER).path("ID", "a/b"))
            .expect("url");
        assert_eq!(url.as_str(), "http://localhost:8020/clusters/a%2Fb");
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        let err = normalize_base_url("ftp://example.com").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = normalize_base_url("localhost:8020").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn builders_do_not_leak_into_clones() {
        let base = Client::new("http://localhost:8020").expect("client");
        let shared = base.clone();
        let configured = base
            .with_token("t0ken")
            .with_raise_on_unexpected_status(true)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(configured.token(), Some("t0ken"));
        assert!(configured.raise_on_unexpected_status());
        assert_eq!(shared.token(), None);
        assert!(!shared.raise_on_unexpected_status());
        assert!(!format!("{configured:?}").contains("t0ken"));
    }

    #[test]
    fn unexpected_status_without_raise_is_unparsed() {
        let response = interpret(
            &GET_CLUSTER,
            500,
            Vec::new(),
            b"boom".to_vec(),
            false,
            decode_body::<Cluster>,
        )
        .expect("response");
        assert_eq!(response.status, 500);
        assert_eq!(response.parsed, None);
        assert_eq!(response.body, b"boom");
    }

    #[test]
    fn unexpected_status_with_raise_carries_status_and_body() {
        let err = interpret(
            &GET_CLUSTER,
            500,
            Vec::new(),
            b"boom".to_vec(),
            true,
            decode_body::<Cluster>,
        )
        .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some(&b"boom"[..]));
        assert_eq!(err.operation(), Some("getCluster"));
    }

    #[test]
    fn success_with_bad_body_is_decode_error() {
        let err = interpret(
            &GET_CLUSTER,
            200,
            Vec::new(),
            br#"{"ID": 1}"#.to_vec(),
            false,
            decode_body::<Cluster>,
        )
        .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.status(), Some(200));
        let decode = err.decode_error().expect("decode");
        assert_eq!(decode.kind(), DecodeErrorKind::MissingField);
    }
}
