//! Report delivery over HTTP.
//!
//! [`ReportTransport`] builds the authenticated request and classifies the
//! response. The HTTP exchange itself goes through the [`HttpPost`] trait so
//! the sampling loop can run against a stub; [`BlockingReportClient`] is the
//! reqwest-backed implementation used by the binary.

use std::sync::Arc;
use std::time::Duration;

/// Substrings that mark a response body as an application-level success.
pub const SUCCESS_MARKERS: [&str; 3] = ["Stored", "Data", "Success"];

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one HTTP POST and returns whatever the server answered.
///
/// Implementations return `Ok` for every response that carried a status
/// code, including 4xx and 5xx. `Err` means no response was obtained.
pub trait HttpPost {
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpPost + ?Sized> HttpPost for Arc<T> {
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, headers, body)
    }
}

/// Transport error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The HTTP client or its runtime could not be created
    Init(String),
    /// Connection refused, reset or DNS failure
    Connect(String),
    /// No response within the request timeout
    Timeout(String),
    /// Any other failure to complete the request
    Request(String),
    /// The response body could not be read
    Body(String),
}

impl TransportError {
    /// Short name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Init(_) => "init",
            TransportError::Connect(_) => "connect",
            TransportError::Timeout(_) => "timeout",
            TransportError::Request(_) => "request",
            TransportError::Body(_) => "body",
        }
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Init(msg) => write!(f, "HTTP client initialization failed: {msg}"),
            TransportError::Connect(msg) => write!(f, "Connection failed: {msg}"),
            TransportError::Timeout(msg) => write!(f, "Request timed out: {msg}"),
            TransportError::Request(msg) => write!(f, "Request failed: {msg}"),
            TransportError::Body(msg) => write!(f, "Could not read response body: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// How the endpoint reacted to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The body contains one of [`SUCCESS_MARKERS`]
    Accepted,
    /// Non-empty body without a success marker
    Unrecognized,
    /// Success status with an empty body
    Empty,
    /// Status 400 or above, whatever the body says
    HttpError { status: u16 },
}

/// A classified response to one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub body: String,
    pub outcome: DeliveryOutcome,
}

impl Delivery {
    /// Classify a raw HTTP response.
    pub fn classify(response: HttpResponse) -> Self {
        let outcome = if response.status >= 400 {
            DeliveryOutcome::HttpError {
                status: response.status,
            }
        } else if SUCCESS_MARKERS.iter().any(|m| response.body.contains(m)) {
            DeliveryOutcome::Accepted
        } else if response.body.is_empty() {
            DeliveryOutcome::Empty
        } else {
            DeliveryOutcome::Unrecognized
        };

        Self {
            status: response.status,
            body: response.body,
            outcome,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == DeliveryOutcome::Accepted
    }

    pub fn is_warning(&self) -> bool {
        self.outcome == DeliveryOutcome::Unrecognized
    }

    pub fn is_http_error(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::HttpError { .. })
    }
}

/// Headers attached to every report.
pub fn report_headers(token: &str) -> Vec<(String, String)> {
    vec![
        ("Authorization".to_string(), format!("Bearer {token}")),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

/// Sends encoded reports and classifies the responses.
pub struct ReportTransport<H> {
    http: H,
}

impl<H: HttpPost> ReportTransport<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// POST `body` to `url` with a bearer token.
    ///
    /// HTTP error statuses come back as a [`Delivery`] with
    /// [`DeliveryOutcome::HttpError`]; only a missing response is an `Err`.
    pub fn send(&self, url: &str, token: &str, body: &str) -> Result<Delivery, TransportError> {
        tracing::debug!("Sending report ({} bytes) to {}", body.len(), url);

        let response = self.http.post(url, &report_headers(token), body)?;
        Ok(Delivery::classify(response))
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

/// Async HTTP client for report delivery.
pub struct ReportClient {
    client: reqwest::Client,
}

impl ReportClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("focus-telemetry-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Init(e.to_string()))?;

        Ok(Self { client })
    }

    /// POST `body` with the given headers.
    pub async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.post(url).body(body.to_string());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(TransportError::from_reqwest)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Blocking report client for use from the sampling loop.
pub struct BlockingReportClient {
    inner: ReportClient,
    runtime: tokio::runtime::Runtime,
}

impl BlockingReportClient {
    /// Create a new blocking client.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TransportError::Init(format!("Failed to create runtime: {e}")))?;

        Ok(Self {
            inner: ReportClient::new(timeout)?,
            runtime,
        })
    }
}

impl HttpPost for BlockingReportClient {
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        self.runtime.block_on(self.inner.post(url, headers, body))
    }
}
