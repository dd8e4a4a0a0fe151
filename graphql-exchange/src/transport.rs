//! HTTP transport used to carry exchanges.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use http::StatusCode;
use http::header::{self, HeaderMap, HeaderValue};

use crate::BoxError;

/// Stream of response body chunks.
pub type BodyStream = BoxStream<'static, std::result::Result<Bytes, BoxError>>;

/// Outbound POST handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Target endpoint.
    pub url: String,
    /// Headers to send.
    pub headers: HeaderMap,
    /// Serialized request body.
    pub body: Bytes,
    /// Ask for the connection to be closed once the exchange is done.
    pub close: bool,
}

/// Response returned by a [`Transport`]. The body is read lazily.
pub struct TransportResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Content length, when known.
    pub content_length: Option<u64>,
    /// Response body.
    pub body: BodyStream,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Performs the HTTP POST of an exchange.
///
/// Errors are handed back to the caller of
/// [`GraphQLClient::run`](crate::GraphQLClient::run) unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response head with its body stream.
    async fn post(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, BoxError>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    /// Create a transport builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Get the underlying `reqwest` client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, BoxError> {
        let mut headers = request.headers;
        if request.close {
            headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
        }

        let response = self
            .inner
            .post(&request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let content_length = response.content_length();
        let body = response.bytes_stream().map_err(BoxError::from).boxed();

        Ok(TransportResponse {
            status,
            headers,
            content_length,
            body,
        })
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    gzip: bool,
}

impl ReqwestTransportBuilder {
    /// Set a timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable gzip response decompression.
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Build the transport.
    pub fn build(self) -> std::result::Result<ReqwestTransport, reqwest::Error> {
        let mut builder = reqwest::Client::builder().gzip(self.gzip);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(ReqwestTransport::with_client(builder.build()?))
    }
}

/// Shared transport used by clients that were not given one.
pub fn default_transport() -> Arc<dyn Transport> {
    static DEFAULT: OnceLock<Arc<ReqwestTransport>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(ReqwestTransport::new())).clone()
}
