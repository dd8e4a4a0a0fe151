//! GraphQL client and exchange runner.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use http::StatusCode;
use http::header::HeaderMap;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, trace};

use crate::inspection::parse_cookies;
use crate::request::append_all;
use crate::transport::{BodyStream, default_transport};
use crate::{
    BoxError, ClientConfig, Context, Exchange, ExchangeError, GraphQLError, Inspection, Request,
    Result, Transport, TransportRequest, TransportResponse, WireResponse,
};

/// Low-level GraphQL client.
///
/// The client keeps an [`Inspection`] of the last exchange. [`run`](Self::run)
/// takes `&mut self`, so one client drives one exchange at a time; clone the
/// client (the transport is shared) to run exchanges concurrently.
#[derive(Clone)]
pub struct GraphQLClient {
    endpoint: String,
    headers: HeaderMap,
    immediate_close: bool,
    transport: Arc<dyn Transport>,
    inspection: Inspection,
}

impl GraphQLClient {
    /// Create a new GraphQL client with the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(endpoint))
    }

    /// Create a new GraphQL client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            endpoint: config.endpoint,
            headers: config.headers,
            immediate_close: config.immediate_close,
            transport: config.transport.unwrap_or_else(default_transport),
            inspection: Inspection::default(),
        }
    }

    /// Get the endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get mutable access to the headers sent with every request.
    ///
    /// Use this to replace a header rather than append to it.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Check if connections are closed after every exchange.
    pub fn immediate_close(&self) -> bool {
        self.immediate_close
    }

    /// Get the snapshot of the last exchange.
    pub fn inspection(&self) -> &Inspection {
        &self.inspection
    }

    /// Run one exchange, decoding `data` into `target`.
    ///
    /// Passing `None` as target skips data decoding; errors reported by the
    /// server are still returned. The `Ok` value holds those errors and is
    /// empty when the server reported none. `target` is left untouched when
    /// the exchange fails or the response carries no data.
    pub async fn run<T>(
        &mut self,
        ctx: &Context,
        request: &Request,
        target: Option<&mut T>,
    ) -> Result<Vec<GraphQLError>>
    where
        T: DeserializeOwned,
    {
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }

        self.inspection = Inspection::default();

        debug!(
            endpoint = %self.endpoint,
            operation = ?request.operation_name_ref(),
            "Running GraphQL exchange"
        );

        let wire = self.inspection.request_body.insert(request.to_wire());
        let body = serde_json::to_vec(&*wire).map_err(ExchangeError::Encoding)?;

        let headers = self.merged_headers(request);
        for (name, value) in &headers {
            trace!(header = %name, value = ?value, "Request header");
        }
        self.inspection.request_headers = Some(headers.clone());

        let outbound = TransportRequest {
            url: self.endpoint.clone(),
            headers,
            body: Bytes::from(body),
            close: self.immediate_close,
        };

        let TransportResponse {
            status,
            headers,
            content_length,
            mut body,
        } = ctx
            .run_until(self.transport.post(outbound))
            .await?
            .map_err(ExchangeError::Transport)?;

        debug!(status = %status, "Received GraphQL response");

        self.inspection.response_status = Some(status);
        self.inspection.response_cookies = Some(parse_cookies(&headers));
        self.inspection.response_headers = Some(headers);
        self.inspection.response_content_length = content_length;

        if status != StatusCode::OK {
            return Err(ExchangeError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let buf = ctx
            .run_until(drain(&mut body))
            .await?
            .map_err(ExchangeError::Read)?;
        self.inspection.response_body = Some(String::from_utf8_lossy(&buf).into_owned());

        let errors = match target {
            Some(target) => {
                let response: WireResponse<T> =
                    serde_json::from_slice(&buf).map_err(ExchangeError::Decoding)?;
                if let Some(data) = response.data {
                    *target = data;
                }
                response.errors
            }
            None => {
                serde_json::from_slice::<WireResponse<IgnoredAny>>(&buf)
                    .map_err(ExchangeError::Decoding)?
                    .errors
            }
        };

        if !errors.is_empty() {
            debug!(count = errors.len(), "GraphQL response carried errors");
        }

        Ok(errors)
    }

    /// Run one exchange and return the decoded data with the server errors.
    pub async fn run_for<T>(&mut self, ctx: &Context, request: &Request) -> Result<Exchange<T>>
    where
        T: DeserializeOwned,
    {
        let mut data: Option<T> = None;
        let errors = self.run(ctx, request, Some(&mut data)).await?;
        Ok(Exchange { data, errors })
    }

    /// Client headers followed by request headers. Neither side is modified.
    fn merged_headers(&self, request: &Request) -> HeaderMap {
        let mut headers = self.headers.clone();
        append_all(&mut headers, request.headers_ref());
        headers
    }
}

impl fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers)
            .field("immediate_close", &self.immediate_close)
            .field("inspection", &self.inspection)
            .finish_non_exhaustive()
    }
}

async fn drain(body: &mut BodyStream) -> std::result::Result<Vec<u8>, BoxError> {
    let mut buf = Vec::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf)
}
