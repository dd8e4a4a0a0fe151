//! GraphQL client configuration.

use std::fmt;
use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::Transport;
use crate::request::{append_all, append_header};

/// Content type sent and accepted by default.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// GraphQL client configuration.
///
/// Headers start with `Content-Type` and `Accept` set to
/// [`JSON_CONTENT_TYPE`]. Builder options apply in call order and header
/// options append to what is already there.
#[derive(Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint URL. Not validated here.
    pub endpoint: String,
    /// Headers sent with every request.
    pub headers: HeaderMap,
    /// Close the connection after every exchange.
    pub immediate_close: bool,
    /// Transport to use instead of the shared default.
    pub transport: Option<Arc<dyn Transport>>,
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder(endpoint: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(endpoint),
        }
    }

    /// Create configuration for a specific endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        Self {
            endpoint: endpoint.into(),
            headers,
            immediate_close: false,
            transport: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers)
            .field("immediate_close", &self.immediate_close)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Builder for GraphQL client configuration.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Append a header sent with every request.
    ///
    /// Invalid header names or values are dropped.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        append_header(&mut self.config.headers, name.as_ref(), value.as_ref());
        self
    }

    /// Append every value of `headers` to the headers sent with every request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        append_all(&mut self.config.headers, &headers);
        self
    }

    /// Append a bearer `Authorization` header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    /// Close the connection after every exchange so the socket is not kept
    /// alive.
    pub fn immediate_close(mut self, enabled: bool) -> Self {
        self.config.immediate_close = enabled;
        self
    }

    /// Use a custom transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
