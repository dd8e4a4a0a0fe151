//! GraphQL request and its wire envelope.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single GraphQL operation to send.
///
/// The query text is never parsed. Variables and the operation name are sent
/// as JSON `null` unless set.
///
/// ```
/// use graphql_exchange::Request;
/// use serde_json::json;
///
/// let query = "query continent($code: String!) { continent(code: $code) { name } }";
/// let request = Request::new(query)
///     .variable("code", json!("AF"))
///     .operation_name("continent")
///     .header("X-Trace", "abc");
///
/// assert_eq!(request.operation_name_ref(), Some("continent"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    query: String,
    variables: Option<Map<String, Value>>,
    operation_name: Option<String>,
    headers: HeaderMap,
}

impl Request {
    /// Create a new request for the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
            headers: HeaderMap::new(),
        }
    }

    /// Set the variables.
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Set a single variable.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the operation name. An empty name leaves it unset.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.operation_name = Some(name);
        }
        self
    }

    /// Append a header sent with this request only.
    ///
    /// Invalid header names or values are dropped.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        append_header(&mut self.headers, name.as_ref(), value.as_ref());
        self
    }

    /// Append every value of `headers` to the request headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        append_all(&mut self.headers, &headers);
        self
    }

    /// Replace the variables in place.
    pub fn set_variables(&mut self, variables: Map<String, Value>) {
        self.variables = Some(variables);
    }

    /// Get the query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get the variables, if set.
    pub fn variables_ref(&self) -> Option<&Map<String, Value>> {
        self.variables.as_ref()
    }

    /// Get the operation name, if set.
    pub fn operation_name_ref(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Get the request-scoped headers.
    pub fn headers_ref(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get mutable access to the request-scoped headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Build the wire envelope for this request.
    pub fn to_wire(&self) -> WireRequest {
        WireRequest {
            query: self.query.clone(),
            variables: self.variables.clone(),
            operation_name: self.operation_name.clone(),
        }
    }
}

/// JSON body of a GraphQL request.
///
/// Absent variables and operation name serialize as `null`, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRequest {
    /// The query text.
    pub query: String,
    /// Variables for the operation.
    pub variables: Option<Map<String, Value>>,
    /// Operation name (for documents with multiple operations).
    pub operation_name: Option<String>,
}

/// Append `name: value`, dropping pairs that are not valid HTTP headers.
pub(crate) fn append_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
        (Ok(name), Ok(value)) => {
            headers.append(name, value);
        }
        _ => {
            tracing::warn!(header = %name, "Dropping invalid header");
        }
    }
}

/// Append every value of `from` to `into`, keeping existing values.
pub(crate) fn append_all(into: &mut HeaderMap, from: &HeaderMap) {
    for (name, value) in from {
        into.append(name.clone(), value.clone());
    }
}
