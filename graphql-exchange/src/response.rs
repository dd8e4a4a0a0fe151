//! GraphQL response envelope and error records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// JSON body of a GraphQL response.
///
/// `data` is decoded straight into the caller's type; use
/// [`serde::de::IgnoredAny`] to skip it.
#[derive(Debug, Deserialize)]
pub struct WireResponse<T> {
    /// The data returned by the operation.
    pub data: Option<T>,
    /// Errors returned by the server.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQLError>,
}

/// Outcome of [`GraphQLClient::run_for`](crate::GraphQLClient::run_for).
#[derive(Debug, Clone)]
pub struct Exchange<T> {
    /// Decoded data, possibly partial when `errors` is non-empty.
    pub data: Option<T>,
    /// Errors reported by the server.
    pub errors: Vec<GraphQLError>,
}

impl<T> Exchange<T> {
    /// Check if the server reported errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A GraphQL error reported by the server.
///
/// ```json
/// {
///   "message": "Name for character with ID 1002 could not be fetched.",
///   "locations": [{ "line": 6, "column": 7 }],
///   "path": ["hero", "heroFriends", 1, "name"],
///   "extensions": { "code": "CAN_NOT_FETCH_BY_ID" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Locations in the query where the error occurred.
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<ErrorLocation>,
    /// Path to the field that caused the error.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: Vec<PathSegment>,
    /// Implementation-defined metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub extensions: Map<String, Value>,
}

impl GraphQLError {
    /// Get `extensions.code` when it is a string.
    pub fn code(&self) -> Option<&str> {
        self.extensions.get("code").and_then(Value::as_str)
    }
}

impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "graphql error: {}, on path [{}]",
            self.message,
            format_path(&self.path)
        )
    }
}

impl std::error::Error for GraphQLError {}

/// Location in the GraphQL query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

/// Path segment in a GraphQL error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Field name.
    Field(String),
    /// List index.
    Index(u64),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{}", name),
            Self::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// Format a path as a space separated string.
pub fn format_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
