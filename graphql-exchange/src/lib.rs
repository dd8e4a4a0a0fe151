//! # GraphQL Exchange
//!
//! A low-level GraphQL-over-HTTP client built for request and response
//! debugging rather than speed.
//!
//! ## Features
//!
//! - **Spec-shaped requests**: `{"query", "variables", "operationName"}` with
//!   `null` for unset fields
//! - **Two error channels**: transport failures are `Err`, errors reported by
//!   the server come back next to (possibly partial) data
//! - **Inspection**: every exchange records the request body, headers and the
//!   raw response for post-hoc debugging
//! - **Additive headers**: client and request headers accumulate values
//! - **Cancellation**: a [`Context`] carries cancellation and deadlines
//!
//! A client holds the state of its last exchange and runs one exchange at a
//! time. Use one client per concurrent caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphql_exchange::{ClientConfig, Context, GraphQLClient, Request};
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Continent {
//!     code: String,
//!     name: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct ContinentData {
//!     continent: Continent,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder("https://countries.trevorblades.com/")
//!         .header("X-My-Header", "someValue")
//!         .build();
//!     let mut client = GraphQLClient::with_config(config);
//!
//!     let request = Request::new(
//!         "query continent($code: ID!) { continent(code: $code) { code name } }",
//!     )
//!     .variable("code", "AF")
//!     .operation_name("continent");
//!
//!     let ctx = Context::background().with_timeout(Duration::from_secs(10));
//!     let mut data = ContinentData::default();
//!     let errors = client.run(&ctx, &request, Some(&mut data)).await?;
//!
//!     println!("data: {:?}", data);
//!     println!("errors: {:?}", errors);
//!     println!("{:#}", client.inspection().to_json());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod context;
mod error;
mod inspection;
mod request;
mod response;
mod transport;

pub use client::GraphQLClient;
pub use config::{ClientConfig, ClientConfigBuilder, JSON_CONTENT_TYPE};
pub use context::{Context, ContextError};
pub use error::{BoxError, ExchangeError, Result};
pub use inspection::Inspection;
pub use request::{Request, WireRequest};
pub use response::{
    ErrorLocation, Exchange, GraphQLError, PathSegment, WireResponse, format_path,
};
pub use transport::{
    BodyStream, ReqwestTransport, ReqwestTransportBuilder, Transport, TransportRequest,
    TransportResponse, default_transport,
};

// Re-export common types
pub use cookie::Cookie;
pub use http::{HeaderMap, HeaderValue, StatusCode, header};
pub use serde_json::Value as JsonValue;
pub use tokio_util::sync::CancellationToken;
