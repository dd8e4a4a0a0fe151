//! Diagnostic snapshot of the last exchange.

use cookie::Cookie;
use http::StatusCode;
use http::header::{HeaderMap, SET_COOKIE};
use serde_json::{Map, Value, json};

use crate::WireRequest;

/// What went over the wire during the last exchange of a client.
///
/// The snapshot is reset when an exchange starts and filled in step by step,
/// so after a failure it holds everything recorded up to the failure point.
/// Fields stay `None` for steps that were not reached.
#[derive(Debug, Clone, Default)]
pub struct Inspection {
    /// Request envelope that was serialized.
    pub request_body: Option<WireRequest>,
    /// Merged outbound headers.
    pub request_headers: Option<HeaderMap>,
    /// Response status code.
    pub response_status: Option<StatusCode>,
    /// Response headers.
    pub response_headers: Option<HeaderMap>,
    /// Cookies set by the response.
    pub response_cookies: Option<Vec<Cookie<'static>>>,
    /// Response content length, when the server announced one.
    pub response_content_length: Option<u64>,
    /// Raw response body.
    pub response_body: Option<String>,
}

impl Inspection {
    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.request_body.is_none()
            && self.request_headers.is_none()
            && self.response_status.is_none()
            && self.response_headers.is_none()
            && self.response_cookies.is_none()
            && self.response_content_length.is_none()
            && self.response_body.is_none()
    }

    /// Render the recorded steps as a JSON object.
    ///
    /// Only recorded keys are present.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(body) = &self.request_body {
            map.insert(
                "request_body".into(),
                serde_json::to_value(body).unwrap_or(Value::Null),
            );
        }
        if let Some(headers) = &self.request_headers {
            map.insert("request_headers".into(), headers_to_json(headers));
        }
        if let Some(status) = self.response_status {
            map.insert("response_status".into(), json!(status.as_u16()));
        }
        if let Some(headers) = &self.response_headers {
            map.insert("response_headers".into(), headers_to_json(headers));
        }
        if let Some(cookies) = &self.response_cookies {
            let cookies: Vec<String> = cookies.iter().map(|c| c.to_string()).collect();
            map.insert("response_cookies".into(), json!(cookies));
        }
        if self.response_status.is_some() {
            map.insert(
                "response_content_length".into(),
                json!(self.response_content_length),
            );
        }
        if let Some(body) = &self.response_body {
            map.insert("response_body".into(), json!(body));
        }
        Value::Object(map)
    }
}

/// Parse the `Set-Cookie` headers of a response. Malformed cookies are skipped.
pub(crate) fn parse_cookies(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_owned()).ok())
        .collect()
}

fn headers_to_json(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for name in headers.keys() {
        let values: Vec<Value> = headers
            .get_all(name)
            .iter()
            .map(|v| Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        map.insert(name.as_str().to_owned(), Value::Array(values));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Request;
    use http::HeaderValue;

    #[test]
    fn test_default_is_empty() {
        let inspection = Inspection::default();
        assert!(inspection.is_empty());
        assert_eq!(inspection.to_json(), json!({}));
    }

    #[test]
    fn test_to_json_only_recorded_keys() {
        let mut headers = HeaderMap::new();
        headers.append("x-a", HeaderValue::from_static("1"));
        headers.append("x-a", HeaderValue::from_static("2"));

        let inspection = Inspection {
            request_body: Some(Request::new("{ a }").to_wire()),
            request_headers: Some(headers),
            ..Default::default()
        };

        let value = inspection.to_json();
        assert_eq!(
            value["request_body"],
            json!({"query": "{ a }", "variables": null, "operationName": null})
        );
        assert_eq!(value["request_headers"]["x-a"], json!(["1", "2"]));
        assert!(value.get("response_status").is_none());
        assert!(value.get("response_content_length").is_none());
    }

    #[test]
    fn test_parse_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("session=abc; Path=/; HttpOnly"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark"));

        let cookies = parse_cookies(&headers);
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name(), "session");
        assert_eq!(cookies[0].value(), "abc");
        assert_eq!(cookies[0].http_only(), Some(true));
        assert_eq!(cookies[1].name(), "theme");
    }

    #[test]
    fn test_parse_cookies_none() {
        assert!(parse_cookies(&HeaderMap::new()).is_empty());
    }
}
