//! Transport abstraction and the request/response envelope
//!
//! Endpoint builders produce a [`Request`], hand it to a [`Transport`] and
//! return whatever [`Response`] (or error) comes back.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// A fully built HTTP request, relative to the cluster base URL
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: BTreeMap::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Form-encoded query string, keys in sorted order. Empty when no params are set.
    pub fn query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }

        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Path with the encoded query appended
    pub fn path_and_query(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

/// Uniform response envelope: status, headers and the raw body
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    /// True for any status outside the 2xx range
    pub fn is_error(&self) -> bool {
        self.status_code > 299
    }

    /// All `Warning` header values sent by the server
    pub fn warnings(&self) -> Vec<String> {
        self.headers
            .get_all(http::header::WARNING)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    pub fn has_warnings(&self) -> bool {
        self.headers.contains_key(http::header::WARNING)
    }

    /// Body decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");

        write!(f, "[{} {}]", self.status_code, reason)?;
        if !self.body.is_empty() {
            write!(f, " {}", self.text())?;
        }
        Ok(())
    }
}

/// Performs HTTP requests on behalf of the endpoint builders.
///
/// Implementations own connection handling, TLS and authentication; the
/// client only builds requests and passes results through.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: Request) -> Result<Response>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn perform(&self, request: Request) -> Result<Response> {
        (**self).perform(request).await
    }
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn perform(&self, request: Request) -> Result<Response> {
        (**self).perform(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_query_string_empty() {
        let req = Request::new(Method::GET, "/x");
        assert_eq!(req.query_string(), "");
        assert_eq!(req.path_and_query(), "/x");
    }

    #[test]
    fn test_query_string_sorted_and_encoded() {
        let mut req = Request::new(Method::GET, "/x");
        req.params.insert("pretty".to_string(), "true".to_string());
        req.params
            .insert("filter_path".to_string(), "a.b,c d".to_string());
        req.params.insert("error_trace".to_string(), "true".to_string());

        assert_eq!(
            req.query_string(),
            "error_trace=true&filter_path=a.b%2Cc+d&pretty=true"
        );
        assert_eq!(
            req.path_and_query(),
            "/x?error_trace=true&filter_path=a.b%2Cc+d&pretty=true"
        );
    }

    #[test]
    fn test_response_is_error() {
        let mut res = Response {
            status_code: 200,
            ..Default::default()
        };
        assert!(!res.is_error());

        res.status_code = 299;
        assert!(!res.is_error());

        res.status_code = 304;
        assert!(res.is_error());

        res.status_code = 404;
        assert!(res.is_error());
    }

    #[test]
    fn test_response_warnings() {
        let mut res = Response::default();
        assert!(!res.has_warnings());
        assert!(res.warnings().is_empty());

        res.headers
            .append("warning", HeaderValue::from_static("299 first"));
        res.headers
            .append("warning", HeaderValue::from_static("299 second"));

        assert!(res.has_warnings());
        assert_eq!(res.warnings(), vec!["299 first", "299 second"]);
    }

    #[test]
    fn test_response_display() {
        let res = Response {
            status_code: 404,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"{\"status\":\"NOT_FOUND\"}"),
        };
        assert_eq!(res.to_string(), "[404 Not Found] {\"status\":\"NOT_FOUND\"}");

        let empty = Response {
            status_code: 200,
            ..Default::default()
        };
        assert_eq!(empty.to_string(), "[200 OK]");
    }
}
