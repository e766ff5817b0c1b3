//! Parameters shared by every endpoint
//!
//! Diagnostic query flags, caller headers, the opaque id and the
//! deadline/cancellation pair all behave the same across endpoints, so they
//! live in [`CommonParams`] and are exposed through [`CommonParamsExt`].

use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::transport::Request;

pub const OPAQUE_ID_HEADER: &str = "x-opaque-id";

/// Future that abandons an in-flight call when it resolves
pub type CancelSignal = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Default)]
pub struct CommonParams {
    pub pretty: bool,
    pub human: bool,
    pub error_trace: bool,
    pub filter_path: Vec<String>,
    pub headers: HeaderMap,
    pub opaque_id: Option<String>,
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelSignal>,
}

impl fmt::Debug for CommonParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonParams")
            .field("pretty", &self.pretty)
            .field("human", &self.human)
            .field("error_trace", &self.error_trace)
            .field("filter_path", &self.filter_path)
            .field("headers", &self.headers)
            .field("opaque_id", &self.opaque_id)
            .field("timeout", &self.timeout)
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

impl CommonParams {
    /// Write query flags and headers into an outgoing request.
    ///
    /// Caller headers replace the request's headers when it has none and are
    /// appended otherwise. The opaque id is applied last and always replaces.
    pub fn apply(&self, request: &mut Request) -> Result<()> {
        if self.pretty {
            request.params.insert("pretty".into(), "true".into());
        }
        if self.human {
            request.params.insert("human".into(), "true".into());
        }
        if self.error_trace {
            request.params.insert("error_trace".into(), "true".into());
        }
        if !self.filter_path.is_empty() {
            request
                .params
                .insert("filter_path".into(), self.filter_path.join(","));
        }

        if !self.headers.is_empty() {
            if request.headers.is_empty() {
                request.headers = self.headers.clone();
            } else {
                for (name, value) in self.headers.iter() {
                    request.headers.append(name.clone(), value.clone());
                }
            }
        }

        if let Some(id) = &self.opaque_id {
            let value = HeaderValue::from_str(id)
                .map_err(|_| Error::InvalidHeader(format!("{}: {:?}", OPAQUE_ID_HEADER, id)))?;
            request
                .headers
                .insert(HeaderName::from_static(OPAQUE_ID_HEADER), value);
        }

        Ok(())
    }
}

/// Builder methods available on every endpoint request
pub trait CommonParamsExt: Sized {
    fn common_params(&mut self) -> &mut CommonParams;

    /// Pretty-print the response body
    fn pretty(mut self) -> Self {
        self.common_params().pretty = true;
        self
    }

    /// Return statistics in human-readable form
    fn human(mut self) -> Self {
        self.common_params().human = true;
        self
    }

    /// Include stack traces for errors in the response body
    fn error_trace(mut self) -> Self {
        self.common_params().error_trace = true;
        self
    }

    /// Restrict the response body to the given paths
    fn filter_path<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.common_params().filter_path = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Add a header value; repeated names keep every value
    fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.common_params().headers.append(name, value);
        self
    }

    fn headers(mut self, headers: HeaderMap) -> Self {
        let params = self.common_params();
        for (name, value) in headers.iter() {
            params.headers.append(name.clone(), value.clone());
        }
        self
    }

    /// Set `X-Opaque-Id` for request correlation in server logs
    fn opaque_id(mut self, id: impl Into<String>) -> Self {
        self.common_params().opaque_id = Some(id.into());
        self
    }

    fn timeout(mut self, timeout: Duration) -> Self {
        self.common_params().timeout = Some(timeout);
        self
    }

    /// Abandon the call as soon as `signal` resolves
    fn cancel_on<F>(mut self, signal: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.common_params().cancel = Some(Box::pin(signal));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn request() -> Request {
        Request::new(Method::GET, "/")
    }

    #[test]
    fn test_defaults_emit_nothing() {
        let params = CommonParams::default();
        let mut req = request();
        params.apply(&mut req).unwrap();

        assert!(req.params.is_empty());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_flags_become_params() {
        let params = CommonParams {
            pretty: true,
            human: true,
            error_trace: true,
            filter_path: vec!["*.users".to_string(), "*.hosts".to_string()],
            ..Default::default()
        };
        let mut req = request();
        params.apply(&mut req).unwrap();

        assert_eq!(req.params.get("pretty").map(String::as_str), Some("true"));
        assert_eq!(req.params.get("human").map(String::as_str), Some("true"));
        assert_eq!(req.params.get("error_trace").map(String::as_str), Some("true"));
        assert_eq!(
            req.params.get("filter_path").map(String::as_str),
            Some("*.users,*.hosts")
        );
    }

    #[test]
    fn test_headers_replace_when_request_has_none() {
        let mut params = CommonParams::default();
        params
            .headers
            .append("x-custom", HeaderValue::from_static("a"));
        params
            .headers
            .append("x-custom", HeaderValue::from_static("b"));

        let mut req = request();
        params.apply(&mut req).unwrap();

        let values: Vec<_> = req.headers.get_all("x-custom").iter().collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_headers_append_to_existing() {
        let mut params = CommonParams::default();
        params
            .headers
            .insert("accept", HeaderValue::from_static("text/plain"));

        let mut req = request();
        req.headers
            .insert("accept", HeaderValue::from_static("application/json"));
        params.apply(&mut req).unwrap();

        let values: Vec<_> = req.headers.get_all("accept").iter().collect();
        assert_eq!(values, vec!["application/json", "text/plain"]);
    }

    #[test]
    fn test_opaque_id_replaces_caller_header() {
        let mut params = CommonParams::default();
        params
            .headers
            .insert(OPAQUE_ID_HEADER, HeaderValue::from_static("from-header"));
        params.opaque_id = Some("from-option".to_string());

        let mut req = request();
        params.apply(&mut req).unwrap();

        let values: Vec<_> = req.headers.get_all(OPAQUE_ID_HEADER).iter().collect();
        assert_eq!(values, vec!["from-option"]);
    }

    #[test]
    fn test_invalid_opaque_id() {
        let params = CommonParams {
            opaque_id: Some("bad\nvalue".to_string()),
            ..Default::default()
        };
        let mut req = request();

        assert!(matches!(
            params.apply(&mut req),
            Err(Error::InvalidHeader(_))
        ));
    }
}
