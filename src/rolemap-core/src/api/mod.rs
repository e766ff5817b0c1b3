//! Role-mapping endpoints of the security REST API
//!
//! Every endpoint is a builder: configure it, then `build()` to inspect the
//! [`Request`] or `send()` to run it through a [`Transport`].

mod bulk_upsert_role_mappings;
mod create_role_mapping;
mod get_role_mapping;
mod patch_role_mapping;

pub use bulk_upsert_role_mappings::BulkUpsertRoleMappings;
pub use create_role_mapping::CreateRoleMapping;
pub use get_role_mapping::GetRoleMapping;
pub use patch_role_mapping::PatchRoleMapping;

use bytes::Bytes;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::params::CancelSignal;
use crate::transport::{Request, Response, Transport};

pub const ROLES_MAPPING_PATH: &str = "/_plugins/_security/api/rolesmapping/";

/// Path for a single mapping, or the collection when `name` is empty
pub(crate) fn role_mapping_path(name: &str) -> String {
    let segment = urlencoding::encode(name);
    let mut path = String::with_capacity(ROLES_MAPPING_PATH.len() + segment.len());
    path.push_str(ROLES_MAPPING_PATH);
    path.push_str(&segment);
    path
}

/// Hand a request to the transport, bounded by the optional deadline and
/// cancellation signal. The transport's result is returned as-is.
#[tracing::instrument(
    name = "rolemap.request",
    skip_all,
    fields(method = %request.method, path = %request.path)
)]
pub(crate) async fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    request: Request,
    timeout: Option<Duration>,
    cancel: Option<CancelSignal>,
) -> Result<Response> {
    tracing::debug!("Performing request");

    let call = async move {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, transport.perform(request)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(limit)),
            },
            None => transport.perform(request).await,
        }
    };

    let result = match cancel {
        Some(signal) => {
            tokio::select! {
                biased;
                _ = signal => Err(Error::Cancelled),
                result = call => result,
            }
        }
        None => call.await,
    };

    match &result {
        Ok(response) => tracing::debug!(status = response.status_code, "Request completed"),
        Err(e) => tracing::debug!(error = %e, "Request failed"),
    }

    result
}

/// The security plugin's role-mapping endpoints, bound to a transport
pub struct Security<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Security<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// `PUT /_plugins/_security/api/rolesmapping/{name}`
    pub fn create_role_mapping(
        &self,
        name: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> CreateRoleMapping<'a, T> {
        CreateRoleMapping::new(self.transport, name, body)
    }

    /// `GET /_plugins/_security/api/rolesmapping/{name}`
    pub fn get_role_mapping(&self, name: impl Into<String>) -> GetRoleMapping<'a, T> {
        GetRoleMapping::new(self.transport).name(name)
    }

    /// `GET /_plugins/_security/api/rolesmapping/`
    pub fn get_role_mappings(&self) -> GetRoleMapping<'a, T> {
        GetRoleMapping::new(self.transport)
    }

    /// `PATCH /_plugins/_security/api/rolesmapping/{name}`
    pub fn patch_role_mapping(
        &self,
        name: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> PatchRoleMapping<'a, T> {
        PatchRoleMapping::new(self.transport, name, body)
    }

    /// `PATCH /_plugins/_security/api/rolesmapping/`
    pub fn bulk_upsert_role_mappings(&self, body: impl Into<Bytes>) -> BulkUpsertRoleMappings<'a, T> {
        BulkUpsertRoleMappings::new(self.transport, body)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_role_mapping_path() {
        assert_eq!(
            role_mapping_path("all_access"),
            "/_plugins/_security/api/rolesmapping/all_access"
        );
        assert_eq!(role_mapping_path(""), "/_plugins/_security/api/rolesmapping/");
        assert_eq!(
            role_mapping_path("team a/ops"),
            "/_plugins/_security/api/rolesmapping/team%20a%2Fops"
        );
    }

    #[tokio::test]
    async fn test_dispatch_passes_response_through() {
        let transport = RecordingTransport {
            status: 404,
            ..Default::default()
        };
        let req = Request::new(http::Method::GET, "/x");

        let res = dispatch(&transport, req, None, None).await.unwrap();
        assert_eq!(res.status_code, 404);
        assert!(res.is_error());
    }

    #[tokio::test]
    async fn test_dispatch_propagates_transport_error() {
        let transport = RecordingTransport {
            fail: true,
            ..Default::default()
        };
        let req = Request::new(http::Method::GET, "/x");

        let err = dispatch(&transport, req, None, None).await.unwrap_err();
        match err {
            Error::Transport(inner) => assert_eq!(inner.to_string(), "connection refused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_timeout() {
        let transport = RecordingTransport {
            status: 200,
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let req = Request::new(http::Method::GET, "/x");

        let err = dispatch(&transport, req, Some(Duration::from_millis(20)), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_dispatch_cancelled() {
        let transport = RecordingTransport {
            status: 200,
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let req = Request::new(http::Method::GET, "/x");
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let signal: CancelSignal = Box::pin(async move {
            let _ = rx.await;
        });

        let handle = tokio::spawn(async move { dispatch(&transport, req, None, Some(signal)).await });
        tx.send(()).unwrap();

        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_dispatch_signal_never_fires() {
        let transport = RecordingTransport::ok();
        let req = Request::new(http::Method::GET, "/x");
        let signal: CancelSignal = Box::pin(std::future::pending());

        let res = dispatch(&transport, req, None, Some(signal)).await.unwrap();
        assert_eq!(res.status_code, 200);
    }
}
