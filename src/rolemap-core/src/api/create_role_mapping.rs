use bytes::Bytes;
use http::Method;

use super::{dispatch, role_mapping_path};
use crate::error::Result;
use crate::params::{CommonParams, CommonParamsExt};
use crate::transport::{Request, Response, Transport};

/// Creates or replaces a role mapping.
///
/// Requires the `manage_security` cluster privilege on the target cluster.
pub struct CreateRoleMapping<'a, T: ?Sized> {
    transport: &'a T,
    name: String,
    body: Bytes,
    params: CommonParams,
}

impl<'a, T: Transport + ?Sized> CreateRoleMapping<'a, T> {
    pub fn new(transport: &'a T, name: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            transport,
            name: name.into(),
            body: body.into(),
            params: CommonParams::default(),
        }
    }

    pub fn build(&self) -> Result<Request> {
        let mut request =
            Request::new(Method::PUT, role_mapping_path(&self.name)).with_body(self.body.clone());
        self.params.apply(&mut request)?;
        Ok(request)
    }

    pub async fn send(self) -> Result<Response> {
        let request = self.build()?;
        dispatch(self.transport, request, self.params.timeout, self.params.cancel).await
    }
}

impl<T: ?Sized> CommonParamsExt for CreateRoleMapping<'_, T> {
    fn common_params(&mut self) -> &mut CommonParams {
        &mut self.params
    }
}
