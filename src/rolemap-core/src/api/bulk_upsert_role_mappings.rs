use bytes::Bytes;
use http::Method;

use super::{dispatch, ROLES_MAPPING_PATH};
use crate::error::Result;
use crate::params::{CommonParams, CommonParamsExt};
use crate::transport::{Request, Response, Transport};

/// Creates, updates or removes several role mappings in one JSON Patch call.
///
/// Patch paths address mappings by name (`/{name}`), so the request always
/// targets the collection.
pub struct BulkUpsertRoleMappings<'a, T: ?Sized> {
    transport: &'a T,
    body: Bytes,
    params: CommonParams,
}

impl<'a, T: Transport + ?Sized> BulkUpsertRoleMappings<'a, T> {
    pub fn new(transport: &'a T, body: impl Into<Bytes>) -> Self {
        Self {
            transport,
            body: body.into(),
            params: CommonParams::default(),
        }
    }

    pub fn build(&self) -> Result<Request> {
        let mut request =
            Request::new(Method::PATCH, ROLES_MAPPING_PATH).with_body(self.body.clone());
        self.params.apply(&mut request)?;
        Ok(request)
    }

    pub async fn send(self) -> Result<Response> {
        let request = self.build()?;
        dispatch(self.transport, request, self.params.timeout, self.params.cancel).await
    }
}

impl<T: ?Sized> CommonParamsExt for BulkUpsertRoleMappings<'_, T> {
    fn common_params(&mut self) -> &mut CommonParams {
        &mut self.params
    }
}
