use http::Method;

use super::{dispatch, role_mapping_path};
use crate::error::Result;
use crate::params::{CommonParams, CommonParamsExt};
use crate::transport::{Request, Response, Transport};

/// Retrieves one role mapping by name, or all of them when no name is set.
pub struct GetRoleMapping<'a, T: ?Sized> {
    transport: &'a T,
    name: Option<String>,
    params: CommonParams,
}

impl<'a, T: Transport + ?Sized> GetRoleMapping<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            name: None,
            params: CommonParams::default(),
        }
    }

    /// Restrict the lookup to a single mapping. An empty name lists all.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn build(&self) -> Result<Request> {
        let mut request = Request::new(
            Method::GET,
            role_mapping_path(self.name.as_deref().unwrap_or_default()),
        );
        self.params.apply(&mut request)?;
        Ok(request)
    }

    pub async fn send(self) -> Result<Response> {
        let request = self.build()?;
        dispatch(self.transport, request, self.params.timeout, self.params.cancel).await
    }
}

impl<T: ?Sized> CommonParamsExt for GetRoleMapping<'_, T> {
    fn common_params(&mut self) -> &mut CommonParams {
        &mut self.params
    }
}
