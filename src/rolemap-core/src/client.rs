use crate::api::Security;
use crate::transport::Transport;

/// Role-mapping client over any [`Transport`]
pub struct Client<T> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Security plugin endpoints
    pub fn security(&self) -> Security<'_, T> {
        Security::new(&self.transport)
    }
}
