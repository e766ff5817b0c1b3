use rolemap_core::{Config, Result};

use crate::transport::HttpTransport;

/// Role-mapping REST API client over HTTP
pub type Client = rolemap_core::Client<HttpTransport>;

/// Connect to the cluster at `base_url` with default HTTP settings
pub fn connect(base_url: impl Into<String>) -> Client {
    Client::new(HttpTransport::new(base_url))
}

/// Build a client from a loaded configuration
pub fn from_config(config: &Config) -> Result<Client> {
    Ok(Client::new(HttpTransport::from_config(config)?))
}
