//! rolemap Client Library
//!
//! HTTP client for the role-mapping endpoints of a search cluster's security
//! REST API.
//!
//! ```rust,no_run
//! use rolemap_rs::CommonParamsExt;
//!
//! #[tokio::main]
//! async fn main() -> rolemap_rs::Result<()> {
//!     let client = rolemap_rs::connect("https://localhost:9200");
//!     let res = client.security().get_role_mappings().pretty().send().await?;
//!     println!("{}", res);
//!     Ok(())
//! }
//! ```

mod client;
mod transport;

pub use client::{connect, from_config, Client};
pub use transport::HttpTransport;
pub use rolemap_core::{
    CommonParamsExt, Config, Error, PatchOperation, Request, Response, Result, RoleMapping,
    Transport,
};
