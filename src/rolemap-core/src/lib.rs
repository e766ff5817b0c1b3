//! rolemap Core Library
//!
//! This crate provides the transport-agnostic parts of the role-mapping client:
//! - Request/response envelope and the `Transport` trait
//! - Builders for the create, get, patch and bulk upsert endpoints
//! - Shared diagnostic parameters and header handling
//! - Typed request payloads
//! - Client configuration

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod transport;

// Re-export commonly used types
pub use api::{
    BulkUpsertRoleMappings, CreateRoleMapping, GetRoleMapping, PatchRoleMapping, Security,
    ROLES_MAPPING_PATH,
};
pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};
pub use models::*;
pub use params::{CancelSignal, CommonParams, CommonParamsExt};
pub use transport::{Request, Response, Transport};
