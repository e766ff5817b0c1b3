//! Map Backend Role Example
//!
//! Maps an LDAP group onto a role, then appends a user with a JSON Patch.
//!
//! Run with: cargo run --example map_backend_role

use rolemap_rs::{CommonParamsExt, PatchOperation, RoleMapping};
use serde_json::json;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = rolemap_rs::connect("http://localhost:9200");
    let security = client.security();

    let mapping = RoleMapping {
        backend_roles: vec!["cn=search-ops,ou=groups".to_string()],
        description: Some("Search operators".to_string()),
        ..Default::default()
    };

    let created = security
        .create_role_mapping("readall_and_monitor", mapping.to_body()?)
        .opaque_id("map-backend-role-example")
        .timeout(Duration::from_secs(10))
        .send()
        .await?;
    println!("Create: {}", created);

    let ops = vec![PatchOperation::add("/users", json!(["alice"]))];
    let patched = security
        .patch_role_mapping("readall_and_monitor", serde_json::to_vec(&ops)?)
        .send()
        .await?;
    println!("Patch: {}", patched);

    let current = security
        .get_role_mapping("readall_and_monitor")
        .pretty()
        .send()
        .await?;
    println!("Current: {}", current);

    Ok(())
}
