//! Bulk Upsert Example
//!
//! Creates two mappings and removes a third in a single PATCH, using a
//! client built from a configuration file.
//!
//! Run with: cargo run --example bulk_upsert -- rolemap.json

use rolemap_rs::{Config, PatchOperation, RoleMapping};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let client = rolemap_rs::from_config(&config)?;

    let reader = RoleMapping {
        users: vec!["dashboards_reader".to_string()],
        ..Default::default()
    };
    let ops = vec![
        PatchOperation::add("/readall", serde_json::to_value(&reader)?),
        PatchOperation::add("/kibana_user", json!({ "backend_roles": ["analysts"] })),
        PatchOperation::remove("/legacy_mapping"),
    ];

    let response = client
        .security()
        .bulk_upsert_role_mappings(serde_json::to_vec(&ops)?)
        .send()
        .await?;

    if response.is_error() {
        eprintln!("Bulk upsert failed: {}", response);
    } else {
        println!("Bulk upsert applied: {}", response.text());
    }

    Ok(())
}
