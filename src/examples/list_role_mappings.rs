//! List Role Mappings Example
//!
//! Fetches every role mapping, keeping only users and backend roles.
//!
//! Run with: cargo run --example list_role_mappings -- https://localhost:9200

use rolemap_rs::CommonParamsExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:9200".to_string());

    let client = rolemap_rs::connect(url);

    let response = client
        .security()
        .get_role_mappings()
        .pretty()
        .filter_path(["*.users", "*.backend_roles"])
        .send()
        .await?;

    println!("Status: {}", response.status_code);
    println!("{}", response.text());

    Ok(())
}
