use anyhow::{Context, Result};
use std::io::Read;
use std::time::Duration;

use rolemap_core::{Client, CommonParamsExt, Response, RoleMapping, Transport};

use crate::cli::{Command, RequestArgs};

/// Run one subcommand against the cluster and return the raw response
pub async fn run<T: Transport>(
    client: &Client<T>,
    command: &Command,
    args: &RequestArgs,
) -> Result<Response> {
    let security = client.security();

    let response = match command {
        Command::Get { name } => {
            let builder = match name {
                Some(name) => security.get_role_mapping(name.as_str()),
                None => security.get_role_mappings(),
            };
            apply(builder, args).send().await?
        }
        Command::Create {
            name,
            body,
            users,
            backend_roles,
            hosts,
            description,
        } => {
            let body = match body {
                Some(source) => read_body(source)?,
                None => RoleMapping {
                    backend_roles: backend_roles.clone(),
                    hosts: hosts.clone(),
                    users: users.clone(),
                    description: description.clone(),
                }
                .to_body()?
                .to_vec(),
            };
            apply(security.create_role_mapping(name.as_str(), body), args)
                .send()
                .await?
        }
        Command::Patch { name, body } => {
            let body = read_body(body)?;
            apply(security.patch_role_mapping(name.as_str(), body), args)
                .send()
                .await?
        }
        Command::BulkUpsert { body } => {
            let body = read_body(body)?;
            apply(security.bulk_upsert_role_mappings(body), args)
                .send()
                .await?
        }
    };

    Ok(response)
}

fn apply<B: CommonParamsExt>(mut builder: B, args: &RequestArgs) -> B {
    if args.pretty {
        builder = builder.pretty();
    }
    if args.human {
        builder = builder.human();
    }
    if args.error_trace {
        builder = builder.error_trace();
    }
    if !args.filter_path.is_empty() {
        builder = builder.filter_path(args.filter_path.iter().cloned());
    }
    for (name, value) in &args.headers {
        builder = builder.header(name.clone(), value.clone());
    }
    if let Some(id) = &args.opaque_id {
        builder = builder.opaque_id(id.clone());
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.cancel_on(async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
}

/// Read a request body from a file, or stdin when `source` is `-`
fn read_body(source: &str) -> Result<Vec<u8>> {
    if source == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read body from stdin")?;
        Ok(buf)
    } else {
        std::fs::read(source).with_context(|| format!("Failed to read body from {}", source))
    }
}
