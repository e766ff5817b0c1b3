use anyhow::{Context, Result};
use clap::Parser;

use rolemap_cli::cli::Cli;
use rolemap_cli::{commands, telemetry};
use rolemap_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let guard = telemetry::init_telemetry(&cli.log_dir)?;

    // Load configuration
    let mut config = if cli.config.exists() {
        Config::load(&cli.config.to_string_lossy())
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        tracing::warn!("{} not found, using defaults", cli.config.display());
        Config::default()
    };

    if let Some(url) = &cli.url {
        config.url = url.clone();
    }

    if cli.request.opaque_id.is_none() {
        cli.request.opaque_id = Some(format!("rolemap-{}", uuid::Uuid::new_v4()));
    }

    tracing::info!(
        url = %config.url,
        opaque_id = cli.request.opaque_id.as_deref().unwrap_or_default(),
        "Sending {:?}",
        cli.command
    );

    let client = rolemap_rs::from_config(&config)?;
    let response = commands::run(&client, &cli.command, &cli.request).await?;

    for warning in response.warnings() {
        tracing::warn!("Server warning: {}", warning);
    }

    println!("{}", response);

    let failed = response.is_error();
    if failed {
        tracing::error!(status = response.status_code, "Request returned an error status");
    }

    telemetry::shutdown_telemetry(guard);

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
