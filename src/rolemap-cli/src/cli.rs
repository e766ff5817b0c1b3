use clap::{Args, Parser, Subcommand};
use http::{HeaderName, HeaderValue};
use std::path::PathBuf;

/// Manage security role mappings on a search cluster
#[derive(Debug, Parser)]
#[command(name = "rolemap", version, about)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, env = "ROLEMAP_CONFIG", default_value = "rolemap.json")]
    pub config: PathBuf,

    /// Cluster URL, overrides the configuration file
    #[arg(long, global = true, env = "ROLEMAP_URL")]
    pub url: Option<String>,

    /// Directory for rotated JSON log files
    #[arg(long, global = true, env = "ROLEMAP_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,

    #[command(flatten)]
    pub request: RequestArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags applied to every request
#[derive(Debug, Clone, Default, Args)]
pub struct RequestArgs {
    /// Pretty-print the response body
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Human-readable statistics
    #[arg(long, global = true)]
    pub human: bool,

    /// Include stack traces for errors
    #[arg(long, global = true)]
    pub error_trace: bool,

    /// Comma-separated response filter, e.g. `*.users,*.hosts`
    #[arg(long, global = true, value_delimiter = ',')]
    pub filter_path: Vec<String>,

    /// X-Opaque-Id for server-side correlation (generated when omitted)
    #[arg(long, global = true)]
    pub opaque_id: Option<String>,

    /// Abandon the request after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Extra header as `Name: value`, repeatable
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one role mapping, or all of them
    Get {
        name: Option<String>,
    },

    /// Create or replace a role mapping
    Create {
        name: String,

        /// Request body file, `-` for stdin
        #[arg(long, conflicts_with_all = ["users", "backend_roles", "hosts", "description"])]
        body: Option<String>,

        #[arg(long = "user")]
        users: Vec<String>,

        #[arg(long = "backend-role")]
        backend_roles: Vec<String>,

        #[arg(long = "host")]
        hosts: Vec<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Apply a JSON Patch to one role mapping
    Patch {
        name: String,

        /// JSON Patch file, `-` for stdin
        #[arg(long)]
        body: String,
    },

    /// Apply a JSON Patch across role mappings
    BulkUpsert {
        /// JSON Patch file, `-` for stdin
        #[arg(long)]
        body: String,
    },
}

fn parse_header(s: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| "header must be in 'Name: value' format".to_string())?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return Err("header name and value cannot be empty".to_string());
    }

    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| e.to_string())?;
    let value = HeaderValue::from_str(value).map_err(|e| e.to_string())?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let (name, value) = parse_header("Authorization: Basic abc").unwrap();
        assert_eq!(name, "authorization");
        assert_eq!(value, "Basic abc");

        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
        assert!(parse_header("bad name: x").is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rolemap",
            "get",
            "readall",
            "--pretty",
            "--filter-path",
            "*.users,*.hosts",
            "-H",
            "X-Team: search",
        ])
        .unwrap();

        assert!(cli.request.pretty);
        assert_eq!(cli.request.filter_path, vec!["*.users", "*.hosts"]);
        assert_eq!(cli.request.headers.len(), 1);
        assert!(matches!(cli.command, Command::Get { name: Some(ref n) } if n == "readall"));
    }

    #[test]
    fn test_create_body_conflicts_with_fields() {
        let result = Cli::try_parse_from([
            "rolemap", "create", "readall", "--body", "m.json", "--user", "alice",
        ]);
        assert!(result.is_err());
    }
}
