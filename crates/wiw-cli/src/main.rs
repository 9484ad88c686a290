//! wheniwork-mcp: the When I Work scheduling API as MCP tools over stdio.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use wiw_api::WhenIWorkClient;
use wiw_config::{CliOverrides, WiwConfig};
use wiw_mcp::McpServer;
use wiw_tools::ToolRegistry;
use wiw_types::ToolDefinition;

#[derive(Parser)]
#[command(
    name = "wheniwork-mcp",
    version,
    about = "MCP server for the When I Work scheduling API"
)]
struct Cli {
    /// Developer API key (overrides WHENIWORK_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Login email (overrides WHENIWORK_USERNAME)
    #[arg(long)]
    username: Option<String>,

    /// Login password (overrides WHENIWORK_PASSWORD)
    #[arg(long)]
    password: Option<String>,

    /// Pre-issued session token; skips the login call
    #[arg(long)]
    token: Option<String>,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Account to log in to, for users with several accounts
    #[arg(long)]
    account_id: Option<i64>,

    /// Enable verbose/debug logging
    #[arg(long)]
    verbose: bool,

    /// Print the tool catalogue and exit
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Existing environment variables win over .env entries.
    dotenvy::dotenv().ok();

    // Stdout carries protocol frames, so logs go to stderr.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_tools {
        print_catalogue(ToolRegistry::new().definitions());
        return Ok(());
    }

    let config = WiwConfig::load(CliOverrides {
        api_key: cli.api_key,
        username: cli.username,
        password: cli.password,
        token: cli.token,
        base_url: cli.base_url,
        account_id: cli.account_id,
    })
    .context("Invalid configuration")?;
    tracing::debug!(
        "Loaded configuration (config dir {})",
        config.config_dir.display()
    );

    let client =
        WhenIWorkClient::new(config.credentials).context("Failed to create API client")?;
    let server = McpServer::new(client);

    server.run_stdio().await.context("MCP transport failed")?;
    Ok(())
}

fn print_catalogue(definitions: &[ToolDefinition]) {
    for def in definitions {
        println!("{} - {}", def.name, def.description);
    }
}
